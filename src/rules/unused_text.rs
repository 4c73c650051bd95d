//! Unused text detection rule.
//!
//! Detects string-table entries never referenced by the paired script.
//! Tables without a script are exported as `TRA_ONLY` sheets and not reported.

use crate::{
    core::{ParsedProject, ScriptFile, StringFile},
    issues::UnusedTextIssue,
};

pub fn check_unused_text_issues(parsed: &ParsedProject) -> Vec<UnusedTextIssue> {
    parsed
        .scripts
        .values()
        .filter_map(|script| {
            parsed
                .paired_strings(&script.key)
                .map(|strings| check_unused_text(script, strings))
        })
        .flatten()
        .collect()
}

/// Ids of `strings` that `script` never references, ascending.
pub fn check_unused_text(script: &ScriptFile, strings: &StringFile) -> Vec<UnusedTextIssue> {
    let used = script.referenced_ids();
    let script_path = script.path.display().to_string();
    let table_path = strings.path.display().to_string();

    strings
        .table
        .iter()
        .filter(|(id, _)| !used.contains(id))
        .map(|(id, text)| UnusedTextIssue {
            table_path: table_path.clone(),
            text_id: id,
            text: text.to_string(),
            script_path: script_path.clone(),
        })
        .collect()
}
