//! Missing text detection rule.
//!
//! Detects script lines whose id is not defined in the paired string table.
//! Scripts without a paired table are skipped: every id would be missing.

use crate::{
    core::{ParsedProject, ScriptFile, StringFile},
    issues::MissingTextIssue,
};

pub fn check_missing_text_issues(parsed: &ParsedProject) -> Vec<MissingTextIssue> {
    parsed
        .scripts
        .values()
        .filter_map(|script| {
            parsed
                .paired_strings(&script.key)
                .map(|strings| check_missing_text(script, strings))
        })
        .flatten()
        .collect()
}

/// Check one script against its string table.
///
/// Issues come out in script order; an id referenced twice is reported twice.
pub fn check_missing_text(script: &ScriptFile, strings: &StringFile) -> Vec<MissingTextIssue> {
    let script_path = script.path.display().to_string();
    let table_path = strings.path.display().to_string();

    script
        .occurrences
        .iter()
        .filter(|o| !strings.table.contains(o.text_id))
        .map(|o| MissingTextIssue {
            script_path: script_path.clone(),
            line: o.line,
            text_id: o.text_id,
            dialogue: o.dialogue.clone(),
            state: o.state.clone(),
            table_path: table_path.clone(),
        })
        .collect()
}
