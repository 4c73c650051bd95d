use super::{CommandKind, CommandResult, CommandSummary};
use crate::issues::{Issue, Severity, compare_issues};

pub fn finish(
    kind: CommandKind,
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    dialogue_files_checked: usize,
    string_files_checked: usize,
) -> CommandResult {
    issues.sort_by(compare_issues);

    let parse_error_count = issues
        .iter()
        .filter(|i| matches!(i, Issue::ParseError(_)))
        .count();
    let error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    CommandResult {
        kind,
        summary,
        error_count,
        warning_count,
        issues,
        parse_error_count,
        dialogue_files_checked,
        string_files_checked,
    }
}
