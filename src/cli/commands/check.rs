use anyhow::Result;

use super::{CommandKind, CommandResult, CommandSummary, helper::finish};
use crate::{
    cli::args::{CheckCommand, CheckRule},
    core::ProjectContext,
    issues::{Issue, ParseErrorIssue},
    rules::{check_missing_text_issues, check_unused_text_issues},
};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.args.common)?;
    let parsed = ctx.parsed();

    let checks = if cmd.checks.is_empty() {
        CheckRule::all()
    } else {
        cmd.checks.clone()
    };

    let mut all_issues: Vec<Issue> = Vec::new();
    for check in checks {
        match check {
            CheckRule::MissingText => {
                let issues = check_missing_text_issues(parsed);
                all_issues.extend(issues.into_iter().map(Issue::MissingText));
            }
            CheckRule::UnusedText => {
                let issues = check_unused_text_issues(parsed);
                all_issues.extend(issues.into_iter().map(Issue::UnusedText));
            }
        }
    }

    all_issues.extend(
        parsed
            .failures
            .iter()
            .map(|error| Issue::ParseError(ParseErrorIssue { error: error.clone() })),
    );

    Ok(finish(
        CommandKind::Check,
        CommandSummary::Check,
        all_issues,
        ctx.script_paths.len(),
        ctx.string_paths.len(),
    ))
}
