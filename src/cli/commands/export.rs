use anyhow::Result;

use super::{
    CommandKind, CommandResult, CommandSummary, ExportCounts, ExportSummary, helper::finish,
};
use crate::{
    cli::args::ExportCommand,
    core::ProjectContext,
    export::export_project,
    issues::{Issue, ParseErrorIssue},
};

/// Parse the project and write its sheets.
///
/// With parse failures nothing is written, unless `keep_going` is set; then
/// the failed files are left out. Either way the failures are reported and
/// the command exits with status 1.
pub fn export(cmd: ExportCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let mut ctx = ProjectContext::new(&args.common)?;

    if let Some(ref out_dir) = args.out_dir {
        ctx.config.output_dir = out_dir.to_string_lossy().to_string();
    }
    if let Some(ref locale) = args.locale {
        ctx.config.locale = locale.clone();
    }
    if args.keep_going {
        ctx.config.keep_going = true;
    }
    ctx.config.validate()?;

    let parsed = ctx.parsed();
    let output_dir = ctx.output_dir();
    let failed = parsed.failures.len();

    let written = if failed > 0 && !ctx.config.keep_going {
        log::info!("{} file(s) failed to parse, nothing written", failed);
        None
    } else {
        let report = export_project(parsed, &output_dir, &ctx.config.locale)?;
        if ctx.verbose {
            for sheet in report.dialog_sheets.iter().chain(&report.string_sheets) {
                eprintln!("wrote {}", sheet.display());
            }
        }
        Some(ExportCounts {
            dialog_sheets: report.dialog_sheets.len(),
            string_sheets: report.string_sheets.len(),
        })
    };

    let issues = parsed
        .failures
        .iter()
        .map(|error| Issue::ParseError(ParseErrorIssue { error: error.clone() }))
        .collect();

    Ok(finish(
        CommandKind::Export,
        CommandSummary::Export(ExportSummary {
            output_dir,
            skipped_files: if written.is_some() { failed } else { 0 },
            written,
        }),
        issues,
        ctx.script_paths.len(),
        ctx.string_paths.len(),
    ))
}
