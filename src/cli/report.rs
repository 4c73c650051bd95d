//! Report formatting and printing utilities.
//!
//! Issues are printed in cargo style; command summaries follow them.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary, ExportSummary};
use crate::issues::{Issue, Report, Severity, compare_issues};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort_by(compare_issues);

    for issue in &sorted {
        print_issue(issue, writer);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(dialogue_files: usize, string_files: usize) {
    print_success_to(dialogue_files, string_files, &mut io::stdout().lock());
}

pub fn print_success_to<W: Write>(dialogue_files: usize, string_files: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} dialogue {}, {} string {} - no issues found",
            dialogue_files,
            plural(dialogue_files, "file", "files"),
            string_files,
            plural(string_files, "table", "tables"),
        )
        .green()
    );
}

/// Print a warning about files that could not be parsed.
pub fn print_parse_warning(count: usize, verbose: bool) {
    print_parse_warning_to(count, verbose, &mut io::stderr().lock());
}

pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

pub fn print_export_to<W: Write>(summary: &ExportSummary, writer: &mut W) {
    match summary.written {
        Some(counts) => {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!(
                    "Wrote {} dialogue {} and {} string {} to {}",
                    counts.dialog_sheets,
                    plural(counts.dialog_sheets, "sheet", "sheets"),
                    counts.string_sheets,
                    plural(counts.string_sheets, "sheet", "sheets"),
                    summary.output_dir.display()
                )
                .green()
            );
            if summary.skipped_files > 0 {
                let _ = writeln!(
                    writer,
                    "{} {} file(s) left out because they failed to parse",
                    "warning:".bold().yellow(),
                    summary.skipped_files
                );
            }
        }
        None => {
            let _ = writeln!(
                writer,
                "{} Nothing written (use {} to export the files that parsed)",
                FAILURE_MARK.red(),
                "--keep-going".cyan()
            );
        }
    }
}

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Check => {
            report(&result.issues);
            if result.issues.is_empty() {
                print_success(result.dialogue_files_checked, result.string_files_checked);
            }
        }
        CommandSummary::Export(summary) => {
            report(&result.issues);
            print_export_to(summary, &mut io::stdout().lock());
        }
    }

    // The verbose run already listed each failing file.
    print_parse_warning(result.parse_error_count, verbose);
}

// ============================================================
// Internal Functions
// ============================================================

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    let loc = issue.location();
    if loc.line() > 0 {
        let _ = writeln!(writer, "  {} {}:{}", "-->".blue(), loc.path(), loc.line());
    } else {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), loc.path());
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(writer, "   {} {} {}", "=".blue(), "note:".bold(), details);
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} {} ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        plural(issues.len(), "problem", "problems"),
        total_errors,
        plural(total_errors, "error", "errors").red(),
        total_warnings,
        plural(total_warnings, "warning", "warnings").yellow()
    );
}

// ============================================================
// Tests
// ============================================================
