use std::path::PathBuf;

use crate::{cli::exit_status::ExitStatus, issues::Issue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Export,
    Check,
}

#[derive(Debug)]
pub enum CommandSummary {
    Export(ExportSummary),
    Check,
}

#[derive(Debug)]
pub struct ExportSummary {
    pub output_dir: PathBuf,
    /// `None` when parse failures stopped the export before anything was written.
    pub written: Option<ExportCounts>,
    /// Files left out because they failed to parse (`--keep-going`).
    pub skipped_files: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportCounts {
    pub dialog_sheets: usize,
    pub string_sheets: usize,
}

/// Result of running a dlgsheet command.
#[derive(Debug)]
pub struct CommandResult {
    pub kind: CommandKind,
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// Issues sorted by file and line.
    pub issues: Vec<Issue>,
    /// Number of files that failed to parse.
    pub parse_error_count: usize,
    pub dialogue_files_checked: usize,
    pub string_files_checked: usize,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        if self.error_count + self.warning_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
