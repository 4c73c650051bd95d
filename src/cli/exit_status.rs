use std::process::ExitCode;

/// Process exit status.
///
/// - `Success` (0): all files parsed and no issues found
/// - `Failure` (1): issues found or files failed to parse
/// - `Error` (2): the run itself failed (bad config, missing root, I/O error)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
