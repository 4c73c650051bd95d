//! Parse errors shared by the dialogue and string-table parsers.
//!
//! Every error is fatal for the file it was raised in and carries the file
//! name and the 1-based line number where parsing stopped.

use thiserror::Error;

use super::data::TextId;

/// Broad classification of a [`ParseErrorKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorCategory {
    /// A line failed to match any legal shape for the current parser state.
    Structural,
    /// A captured token failed to parse as a text identifier.
    Value,
    /// The file contradicts itself (duplicate ids, dangling literals, ...).
    Consistency,
    /// The input could not be read.
    Input,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Structural => write!(f, "structural"),
            ErrorCategory::Value => write!(f, "value"),
            ErrorCategory::Consistency => write!(f, "consistency"),
            ErrorCategory::Input => write!(f, "input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("state defined before BEGIN")]
    StateBeforeDialogue,
    #[error("SAY outside state")]
    SayOutsideState,
    #[error("REPLY outside state")]
    ReplyOutsideState,
    #[error("invalid TraID in {context}: {value}")]
    InvalidTextId { context: &'static str, value: String },
    #[error("{keyword} in CHAIN body without preceding text")]
    AttachWithoutText { keyword: &'static str },
    #[error("CHAIN not closed before end of file")]
    UnterminatedChain,
    #[error("condition not closed before end of file")]
    UnterminatedCondition,
    #[error("expected numeric id after @")]
    ExpectedNumericId,
    #[error("invalid id number: {0}")]
    InvalidIdNumber(String),
    #[error("expected '=' after id")]
    ExpectedEquals,
    #[error("expected '~' or '\"' to start string literal")]
    ExpectedLiteral,
    #[error("duplicate string id @{0} in file")]
    DuplicateStringId(TextId),
    #[error("unterminated string literal for @{0}")]
    UnterminatedLiteral(TextId),
    #[error("read error: {0}")]
    Read(String),
}

impl ParseErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ParseErrorKind::StateBeforeDialogue
            | ParseErrorKind::SayOutsideState
            | ParseErrorKind::ReplyOutsideState
            | ParseErrorKind::ExpectedNumericId
            | ParseErrorKind::ExpectedEquals
            | ParseErrorKind::ExpectedLiteral => ErrorCategory::Structural,
            ParseErrorKind::InvalidTextId { .. } | ParseErrorKind::InvalidIdNumber(_) => {
                ErrorCategory::Value
            }
            ParseErrorKind::AttachWithoutText { .. }
            | ParseErrorKind::DuplicateStringId(_)
            | ParseErrorKind::UnterminatedLiteral(_)
            | ParseErrorKind::UnterminatedChain
            | ParseErrorKind::UnterminatedCondition => ErrorCategory::Consistency,
            ParseErrorKind::Read(_) => ErrorCategory::Input,
        }
    }
}

/// A fatal, location-tagged error for one input file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{file}:{line}: {kind}")]
pub struct ParseError {
    pub file: String,
    /// 1-based line number; 0 when the failure is not tied to a line.
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(file: impl Into<String>, line: usize, kind: ParseErrorKind) -> Self {
        Self {
            file: file.into(),
            line,
            kind,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}
