//! Issue types reported by `dlgsheet check` and `dlgsheet export`.
//!
//! Each issue is self-contained: it carries everything the reporter needs to
//! print it without going back to the parsed project.

use std::cmp::Ordering;

use enum_dispatch::enum_dispatch;

use crate::core::{ParseError, TextId};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    ParseError,
    MissingText,
    UnusedText,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ParseError => write!(f, "parse-error"),
            Rule::MissingText => write!(f, "missing-text"),
            Rule::UnusedText => write!(f, "unused-text"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// A `.d` or `.tra` file that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub error: ParseError,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

/// A script line referencing an id its string table does not define.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTextIssue {
    pub script_path: String,
    pub line: usize,
    pub text_id: TextId,
    pub dialogue: String,
    pub state: String,
    pub table_path: String,
}

impl MissingTextIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingText
    }
}

/// A string-table entry its paired script never references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedTextIssue {
    pub table_path: String,
    pub text_id: TextId,
    pub text: String,
    pub script_path: String,
}

impl UnusedTextIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnusedText
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ParseError(ParseErrorIssue),
    MissingText(MissingTextIssue),
    UnusedText(UnusedTextIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::ParseError(_) => ParseErrorIssue::severity(),
            Issue::MissingText(_) => MissingTextIssue::severity(),
            Issue::UnusedText(_) => UnusedTextIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::ParseError(_) => ParseErrorIssue::rule(),
            Issue::MissingText(_) => MissingTextIssue::rule(),
            Issue::UnusedText(_) => UnusedTextIssue::rule(),
        }
    }
}

/// Order issues by file, then line. Ties keep their original order.
pub fn compare_issues(a: &Issue, b: &Issue) -> Ordering {
    let a = a.location();
    let b = b.location();
    a.path()
        .cmp(b.path())
        .then_with(|| a.line().cmp(&b.line()))
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Where an issue points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLocation<'a> {
    /// A specific line of a file.
    Line { path: &'a str, line: usize },
    /// A whole file.
    File { path: &'a str },
}

impl<'a> ReportLocation<'a> {
    pub fn path(&self) -> &'a str {
        match self {
            ReportLocation::Line { path, .. } | ReportLocation::File { path } => path,
        }
    }

    /// 0 for file-level locations.
    pub fn line(&self) -> usize {
        match self {
            ReportLocation::Line { line, .. } => *line,
            ReportLocation::File { .. } => 0,
        }
    }
}

/// Trait for types that can be reported to the CLI.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        if self.error.line == 0 {
            ReportLocation::File {
                path: &self.error.file,
            }
        } else {
            ReportLocation::Line {
                path: &self.error.file,
                line: self.error.line,
            }
        }
    }

    fn message(&self) -> String {
        self.error.kind.to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("{} error, file skipped", self.error.category()))
    }
}

impl Report for MissingTextIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Line {
            path: &self.script_path,
            line: self.line,
        }
    }

    fn message(&self) -> String {
        format!("@{}", self.text_id)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "{}:{} not defined in {}",
            self.dialogue, self.state, self.table_path
        ))
    }
}

impl Report for UnusedTextIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.table_path,
        }
    }

    fn message(&self) -> String {
        format!("@{}", self.text_id)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("({:?}) never used in {}", self.text, self.script_path))
    }
}
