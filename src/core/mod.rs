//! Parsing engine.
//!
//! ## Module Structure
//!
//! - `scan`: line-level comment and guard handling
//! - `parsers`: the `.d` and `.tra` parsers
//! - `data`: occurrences, string tables and per-file containers
//! - `error`: typed parse errors
//! - `file_scanner`: `.d`/`.tra` discovery
//! - `context`: configuration, discovery and parallel parsing for one project

pub mod context;
pub mod data;
pub mod error;
pub mod file_scanner;
pub mod parsers;
pub mod scan;

pub use context::{ParsedProject, ProjectContext};
pub use data::{
    Occurrence, OccurrenceKind, ScriptFile, StringFile, StringTable, Target, TextId,
    canonical_key, missing_placeholder,
};
pub use error::{ErrorCategory, ParseError, ParseErrorKind};
