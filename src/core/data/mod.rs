//! Core data types produced by the parsers.
//!
//! ## Module Structure
//!
//! - `occurrence`: Occurrence, OccurrenceKind, Target, TextId
//! - `string_table`: StringTable (identifier → text) and the missing-text placeholder
//! - `source`: Per-file containers (ScriptFile, StringFile) and canonical keys

pub mod occurrence;
pub mod source;
pub mod string_table;

pub use occurrence::{Occurrence, OccurrenceKind, Target, TextId};
pub use source::{ScriptFile, StringFile, canonical_key};
pub use string_table::{StringTable, missing_placeholder};
