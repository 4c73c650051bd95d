//! Line-level scanning shared by both parsers.
//!
//! - `comment`: quote-aware `//` and `/* */` comment splitting
//! - `condition`: `~guard~` normalization

pub mod comment;
pub mod condition;

pub use comment::{CommentScanner, SplitLine};
pub use condition::normalize_condition;
