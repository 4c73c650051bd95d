//! Rule implementations for `dlgsheet check`.
//!
//! Pure functions over a [`ParsedProject`](crate::core::ParsedProject), each
//! returning one issue type.
//!
//! - `missing_text`: script ids absent from the paired string table
//! - `unused_text`: string-table ids the paired script never references

pub mod missing_text;
pub mod unused_text;

pub use missing_text::check_missing_text_issues;
pub use unused_text::check_unused_text_issues;
