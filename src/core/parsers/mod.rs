//! Line-oriented parsers.
//!
//! - `dialogue`: `.d` scripts → ordered [`Occurrence`](crate::core::Occurrence) list
//! - `strings`: `.tra` tables → [`StringTable`](crate::core::StringTable)
//!
//! Both read one line at a time from any `BufRead` and stop at the first
//! fatal error.

pub mod dialogue;
pub mod strings;
