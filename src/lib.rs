//! dlgsheet - WeiDU dialogue scripts to translator spreadsheets
//!
//! dlgsheet parses `.d` dialogue scripts and `.tra` string tables, joins every
//! spoken line with its text and writes one CSV sheet per script. It can also
//! check a project for parse errors, missing texts and unused texts.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Parsers, data model and project context
//! - `export`: CSV sheet generation
//! - `issues`: Issue type definitions and reporting
//! - `rules`: Checks run by `dlgsheet check`
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod export;
pub mod issues;
pub mod rules;
pub mod utils;
