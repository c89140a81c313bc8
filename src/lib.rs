//! # unicode-emoji
//!
//! Parses the Unicode emoji data tables into emojis (code points plus display
//! name), caches the result in memory, and answers random-pick and name
//! search queries over it.
//!
//! ## Architecture
//!
//! - **codepoint**: hex code point decoding and `START..END` range expansion
//! - **parse**: line classification, the `emoji-test.txt` and
//!   `emoji-sequences.txt` record parsers, and the table parser
//! - **emoji**: the `Emoji` entry type
//! - **catalog**: load-once in-memory catalog with random and search
//! - **source**: bundled, file and HTTP table sources
//! - **error**: error types
//! - **config**: data source resolution for the CLI
//! - **cli**: command line definition
//! - **logging**: stderr backend for the `log` facade

pub mod catalog;
pub mod cli;
pub mod codepoint;
pub mod config;
pub mod emoji;
pub mod error;
pub mod logging;
pub mod parse;
pub mod source;

pub use catalog::Catalog;
pub use emoji::Emoji;
pub use error::{Error, Result};
pub use parse::TableFormat;
