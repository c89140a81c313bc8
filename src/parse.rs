use clap::ValueEnum;
use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::BufRead;
use std::sync::LazyLock;

use crate::codepoint::{RANGE_DELIMITER, decode_code_points, expand_range};
use crate::emoji::Emoji;
use crate::error::{Cause, Error, Result};

const QUALIFIED_PREFIXES: [&str; 2] = ["fully-qualified", "component"];

// "... # ⏰ E0.6 alarm clock": everything after the version tag is the name.
static VERSION_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"E\d+\.\d+ ").expect("version tag pattern is valid"));

/// Layout of the Unicode data file being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TableFormat {
    /// `emoji-test.txt`: qualified sequences with names.
    #[default]
    EmojiTest,
    /// `emoji-sequences.txt`: code points and ranges, no names.
    Sequences,
}

impl TableFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            TableFormat::EmojiTest => "emoji-test.txt",
            TableFormat::Sequences => "emoji-sequences.txt",
        }
    }

    /// Parses one data line into zero or more emojis.
    pub fn parse_line(self, line: &str) -> Result<Vec<Emoji>> {
        match self {
            TableFormat::EmojiTest => parse_test_line(line),
            TableFormat::Sequences => parse_sequence_line(line),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Comment,
    Blank,
    Data,
}

pub fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        LineKind::Blank
    } else if trimmed.starts_with('#') {
        LineKind::Comment
    } else {
        LineKind::Data
    }
}

/// Pulls the display name out of an `emoji-test.txt` description such as
/// `fully-qualified     # ⏰ E0.6 alarm clock`.
pub fn extract_name(description: &str) -> Result<&str> {
    let tag = VERSION_TAG
        .find(description)
        .ok_or_else(|| Error::invalid(description, Cause::MissingVersionTag))?;
    Ok(&description[tag.end()..])
}

fn parse_test_line(line: &str) -> Result<Vec<Emoji>> {
    let (code_points, rest) = line
        .split_once(';')
        .ok_or_else(|| Error::invalid(line, Cause::MissingField))?;

    let qualification = rest.trim();
    if !QUALIFIED_PREFIXES
        .iter()
        .any(|prefix| qualification.starts_with(prefix))
    {
        return Ok(Vec::new());
    }

    let code_points = decode_code_points(code_points.trim())?;
    let name = extract_name(rest)?;
    Ok(vec![Emoji::new(code_points, name)])
}

fn parse_sequence_line(line: &str) -> Result<Vec<Emoji>> {
    let (code_points, _) = line
        .split_once(';')
        .ok_or_else(|| Error::invalid(line, Cause::MissingField))?;
    let code_points = code_points.trim();

    if !code_points.contains(RANGE_DELIMITER) {
        return Ok(vec![Emoji::unnamed(decode_code_points(code_points)?)]);
    }

    // every code point of a range is an emoji of its own
    Ok(expand_range(code_points)?
        .into_iter()
        .map(|cp| Emoji::unnamed(vec![cp]))
        .collect())
}

#[derive(Debug, Clone)]
pub struct ParsedTable {
    pub entries: Vec<Emoji>,
    pub skipped_lines: usize,
    pub content_hash: String,
}

/// Parses a whole table. Bad data lines are logged and skipped; only a
/// failure to read `reader` aborts the parse.
pub fn parse_table<R: BufRead>(reader: R, format: TableFormat) -> Result<ParsedTable> {
    let mut entries = Vec::new();
    let mut skipped_lines = 0usize;
    let mut hasher = Sha256::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(Error::ParsingFailed)?;
        hasher.update(line.as_bytes());
        hasher.update(b"\n");

        if classify_line(&line) != LineKind::Data {
            continue;
        }

        match format.parse_line(&line) {
            Ok(parsed) => entries.extend(parsed),
            Err(err) => {
                warn!("skipping line {}: {err}", idx + 1);
                skipped_lines += 1;
            }
        }
    }

    debug!(
        "parsed {} emojis from {} table ({skipped_lines} lines skipped)",
        entries.len(),
        format.file_name()
    );
    Ok(ParsedTable {
        entries,
        skipped_lines,
        content_hash: hex::encode(hasher.finalize()),
    })
}
