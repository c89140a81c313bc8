//! Error types shared by the decoder, the table parser and the catalog.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A token, range or data line could not be turned into code points.
    #[error("invalid unicode code point: {input:?} because {cause}")]
    InvalidCodePoint {
        input: String,
        #[source]
        cause: Cause,
    },

    /// The table text itself could not be read.
    #[error("parsing emoji table failed: {0}")]
    ParsingFailed(#[source] std::io::Error),

    #[error("emoji source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("emoji catalog is empty")]
    EmptyCatalog,
}

impl Error {
    pub fn invalid(input: impl Into<String>, cause: Cause) -> Self {
        Self::InvalidCodePoint {
            input: input.into(),
            cause,
        }
    }

    pub fn is_invalid_code_point(&self) -> bool {
        matches!(self, Self::InvalidCodePoint { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Cause {
    #[error("{0}")]
    Hex(#[from] HexError),
    #[error("code point ranges are not supported here")]
    RangeNotSupported,
    #[error("it does not look like a code point range")]
    NotARange,
    #[error("range end {end:X} precedes start {start:X}")]
    ReversedRange { start: u32, end: u32 },
    #[error("it holds no code points")]
    NoCodePoints,
    #[error("the line has no ';' separated fields")]
    MissingField,
    #[error("the description has no emoji version tag")]
    MissingVersionTag,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("empty hex token")]
    Empty,
    #[error("invalid hex digit {0:?}")]
    InvalidDigit(char),
    #[error("value does not fit in 31 bits")]
    Overflow,
}
