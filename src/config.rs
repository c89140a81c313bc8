use std::env;
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::cli::Cli;
use crate::parse::TableFormat;
use crate::source::{EMOJI_TEST_URL, FileSource, HttpSource, SEQUENCES_URL, TextSource};

pub const SOURCE_ENV: &str = "UNICODE_EMOJI_SOURCE";

/// Shorthand accepted by `--source` for the official unicode.org table.
pub const UPSTREAM_ALIAS: &str = "unicode.org";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    Bundled,
    File(PathBuf),
    Url(String),
}

impl SourceSpec {
    pub fn parse(raw: &str, format: TableFormat) -> Self {
        let raw = raw.trim();
        if raw == UPSTREAM_ALIAS {
            return SourceSpec::Url(default_url(format).to_string());
        }
        if raw == "bundled" {
            return SourceSpec::Bundled;
        }
        if raw.starts_with("http://") || raw.starts_with("https://") {
            return SourceSpec::Url(raw.to_string());
        }
        SourceSpec::File(PathBuf::from(raw))
    }

    pub fn into_catalog(self, format: TableFormat) -> Catalog {
        match self {
            SourceSpec::Bundled => Catalog::new(TextSource::bundled(format), format),
            SourceSpec::File(path) => Catalog::new(FileSource::new(path), format),
            SourceSpec::Url(url) => Catalog::new(HttpSource::new(url), format),
        }
    }
}

/// `--source` wins, then `UNICODE_EMOJI_SOURCE`, then a table dropped into the
/// local data directory, then the bundled table.
pub fn resolve_source(cli: &Cli) -> SourceSpec {
    let from_env = env::var(SOURCE_ENV).ok();
    let local = local_table_path(cli.table);
    resolve_source_with(cli, from_env.as_deref(), local.as_deref())
}

fn resolve_source_with(cli: &Cli, from_env: Option<&str>, local: Option<&Path>) -> SourceSpec {
    if let Some(raw) = cli.source.as_deref() {
        return SourceSpec::parse(raw, cli.table);
    }

    if let Some(raw) = from_env.filter(|s| !s.trim().is_empty()) {
        return SourceSpec::parse(raw, cli.table);
    }

    if let Some(path) = local
        && path.exists()
    {
        return SourceSpec::File(path.to_path_buf());
    }

    SourceSpec::Bundled
}

pub fn default_url(format: TableFormat) -> &'static str {
    match format {
        TableFormat::EmojiTest => EMOJI_TEST_URL,
        TableFormat::Sequences => SEQUENCES_URL,
    }
}

pub fn local_table_path(format: TableFormat) -> Option<PathBuf> {
    Some(unicode_emoji_home()?.join(format.file_name()))
}

fn unicode_emoji_home() -> Option<PathBuf> {
    let base = dirs::data_local_dir()
        .or_else(dirs::cache_dir)
        .or_else(dirs::home_dir)?;
    Some(base.join("unicode-emoji"))
}
