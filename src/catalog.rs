//! The in-process emoji catalog.
//!
//! A `Catalog` parses its table on first use and keeps the result for the
//! rest of its life. The populate step runs under `load_lock`; once the
//! entries are published in the `OnceLock` every read is lock-free. A failed
//! load publishes nothing, so the next call tries again.

use log::{debug, info};
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::emoji::Emoji;
use crate::error::{Error, Result};
use crate::parse::{ParsedTable, TableFormat, parse_table};
use crate::source::{TableSource, TextSource};

pub struct Catalog {
    source: Box<dyn TableSource>,
    format: TableFormat,
    loaded: OnceLock<ParsedTable>,
    load_lock: Mutex<()>,
    load_count: AtomicUsize,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("source", &self.source.describe())
            .field("format", &self.format)
            .field("loaded", &self.loaded.get().map(|t| t.entries.len()))
            .finish()
    }
}

impl Catalog {
    pub fn new(source: impl TableSource + 'static, format: TableFormat) -> Self {
        Self {
            source: Box::new(source),
            format,
            loaded: OnceLock::new(),
            load_lock: Mutex::new(()),
            load_count: AtomicUsize::new(0),
        }
    }

    /// Catalog over the table compiled into the crate.
    pub fn bundled(format: TableFormat) -> Self {
        Self::new(TextSource::bundled(format), format)
    }

    pub fn format(&self) -> TableFormat {
        self.format
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Number of completed table parses. Stays at one after a successful load.
    pub fn load_count(&self) -> usize {
        self.load_count.load(Ordering::SeqCst)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }

    pub fn all(&self) -> Result<&[Emoji]> {
        Ok(self.table()?.entries.as_slice())
    }

    /// Loads the table if needed and returns it with its parse metadata.
    pub fn table(&self) -> Result<&ParsedTable> {
        if let Some(table) = self.loaded.get() {
            return Ok(table);
        }

        // A poisoned lock guards no data; the OnceLock is still consistent.
        let _guard = self.load_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = self.loaded.get() {
            debug!("emoji table loaded by a concurrent caller");
            return Ok(table);
        }

        let table = self.load()?;
        Ok(self.loaded.get_or_init(|| table))
    }

    fn load(&self) -> Result<ParsedTable> {
        debug!("loading emoji table from {}", self.source.describe());
        let reader = self.source.open()?;
        let parsed = parse_table(reader, self.format)?;
        self.load_count.fetch_add(1, Ordering::SeqCst);
        info!(
            "loaded {} emojis from {}",
            parsed.entries.len(),
            self.source.describe()
        );
        Ok(parsed)
    }

    pub fn random(&self) -> Result<&Emoji> {
        self.random_with(&mut rand::thread_rng())
    }

    pub fn random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&Emoji> {
        let entries = self.all()?;
        if entries.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        Ok(&entries[rng.gen_range(0..entries.len())])
    }

    /// Case-insensitive substring search over names, in catalog order.
    /// A blank query matches nothing.
    pub fn search(&self, query: &str) -> Result<Vec<&Emoji>> {
        let entries = self.all()?;
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let needle = query.to_lowercase();
        Ok(entries
            .iter()
            .filter(|e| e.name().to_lowercase().contains(&needle))
            .collect())
    }
}
