//! Minimal stderr backend for the `log` facade used by the binary.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::io::Write;
use std::sync::Once;
use std::time::{SystemTime, UNIX_EPOCH};

pub const LOG_ENV: &str = "UNICODE_EMOJI_LOG";

/// Maps `-q`/`-v` counts onto a level filter; warnings are on by default.
pub fn level_from_flags(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Off;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// `UNICODE_EMOJI_LOG=debug` style override; unknown values are ignored.
pub fn level_from_env() -> Option<LevelFilter> {
    std::env::var(LOG_ENV).ok()?.trim().parse().ok()
}

#[derive(Debug, Clone, Copy)]
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    /// Installs the logger process-wide. Later calls only adjust the level.
    pub fn init(level: LevelFilter) {
        static INIT: Once = Once::new();

        INIT.call_once(|| {
            if log::set_boxed_logger(Box::new(Self::new(LevelFilter::Trace))).is_err() {
                eprintln!("[unicode-emoji] another logger is already installed");
            }
        });
        log::set_max_level(level);
    }

    fn format_record(record: &Record) -> String {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        format!(
            "{secs} [{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format_record(record);
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

impl Default for StderrLogger {
    fn default() -> Self {
        Self::new(Level::Warn.to_level_filter())
    }
}
