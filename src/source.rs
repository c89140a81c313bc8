//! Where the raw emoji table text comes from.
//!
//! The catalog only needs a readable stream; these sources provide it from
//! the tables bundled into the binary, from a local file, or from an HTTP GET
//! performed by `curl`.

use log::debug;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::PathBuf;
use std::process::Command;

use crate::error::{Error, Result};
use crate::parse::TableFormat;

pub const BUNDLED_EMOJI_TEST: &str = include_str!("../data/emoji-test.txt");
pub const BUNDLED_SEQUENCES: &str = include_str!("../data/emoji-sequences.txt");

pub const EMOJI_TEST_URL: &str = "https://www.unicode.org/Public/emoji/13.1/emoji-test.txt";
pub const SEQUENCES_URL: &str = "https://www.unicode.org/Public/emoji/13.1/emoji-sequences.txt";

pub trait TableSource: Send + Sync {
    /// Opens a fresh stream over the whole table.
    fn open(&self) -> Result<Box<dyn BufRead + '_>>;

    fn describe(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct TextSource {
    label: String,
    text: Cow<'static, str>,
}

impl TextSource {
    pub fn new(label: impl Into<String>, text: impl Into<Cow<'static, str>>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }

    pub fn bundled(format: TableFormat) -> Self {
        let text = match format {
            TableFormat::EmojiTest => BUNDLED_EMOJI_TEST,
            TableFormat::Sequences => BUNDLED_SEQUENCES,
        };
        Self::new(format!("bundled:{}", format.file_name()), text)
    }
}

impl TableSource for TextSource {
    fn open(&self) -> Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(Cursor::new(self.text.as_bytes())))
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TableSource for FileSource {
    fn open(&self) -> Result<Box<dyn BufRead + '_>> {
        let file = File::open(&self.path).map_err(|e| {
            Error::SourceUnavailable(format!("cannot open {}: {e}", self.path.display()))
        })?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fetches the table with `curl`. Anything but a `200 OK` is an error; there
/// are no retries.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    curl_bin: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        let curl_bin = std::env::var("UNICODE_EMOJI_CURL").unwrap_or_else(|_| "curl".to_string());
        Self {
            url: url.into(),
            curl_bin,
        }
    }

    pub fn with_curl(mut self, curl_bin: impl Into<String>) -> Self {
        self.curl_bin = curl_bin.into();
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn fetch(&self) -> Result<Vec<u8>> {
        debug!("fetching {} with {}", self.url, self.curl_bin);
        let output = Command::new(&self.curl_bin)
            .args([
                "--location",
                "--silent",
                "--show-error",
                "--write-out",
                "%{http_code}",
                self.url.as_str(),
            ])
            .output()
            .map_err(|e| {
                Error::SourceUnavailable(format!("failed to execute {}: {e}", self.curl_bin))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::SourceUnavailable(format!(
                "request to {:?} failed: {}",
                self.url,
                stderr.trim()
            )));
        }

        let (body, status) = split_status_trailer(output.stdout).ok_or_else(|| {
            Error::SourceUnavailable(format!("no status code in response from {:?}", self.url))
        })?;
        if status != 200 {
            return Err(Error::SourceUnavailable(format!(
                "got {status}, expected 200 OK from {:?}",
                self.url
            )));
        }
        Ok(body)
    }
}

impl TableSource for HttpSource {
    fn open(&self) -> Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(Cursor::new(self.fetch()?)))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

// curl appends the three digit status code after the body.
fn split_status_trailer(mut stdout: Vec<u8>) -> Option<(Vec<u8>, u16)> {
    let at = stdout.len().checked_sub(3)?;
    let status = std::str::from_utf8(&stdout[at..]).ok()?.parse::<u16>().ok()?;
    stdout.truncate(at);
    Some((stdout, status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn split_status_trailer_separates_body() {
        let (body, status) = split_status_trailer(b"hello\n200".to_vec()).unwrap();
        assert_eq!(body, b"hello\n");
        assert_eq!(status, 200);

        let (body, status) = split_status_trailer(b"404".to_vec()).unwrap();
        assert!(body.is_empty());
        assert_eq!(status, 404);

        assert!(split_status_trailer(b"20".to_vec()).is_none());
        assert!(split_status_trailer(b"body".to_vec()).is_none());
    }

    #[test]
    fn bundled_tables_are_not_empty() -> Result<()> {
        for format in [TableFormat::EmojiTest, TableFormat::Sequences] {
            let source = TextSource::bundled(format);
            let mut text = String::new();
            source
                .open()?
                .read_to_string(&mut text)
                .map_err(Error::ParsingFailed)?;
            assert!(text.lines().count() > 10);
            assert!(source.describe().ends_with(format.file_name()));
        }
        Ok(())
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let source = FileSource::new(PathBuf::from("/nonexistent/unicode-emoji/emoji-test.txt"));
        assert!(matches!(source.open(), Err(Error::SourceUnavailable(_))));
    }

    #[test]
    fn missing_curl_is_source_unavailable() {
        let source = HttpSource::new(EMOJI_TEST_URL).with_curl("/nonexistent/bin/curl");
        assert!(matches!(source.fetch(), Err(Error::SourceUnavailable(_))));
    }

    #[cfg(unix)]
    mod fake_curl {
        use super::*;
        use std::fs;
        use std::time::{SystemTime, UNIX_EPOCH};

        fn temp_dir(name: &str) -> PathBuf {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos();
            std::env::temp_dir().join(format!(
                "unicode_emoji_source_test_{}_{}_{}",
                std::process::id(),
                nanos,
                name
            ))
        }

        fn write_script(dir: &std::path::Path, body: &str) -> anyhow::Result<PathBuf> {
            use std::os::unix::fs::PermissionsExt;

            fs::create_dir_all(dir)?;
            let path = dir.join("curl");
            fs::write(&path, body)?;
            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&path, perms)?;
            Ok(path)
        }

        #[test]
        fn fetch_returns_body_on_200() -> anyhow::Result<()> {
            let dir = temp_dir("ok");
            let curl = write_script(
                &dir,
                "#!/bin/sh\nprintf '1F600 ; fully-qualified # x E1.0 grinning face\\n'\nprintf '200'\n",
            )?;

            let source = HttpSource::new("https://example.invalid/emoji-test.txt")
                .with_curl(curl.to_string_lossy());
            let mut text = String::new();
            source.open()?.read_to_string(&mut text)?;
            assert_eq!(text, "1F600 ; fully-qualified # x E1.0 grinning face\n");

            let _ = fs::remove_dir_all(dir);
            Ok(())
        }

        #[test]
        fn fetch_rejects_non_200() -> anyhow::Result<()> {
            let dir = temp_dir("not_found");
            let curl = write_script(&dir, "#!/bin/sh\nprintf 'Not Found'\nprintf '404'\n")?;

            let source = HttpSource::new("https://example.invalid/missing.txt")
                .with_curl(curl.to_string_lossy());
            let err = source.fetch().unwrap_err();
            assert!(matches!(err, Error::SourceUnavailable(_)));
            assert!(err.to_string().contains("got 404"));

            let _ = fs::remove_dir_all(dir);
            Ok(())
        }

        #[test]
        fn fetch_reports_transport_errors() -> anyhow::Result<()> {
            let dir = temp_dir("transport");
            let curl = write_script(
                &dir,
                "#!/bin/sh\necho 'curl: (6) Could not resolve host' >&2\nexit 6\n",
            )?;

            let source = HttpSource::new("https://example.invalid/emoji-test.txt")
                .with_curl(curl.to_string_lossy());
            let err = source.fetch().unwrap_err();
            assert!(err.to_string().contains("Could not resolve host"));

            let _ = fs::remove_dir_all(dir);
            Ok(())
        }
    }
}
