//! Retrieval of the curated spreadsheet as CSV bytes, from a URL or a local file.

use anyhow::{anyhow, Result};
use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Google Sheets document holding the curated off-label indications.
pub const DEFAULT_SHEET_ID: &str = "1fCykLEgAd2Z7nC9rTcW296KtBsFBBZMD8Yghcwv4WaE";
pub const DEFAULT_SHEET_NAME: &str = "Load";
pub const DEFAULT_SOURCE: &str = "https://docs.google.com/spreadsheets/d/1fCykLEgAd2Z7nC9rTcW296KtBsFBBZMD8Yghcwv4WaE/gviz/tq?tqx=out:csv&sheet=Load";

/// CSV export URL of one sheet of a Google Sheets document.
pub fn sheet_csv_url(doc_id: &str, sheet: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{doc_id}/gviz/tq?tqx=out:csv&sheet={sheet}")
}

#[derive(Serialize, Deserialize, Hash, Clone, Eq, PartialEq, Debug)]
pub enum CsvSource {
    #[serde(rename = "file")]
    File(PathBuf),
    #[serde(rename = "url")]
    Url(String),
}

impl std::fmt::Display for CsvSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CsvSource::File(p) => write!(f, "file://{}", p.display()),
            CsvSource::Url(u) => write!(f, "{}", u),
        }
    }
}

impl std::str::FromStr for CsvSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow!("Empty CSV source"));
        }
        if let Some(path) = s.strip_prefix("file://") {
            return Ok(CsvSource::File(PathBuf::from(path)));
        }
        match Url::parse(s) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                Ok(CsvSource::Url(s.to_string()))
            }
            Ok(url) => Err(anyhow!("Unsupported URL scheme '{}' in {}", url.scheme(), s)),
            // not a URL: treat as a path
            Err(_) => Ok(CsvSource::File(PathBuf::from(s))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Overall network timeout applied to the HTTP request.
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

/// Reads the full CSV body. A non-success HTTP status is an error.
pub fn fetch_csv(source: &CsvSource, opts: &FetchOptions) -> Result<Vec<u8>> {
    match source {
        CsvSource::File(path) => {
            debug!("Reading CSV from {}", path.display());
            std::fs::read(path).map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))
        }
        CsvSource::Url(url) => {
            info!("Downloading CSV from {url}");
            let client = Client::builder().timeout(opts.timeout).build()?;
            let resp = client.get(url).header(ACCEPT, "text/csv").send()?;
            let status = resp.status();
            if !status.is_success() {
                return Err(anyhow!("Failed to download {url}: HTTP {status}"));
            }
            let bytes = resp.bytes()?.to_vec();
            debug!("Downloaded {} bytes", bytes.len());
            Ok(bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_source_from_str() {
        assert!(matches!(
            CsvSource::from_str(DEFAULT_SOURCE).unwrap(),
            CsvSource::Url(_)
        ));
        assert_eq!(
            CsvSource::from_str("data/rows.csv").unwrap(),
            CsvSource::File(PathBuf::from("data/rows.csv"))
        );
        assert_eq!(
            CsvSource::from_str("file:///tmp/rows.csv").unwrap(),
            CsvSource::File(PathBuf::from("/tmp/rows.csv"))
        );
        assert!(CsvSource::from_str("ftp://example.org/rows.csv").is_err());
        assert!(CsvSource::from_str("  ").is_err());
    }

    #[test]
    fn test_default_source_is_load_sheet() {
        assert_eq!(
            sheet_csv_url(DEFAULT_SHEET_ID, DEFAULT_SHEET_NAME),
            DEFAULT_SOURCE
        );
    }

    #[test]
    fn test_fetch_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        std::fs::write(&path, "a,b\n1,2\n").unwrap();
        let bytes = fetch_csv(&CsvSource::File(path), &FetchOptions::default()).unwrap();
        assert_eq!(bytes, b"a,b\n1,2\n");
    }

    #[test]
    fn test_fetch_missing_file_fails() {
        let source = CsvSource::File(PathBuf::from("/nonexistent/rows.csv"));
        assert!(fetch_csv(&source, &FetchOptions::default()).is_err());
    }
}
