//! Fetching the source table from a local path or a remote URL

use super::raw::RawTable;
use std::fmt;
use std::fs::File;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

/// Fetch errors
#[derive(Error, Debug)]
pub enum FetchError {
    /// Local file could not be opened or read
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Remote source unreachable or returned a failure status
    #[error("Cannot fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Source is not well-formed CSV
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Where the raw table comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// File on the local filesystem
    Local(PathBuf),
    /// `http://` or `https://` URL
    Remote(String),
}

impl SourceLocation {
    /// Classify a location string. `file://` URLs are treated as local paths.
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            SourceLocation::Remote(location.to_string())
        } else if let Some(path) = location.strip_prefix("file://") {
            SourceLocation::Local(PathBuf::from(path))
        } else {
            SourceLocation::Local(PathBuf::from(location))
        }
    }

    /// Dataset name: last path segment up to its first `.`
    ///
    /// `test/potd_0.csv` and `http://example.org/data/potd_0.csv?v=2` both
    /// yield `potd_0`.
    pub fn dataset_name(&self) -> String {
        let path = match self {
            SourceLocation::Local(path) => path.to_string_lossy().into_owned(),
            SourceLocation::Remote(url) => url
                .split(['?', '#'])
                .next()
                .unwrap_or_default()
                .to_string(),
        };
        let segment = path.rsplit(['/', '\\']).next().unwrap_or_default();
        segment.split('.').next().unwrap_or_default().to_string()
    }

    /// Read and parse the table. Any failure aborts; there is no retry.
    pub fn fetch(&self) -> FetchResult<RawTable> {
        info!("Fetching source table from {}", self);
        let table = match self {
            SourceLocation::Local(path) => {
                let file = File::open(path).map_err(|source| FetchError::Io {
                    path: path.clone(),
                    source,
                })?;
                RawTable::from_csv_reader(file)?
            }
            SourceLocation::Remote(url) => {
                let http_err = |source| FetchError::Http {
                    url: url.clone(),
                    source,
                };
                let response = reqwest::blocking::get(url)
                    .and_then(|r| r.error_for_status())
                    .map_err(http_err)?;
                let body = response.text().map_err(http_err)?;
                RawTable::from_csv_str(&body)?
            }
        };
        debug!("Fetched {} rows", table.len());
        Ok(table)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Local(path) => write!(f, "{}", path.display()),
            SourceLocation::Remote(url) => write!(f, "{}", url),
        }
    }
}
