//! Where GPX files come from.
//!
//! A [`TrackSource`] retrieves the raw text of one file by name. The loader
//! only ever asks for names from its configured list, so sources need no
//! listing capability.
//!
//! - [`DirectorySource`] - static asset folder on disk
//! - [`MemorySource`] - in-memory documents (tests, embedding)
//! - `HttpSource` - static files under a base URL (feature `http`)

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::error::{Result, RouteMapError};
use crate::LoadConfig;

/// Retrieval of GPX text by file name.
pub trait TrackSource: Send + Sync {
    /// Human readable location, used in log messages.
    fn location(&self) -> String;

    /// Check that the source as a whole can serve files.
    ///
    /// Called once before a load; an error here aborts the whole load
    /// instead of failing every file.
    fn check_available(&self) -> Result<()> {
        Ok(())
    }

    /// Retrieve the raw text of one file.
    fn fetch(&self, source_id: &str) -> Result<String>;
}

/// Files read from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TrackSource for DirectorySource {
    fn location(&self) -> String {
        self.root.display().to_string()
    }

    fn check_available(&self) -> Result<()> {
        if self.root.is_dir() {
            Ok(())
        } else {
            Err(RouteMapError::SourceUnavailable {
                location: self.location(),
                reason: "not a directory".to_string(),
            })
        }
    }

    fn fetch(&self, source_id: &str) -> Result<String> {
        let path = self.root.join(source_id.trim_start_matches('/'));
        fs::read_to_string(&path).map_err(|e| RouteMapError::Io {
            source_id: source_id.to_string(),
            source: e,
        })
    }
}

/// Documents held in memory, keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a document.
    pub fn insert(&mut self, source_id: impl Into<String>, text: impl Into<String>) {
        self.files.insert(source_id.into(), text.into());
    }

    /// Builder form of [`MemorySource::insert`].
    pub fn with_file(mut self, source_id: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(source_id, text);
        self
    }
}

impl TrackSource for MemorySource {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn fetch(&self, source_id: &str) -> Result<String> {
        self.files
            .get(source_id)
            .cloned()
            .ok_or_else(|| RouteMapError::Fetch {
                source_id: source_id.to_string(),
                reason: "not found".to_string(),
            })
    }
}

/// Static files served under a base URL.
#[cfg(feature = "http")]
pub struct HttpSource {
    base_url: String,
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpSource {
    /// Create a source for `base_url`. No request timeout unless one is given.
    pub fn new(base_url: &str, timeout: Option<std::time::Duration>) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RouteMapError::SourceUnavailable {
                location: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url_for(&self, source_id: &str) -> String {
        format!("{}/{}", self.base_url, source_id.trim_start_matches('/'))
    }
}

#[cfg(feature = "http")]
impl TrackSource for HttpSource {
    fn location(&self) -> String {
        self.base_url.clone()
    }

    fn check_available(&self) -> Result<()> {
        reqwest::Url::parse(&self.base_url)
            .map(|_| ())
            .map_err(|e| RouteMapError::SourceUnavailable {
                location: self.location(),
                reason: e.to_string(),
            })
    }

    fn fetch(&self, source_id: &str) -> Result<String> {
        let fetch_err = |reason: String| RouteMapError::Fetch {
            source_id: source_id.to_string(),
            reason,
        };

        let response = self
            .client
            .get(self.url_for(source_id))
            .send()
            .map_err(|e| fetch_err(format!("request error: {e}")))?;
        if !response.status().is_success() {
            return Err(fetch_err(format!("server responded with {}", response.status())));
        }
        response
            .text()
            .map_err(|e| fetch_err(format!("failed to read response: {e}")))
    }
}

/// Pick a source for a location string: an `http(s)://` URL when the `http`
/// feature is enabled, a directory otherwise.
pub fn open_source(location: &str, config: &LoadConfig) -> Result<Box<dyn TrackSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        return open_url_source(location, config);
    }
    Ok(Box::new(DirectorySource::new(location)))
}

#[cfg(feature = "http")]
fn open_url_source(location: &str, config: &LoadConfig) -> Result<Box<dyn TrackSource>> {
    let timeout = config.timeout_secs.map(std::time::Duration::from_secs);
    Ok(Box::new(HttpSource::new(location, timeout)?))
}

#[cfg(not(feature = "http"))]
fn open_url_source(location: &str, _config: &LoadConfig) -> Result<Box<dyn TrackSource>> {
    Err(RouteMapError::SourceUnavailable {
        location: location.to_string(),
        reason: "built without the `http` feature".to_string(),
    })
}
