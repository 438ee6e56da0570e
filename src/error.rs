//! Unified error type for track loading.
//!
//! Every per-file failure is carried as a [`RouteMapError`] inside a
//! [`LoadOutcome`](crate::loader::LoadOutcome), so a broken file never stops
//! the rest of the route set from loading.

use thiserror::Error;

/// Errors raised while retrieving, parsing or configuring routes.
#[derive(Debug, Error)]
pub enum RouteMapError {
    /// Transport failure for a single file (missing asset, HTTP status, network).
    #[error("failed to fetch {source_id}: {reason}")]
    Fetch { source_id: String, reason: String },

    /// File-system read failure for a single file.
    #[error("failed to read {source_id}: {source}")]
    Io {
        source_id: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid GPX.
    #[error("failed to parse {source_id}: {reason}")]
    Parse { source_id: String, reason: String },

    /// Valid GPX without any `trk` element.
    #[error("{source_id} contains no track")]
    MissingTrack { source_id: String },

    /// The source as a whole cannot serve files.
    #[error("track source {location} is unavailable: {reason}")]
    SourceUnavailable { location: String, reason: String },

    /// No loaded track carries the requested route ID.
    #[error("no loaded route with ID {route_id}")]
    UnknownRoute { route_id: String },

    /// Unreadable or invalid configuration document.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl RouteMapError {
    /// File name the error belongs to, if it is a per-file error.
    pub fn source_id(&self) -> Option<&str> {
        match self {
            Self::Fetch { source_id, .. }
            | Self::Io { source_id, .. }
            | Self::Parse { source_id, .. }
            | Self::MissingTrack { source_id } => Some(source_id),
            Self::SourceUnavailable { .. } | Self::UnknownRoute { .. } | Self::Config(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RouteMapError>;

/// Conversions from `Option` into loader errors.
pub trait OptionExt<T> {
    fn ok_or_missing_track(self, source_id: &str) -> Result<T>;
    fn ok_or_parse(self, source_id: &str, reason: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_missing_track(self, source_id: &str) -> Result<T> {
        self.ok_or_else(|| RouteMapError::MissingTrack {
            source_id: source_id.to_string(),
        })
    }

    fn ok_or_parse(self, source_id: &str, reason: &str) -> Result<T> {
        self.ok_or_else(|| RouteMapError::Parse {
            source_id: source_id.to_string(),
            reason: reason.to_string(),
        })
    }
}
