//! # Route Map
//!
//! Loads walking and cycling routes from GPX files and builds the render
//! model for an interactive map: one colored line per route with a popup
//! showing name, description, distance, estimated walking time, route ID and
//! endpoint coordinates.
//!
//! This library provides:
//! - GPX parsing into immutable [`Track`] records
//! - Haversine route length in kilometers
//! - Per-file isolated loading from a directory, memory or HTTP
//! - A [`TrackStore`] holding the current route set
//! - A [`MapView`] render model with GeoJSON output
//!
//! ## Features
//!
//! - **`parallel`** - Load files in parallel with rayon (default)
//! - **`http`** - Load files from a base URL
//! - **`synthetic`** - Synthetic GPX route sets for tests and benchmarks
//!
//! ## Quick Start
//!
//! ```rust
//! use routemap::{MapView, TrackStore, ViewConfig};
//! use routemap::source::MemorySource;
//!
//! let gpx = r#"<gpx version="1.1" creator="x"><trk><trkseg>
//!     <trkpt lat="0.0" lon="0.0"></trkpt>
//!     <trkpt lat="0.0" lon="1.0"></trkpt>
//! </trkseg></trk></gpx>"#;
//! let source = MemorySource::new().with_file("42-equator.gpx", gpx);
//!
//! let mut store = TrackStore::new();
//! store.reload(&source, &["42-equator.gpx".to_string()]).unwrap();
//!
//! let view = MapView::from_tracks(store.tracks(), &ViewConfig::default());
//! let popup = &view.layers[0].popup;
//! assert_eq!(popup.name, "42 Equator");
//! assert_eq!(popup.distance_km, 111.2);
//! assert_eq!(popup.walking_minutes, 1335);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

// Unified error handling
pub mod error;
pub use error::{OptionExt, Result, RouteMapError};

// Geographic utilities (haversine, bounds, center calculations)
pub mod geo_utils;

// Route length in kilometers
pub mod distance;
pub use distance::{calculate_route_distance_km, route_distance_km};

// Track record and file-name derived fields
pub mod track;
pub use track::{default_track_name, route_id, Track};

// GPX document parsing
pub mod parser;
pub use parser::parse_gpx;

// Where GPX files come from
pub mod source;
pub use source::{open_source, DirectorySource, MemorySource, TrackSource};

// Per-file isolated loading
pub mod loader;
pub use loader::{load_track, load_tracks, LoadFailure, LoadOutcome, LoadReport};

// Current route set
pub mod store;
pub use store::TrackStore;

// Render model for the map widget
pub mod view;
pub use view::{MapView, Popup, RouteLayer};

// Synthetic route sets for tests and benchmarks
#[cfg(feature = "synthetic")]
pub mod synthetic;

// ============================================================================
// Core Types
// ============================================================================

/// A GPS coordinate with latitude and longitude.
///
/// # Example
/// ```
/// use routemap::GpsPoint;
/// let point = GpsPoint::new(52.3874, 4.6462); // Haarlem
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation in meters, when the GPX has it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
}

impl GpsPoint {
    /// Create a new GPS point without elevation.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: None,
        }
    }

    /// Create a new GPS point with elevation.
    pub fn with_elevation(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: Some(elevation),
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// Bounding box for a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds from GPS points.
    pub fn from_points(points: &[GpsPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;

        for p in points {
            min_lat = min_lat.min(p.latitude);
            max_lat = max_lat.max(p.latitude);
            min_lng = min_lng.min(p.longitude);
            max_lng = max_lng.max(p.longitude);
        }

        Some(Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        })
    }

    /// Get the center point of the bounds.
    pub fn center(&self) -> GpsPoint {
        GpsPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// Smallest box covering both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_lat: self.min_lat.min(other.min_lat),
            max_lat: self.max_lat.max(other.max_lat),
            min_lng: self.min_lng.min(other.min_lng),
            max_lng: self.max_lng.max(other.max_lng),
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// The route files loaded by default, in display order.
pub const DEFAULT_ROUTE_FILES: [&str; 15] = [
    "116-kennemerduinen.gpx",
    "125-strabrechtsche-heide.gpx",
    "659-waterlinie-culemborg.gpx",
    "660-uiterwaarden-van-cortenoever.gpx",
    "661-schiedam-jeneverstad.gpx",
    "665-overijsselse-buitenplaatsen.gpx",
    "667-limburgs-plateau.gpx",
    "670-hierdense-poort.gpx",
    "673-eiland-van-dordrecht.gpx",
    "677-blauwe-kamer-rhenen.gpx",
    "1084-krickenbecker-seen.gpx",
    "1085-helderse-duinen.gpx",
    "1086-hart-van-het-groene-woud.gpx",
    "1087-gein-en-vecht.gpx",
    "1329-duinen-van-zoutelande.gpx",
];

/// Configuration for loading a route set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoadConfig {
    /// File names to load, in display order.
    /// Default: [`DEFAULT_ROUTE_FILES`]
    pub files: Vec<String>,

    /// Request timeout in seconds for the HTTP source.
    /// Default: None (a stalled request only stalls its own file)
    pub timeout_secs: Option<u64>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            files: DEFAULT_ROUTE_FILES.iter().map(|f| f.to_string()).collect(),
            timeout_secs: None,
        }
    }
}

/// Configuration for the map render model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewConfig {
    /// Initial map center. Default: 52.1326, 5.2913 (the Netherlands)
    pub center: GpsPoint,

    /// Initial zoom level. Default: 7
    pub zoom: u8,

    /// Tile URL template. Default: OpenStreetMap standard tiles
    pub tile_url: String,

    /// Tile attribution shown by the widget.
    pub attribution: String,

    /// Walking pace used for the time estimate, in minutes per kilometer.
    /// Default: 12.0
    pub minutes_per_km: f64,

    /// Line width in pixels. Default: 3
    pub line_weight: u32,

    /// Popup width in pixels. Default: 440
    pub popup_max_width: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            center: GpsPoint::new(52.1326, 5.2913),
            zoom: 7,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution:
                "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a>"
                    .to_string(),
            minutes_per_km: 12.0,
            line_weight: 3,
            popup_max_width: 440,
        }
    }
}

/// Both configuration sections as stored in one JSON document.
///
/// Missing sections and fields fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub load: LoadConfig,
    pub view: ViewConfig,
}

impl Config {
    /// Parse a JSON configuration document.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| RouteMapError::Config(e.to_string()))
    }

    /// Read and parse a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| RouteMapError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }
}
