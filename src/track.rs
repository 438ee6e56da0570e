//! The loaded route record and the helpers that derive its display fields
//! from a source file name.

use serde::{Deserialize, Serialize};

use crate::distance::route_distance_km;
use crate::{Bounds, GpsPoint};

/// One loaded route: geometry plus descriptive metadata.
///
/// Built once per source file. Derived fields (distance, endpoints, bounds)
/// are computed in [`Track::new`] and the points are never mutated
/// afterwards, so every accessor is a plain read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    name: String,
    description: String,
    points: Vec<GpsPoint>,
    /// Kilometers, rounded to one decimal
    distance_km: f64,
    start_point: Option<GpsPoint>,
    end_point: Option<GpsPoint>,
    bounds: Option<Bounds>,
    source_id: String,
}

impl Track {
    /// Build a track, falling back to the name derived from `source_id`
    /// when `name` is missing or empty.
    ///
    /// # Example
    /// ```
    /// use routemap::{GpsPoint, Track};
    ///
    /// let track = Track::new(
    ///     "125-strabrechtsche-heide.gpx",
    ///     None,
    ///     None,
    ///     vec![GpsPoint::new(51.40, 5.60), GpsPoint::new(51.41, 5.61)],
    /// );
    /// assert_eq!(track.name(), "125 Strabrechtsche Heide");
    /// assert_eq!(track.description(), "");
    /// assert_eq!(track.route_id(), "125");
    /// ```
    pub fn new(
        source_id: &str,
        name: Option<String>,
        description: Option<String>,
        points: Vec<GpsPoint>,
    ) -> Self {
        let name = name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| default_track_name(source_id));
        let distance_km = route_distance_km(&points);

        Self {
            name,
            description: description.unwrap_or_default(),
            distance_km,
            start_point: points.first().copied(),
            end_point: points.last().copied(),
            bounds: Bounds::from_points(&points),
            points,
            source_id: source_id.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Empty when the source has no description.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn points(&self) -> &[GpsPoint] {
        &self.points
    }

    /// Path length in kilometers rounded to one decimal.
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn start_point(&self) -> Option<GpsPoint> {
        self.start_point
    }

    pub fn end_point(&self) -> Option<GpsPoint> {
        self.end_point
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// The file name this track was loaded from.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Display label taken from the file name, see [`route_id`].
    pub fn route_id(&self) -> &str {
        route_id(&self.source_id)
    }
}

/// Human readable name for a file without a `trk > name`.
///
/// Strips the `.gpx` extension, splits on `-`, upper-cases the first letter
/// of each word and joins the words with spaces.
pub fn default_track_name(source_id: &str) -> String {
    let stem = source_id.strip_suffix(".gpx").unwrap_or(source_id);
    stem.split('-')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Route identifier: everything before the first `-` of the file name.
///
/// A name without a hyphen is returned whole.
pub fn route_id(source_id: &str) -> &str {
    source_id.split('-').next().unwrap_or(source_id)
}
