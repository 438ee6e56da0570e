//! Render model for the map view.
//!
//! The map widget itself (tiles, pan/zoom, popup display) lives outside this
//! crate. [`MapView`] is everything it needs: one colored line per track with
//! its popup content, plus the initial viewport. It serializes to a GeoJSON
//! `FeatureCollection` that Leaflet or MapLibre can draw as-is.

use geo::{Coord, LineString};
use serde::Serialize;
use serde_json::{json, Value};

use crate::distance::walking_minutes;
use crate::geo_utils::union_bounds;
use crate::{Bounds, GpsPoint, Track, ViewConfig};

/// Popup content for one route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Popup {
    pub name: String,
    /// `None` when the track has no description
    pub description: Option<String>,
    pub distance_km: f64,
    pub walking_minutes: u32,
    pub route_id: String,
    /// "lat, lon" with 4 decimals; `None` for a track without points
    pub start: Option<String>,
    pub end: Option<String>,
}

impl Popup {
    pub fn for_track(track: &Track, config: &ViewConfig) -> Self {
        let description = Some(track.description())
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Self {
            name: track.name().to_string(),
            description,
            distance_km: track.distance_km(),
            walking_minutes: walking_minutes(track.distance_km(), config.minutes_per_km),
            route_id: track.route_id().to_string(),
            start: track.start_point().map(|p| format_coordinate(&p)),
            end: track.end_point().map(|p| format_coordinate(&p)),
        }
    }

    /// Popup as plain text, one line per field.
    pub fn to_text(&self) -> String {
        let mut lines = vec![self.name.clone()];
        if let Some(description) = &self.description {
            lines.push(description.clone());
        }
        lines.push(format!("Distance: {} km", self.distance_km));
        lines.push(format!(
            "Estimated walking time: {} minutes",
            self.walking_minutes
        ));
        lines.push(format!("Route ID: {}", self.route_id));
        if let Some(start) = &self.start {
            lines.push(format!("Start coordinates: {}", start));
        }
        if let Some(end) = &self.end {
            lines.push(format!("End coordinates: {}", end));
        }
        lines.join("\n")
    }
}

/// One track as drawn on the map.
#[derive(Debug, Clone)]
pub struct RouteLayer {
    /// Stable identity: the track's file name
    pub key: String,
    pub line: LineString<f64>,
    pub color: String,
    pub weight: u32,
    pub popup: Popup,
}

/// Everything the map widget needs to draw the route set.
#[derive(Debug, Clone)]
pub struct MapView {
    pub center: GpsPoint,
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
    pub popup_max_width: u32,
    /// Combined bounds of all tracks, `None` when nothing has points
    pub bounds: Option<Bounds>,
    pub layers: Vec<RouteLayer>,
}

impl MapView {
    /// Build the render model. Colors are spread evenly over the hue circle
    /// by position in `tracks`.
    pub fn from_tracks(tracks: &[Track], config: &ViewConfig) -> Self {
        let count = tracks.len();
        let layers = tracks
            .iter()
            .enumerate()
            .map(|(index, track)| RouteLayer {
                key: track.source_id().to_string(),
                line: to_line_string(track.points()),
                color: route_color(index, count),
                weight: config.line_weight,
                popup: Popup::for_track(track, config),
            })
            .collect();

        Self {
            center: config.center,
            zoom: config.zoom,
            tile_url: config.tile_url.clone(),
            attribution: config.attribution.clone(),
            popup_max_width: config.popup_max_width,
            bounds: union_bounds(tracks.iter().filter_map(|t| t.bounds())),
            layers,
        }
    }

    pub fn layer(&self, key: &str) -> Option<&RouteLayer> {
        self.layers.iter().find(|l| l.key == key)
    }

    /// GeoJSON `FeatureCollection`, one `LineString` feature per layer.
    ///
    /// Coordinates are `[lon, lat]` as GeoJSON requires.
    pub fn to_geojson(&self) -> Value {
        let features: Vec<Value> = self
            .layers
            .iter()
            .map(|layer| {
                let coordinates: Vec<[f64; 2]> =
                    layer.line.coords().map(|c| [c.x, c.y]).collect();
                json!({
                    "type": "Feature",
                    "id": layer.key,
                    "geometry": {
                        "type": "LineString",
                        "coordinates": coordinates,
                    },
                    "properties": {
                        "color": layer.color,
                        "weight": layer.weight,
                        "routeId": layer.popup.route_id,
                        "name": layer.popup.name,
                        "description": layer.popup.description,
                        "distanceKm": layer.popup.distance_km,
                        "walkingMinutes": layer.popup.walking_minutes,
                        "start": layer.popup.start,
                        "end": layer.popup.end,
                    },
                })
            })
            .collect();

        let bbox = self
            .bounds
            .map(|b| json!([b.min_lng, b.min_lat, b.max_lng, b.max_lat]));

        json!({
            "type": "FeatureCollection",
            "bbox": bbox,
            "view": {
                "center": [self.center.latitude, self.center.longitude],
                "zoom": self.zoom,
                "tileUrl": self.tile_url,
                "attribution": self.attribution,
                "popupMaxWidth": self.popup_max_width,
            },
            "features": features,
        })
    }
}

/// `hsl(index * 360 / count, 70%, 50%)`.
pub fn route_color(index: usize, count: usize) -> String {
    let hue = if count == 0 {
        0.0
    } else {
        (index * 360) as f64 / count as f64
    };
    format!("hsl({}, 70%, 50%)", hue)
}

/// `"lat, lon"` with four decimals.
pub fn format_coordinate(point: &GpsPoint) -> String {
    format!("{:.4}, {:.4}", point.latitude, point.longitude)
}

fn to_line_string(points: &[GpsPoint]) -> LineString<f64> {
    LineString::new(
        points
            .iter()
            .map(|p| Coord {
                x: p.longitude,
                y: p.latitude,
            })
            .collect(),
    )
}
