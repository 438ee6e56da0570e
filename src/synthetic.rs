//! Synthetic GPX route sets for tests and benchmarking.
//!
//! Generates deterministic walking routes as GPX documents, together with the
//! ground-truth points written into them, so loaders and distance code can be
//! checked against known input.
//!
//! Feature-gated behind `synthetic`, not included in production builds.
//!
//! # Example
//!
//! ```rust
//! use routemap::synthetic::SyntheticScenario;
//! use routemap::GpsPoint;
//!
//! let scenario = SyntheticScenario {
//!     origin: GpsPoint::new(52.13, 5.29),
//!     route_count: 5,
//!     route_length_meters: 2_000.0,
//!     point_spacing_meters: 20.0,
//!     named_fraction: 1.0,
//!     described_fraction: 0.5,
//!     seed: 42,
//! };
//!
//! let dataset = scenario.generate();
//! assert_eq!(dataset.routes.len(), 5);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

use crate::source::MemorySource;
use crate::GpsPoint;

/// Meters per degree of latitude (approximately constant).
const METERS_PER_DEG_LAT: f64 = 111_320.0;

/// Scenario configuration for generating a synthetic route set.
#[derive(Debug, Clone)]
pub struct SyntheticScenario {
    /// Area all routes start near.
    pub origin: GpsPoint,
    pub route_count: usize,
    pub route_length_meters: f64,
    pub point_spacing_meters: f64,
    /// Fraction of routes (0.0-1.0) that get a `trk > name`.
    pub named_fraction: f64,
    /// Fraction of routes (0.0-1.0) that get a `trk > desc`.
    pub described_fraction: f64,
    /// RNG seed for deterministic reproduction.
    pub seed: u64,
}

impl Default for SyntheticScenario {
    fn default() -> Self {
        Self {
            origin: GpsPoint::new(52.1326, 5.2913),
            route_count: 15,
            route_length_meters: 8_000.0,
            point_spacing_meters: 10.0,
            named_fraction: 0.8,
            described_fraction: 0.5,
            seed: 42,
        }
    }
}

/// One generated route file.
#[derive(Debug, Clone)]
pub struct SyntheticRoute {
    /// File name, `<route id>-<slug>.gpx`
    pub source_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Ground-truth points written into the document.
    pub points: Vec<GpsPoint>,
    /// GPX document text.
    pub gpx: String,
}

/// A complete synthetic route set.
#[derive(Debug, Clone)]
pub struct SyntheticDataset {
    pub routes: Vec<SyntheticRoute>,
}

impl SyntheticDataset {
    /// File names in generation order.
    pub fn source_ids(&self) -> Vec<String> {
        self.routes.iter().map(|r| r.source_id.clone()).collect()
    }

    /// Total points across all routes.
    pub fn total_points(&self) -> usize {
        self.routes.iter().map(|r| r.points.len()).sum()
    }

    /// An in-memory source serving every generated document.
    pub fn to_source(&self) -> MemorySource {
        let mut source = MemorySource::new();
        for route in &self.routes {
            source.insert(route.source_id.clone(), route.gpx.clone());
        }
        source
    }
}

const SLUG_WORDS: &[&str] = &[
    "duinen", "heide", "bos", "polder", "rivier", "veen", "kust", "dijk", "meer", "molen",
];

impl SyntheticScenario {
    /// Generate the dataset. Same scenario, same output.
    pub fn generate(&self) -> SyntheticDataset {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let routes = (0..self.route_count)
            .map(|i| self.generate_route(i, &mut rng))
            .collect();

        SyntheticDataset { routes }
    }

    fn generate_route(&self, index: usize, rng: &mut StdRng) -> SyntheticRoute {
        let route_id = 100 + index * 7;
        let first = SLUG_WORDS[rng.gen_range(0..SLUG_WORDS.len())];
        let second = SLUG_WORDS[rng.gen_range(0..SLUG_WORDS.len())];
        let source_id = format!("{}-{}-{}.gpx", route_id, first, second);

        let name = (rng.gen::<f64>() < self.named_fraction)
            .then(|| format!("Route {} {}", route_id, first));
        let description = (rng.gen::<f64>() < self.described_fraction)
            .then(|| format!("Synthetic walk through the {}", second));

        let heading = (index as f64) * (2.0 * PI / self.route_count.max(1) as f64);
        let points = self.generate_points(heading, rng);
        let gpx = write_gpx(name.as_deref(), description.as_deref(), &points);

        SyntheticRoute {
            source_id,
            name,
            description,
            points,
            gpx,
        }
    }

    /// Winding walk with realistic turns (max ~17deg heading change per step).
    fn generate_points(&self, initial_heading: f64, rng: &mut StdRng) -> Vec<GpsPoint> {
        let spacing = self.point_spacing_meters.max(1.0);
        let num_points = (self.route_length_meters / spacing).ceil() as usize;
        let mut points = Vec::with_capacity(num_points + 1);
        let mut heading = initial_heading;
        let mut current = self.origin;
        points.push(current);

        for i in 0..num_points {
            let base_turn = (i as f64 * 0.01).sin() * 0.15;
            heading += base_turn + rng.gen_range(-0.15..0.15);

            let dlat = meters_to_deg_lat(spacing * heading.sin());
            let dlng = meters_to_deg_lng(spacing * heading.cos(), current.latitude);
            current = GpsPoint::new(current.latitude + dlat, current.longitude + dlng);
            points.push(current);
        }

        points
    }
}

fn meters_to_deg_lat(meters: f64) -> f64 {
    meters / METERS_PER_DEG_LAT
}

fn meters_to_deg_lng(meters: f64, latitude: f64) -> f64 {
    let meters_per_deg_lng = METERS_PER_DEG_LAT * latitude.to_radians().cos();
    if meters_per_deg_lng.abs() < 1e-10 {
        return 0.0;
    }
    meters / meters_per_deg_lng
}

/// Serialize one track as a GPX 1.1 document.
pub fn write_gpx(name: Option<&str>, description: Option<&str>, points: &[GpsPoint]) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <gpx version=\"1.1\" creator=\"routemap-synthetic\" xmlns=\"http://www.topografix.com/GPX/1/1\">\n\
         \x20 <trk>\n",
    );
    if let Some(name) = name {
        out.push_str(&format!("    <name>{}</name>\n", escape_xml(name)));
    }
    if let Some(description) = description {
        out.push_str(&format!("    <desc>{}</desc>\n", escape_xml(description)));
    }
    out.push_str("    <trkseg>\n");
    for p in points {
        out.push_str(&format!(
            "      <trkpt lat=\"{:.7}\" lon=\"{:.7}\"></trkpt>\n",
            p.latitude, p.longitude
        ));
    }
    out.push_str("    </trkseg>\n  </trk>\n</gpx>\n");
    out
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
