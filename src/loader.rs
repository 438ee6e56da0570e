//! Track loading: retrieve and parse every configured file.
//!
//! Each file is handled independently. A failure to retrieve or parse one
//! file becomes a failed [`LoadOutcome`] for that file and is logged; the
//! other files are unaffected. Outcomes always come back in input order, so
//! filtering to successes is a stable filter.

use log::{debug, error, info};

use crate::error::{Result, RouteMapError};
use crate::parser::parse_gpx;
use crate::source::TrackSource;
use crate::Track;

/// Result of loading one file.
#[derive(Debug)]
pub struct LoadOutcome {
    /// File name that was requested
    pub source_id: String,
    pub result: Result<Track>,
}

impl LoadOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// A file that did not load, kept for diagnostics.
#[derive(Debug)]
pub struct LoadFailure {
    pub source_id: String,
    pub error: RouteMapError,
}

/// All per-file outcomes of one load, in input order.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub outcomes: Vec<LoadOutcome>,
}

impl LoadReport {
    /// Successfully loaded tracks, input order preserved.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    /// Failed files with their errors, input order preserved.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &RouteMapError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.source_id.as_str(), e)))
    }

    pub fn loaded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.loaded_count()
    }

    /// Consume the report, keeping only the successful tracks.
    pub fn into_tracks(self) -> Vec<Track> {
        self.into_parts().0
    }

    /// Split into successful tracks and failures, both in input order.
    pub fn into_parts(self) -> (Vec<Track>, Vec<LoadFailure>) {
        let mut tracks = Vec::with_capacity(self.outcomes.len());
        let mut failures = Vec::new();
        for outcome in self.outcomes {
            match outcome.result {
                Ok(track) => tracks.push(track),
                Err(error) => failures.push(LoadFailure {
                    source_id: outcome.source_id,
                    error,
                }),
            }
        }
        (tracks, failures)
    }
}

/// Retrieve and parse a single file.
pub fn load_track<S: TrackSource + ?Sized>(source: &S, source_id: &str) -> Result<Track> {
    let text = source.fetch(source_id)?;
    parse_gpx(source_id, &text)
}

fn load_outcome<S: TrackSource + ?Sized>(source: &S, source_id: &str) -> LoadOutcome {
    let result = load_track(source, source_id);
    match &result {
        Ok(track) => debug!(
            "Loaded {}: {} points, {} km",
            source_id,
            track.points().len(),
            track.distance_km()
        ),
        Err(e) => error!("Error loading {}: {}", source_id, e),
    }
    LoadOutcome {
        source_id: source_id.to_string(),
        result,
    }
}

/// Load every file in order, one after another.
pub fn load_tracks_sequential<S: TrackSource + ?Sized>(
    source: &S,
    source_ids: &[String],
) -> LoadReport {
    let outcomes = source_ids
        .iter()
        .map(|id| load_outcome(source, id))
        .collect();
    LoadReport { outcomes }
}

/// Load every file on the rayon pool. Outcomes keep input order.
#[cfg(feature = "parallel")]
pub fn load_tracks_parallel<S: TrackSource + ?Sized>(
    source: &S,
    source_ids: &[String],
) -> LoadReport {
    use rayon::prelude::*;

    let outcomes = source_ids
        .par_iter()
        .map(|id| load_outcome(source, id))
        .collect();
    LoadReport { outcomes }
}

/// Load a route set.
///
/// Fails as a whole only when the source itself is unavailable; per-file
/// failures are inside the returned report.
///
/// # Example
/// ```
/// use routemap::loader::load_tracks;
/// use routemap::source::MemorySource;
///
/// let gpx = r#"<gpx version="1.1" creator="x"><trk><trkseg>
///     <trkpt lat="52.0" lon="5.0"></trkpt>
///     <trkpt lat="52.0" lon="5.1"></trkpt>
/// </trkseg></trk></gpx>"#;
/// let source = MemorySource::new().with_file("1-a.gpx", gpx);
/// let files = vec!["1-a.gpx".to_string(), "2-missing.gpx".to_string()];
///
/// let report = load_tracks(&source, &files).unwrap();
/// assert_eq!(report.loaded_count(), 1);
/// assert_eq!(report.failed_count(), 1);
/// ```
pub fn load_tracks<S: TrackSource + ?Sized>(
    source: &S,
    source_ids: &[String],
) -> Result<LoadReport> {
    if let Err(e) = source.check_available() {
        error!("Error loading GPX files from {}: {}", source.location(), e);
        return Err(e);
    }

    #[cfg(feature = "parallel")]
    let report = load_tracks_parallel(source, source_ids);
    #[cfg(not(feature = "parallel"))]
    let report = load_tracks_sequential(source, source_ids);

    info!(
        "Loaded {} of {} tracks from {}",
        report.loaded_count(),
        source_ids.len(),
        source.location()
    );
    Ok(report)
}
