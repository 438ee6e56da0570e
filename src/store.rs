//! The current set of loaded tracks.
//!
//! One writer replaces the whole collection after a load completes; readers
//! only ever see a complete collection, never a partial load.

use log::{error, info};

use crate::error::{Result, RouteMapError};
use crate::geo_utils::union_bounds;
use crate::loader::{load_tracks, LoadFailure};
use crate::source::TrackSource;
use crate::{Bounds, Track};

/// Holder of the tracks handed to the map view.
#[derive(Debug, Default)]
pub struct TrackStore {
    tracks: Vec<Track>,
    generation: u64,
}

impl TrackStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks from the last successful load, in input order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Number of replacements so far. Starts at 0.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Look a track up by its file name.
    pub fn get(&self, source_id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.source_id() == source_id)
    }

    /// Look a track up by its route ID (file-name prefix).
    pub fn find_by_route_id(&self, route_id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.route_id() == route_id)
    }

    /// Like [`TrackStore::find_by_route_id`], but a miss is an error.
    pub fn route(&self, route_id: &str) -> Result<&Track> {
        self.find_by_route_id(route_id)
            .ok_or_else(|| RouteMapError::UnknownRoute {
                route_id: route_id.to_string(),
            })
    }

    /// Combined bounds of every stored track with points.
    pub fn bounds(&self) -> Option<Bounds> {
        union_bounds(self.tracks.iter().filter_map(|t| t.bounds()))
    }

    /// Replace the whole collection.
    pub fn replace(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        self.generation += 1;
    }

    /// Load `source_ids` from `source` and publish the successes.
    ///
    /// When the load fails as a whole the stored tracks stay as they were
    /// and the error is returned. Per-file failures only shrink the new
    /// collection and come back as the returned failures, in input order.
    pub fn reload<S: TrackSource + ?Sized>(
        &mut self,
        source: &S,
        source_ids: &[String],
    ) -> Result<Vec<LoadFailure>> {
        let report = match load_tracks(source, source_ids) {
            Ok(report) => report,
            Err(e) => {
                error!("Keeping {} previously loaded tracks: {}", self.tracks.len(), e);
                return Err(e);
            }
        };

        let (tracks, failures) = report.into_parts();
        info!("Publishing {} tracks", tracks.len());
        self.replace(tracks);
        Ok(failures)
    }
}
