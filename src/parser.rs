//! GPX document parsing.
//!
//! Turns the text of one GPX file into a [`Track`]. Name and description come
//! from the first `trk` element that carries them; points are every `trkpt`
//! of every track and segment in document order.
//!
//! Documents go through the `gpx` crate first. It validates the whole file,
//! so a document it rejects (missing `version`, odd `<time>` values, unknown
//! children) is read again with a lenient XML pass that only looks at
//! `trk > name`, `trk > desc` and the `lat`/`lon` of each `trkpt`. Only
//! malformed XML or unusable coordinates fail the file.

use gpx::Gpx;
use log::debug;
use roxmltree::{Document, Node};

use crate::error::{OptionExt, Result, RouteMapError};
use crate::{GpsPoint, Track};

/// Parse GPX text into a track.
///
/// # Example
/// ```
/// use routemap::parser::parse_gpx;
///
/// let text = r#"<?xml version="1.0" encoding="UTF-8"?>
/// <gpx version="1.1" creator="example">
///   <trk>
///     <name>Kennemerduinen</name>
///     <trkseg>
///       <trkpt lat="52.40" lon="4.58"></trkpt>
///       <trkpt lat="52.41" lon="4.59"></trkpt>
///     </trkseg>
///   </trk>
/// </gpx>"#;
///
/// let track = parse_gpx("116-kennemerduinen.gpx", text).unwrap();
/// assert_eq!(track.name(), "Kennemerduinen");
/// assert_eq!(track.points().len(), 2);
/// ```
pub fn parse_gpx(source_id: &str, text: &str) -> Result<Track> {
    match gpx::read(text.as_bytes()) {
        Ok(document) => track_from_document(source_id, document),
        Err(e) => {
            debug!("Strict GPX read of {} failed ({}), reading leniently", source_id, e);
            parse_gpx_lenient(source_id, text)
        }
    }
}

/// Build a track from an already parsed GPX document.
pub fn track_from_document(source_id: &str, document: Gpx) -> Result<Track> {
    document.tracks.first().ok_or_missing_track(source_id)?;

    let name = document.tracks.iter().find_map(|t| t.name.clone());
    let description = document.tracks.iter().find_map(|t| t.description.clone());

    let points: Vec<GpsPoint> = document
        .tracks
        .iter()
        .flat_map(|t| t.segments.iter())
        .flat_map(|s| s.points.iter())
        .map(|pt| {
            let p = pt.point();
            GpsPoint {
                latitude: p.y(),
                longitude: p.x(),
                elevation: pt.elevation,
            }
        })
        .collect();

    debug!(
        "Parsed {}: {} tracks, {} points",
        source_id,
        document.tracks.len(),
        points.len()
    );

    Ok(Track::new(source_id, name, description, points))
}

/// Read only the track fields from any well-formed XML document.
///
/// Element names are matched on their local name, so namespaced and
/// un-namespaced documents read the same way.
pub fn parse_gpx_lenient(source_id: &str, text: &str) -> Result<Track> {
    let doc = Document::parse(text).map_err(|e| RouteMapError::Parse {
        source_id: source_id.to_string(),
        reason: format!("XML parse error: {}", e),
    })?;

    let tracks: Vec<Node> = doc
        .descendants()
        .filter(|n| is_element(n, "trk"))
        .collect();
    tracks.first().ok_or_missing_track(source_id)?;

    let name = first_child_text(&tracks, "name");
    let description = first_child_text(&tracks, "desc");

    let points = doc
        .descendants()
        .filter(|n| is_element(n, "trkpt"))
        .map(|pt| parse_track_point(source_id, &pt))
        .collect::<Result<Vec<GpsPoint>>>()?;

    debug!(
        "Parsed {} leniently: {} tracks, {} points",
        source_id,
        tracks.len(),
        points.len()
    );

    Ok(Track::new(source_id, name, description, points))
}

fn is_element(node: &Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

/// Text of the first `<trk>/<child>` in document order.
fn first_child_text(tracks: &[Node], child: &str) -> Option<String> {
    tracks
        .iter()
        .flat_map(|t| t.children())
        .find(|n| is_element(n, child))
        .map(|n| {
            n.descendants()
                .filter(|d| d.is_text())
                .filter_map(|d| d.text())
                .collect()
        })
}

fn parse_track_point(source_id: &str, pt: &Node) -> Result<GpsPoint> {
    let coordinate = |attr: &str| -> Result<f64> {
        pt.attribute(attr)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .ok_or_parse(source_id, &format!("trkpt without a numeric {} attribute", attr))
    };

    let elevation = pt
        .children()
        .find(|n| is_element(n, "ele"))
        .and_then(|n| n.text())
        .and_then(|t| t.trim().parse::<f64>().ok());

    Ok(GpsPoint {
        latitude: coordinate("lat")?,
        longitude: coordinate("lon")?,
        elevation,
    })
}
