//! Shared GPX fixtures for integration tests.

#![allow(dead_code)]

/// GPX 1.1 document with one track.
pub fn gpx_document(name: Option<&str>, desc: Option<&str>, points: &[(f64, f64)]) -> String {
    let mut trk = String::new();
    if let Some(name) = name {
        trk.push_str(&format!("<name>{}</name>", name));
    }
    if let Some(desc) = desc {
        trk.push_str(&format!("<desc>{}</desc>", desc));
    }
    trk.push_str("<trkseg>");
    for (lat, lon) in points {
        trk.push_str(&format!("<trkpt lat=\"{}\" lon=\"{}\"></trkpt>", lat, lon));
    }
    trk.push_str("</trkseg>");

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <gpx version=\"1.1\" creator=\"routemap-tests\" xmlns=\"http://www.topografix.com/GPX/1/1\">\
         <trk>{}</trk></gpx>",
        trk
    )
}

/// A short walk near Haarlem.
pub fn dune_walk() -> Vec<(f64, f64)> {
    vec![
        (52.4012, 4.5741),
        (52.4031, 4.5790),
        (52.4068, 4.5832),
        (52.4101, 4.5804),
    ]
}

/// The fifteen default route files.
pub fn route_files() -> Vec<String> {
    routemap::DEFAULT_ROUTE_FILES
        .iter()
        .map(|f| f.to_string())
        .collect()
}
