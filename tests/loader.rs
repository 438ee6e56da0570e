//! Tests for loader and sources

mod common;

use common::{dune_walk, gpx_document, route_files};
use routemap::loader::*;
use routemap::source::{open_source, DirectorySource, MemorySource, TrackSource};
use routemap::{LoadConfig, RouteMapError};
use std::fs;
use tempfile::tempdir;

fn write_route_dir(files: &[String], skip: Option<&str>) -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    for (i, file) in files.iter().enumerate() {
        if Some(file.as_str()) == skip {
            continue;
        }
        let offset = i as f64 * 0.01;
        let points: Vec<(f64, f64)> = dune_walk()
            .into_iter()
            .map(|(lat, lon)| (lat + offset, lon))
            .collect();
        fs::write(dir.path().join(file), gpx_document(None, None, &points)).unwrap();
    }
    dir
}

#[test]
fn test_all_files_load_in_order() {
    let files = route_files();
    let dir = write_route_dir(&files, None);
    let source = DirectorySource::new(dir.path());

    let report = load_tracks(&source, &files).unwrap();
    assert_eq!(report.loaded_count(), 15);
    assert_eq!(report.failed_count(), 0);

    let ids: Vec<&str> = report.tracks().map(|t| t.source_id()).collect();
    let expected: Vec<&str> = files.iter().map(String::as_str).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_one_missing_file_keeps_relative_order() {
    let files = route_files();
    let missing = "667-limburgs-plateau.gpx";
    let dir = write_route_dir(&files, Some(missing));
    let source = DirectorySource::new(dir.path());

    let report = load_tracks(&source, &files).unwrap();
    assert_eq!(report.loaded_count(), 14);
    assert_eq!(report.failed_count(), 1);

    let failures: Vec<&str> = report.failures().map(|(id, _)| id).collect();
    assert_eq!(failures, vec![missing]);
    assert!(matches!(
        report.failures().next().unwrap().1,
        RouteMapError::Io { .. }
    ));

    let expected: Vec<String> = files.iter().filter(|f| *f != missing).cloned().collect();
    let tracks = report.into_tracks();
    let ids: Vec<String> = tracks.iter().map(|t| t.source_id().to_string()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_parse_failure_is_isolated() {
    let source = MemorySource::new()
        .with_file("1-good.gpx", gpx_document(Some("Good"), None, &dune_walk()))
        .with_file("2-bad.gpx", "<gpx version=\"1.1\"><trk>")
        .with_file("3-good.gpx", gpx_document(Some("Also good"), None, &dune_walk()));
    let files: Vec<String> = ["1-good.gpx", "2-bad.gpx", "3-good.gpx"]
        .iter()
        .map(|f| f.to_string())
        .collect();

    let report = load_tracks(&source, &files).unwrap();
    let names: Vec<&str> = report.tracks().map(|t| t.name()).collect();
    assert_eq!(names, vec!["Good", "Also good"]);
    assert!(matches!(
        report.failures().next().unwrap().1,
        RouteMapError::Parse { .. }
    ));
}

#[test]
fn test_zero_successes_is_not_an_error() {
    let source = MemorySource::new();
    let report = load_tracks(&source, &route_files()).unwrap();
    assert_eq!(report.loaded_count(), 0);
    assert_eq!(report.failed_count(), 15);
    assert!(report.into_tracks().is_empty());
}

#[test]
fn test_unavailable_source_fails_whole_load() {
    let dir = tempdir().unwrap();
    let source = DirectorySource::new(dir.path().join("does-not-exist"));

    let err = load_tracks(&source, &route_files()).unwrap_err();
    assert!(matches!(err, RouteMapError::SourceUnavailable { .. }));
}

#[test]
fn test_sequential_matches_default_load() {
    let files = route_files();
    let dir = write_route_dir(&files, Some("116-kennemerduinen.gpx"));
    let source = DirectorySource::new(dir.path());

    let sequential = load_tracks_sequential(&source, &files).into_tracks();
    let default = load_tracks(&source, &files).unwrap().into_tracks();
    assert_eq!(sequential, default);
}

#[test]
fn test_load_single_track() {
    let source =
        MemorySource::new().with_file("5-one.gpx", gpx_document(None, None, &dune_walk()));
    let track = load_track(&source, "5-one.gpx").unwrap();
    assert_eq!(track.name(), "5 One");

    let err = load_track(&source, "6-none.gpx").unwrap_err();
    assert!(matches!(err, RouteMapError::Fetch { .. }));
}

#[test]
fn test_directory_source_root_relative_names() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("7-a.gpx"), "text").unwrap();
    let source = DirectorySource::new(dir.path());
    assert_eq!(source.fetch("/7-a.gpx").unwrap(), "text");
    assert!(source.check_available().is_ok());
}

#[test]
fn test_open_source_picks_directory() {
    let dir = tempdir().unwrap();
    let source = open_source(dir.path().to_str().unwrap(), &LoadConfig::default()).unwrap();
    assert!(source.check_available().is_ok());
}

#[cfg(not(feature = "http"))]
#[test]
fn test_open_source_rejects_urls_without_http() {
    let result = open_source("https://example.org/routes", &LoadConfig::default());
    assert!(matches!(
        result,
        Err(RouteMapError::SourceUnavailable { .. })
    ));
}

#[test]
fn test_into_parts_splits_in_order() {
    let source = MemorySource::new()
        .with_file("1-a.gpx", gpx_document(None, None, &dune_walk()))
        .with_file("3-c.gpx", "<gpx version=\"1.1\" creator=\"x\"></gpx>");
    let files: Vec<String> = ["1-a.gpx", "2-b.gpx", "3-c.gpx"]
        .iter()
        .map(|f| f.to_string())
        .collect();

    let (tracks, failures) = load_tracks(&source, &files).unwrap().into_parts();

    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].source_id(), "1-a.gpx");
    let failed: Vec<&str> = failures.iter().map(|f| f.source_id.as_str()).collect();
    assert_eq!(failed, vec!["2-b.gpx", "3-c.gpx"]);
    assert!(matches!(failures[0].error, RouteMapError::Fetch { .. }));
    assert!(matches!(failures[1].error, RouteMapError::MissingTrack { .. }));
}

#[cfg(feature = "http")]
mod http {
    use super::*;
    use routemap::source::HttpSource;
    use std::io::{BufRead, BufReader, Write};
    use std::net::{SocketAddr, TcpListener};
    use std::thread;

    /// Serve `requests` connections: `/1-a.gpx` gets a GPX body, anything
    /// else a 404.
    fn serve(requests: usize) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let body = gpx_document(None, None, &dune_walk());

        thread::spawn(move || {
            for stream in listener.incoming().take(requests) {
                let mut stream = stream.unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                loop {
                    let mut header = String::new();
                    reader.read_line(&mut header).unwrap();
                    if header.trim().is_empty() {
                        break;
                    }
                }

                let path = request_line.split_whitespace().nth(1).unwrap_or("");
                let response = if path == "/1-a.gpx" {
                    format!(
                        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    )
                } else {
                    "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                        .to_string()
                };
                stream.write_all(response.as_bytes()).unwrap();
            }
        });
        addr
    }

    #[test]
    fn test_http_source_loads_and_isolates_404() {
        let addr = serve(2);
        let source = HttpSource::new(&format!("http://{}/", addr), None).unwrap();
        let files = vec!["1-a.gpx".to_string(), "2-missing.gpx".to_string()];

        let report = load_tracks_sequential(&source, &files);

        assert!(report.outcomes[0].is_ok());
        let track = report.outcomes[0].result.as_ref().unwrap();
        assert_eq!(track.points().len(), dune_walk().len());
        match &report.outcomes[1].result {
            Err(RouteMapError::Fetch { source_id, reason }) => {
                assert_eq!(source_id, "2-missing.gpx");
                assert!(reason.contains("404"));
            }
            other => panic!("expected Fetch error, got {:?}", other),
        }
    }

    #[test]
    fn test_http_source_connection_refused_is_fetch_error() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let source = HttpSource::new(&format!("http://{}", addr), None).unwrap();

        let err = load_track(&source, "1-a.gpx").unwrap_err();
        assert!(matches!(err, RouteMapError::Fetch { .. }));
    }

    #[test]
    fn test_http_source_rejects_invalid_base_url() {
        let source = HttpSource::new("not a url", None).unwrap();
        assert!(matches!(
            source.check_available(),
            Err(RouteMapError::SourceUnavailable { .. })
        ));
        assert!(load_tracks(&source, &route_files()).is_err());
    }
}
