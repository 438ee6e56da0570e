//! routemap CLI - load a route set and inspect what the map would show
//!
//! Usage:
//!   routemap-cli routes <location>
//!   routemap-cli popup <location> <route-id>
//!   routemap-cli geojson <location> [--output <file>]
//!
//! `<location>` is a folder holding the GPX files, or a base URL when built
//! with the `http` feature.

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use routemap::{open_source, Config, LoadFailure, MapView, Popup, RouteMapError, TrackStore};

#[derive(Parser)]
#[command(name = "routemap-cli")]
#[command(about = "Load GPX routes and show their map popups", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON configuration file (load and view sections)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Route file to load; repeat to replace the default list
    #[arg(short, long = "file", global = true)]
    files: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one summary line per loaded route
    Routes {
        /// Folder (or base URL) containing the GPX files
        location: String,
    },

    /// Print the popup of one route
    Popup {
        /// Folder (or base URL) containing the GPX files
        location: String,

        /// Route ID, the numeric prefix of the file name
        route_id: String,
    },

    /// Write the map render model as GeoJSON
    Geojson {
        /// Folder (or base URL) containing the GPX files
        location: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), RouteMapError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if !cli.files.is_empty() {
        config.load.files = cli.files.clone();
    }

    match &cli.command {
        Commands::Routes { location } => {
            let (store, failures) = load(location, &config)?;
            run_routes(&store, &failures, &config);
        }
        Commands::Popup { location, route_id } => {
            let (store, _) = load(location, &config)?;
            run_popup(&store, route_id, &config)?;
        }
        Commands::Geojson { location, output } => {
            let (store, _) = load(location, &config)?;
            run_geojson(&store, output.as_ref(), &config)?;
        }
    }
    Ok(())
}

fn load(
    location: &str,
    config: &Config,
) -> Result<(TrackStore, Vec<LoadFailure>), RouteMapError> {
    let source = open_source(location, &config.load)?;
    let mut store = TrackStore::new();
    let failures = store.reload(source.as_ref(), &config.load.files)?;
    Ok((store, failures))
}

/// Print one line per route, then the failures
fn run_routes(store: &TrackStore, failures: &[LoadFailure], config: &Config) {
    if store.is_empty() {
        println!("No routes loaded");
    }

    let view = MapView::from_tracks(store.tracks(), &config.view);
    for layer in &view.layers {
        let popup = &layer.popup;
        println!(
            "  [OK] {:>5}  {:<36} {:>6.1} km  {:>4} min  {}",
            popup.route_id, popup.name, popup.distance_km, popup.walking_minutes, layer.color
        );
    }

    for failure in failures {
        println!("  [ERR] {}: {}", failure.source_id, failure.error);
    }

    println!(
        "\nLoaded {} of {} routes",
        store.len(),
        config.load.files.len()
    );
}

fn run_popup(store: &TrackStore, route_id: &str, config: &Config) -> Result<(), RouteMapError> {
    let track = store.route(route_id)?;
    println!("{}", Popup::for_track(track, &config.view).to_text());
    Ok(())
}

fn run_geojson(
    store: &TrackStore,
    output: Option<&PathBuf>,
    config: &Config,
) -> Result<(), RouteMapError> {
    let view = MapView::from_tracks(store.tracks(), &config.view);
    let geojson = view.to_geojson();

    let write_err = |e: std::io::Error| RouteMapError::Io {
        source_id: output
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "stdout".to_string()),
        source: e,
    };

    match output {
        Some(path) => {
            let file = File::create(path).map_err(write_err)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &geojson)
                .map_err(|e| write_err(e.into()))?;
            writer.flush().map_err(write_err)?;
            log::info!("Wrote {} routes to {}", view.layers.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, &geojson)
                .map_err(|e| write_err(e.into()))?;
            writeln!(writer).map_err(write_err)?;
        }
    }
    Ok(())
}
