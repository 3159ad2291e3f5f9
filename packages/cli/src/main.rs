#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the NYC Airbnb insights engine.
//!
//! Loads the listing table and the optional map layers once, applies the
//! filter selection from the config file and flags, and prints the
//! requested view as JSON on stdout. Any load failure aborts before
//! anything is printed.
//!
//! Uses `indicatif-log-bridge` (via [`airbnb_insights_cli_utils::init_logger`])
//! so that log lines and the load progress bar share the terminal.

mod config;

use std::path::{Path, PathBuf};

use airbnb_insights_analytics::{
    borough_consistency, build_dashboard, filter_listings, landmark_impact, landmark_impacts,
    score_listings, transit_correlation, validate_criteria,
};
use airbnb_insights_analytics_models::{DashboardOptions, LongitudeRange, MAX_HISTOGRAM_BINS};
use airbnb_insights_cli_utils::{IndicatifProgress, MultiProgress};
use airbnb_insights_landmark::{Landmark, load_landmarks, load_landmarks_with};
use airbnb_insights_listing_models::Listing;
use airbnb_insights_spatial::{BoroughIndex, SubwayLine};
use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;

use crate::config::DashboardConfig;

#[derive(Parser)]
#[command(name = "airbnb_insights", about = "NYC Airbnb listing insights")]
struct Cli {
    /// TOML config file with data paths and the initial filter selection
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Listing table CSV (overrides the config)
    #[arg(long, global = true)]
    listings: Option<PathBuf>,
    /// Subway line `GeoJSON` (overrides the config)
    #[arg(long, global = true)]
    subway: Option<PathBuf>,
    /// Borough boundary `GeoJSON` (overrides the config)
    #[arg(long, global = true)]
    borough_boundaries: Option<PathBuf>,
    /// Extra `[[landmark]]` TOML file (overrides the config)
    #[arg(long, global = true)]
    landmarks: Option<PathBuf>,
    /// Inclusive lower price bound
    #[arg(long, global = true)]
    price_min: Option<f64>,
    /// Inclusive upper price bound
    #[arg(long, global = true)]
    price_max: Option<f64>,
    /// Comma-separated borough names (e.g., "Manhattan,Staten Island")
    #[arg(long, global = true, value_delimiter = ',')]
    boroughs: Option<Vec<String>>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every dashboard view for the current selection
    Dashboard {
        /// Number of price histogram bins
        #[arg(long, value_parser = parse_bins)]
        bins: Option<usize>,
        /// Western edge of the longitude brush for neighbourhood averages
        #[arg(long, requires = "brush_max", allow_hyphen_values = true)]
        brush_min: Option<f64>,
        /// Eastern edge of the longitude brush for neighbourhood averages
        #[arg(long, requires = "brush_min", allow_hyphen_values = true)]
        brush_max: Option<f64>,
    },
    /// Print the filtered listings with their value scores
    Filter,
    /// Print the filtered listings inside each landmark's buffer zone
    Landmarks {
        /// Only report this landmark (e.g., "`central_park`")
        #[arg(long)]
        id: Option<String>,
        /// Buffer distance in degrees, replacing each landmark's own
        #[arg(long)]
        buffer: Option<f64>,
    },
    /// Print the price versus subway distance summary
    Transit,
    /// Cross-check listing borough labels against borough boundaries
    Boroughs,
}

/// Failures specific to the command line front end.
#[derive(Debug, Error)]
enum CliError {
    /// A command needs an input file that was not configured.
    #[error("The {command} command needs {what}; pass --{flag} or set it in the config")]
    MissingInput {
        command: &'static str,
        what: &'static str,
        flag: &'static str,
    },

    /// `--id` named a landmark that does not exist.
    #[error("Unknown landmark '{id}' (known: {known})")]
    UnknownLandmark { id: String, known: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = airbnb_insights_cli_utils::init_logger();
    let cli = Cli::parse();

    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    apply_overrides(&mut config, &cli);

    let criteria = config.criteria();
    validate_criteria(&criteria)?;

    match cli.command {
        Commands::Dashboard {
            bins,
            brush_min,
            brush_max,
        } => {
            let listings = load_listings(&multi, &config.listings)?;
            let landmarks = load_all_landmarks(config.extra_landmarks.as_deref())?;
            let subway_lines = match &config.subway_lines {
                Some(path) => airbnb_insights_ingest::load_subway_lines(path)?,
                None => {
                    log::warn!("No subway layer configured; transit view will be empty");
                    Vec::new()
                }
            };
            let options = DashboardOptions {
                histogram_bins: bins.unwrap_or(config.histogram_bins),
                longitude_brush: brush_min
                    .zip(brush_max)
                    .map(|(min, max)| LongitudeRange { min, max }),
            };

            let snapshot =
                build_dashboard(&listings, &criteria, &landmarks, &subway_lines, &options);
            print_json(&snapshot)?;
        }
        Commands::Filter => {
            let listings = load_listings(&multi, &config.listings)?;
            let filtered = filter_listings(&listings, &criteria);
            print_json(&score_listings(filtered))?;
        }
        Commands::Landmarks { id, buffer } => {
            let listings = load_listings(&multi, &config.listings)?;
            let landmarks = select_landmarks(
                load_all_landmarks(config.extra_landmarks.as_deref())?,
                id.as_deref(),
                buffer,
            )?;
            let filtered = filter_listings(&listings, &criteria);

            match (id.is_some(), landmarks.as_slice()) {
                (true, [landmark]) => print_json(&landmark_impact(filtered, landmark))?,
                _ => print_json(&landmark_impacts(&filtered, &landmarks))?,
            }
        }
        Commands::Transit => {
            let path = config
                .subway_lines
                .as_deref()
                .ok_or(CliError::MissingInput {
                    command: "transit",
                    what: "a subway line layer",
                    flag: "subway",
                })?;
            let subway_lines: Vec<SubwayLine> = airbnb_insights_ingest::load_subway_lines(path)?;
            let listings = load_listings(&multi, &config.listings)?;
            let filtered = filter_listings(&listings, &criteria);
            print_json(&transit_correlation(filtered, &subway_lines))?;
        }
        Commands::Boroughs => {
            let path = config
                .borough_boundaries
                .as_deref()
                .ok_or(CliError::MissingInput {
                    command: "boroughs",
                    what: "a borough boundary layer",
                    flag: "borough-boundaries",
                })?;
            let index = BoroughIndex::new(airbnb_insights_ingest::load_borough_boundaries(path)?);
            let listings = load_listings(&multi, &config.listings)?;
            let filtered = filter_listings(&listings, &criteria);
            print_json(&borough_consistency(filtered, &index))?;
        }
    }

    Ok(())
}

/// Accepts a histogram bin count in `1..=MAX_HISTOGRAM_BINS`.
fn parse_bins(value: &str) -> Result<usize, String> {
    let bins: usize = value.parse().map_err(|e| format!("{e}"))?;
    if (1..=MAX_HISTOGRAM_BINS).contains(&bins) {
        Ok(bins)
    } else {
        Err(format!("must be between 1 and {MAX_HISTOGRAM_BINS}"))
    }
}

/// Applies command line flags on top of the config file.
fn apply_overrides(config: &mut DashboardConfig, cli: &Cli) {
    if let Some(path) = &cli.listings {
        config.listings.clone_from(path);
    }
    if let Some(path) = &cli.subway {
        config.subway_lines = Some(path.clone());
    }
    if let Some(path) = &cli.borough_boundaries {
        config.borough_boundaries = Some(path.clone());
    }
    if let Some(path) = &cli.landmarks {
        config.extra_landmarks = Some(path.clone());
    }
    if let Some(min) = cli.price_min {
        config.price_min = min;
    }
    if let Some(max) = cli.price_max {
        config.price_max = max;
    }
    if let Some(boroughs) = &cli.boroughs {
        config.boroughs = boroughs.iter().map(|b| b.trim().to_string()).collect();
    }
}

fn load_listings(
    multi: &MultiProgress,
    path: &Path,
) -> Result<Vec<Listing>, airbnb_insights_ingest::IngestError> {
    let progress = IndicatifProgress::bytes_bar(multi, "Loading listings");
    airbnb_insights_ingest::load_listings_csv(path, progress.as_ref())
}

fn load_all_landmarks(
    extra: Option<&Path>,
) -> Result<Vec<Landmark>, Box<dyn std::error::Error>> {
    let landmarks = match extra {
        Some(path) => load_landmarks_with(&std::fs::read_to_string(path)?)?,
        None => load_landmarks()?,
    };
    log::info!("Loaded {} landmarks", landmarks.len());
    Ok(landmarks)
}

/// Narrows to one landmark by id and applies a buffer override.
fn select_landmarks(
    landmarks: Vec<Landmark>,
    id: Option<&str>,
    buffer: Option<f64>,
) -> Result<Vec<Landmark>, Box<dyn std::error::Error>> {
    let selected = match id {
        Some(id) => {
            let Some(landmark) = landmarks.iter().find(|l| l.id == id) else {
                return Err(CliError::UnknownLandmark {
                    id: id.to_string(),
                    known: landmarks
                        .iter()
                        .map(|l| l.id.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                }
                .into());
            };
            vec![landmark.clone()]
        }
        None => landmarks,
    };

    match buffer {
        Some(distance) => Ok(selected
            .iter()
            .map(|l| l.with_buffer(distance))
            .collect::<Result<_, _>>()?),
        None => Ok(selected),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use airbnb_insights_analytics_models::FilterCriteria;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("airbnb_insights").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn flags_override_config() {
        let cli = cli(&[
            "filter",
            "--price-min",
            "10",
            "--boroughs",
            "Queens, Staten Island",
            "--listings",
            "other.csv",
        ]);
        let mut config = DashboardConfig::default();
        apply_overrides(&mut config, &cli);

        assert!((config.price_min - 10.0).abs() < f64::EPSILON);
        assert!((config.price_max - 300.0).abs() < f64::EPSILON);
        assert_eq!(config.boroughs, ["Queens", "Staten Island"]);
        assert_eq!(config.listings, PathBuf::from("other.csv"));
        assert_eq!(
            config.criteria(),
            FilterCriteria::new(10.0, 300.0, ["Queens", "Staten Island"])
        );
    }

    #[test]
    fn brush_bounds_must_come_together() {
        let parsed = Cli::try_parse_from(["airbnb_insights", "dashboard", "--brush-min", "-74.0"]);
        assert!(parsed.is_err());

        let cli = cli(&[
            "dashboard",
            "--brush-min",
            "-74.0",
            "--brush-max",
            "-73.9",
        ]);
        assert!(matches!(
            cli.command,
            Commands::Dashboard {
                brush_min: Some(_),
                brush_max: Some(_),
                ..
            }
        ));
    }

    #[test]
    fn bins_flag_is_bounded() {
        let cli = cli(&["dashboard", "--bins", "25"]);
        assert!(matches!(cli.command, Commands::Dashboard { bins: Some(25), .. }));

        for bad in ["0", "1001", "18446744073709551615", "ten"] {
            let parsed = Cli::try_parse_from(["airbnb_insights", "dashboard", "--bins", bad]);
            assert!(parsed.is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn selects_one_landmark_with_buffer_override() {
        let landmarks = load_landmarks().unwrap();
        let selected = select_landmarks(landmarks, Some("central_park"), Some(0.05)).unwrap();

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "central_park");
        assert!((selected[0].zone.distance() - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_landmark_is_an_error() {
        let landmarks = load_landmarks().unwrap();
        let err = select_landmarks(landmarks, Some("empire_state"), None).unwrap_err();
        assert!(err.to_string().contains("empire_state"));
    }

    #[test]
    fn negative_buffer_override_is_rejected() {
        let landmarks = load_landmarks().unwrap();
        assert!(select_landmarks(landmarks, None, Some(-1.0)).is_err());
    }
}
