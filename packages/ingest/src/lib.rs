#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Ingestion boundary for the Airbnb insights engine.
//!
//! Reads the listing table (CSV) and the two auxiliary `GeoJSON` layers
//! (borough boundaries and subway lines) from local files. Everything past
//! this crate works on validated, typed rows: a required field that is
//! absent or unparseable fails the whole load here, before any filtering.

pub mod layers;
pub mod listings;
pub mod progress;

pub use layers::{
    load_borough_boundaries, load_subway_lines, parse_borough_boundaries, parse_subway_lines,
};
pub use listings::{REQUIRED_COLUMNS, load_listings_csv, parse_listings_csv};

use thiserror::Error;

/// Errors that can occur while loading input data.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Reading an input file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// `GeoJSON` parsing or geometry conversion failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// A required column is absent from the CSV header.
    #[error("Missing required column '{field}'")]
    MissingColumn {
        /// Column name.
        field: &'static str,
    },

    /// A required field is empty in a data row.
    #[error("Missing required field '{field}' in row {row}")]
    MissingField {
        /// Column name.
        field: &'static str,
        /// 1-based data row number (header excluded).
        row: u64,
    },

    /// A field is present but cannot be used.
    #[error("Invalid value '{value}' for field '{field}' in row {row}: {reason}")]
    InvalidValue {
        /// Column name.
        field: &'static str,
        /// 1-based data row number (header excluded).
        row: u64,
        /// The raw cell content.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A layer does not have the expected shape.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}
