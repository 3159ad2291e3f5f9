#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Landmark definition types.
//!
//! Defines the TOML schema for named regions of interest. A definition is
//! raw configuration; it becomes a queryable buffer zone only after
//! validation in `airbnb_insights_landmark`.

use serde::{Deserialize, Serialize};

/// A named landmark, deserialized from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkDefinition {
    /// Unique landmark identifier (e.g., `"central_park"`).
    pub id: String,
    /// Human-readable name (e.g., "Central Park").
    pub name: String,
    /// Buffer distance in degrees of longitude/latitude.
    pub buffer_degrees: f64,
    /// Landmark shape.
    pub geometry: LandmarkShape,
}

/// Raw landmark geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LandmarkShape {
    /// A single position, buffered into a disk.
    Point {
        /// Longitude in degrees.
        lon: f64,
        /// Latitude in degrees.
        lat: f64,
    },
    /// A closed ring of `[lon, lat]` positions (first equals last).
    Polygon {
        /// Exterior ring.
        ring: Vec<[f64; 2]>,
    },
}

/// A user-supplied landmark file: a list of `[[landmark]]` tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFile {
    /// Landmarks in file order.
    #[serde(default, rename = "landmark")]
    pub landmarks: Vec<LandmarkDefinition>,
}
