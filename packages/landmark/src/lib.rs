#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Landmark configuration loading and validation.
//!
//! Landmarks are defined as TOML, either embedded at compile time (see
//! [`registry`]) or supplied by the user as a file of `[[landmark]]`
//! tables. Every definition is validated into a [`Landmark`] with a ready
//! [`BufferZone`] when configuration is loaded, so malformed geometry is
//! reported before any membership query runs.

pub mod registry;

use std::collections::BTreeSet;

use airbnb_insights_landmark_models::{LandmarkDefinition, LandmarkFile, LandmarkShape};
use airbnb_insights_spatial::{BufferZone, LandmarkGeometry, SpatialError};
use thiserror::Error;

/// Errors that can occur while loading landmark configuration.
#[derive(Debug, Error)]
pub enum LandmarkError {
    /// TOML parsing failed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A landmark's geometry or buffer distance is invalid.
    #[error("Landmark '{id}': {source}")]
    Geometry {
        /// Landmark identifier.
        id: String,
        /// Underlying geometry error.
        #[source]
        source: SpatialError,
    },

    /// Two landmarks share an identifier.
    #[error("Duplicate landmark id '{id}'")]
    DuplicateId {
        /// The repeated identifier.
        id: String,
    },

    /// A required text field is blank.
    #[error("Landmark '{id}' has an empty {field}")]
    EmptyField {
        /// Landmark identifier (may itself be empty).
        id: String,
        /// Name of the blank field.
        field: &'static str,
    },
}

/// A validated landmark with its buffer zone. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Landmark {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Buffered region used for membership queries.
    pub zone: BufferZone,
}

impl Landmark {
    /// Validates a single definition.
    ///
    /// # Errors
    ///
    /// Returns [`LandmarkError::EmptyField`] for a blank id or name, and
    /// [`LandmarkError::Geometry`] if the shape or buffer distance is
    /// malformed.
    pub fn from_definition(def: &LandmarkDefinition) -> Result<Self, LandmarkError> {
        if def.id.trim().is_empty() {
            return Err(LandmarkError::EmptyField {
                id: def.id.clone(),
                field: "id",
            });
        }
        if def.name.trim().is_empty() {
            return Err(LandmarkError::EmptyField {
                id: def.id.clone(),
                field: "name",
            });
        }

        let geometry_error = |source| LandmarkError::Geometry {
            id: def.id.clone(),
            source,
        };

        let geometry = match &def.geometry {
            LandmarkShape::Point { lon, lat } => LandmarkGeometry::point(*lon, *lat),
            LandmarkShape::Polygon { ring } => LandmarkGeometry::polygon(ring),
        }
        .map_err(geometry_error)?;

        let zone = BufferZone::new(geometry, def.buffer_degrees).map_err(geometry_error)?;

        Ok(Self {
            id: def.id.clone(),
            name: def.name.clone(),
            zone,
        })
    }

    /// Returns this landmark with its buffer distance replaced.
    ///
    /// # Errors
    ///
    /// Returns [`LandmarkError::Geometry`] if `distance` is negative or not
    /// finite.
    pub fn with_buffer(&self, distance: f64) -> Result<Self, LandmarkError> {
        let zone = self
            .zone
            .with_distance(distance)
            .map_err(|source| LandmarkError::Geometry {
                id: self.id.clone(),
                source,
            })?;
        Ok(Self {
            id: self.id.clone(),
            name: self.name.clone(),
            zone,
        })
    }
}

/// Validates a set of definitions, rejecting duplicate ids.
///
/// # Errors
///
/// Returns the first validation failure encountered, in input order.
pub fn validate_all(definitions: &[LandmarkDefinition]) -> Result<Vec<Landmark>, LandmarkError> {
    let mut seen = BTreeSet::new();
    let mut landmarks = Vec::with_capacity(definitions.len());

    for def in definitions {
        if !seen.insert(def.id.as_str()) {
            return Err(LandmarkError::DuplicateId { id: def.id.clone() });
        }
        landmarks.push(Landmark::from_definition(def)?);
    }

    log::debug!("Validated {} landmarks", landmarks.len());

    Ok(landmarks)
}

/// Loads and validates every embedded landmark.
///
/// # Errors
///
/// Returns an error if an embedded definition fails validation.
pub fn load_landmarks() -> Result<Vec<Landmark>, LandmarkError> {
    validate_all(&registry::all_definitions())
}

/// Parses a user landmark file (`[[landmark]]` tables) without validating it.
///
/// # Errors
///
/// Returns [`LandmarkError::Toml`] if the content is not a valid landmark file.
pub fn parse_landmark_file(content: &str) -> Result<Vec<LandmarkDefinition>, LandmarkError> {
    let file: LandmarkFile = toml::de::from_str(content)?;
    Ok(file.landmarks)
}

/// Loads the embedded landmarks followed by those in `content`, validating
/// the combined set.
///
/// # Errors
///
/// Returns an error if `content` does not parse, any definition is
/// malformed, or an id appears twice across both sets.
pub fn load_landmarks_with(content: &str) -> Result<Vec<Landmark>, LandmarkError> {
    let mut definitions = registry::all_definitions();
    definitions.extend(parse_landmark_file(content)?);
    validate_all(&definitions)
}
