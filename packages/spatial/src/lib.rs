#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Planar spatial queries over listing coordinates.
//!
//! All geometry here lives in raw longitude/latitude degrees and every
//! distance is planar Euclidean distance in those degrees. A fixed-degree
//! buffer therefore covers a different physical radius at different
//! latitudes; for city-scale areas that approximation is accepted.
//!
//! * [`LandmarkGeometry`] and [`BufferZone`] define landmark regions and
//!   answer "is this point inside the buffered region".
//! * [`membership_query`] filters a listing sequence down to the members of
//!   a zone, preserving order.
//! * [`BoroughIndex`] is an R-tree over borough polygons for point lookups.
//! * [`nearest_line_distance`] measures how far a point is from the
//!   closest subway line.

mod borough;
mod buffer;
mod geometry;
mod transit;

pub use borough::{BoroughBoundary, BoroughIndex};
pub use buffer::{BufferZone, membership_query};
pub use geometry::LandmarkGeometry;
pub use transit::{SubwayLine, nearest_line_distance};

use thiserror::Error;

/// Errors that can occur while building spatial structures.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// A landmark geometry or buffer distance is unusable.
    #[error("Malformed geometry: {message}")]
    MalformedGeometry {
        /// Description of what is wrong with the geometry.
        message: String,
    },
}
