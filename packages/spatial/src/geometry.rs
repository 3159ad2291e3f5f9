//! Validated landmark geometries.

use geo::{Area, Coord, LineString, Point, Polygon};

use crate::SpatialError;

/// The shape of a landmark before buffering.
#[derive(Debug, Clone, PartialEq)]
pub enum LandmarkGeometry {
    /// A single `(lon, lat)` position.
    Point(Point<f64>),
    /// A simple polygon described by its exterior ring.
    Polygon(Polygon<f64>),
}

impl LandmarkGeometry {
    /// Builds a point landmark.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::MalformedGeometry`] if either coordinate is
    /// not finite or lies outside the valid longitude/latitude range.
    pub fn point(lon: f64, lat: f64) -> Result<Self, SpatialError> {
        check_position(lon, lat)?;
        Ok(Self::Point(Point::new(lon, lat)))
    }

    /// Builds a polygon landmark from a closed ring of `[lon, lat]` positions.
    ///
    /// The ring must be explicitly closed (last position equal to the first),
    /// contain at least three distinct vertices, and enclose a non-zero area.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::MalformedGeometry`] if the ring is too short,
    /// not closed, contains invalid coordinates, or is degenerate.
    pub fn polygon(ring: &[[f64; 2]]) -> Result<Self, SpatialError> {
        if ring.len() < 4 {
            return Err(SpatialError::MalformedGeometry {
                message: format!(
                    "polygon ring has {} positions, need at least 4 (three vertices plus the closing position)",
                    ring.len()
                ),
            });
        }

        for &[lon, lat] in ring {
            check_position(lon, lat)?;
        }

        let (first, last) = (ring[0], ring[ring.len() - 1]);
        if first != last {
            return Err(SpatialError::MalformedGeometry {
                message: format!(
                    "polygon ring is not closed: starts at {first:?} but ends at {last:?}"
                ),
            });
        }

        let exterior: LineString<f64> = ring
            .iter()
            .map(|&[x, y]| Coord { x, y })
            .collect::<Vec<_>>()
            .into();
        let polygon = Polygon::new(exterior, vec![]);

        if polygon.unsigned_area() <= 0.0 {
            return Err(SpatialError::MalformedGeometry {
                message: "polygon ring encloses zero area".to_string(),
            });
        }

        Ok(Self::Polygon(polygon))
    }
}

fn check_position(lon: f64, lat: f64) -> Result<(), SpatialError> {
    if !lon.is_finite() || !lat.is_finite() {
        return Err(SpatialError::MalformedGeometry {
            message: format!("non-finite coordinate ({lon}, {lat})"),
        });
    }
    if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
        return Err(SpatialError::MalformedGeometry {
            message: format!("coordinate ({lon}, {lat}) is outside lon/lat range"),
        });
    }
    Ok(())
}
