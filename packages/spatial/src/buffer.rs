//! Buffer zones around landmarks and the membership query.
//!
//! A buffer zone is the closed set of positions within a fixed planar
//! distance of a landmark:
//!
//! * point landmark: the disk of radius `d` around the point.
//! * polygon landmark: the Minkowski sum of the polygon and a disk of
//!   radius `d` (an outward offset with rounded corners). A position is
//!   inside when it lies in or on the polygon, or within `d` of its
//!   exterior ring.
//!
//! Positions exactly on the zone boundary are members.

use airbnb_insights_listing_models::Listing;
use geo::{BoundingRect, Coord, Distance, Euclidean, Intersects, Point, Rect};

use crate::{LandmarkGeometry, SpatialError};

/// A landmark geometry expanded by a buffer distance in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferZone {
    geometry: LandmarkGeometry,
    distance: f64,
    envelope: Rect<f64>,
}

impl BufferZone {
    /// Buffers `geometry` by `distance` degrees.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::MalformedGeometry`] if `distance` is negative
    /// or not finite.
    pub fn new(geometry: LandmarkGeometry, distance: f64) -> Result<Self, SpatialError> {
        if !distance.is_finite() || distance < 0.0 {
            return Err(SpatialError::MalformedGeometry {
                message: format!("buffer distance must be a finite number >= 0, got {distance}"),
            });
        }

        let envelope = buffered_envelope(&geometry, distance);

        Ok(Self {
            geometry,
            distance,
            envelope,
        })
    }

    /// The unbuffered landmark geometry.
    #[must_use]
    pub const fn geometry(&self) -> &LandmarkGeometry {
        &self.geometry
    }

    /// The buffer distance in degrees.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    /// Axis-aligned bounding rectangle of the whole zone.
    #[must_use]
    pub const fn envelope(&self) -> Rect<f64> {
        self.envelope
    }

    /// Returns a copy of this zone with a different buffer distance.
    ///
    /// # Errors
    ///
    /// Same conditions as [`BufferZone::new`].
    pub fn with_distance(&self, distance: f64) -> Result<Self, SpatialError> {
        Self::new(self.geometry.clone(), distance)
    }

    /// Whether `(lon, lat)` lies inside or on the boundary of the zone.
    #[must_use]
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        if !self.envelope.intersects(&Coord { x: lon, y: lat }) {
            return false;
        }

        let point = Point::new(lon, lat);
        match &self.geometry {
            LandmarkGeometry::Point(center) => Euclidean.distance(&point, center) <= self.distance,
            LandmarkGeometry::Polygon(polygon) => {
                point.intersects(polygon)
                    || Euclidean.distance(&point, polygon.exterior()) <= self.distance
            }
        }
    }
}

/// Returns the listings whose `(longitude, latitude)` lies in `zone`,
/// in their original order.
pub fn membership_query<'a, I>(listings: I, zone: &BufferZone) -> Vec<&'a Listing>
where
    I: IntoIterator<Item = &'a Listing>,
{
    listings
        .into_iter()
        .filter(|listing| zone.contains(listing.longitude, listing.latitude))
        .collect()
}

fn buffered_envelope(geometry: &LandmarkGeometry, distance: f64) -> Rect<f64> {
    let rect = match geometry {
        LandmarkGeometry::Point(point) => point.bounding_rect(),
        LandmarkGeometry::Polygon(polygon) => polygon
            .bounding_rect()
            .unwrap_or_else(|| Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 0.0 })),
    };

    Rect::new(
        Coord {
            x: rect.min().x - distance,
            y: rect.min().y - distance,
        },
        Coord {
            x: rect.max().x + distance,
            y: rect.max().y + distance,
        },
    )
}
