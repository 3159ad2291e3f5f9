//! Distance from listings to the subway network.

use geo::{Distance, Euclidean, LineString, Point};

/// One subway route as a polyline in `(lon, lat)` degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct SubwayLine {
    /// Route name or label from the source layer.
    pub name: String,
    /// Route geometry.
    pub line: LineString<f64>,
}

/// Planar distance in degrees from `(lon, lat)` to the closest line.
///
/// Returns `None` when `lines` is empty or every line is empty.
#[must_use]
pub fn nearest_line_distance(lon: f64, lat: f64, lines: &[SubwayLine]) -> Option<f64> {
    let point = Point::new(lon, lat);
    lines
        .iter()
        .filter(|line| !line.line.0.is_empty())
        .map(|line| Euclidean.distance(&point, &line.line))
        .min_by(f64::total_cmp)
}
