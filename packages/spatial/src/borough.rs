//! In-memory borough lookup.
//!
//! Builds an R-tree over borough boundary polygons so that a listing's
//! coordinates can be attributed to the borough that actually contains
//! them, independent of the borough label the dataset carries.

use geo::{Area, BoundingRect, Contains, MultiPolygon};
use rstar::{AABB, RTree, RTreeObject};

/// A named borough boundary, as loaded from the borough `GeoJSON` layer.
#[derive(Debug, Clone, PartialEq)]
pub struct BoroughBoundary {
    /// Borough name (e.g. "Brooklyn").
    pub name: String,
    /// Boundary polygons in `(lon, lat)` degrees.
    pub polygon: MultiPolygon<f64>,
}

/// A boundary polygon stored in the R-tree with its metadata.
struct BoundaryEntry {
    name: String,
    area: f64,
    envelope: AABB<[f64; 2]>,
    polygon: MultiPolygon<f64>,
}

impl RTreeObject for BoundaryEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Pre-built spatial index of borough polygons.
pub struct BoroughIndex {
    boroughs: RTree<BoundaryEntry>,
}

impl BoroughIndex {
    /// Bulk-loads the given boundaries into an R-tree.
    ///
    /// Boundaries with no polygons are skipped.
    #[must_use]
    pub fn new(boundaries: Vec<BoroughBoundary>) -> Self {
        let entries: Vec<BoundaryEntry> = boundaries
            .into_iter()
            .filter_map(|boundary| {
                if boundary.polygon.0.is_empty() {
                    log::warn!("Skipping borough {} with empty geometry", boundary.name);
                    return None;
                }
                Some(BoundaryEntry {
                    area: boundary.polygon.unsigned_area(),
                    envelope: compute_envelope(&boundary.polygon),
                    name: boundary.name,
                    polygon: boundary.polygon,
                })
            })
            .collect();

        log::info!("Loaded {} borough boundaries into spatial index", entries.len());

        Self {
            boroughs: RTree::bulk_load(entries),
        }
    }

    /// Number of indexed boroughs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boroughs.size()
    }

    /// Whether the index holds no boroughs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boroughs.size() == 0
    }

    /// Look up the borough containing a point.
    ///
    /// Boroughs should not overlap; if the source polygons do, the
    /// smallest area wins.
    #[must_use]
    pub fn lookup(&self, lon: f64, lat: f64) -> Option<&str> {
        let point = geo::Point::new(lon, lat);
        let query_env = AABB::from_point([lon, lat]);

        let mut best: Option<&BoundaryEntry> = None;

        for entry in self.boroughs.locate_in_envelope_intersecting(&query_env) {
            if entry.polygon.contains(&point) {
                match best {
                    None => best = Some(entry),
                    Some(current) if entry.area < current.area => {
                        best = Some(entry);
                    }
                    _ => {}
                }
            }
        }

        best.map(|e| e.name.as_str())
    }
}

/// Compute the bounding box envelope for a [`MultiPolygon`].
fn compute_envelope(mp: &MultiPolygon<f64>) -> AABB<[f64; 2]> {
    mp.bounding_rect().map_or_else(
        || AABB::from_point([0.0, 0.0]),
        |rect| AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]),
    )
}
