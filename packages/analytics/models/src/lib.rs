#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter criteria and dashboard result types.
//!
//! Defines the input to the listing filter and every output the metrics
//! engine hands to the presentation layer: scored listings, chart
//! aggregates, landmark buffer reports, and the transit summary. All
//! types serialize to `camelCase` JSON.

use std::collections::BTreeSet;

use airbnb_insights_listing_models::{Borough, Listing, PriceTier};
use serde::{Deserialize, Serialize};

/// Default lower price bound (USD), matching the dashboard's initial slider.
pub const DEFAULT_PRICE_MIN: f64 = 50.0;

/// Default upper price bound (USD), matching the dashboard's initial slider.
pub const DEFAULT_PRICE_MAX: f64 = 300.0;

/// Default number of price histogram bins.
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

/// Largest number of price histogram bins the engine will allocate.
pub const MAX_HISTOGRAM_BINS: usize = 1_000;

/// One user interaction's filter selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Inclusive lower price bound.
    pub price_min: f64,
    /// Inclusive upper price bound.
    pub price_max: f64,
    /// Selected borough names, compared by exact match.
    pub boroughs: BTreeSet<String>,
}

impl FilterCriteria {
    /// Builds criteria from a price range and borough names.
    #[must_use]
    pub fn new<I, S>(price_min: f64, price_max: f64, boroughs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            price_min,
            price_max,
            boroughs: boroughs.into_iter().map(Into::into).collect(),
        }
    }

    /// Criteria selecting every known borough within a price range.
    #[must_use]
    pub fn all_boroughs(price_min: f64, price_max: f64) -> Self {
        Self::new(
            price_min,
            price_max,
            Borough::all().iter().map(ToString::to_string),
        )
    }

    /// Whether `price_min <= price_max` with both bounds comparable.
    #[must_use]
    pub fn has_valid_range(&self) -> bool {
        self.price_min <= self.price_max
    }
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self::all_boroughs(DEFAULT_PRICE_MIN, DEFAULT_PRICE_MAX)
    }
}

/// A filtered listing with its derived value score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredListing {
    /// The listing row.
    #[serde(flatten)]
    pub listing: Listing,
    /// `number_of_reviews * review_scores_rating / price`, or the sentinel
    /// when the price is zero.
    pub value_score: f64,
    /// `false` when `value_score` is the zero-price sentinel.
    pub score_defined: bool,
}

/// Inclusive longitude interval, the brush selection of the linked charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongitudeRange {
    /// Western edge.
    pub min: f64,
    /// Eastern edge.
    pub max: f64,
}

impl LongitudeRange {
    /// Whether `lon` falls in the interval (inclusive).
    #[must_use]
    pub fn contains(&self, lon: f64) -> bool {
        self.min <= lon && lon <= self.max
    }
}

/// One bar of the price distribution histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub lower: f64,
    /// Upper edge (exclusive, except for the last bin).
    pub upper: f64,
    /// Listings in this bin.
    pub count: u64,
}

/// Average price of one neighbourhood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighbourhoodPrice {
    /// Neighbourhood name.
    pub neighbourhood: String,
    /// Borough the neighbourhood belongs to.
    pub borough: String,
    /// Mean nightly price.
    pub average_price: f64,
    /// Listings averaged.
    pub listing_count: u64,
}

/// A weighted heat map sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatPoint {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Sample weight (price or value score).
    pub weight: f64,
}

/// A map marker for one listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Price bucket.
    pub tier: PriceTier,
    /// Marker colour for the tier.
    pub color: String,
    /// Hover text, `"$<price> | <neighbourhood>"`.
    pub tooltip: String,
}

/// A listing row as shown in a landmark buffer table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkListingRow {
    /// Listing title.
    pub name: String,
    /// Nightly price.
    pub price: f64,
    /// Neighbourhood name.
    pub neighbourhood: String,
}

/// Listings inside one landmark's buffer zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkImpact {
    /// Landmark identifier.
    pub landmark_id: String,
    /// Landmark display name.
    pub name: String,
    /// Buffer distance used, in degrees.
    pub buffer_degrees: f64,
    /// Number of member listings.
    pub listing_count: u64,
    /// Member listings in input order.
    pub listings: Vec<LandmarkListingRow>,
}

/// Distance from one listing to the nearest subway line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitProximity {
    /// Listing title.
    pub name: String,
    /// Nightly price.
    pub price: f64,
    /// Planar distance in degrees to the nearest line.
    pub distance_degrees: f64,
}

/// Relationship between listing price and subway proximity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitCorrelation {
    /// Subway lines considered.
    pub line_count: u64,
    /// Listings with a measured distance.
    pub listings_measured: u64,
    /// Mean nearest-line distance, when any listing was measured.
    pub mean_distance_degrees: Option<f64>,
    /// Pearson correlation between price and nearest-line distance. `None`
    /// with fewer than two listings or when either series is constant.
    pub price_distance_correlation: Option<f64>,
    /// Per-listing distances in input order.
    pub listings: Vec<TransitProximity>,
}

/// A listing whose borough label disagrees with the boundary layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoroughMismatch {
    /// Listing title.
    pub name: String,
    /// Borough from the dataset.
    pub labelled: String,
    /// Borough whose polygon contains the listing, if any.
    pub located: Option<String>,
}

/// Cross-check of listing borough labels against borough polygons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoroughConsistency {
    /// Listings checked.
    pub checked: u64,
    /// Listings whose label matches the containing polygon.
    pub matched: u64,
    /// Listings outside every borough polygon.
    pub unlocated: u64,
    /// Listings whose label disagrees with the polygon, or that fall outside all polygons.
    pub mismatches: Vec<BoroughMismatch>,
}

/// Presentation options that do not affect which listings are selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOptions {
    /// Number of price histogram bins.
    pub histogram_bins: usize,
    /// Linked-chart brush applied to the neighbourhood averages.
    pub longitude_brush: Option<LongitudeRange>,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            longitude_brush: None,
        }
    }
}

/// Everything the dashboard renders for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// The criteria this snapshot was computed for.
    pub criteria: FilterCriteria,
    /// Rows in the raw table.
    pub total_listings: u64,
    /// Rows passing the filter.
    pub filtered_count: u64,
    /// Filtered rows whose value score is the zero-price sentinel.
    pub undefined_value_scores: u64,
    /// Map tab markers.
    pub markers: Vec<MapMarker>,
    /// Map tab price heat map.
    pub price_heat: Vec<HeatPoint>,
    /// Map tab price distribution.
    pub price_histogram: Vec<HistogramBin>,
    /// Linked chart neighbourhood averages.
    pub neighbourhood_prices: Vec<NeighbourhoodPrice>,
    /// Landmark buffer analysis.
    pub landmarks: Vec<LandmarkImpact>,
    /// Transit correlation summary.
    pub transit: TransitCorrelation,
    /// Best value heat map.
    pub value_heat: Vec<HeatPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_criteria_select_all_boroughs_in_slider_range() {
        let criteria = FilterCriteria::default();
        assert!((criteria.price_min - 50.0).abs() < f64::EPSILON);
        assert!((criteria.price_max - 300.0).abs() < f64::EPSILON);
        assert_eq!(criteria.boroughs.len(), 5);
        assert!(criteria.boroughs.contains("Staten Island"));
    }

    #[test]
    fn inverted_or_nan_range_is_invalid() {
        assert!(FilterCriteria::new(10.0, 10.0, ["Queens"]).has_valid_range());
        assert!(!FilterCriteria::new(20.0, 10.0, ["Queens"]).has_valid_range());
        assert!(!FilterCriteria::new(f64::NAN, 10.0, ["Queens"]).has_valid_range());
    }

    #[test]
    fn longitude_range_is_inclusive() {
        let range = LongitudeRange {
            min: -74.0,
            max: -73.9,
        };
        assert!(range.contains(-74.0));
        assert!(range.contains(-73.9));
        assert!(!range.contains(-73.89));
    }

    #[test]
    fn scored_listing_flattens_listing_fields() {
        let scored = ScoredListing {
            listing: Listing {
                id: Some(7),
                name: "Loft".to_string(),
                latitude: 40.7,
                longitude: -74.0,
                price: 90.0,
                neighbourhood: "SoHo".to_string(),
                neighbourhood_group: "Manhattan".to_string(),
                number_of_reviews: 10,
                review_scores_rating: 4.5,
            },
            value_score: 0.5,
            score_defined: true,
        };
        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["neighbourhoodGroup"], "Manhattan");
        assert_eq!(json["valueScore"], 0.5);
        assert_eq!(json["scoreDefined"], true);
    }
}
