#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Listing filter and metrics engine.
//!
//! Every function here is a pure function of its borrowed inputs: the raw
//! listing table, the current [`FilterCriteria`], and the immutable
//! landmark and subway configuration. Nothing is cached between calls, so
//! a dashboard can re-run the whole pipeline on every interaction and get
//! identical output for identical input.
//!
//! The pipeline is `filter` → `score` → aggregates, bundled by
//! [`build_dashboard`].

pub mod boroughs;
pub mod charts;
pub mod filter;
pub mod landmarks;
pub mod score;
pub mod transit;

pub use boroughs::borough_consistency;
pub use charts::{map_markers, neighbourhood_price_averages, price_heat_points, price_histogram};
pub use filter::{filter_listings, validate_criteria};
pub use landmarks::{landmark_impact, landmark_impacts};
pub use score::{
    VALUE_SCORE_SENTINEL, compute_value_score, score_listings, try_value_score, value_heat_points,
};
pub use transit::transit_correlation;

use airbnb_insights_analytics_models::{DashboardOptions, DashboardSnapshot, FilterCriteria};
use airbnb_insights_landmark::Landmark;
use airbnb_insights_listing_models::Listing;
use airbnb_insights_spatial::SubwayLine;
use thiserror::Error;

/// Conditions the engine can report.
///
/// Neither is fatal to the pipeline: the infallible entry points recover
/// from both (empty result, sentinel score). The `try_`/`validate_`
/// variants surface them for callers that want to know.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    /// A value score was requested for a listing priced at zero.
    #[error("Division by zero: listing '{name}' has price 0")]
    DivisionByZero {
        /// Listing title.
        name: String,
    },

    /// The lower price bound exceeds the upper bound (or one is NaN).
    #[error("Invalid price range: min {min} > max {max}")]
    InvalidRange {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },
}

/// Runs the full dashboard pipeline once.
///
/// Filters `listings` by `criteria`, then computes every view from the
/// filtered rows: map markers and price heat map, price histogram,
/// neighbourhood averages (optionally brushed), landmark buffer reports,
/// transit correlation, and the value score heat map.
#[must_use]
pub fn build_dashboard(
    listings: &[Listing],
    criteria: &FilterCriteria,
    landmarks: &[Landmark],
    subway_lines: &[SubwayLine],
    options: &DashboardOptions,
) -> DashboardSnapshot {
    let filtered = filter_listings(listings, criteria);
    let scored = score_listings(filtered.iter().copied());
    let undefined_value_scores = scored.iter().filter(|s| !s.score_defined).count();

    if undefined_value_scores > 0 {
        log::warn!(
            "{undefined_value_scores} filtered listings have price 0; their value score is the sentinel"
        );
    }

    DashboardSnapshot {
        criteria: criteria.clone(),
        total_listings: listings.len() as u64,
        filtered_count: filtered.len() as u64,
        undefined_value_scores: undefined_value_scores as u64,
        markers: map_markers(filtered.iter().copied()),
        price_heat: price_heat_points(filtered.iter().copied()),
        price_histogram: price_histogram(filtered.iter().copied(), options.histogram_bins),
        neighbourhood_prices: neighbourhood_price_averages(
            filtered.iter().copied(),
            options.longitude_brush,
        ),
        landmarks: landmark_impacts(&filtered, landmarks),
        transit: transit_correlation(filtered.iter().copied(), subway_lines),
        value_heat: value_heat_points(&scored),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airbnb_insights_ingest::progress::NullProgress;

    const CSV: &str = "\
id,name,neighbourhood_group,neighbourhood,latitude,longitude,price,number_of_reviews,review_scores_rating
1,Harbor view,Manhattan,Battery Park City,40.6895,-74.0440,90,10,4.5
2,Park side,Manhattan,Upper West Side,40.7800,-73.9700,250,20,4.9
3,Free couch,Brooklyn,Williamsburg,40.7100,-73.9600,0,5,5
4,Astoria room,Queens,Astoria,40.7600,-73.9200,60,3,4.0
5,Luxury loft,Manhattan,SoHo,40.7230,-74.0000,900,50,5.0
";

    fn listings() -> Vec<Listing> {
        airbnb_insights_ingest::parse_listings_csv(CSV.as_bytes(), &NullProgress).unwrap()
    }

    #[test]
    fn builds_snapshot_from_filtered_rows() {
        let listings = listings();
        let landmarks = airbnb_insights_landmark::load_landmarks().unwrap();
        let criteria = FilterCriteria::new(0.0, 300.0, ["Manhattan", "Brooklyn"]);

        let snapshot = build_dashboard(
            &listings,
            &criteria,
            &landmarks,
            &[],
            &DashboardOptions::default(),
        );

        assert_eq!(snapshot.total_listings, 5);
        assert_eq!(snapshot.filtered_count, 3);
        assert_eq!(snapshot.undefined_value_scores, 1);
        assert_eq!(snapshot.markers.len(), 3);
        assert_eq!(
            snapshot.price_histogram.iter().map(|b| b.count).sum::<u64>(),
            3
        );

        let sol = snapshot
            .landmarks
            .iter()
            .find(|l| l.landmark_id == "statue_of_liberty")
            .unwrap();
        assert_eq!(sol.listing_count, 1);
        assert_eq!(sol.listings[0].name, "Harbor view");

        assert_eq!(snapshot.transit.line_count, 0);
        assert!(snapshot.transit.price_distance_correlation.is_none());

        let weights: Vec<f64> = snapshot.value_heat.iter().map(|p| p.weight).collect();
        assert!((weights[0] - 0.5).abs() < 1e-12);
        assert!(weights[2].abs() < f64::EPSILON);
    }

    #[test]
    fn snapshot_is_deterministic() {
        let listings = listings();
        let landmarks = airbnb_insights_landmark::load_landmarks().unwrap();
        let criteria = FilterCriteria::default();
        let options = DashboardOptions::default();

        let a = build_dashboard(&listings, &criteria, &landmarks, &[], &options);
        let b = build_dashboard(&listings, &criteria, &landmarks, &[], &options);
        assert_eq!(a, b);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let listings = listings();
        let snapshot = build_dashboard(
            &listings,
            &FilterCriteria::default(),
            &[],
            &[],
            &DashboardOptions::default(),
        );
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["filteredCount"], 3);
        assert!(json["priceHistogram"].is_array());
    }

    #[test]
    fn inverted_range_yields_empty_snapshot() {
        let listings = listings();
        let snapshot = build_dashboard(
            &listings,
            &FilterCriteria::all_boroughs(300.0, 50.0),
            &[],
            &[],
            &DashboardOptions::default(),
        );
        assert_eq!(snapshot.filtered_count, 0);
        assert!(snapshot.markers.is_empty());
        assert!(snapshot.price_histogram.is_empty());
    }
}
