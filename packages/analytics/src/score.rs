//! Value score: a rough value-for-money metric.
//!
//! `value_score = number_of_reviews * review_scores_rating / price`
//!
//! A zero price has no defined score. The infallible entry points
//! substitute [`VALUE_SCORE_SENTINEL`] and flag the row so one free listing
//! never aborts the filtered view.

use airbnb_insights_analytics_models::{HeatPoint, ScoredListing};
use airbnb_insights_listing_models::Listing;

use crate::AnalyticsError;

/// Score assigned to listings with price 0.
pub const VALUE_SCORE_SENTINEL: f64 = 0.0;

/// Computes the value score.
///
/// # Errors
///
/// Returns [`AnalyticsError::DivisionByZero`] when the listing's price is 0.
pub fn try_value_score(listing: &Listing) -> Result<f64, AnalyticsError> {
    if listing.price == 0.0 {
        return Err(AnalyticsError::DivisionByZero {
            name: listing.name.clone(),
        });
    }
    Ok(f64::from(listing.number_of_reviews) * listing.review_scores_rating / listing.price)
}

/// Computes the value score, returning [`VALUE_SCORE_SENTINEL`] for a
/// zero price.
#[must_use]
pub fn compute_value_score(listing: &Listing) -> f64 {
    try_value_score(listing).unwrap_or_else(|e| {
        log::debug!("{e}; using sentinel {VALUE_SCORE_SENTINEL}");
        VALUE_SCORE_SENTINEL
    })
}

/// Scores each listing, keeping input order.
pub fn score_listings<'a, I>(listings: I) -> Vec<ScoredListing>
where
    I: IntoIterator<Item = &'a Listing>,
{
    listings
        .into_iter()
        .map(|listing| {
            let score = try_value_score(listing);
            ScoredListing {
                listing: listing.clone(),
                score_defined: score.is_ok(),
                value_score: score.unwrap_or(VALUE_SCORE_SENTINEL),
            }
        })
        .collect()
}

/// Heat map samples weighted by value score.
#[must_use]
pub fn value_heat_points(scored: &[ScoredListing]) -> Vec<HeatPoint> {
    scored
        .iter()
        .map(|s| HeatPoint {
            latitude: s.listing.latitude,
            longitude: s.listing.longitude,
            weight: s.value_score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(price: f64, reviews: u32, rating: f64) -> Listing {
        Listing {
            id: None,
            name: "Test".to_string(),
            latitude: 40.7,
            longitude: -73.95,
            price,
            neighbourhood: "Harlem".to_string(),
            neighbourhood_group: "Manhattan".to_string(),
            number_of_reviews: reviews,
            review_scores_rating: rating,
        }
    }

    #[test]
    fn computes_reference_score() {
        let score = compute_value_score(&listing(90.0, 10, 4.5));
        assert!((score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn zero_price_uses_sentinel() {
        let free = listing(0.0, 5, 5.0);
        assert!((compute_value_score(&free) - VALUE_SCORE_SENTINEL).abs() < f64::EPSILON);
        assert_eq!(
            try_value_score(&free),
            Err(AnalyticsError::DivisionByZero {
                name: "Test".to_string()
            })
        );
    }

    #[test]
    fn no_reviews_scores_zero_but_defined() {
        let score = try_value_score(&listing(120.0, 0, 4.9)).unwrap();
        assert!(score.abs() < f64::EPSILON);
    }

    #[test]
    fn score_listings_flags_undefined_rows_in_order() {
        let rows = [listing(90.0, 10, 4.5), listing(0.0, 5, 5.0), listing(50.0, 2, 100.0)];
        let scored = score_listings(&rows);

        assert_eq!(scored.len(), 3);
        assert!(scored[0].score_defined);
        assert!(!scored[1].score_defined);
        assert!((scored[1].value_score - VALUE_SCORE_SENTINEL).abs() < f64::EPSILON);
        assert!((scored[2].value_score - 4.0).abs() < 1e-12);
    }

    #[test]
    fn value_heat_points_carry_scores() {
        let scored = score_listings(&[listing(90.0, 10, 4.5)]);
        let points = value_heat_points(&scored);
        assert_eq!(points.len(), 1);
        assert!((points[0].weight - 0.5).abs() < 1e-12);
        assert!((points[0].latitude - 40.7).abs() < f64::EPSILON);
    }
}
