//! Price and borough filter.

use airbnb_insights_analytics_models::FilterCriteria;
use airbnb_insights_listing_models::Listing;

use crate::AnalyticsError;

/// Checks that the criteria's price range is usable.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidRange`] when `price_min > price_max` or
/// either bound is NaN.
pub fn validate_criteria(criteria: &FilterCriteria) -> Result<(), AnalyticsError> {
    if criteria.has_valid_range() {
        Ok(())
    } else {
        Err(AnalyticsError::InvalidRange {
            min: criteria.price_min,
            max: criteria.price_max,
        })
    }
}

/// Returns the listings with `price_min <= price <= price_max` whose
/// borough is one of `criteria.boroughs`, in input order.
///
/// Never fails: an invalid price range or an empty borough selection
/// yields an empty result.
pub fn filter_listings<'a, I>(listings: I, criteria: &FilterCriteria) -> Vec<&'a Listing>
where
    I: IntoIterator<Item = &'a Listing>,
{
    if let Err(e) = validate_criteria(criteria) {
        log::warn!("{e}; returning no listings");
        return Vec::new();
    }
    if criteria.boroughs.is_empty() {
        return Vec::new();
    }

    listings
        .into_iter()
        .filter(|listing| {
            criteria.price_min <= listing.price
                && listing.price <= criteria.price_max
                && criteria.boroughs.contains(&listing.neighbourhood_group)
        })
        .collect()
}
