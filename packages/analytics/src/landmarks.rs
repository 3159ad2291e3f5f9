//! Landmark buffer analysis.

use airbnb_insights_analytics_models::{LandmarkImpact, LandmarkListingRow};
use airbnb_insights_landmark::Landmark;
use airbnb_insights_listing_models::Listing;
use airbnb_insights_spatial::membership_query;

/// Reports the listings inside one landmark's buffer zone.
pub fn landmark_impact<'a, I>(listings: I, landmark: &Landmark) -> LandmarkImpact
where
    I: IntoIterator<Item = &'a Listing>,
{
    let members = membership_query(listings, &landmark.zone);

    log::debug!(
        "{} listings within {} degrees of {}",
        members.len(),
        landmark.zone.distance(),
        landmark.name
    );

    LandmarkImpact {
        landmark_id: landmark.id.clone(),
        name: landmark.name.clone(),
        buffer_degrees: landmark.zone.distance(),
        listing_count: members.len() as u64,
        listings: members
            .into_iter()
            .map(|listing| LandmarkListingRow {
                name: listing.name.clone(),
                price: listing.price,
                neighbourhood: listing.neighbourhood.clone(),
            })
            .collect(),
    }
}

/// Reports every landmark, in landmark order.
#[must_use]
pub fn landmark_impacts(listings: &[&Listing], landmarks: &[Landmark]) -> Vec<LandmarkImpact> {
    landmarks
        .iter()
        .map(|landmark| landmark_impact(listings.iter().copied(), landmark))
        .collect()
}
