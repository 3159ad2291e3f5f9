//! Cross-check of dataset borough labels against borough polygons.

use airbnb_insights_analytics_models::{BoroughConsistency, BoroughMismatch};
use airbnb_insights_listing_models::Listing;
use airbnb_insights_spatial::BoroughIndex;

/// Locates each listing in `index` and compares the containing borough
/// with the listing's `neighbourhood_group` label.
pub fn borough_consistency<'a, I>(listings: I, index: &BoroughIndex) -> BoroughConsistency
where
    I: IntoIterator<Item = &'a Listing>,
{
    let mut report = BoroughConsistency {
        checked: 0,
        matched: 0,
        unlocated: 0,
        mismatches: Vec::new(),
    };

    for listing in listings {
        report.checked += 1;
        let located = index.lookup(listing.longitude, listing.latitude);

        match located {
            Some(name) if name == listing.neighbourhood_group => report.matched += 1,
            _ => {
                if located.is_none() {
                    report.unlocated += 1;
                }
                report.mismatches.push(BoroughMismatch {
                    name: listing.name.clone(),
                    labelled: listing.neighbourhood_group.clone(),
                    located: located.map(ToOwned::to_owned),
                });
            }
        }
    }

    log::info!(
        "Borough check: {}/{} listings match their boundary ({} outside all boroughs)",
        report.matched,
        report.checked,
        report.unlocated
    );

    report
}
