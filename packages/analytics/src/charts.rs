//! Chart aggregates for the map and linked-chart tabs.

use std::collections::BTreeMap;

use airbnb_insights_analytics_models::{
    HeatPoint, HistogramBin, LongitudeRange, MAX_HISTOGRAM_BINS, MapMarker, NeighbourhoodPrice,
};
use airbnb_insights_listing_models::Listing;

/// One marker per listing, coloured by price tier.
pub fn map_markers<'a, I>(listings: I) -> Vec<MapMarker>
where
    I: IntoIterator<Item = &'a Listing>,
{
    listings
        .into_iter()
        .map(|listing| {
            let tier = listing.price_tier();
            MapMarker {
                latitude: listing.latitude,
                longitude: listing.longitude,
                tier,
                color: tier.color().to_string(),
                tooltip: format!("${} | {}", listing.price, listing.neighbourhood),
            }
        })
        .collect()
}

/// Heat map samples weighted by price.
pub fn price_heat_points<'a, I>(listings: I) -> Vec<HeatPoint>
where
    I: IntoIterator<Item = &'a Listing>,
{
    listings
        .into_iter()
        .map(|listing| HeatPoint {
            latitude: listing.latitude,
            longitude: listing.longitude,
            weight: listing.price,
        })
        .collect()
}

/// Equal-width price histogram over the observed price range.
///
/// Each bin is `[lower, upper)` except the last, which also includes the
/// maximum price. A single distinct price produces one zero-width bin.
/// Returns no bins for an empty input. `bins` is clamped to
/// `1..=MAX_HISTOGRAM_BINS`.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn price_histogram<'a, I>(listings: I, bins: usize) -> Vec<HistogramBin>
where
    I: IntoIterator<Item = &'a Listing>,
{
    let prices: Vec<f64> = listings.into_iter().map(|l| l.price).collect();
    let Some(min) = prices.iter().copied().reduce(f64::min) else {
        return Vec::new();
    };
    let max = prices.iter().copied().fold(min, f64::max);

    if max <= min {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: prices.len() as u64,
        }];
    }

    let bins = if bins > MAX_HISTOGRAM_BINS {
        log::warn!("{bins} histogram bins requested; using {MAX_HISTOGRAM_BINS}");
        MAX_HISTOGRAM_BINS
    } else {
        bins.max(1)
    };
    let width = (max - min) / bins as f64;
    let mut counts = vec![0_u64; bins];

    for price in prices {
        let idx = (((price - min) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: (i as f64).mul_add(width, min),
            upper: if i + 1 == bins {
                max
            } else {
                ((i + 1) as f64).mul_add(width, min)
            },
            count,
        })
        .collect()
}

/// Average price per `(neighbourhood, borough)`, sorted by neighbourhood
/// then borough.
///
/// With a `brush`, only listings whose longitude lies in the interval are
/// averaged, which is how the bar chart follows a selection made on the
/// longitude/latitude scatter plot.
#[allow(clippy::cast_precision_loss)]
pub fn neighbourhood_price_averages<'a, I>(
    listings: I,
    brush: Option<LongitudeRange>,
) -> Vec<NeighbourhoodPrice>
where
    I: IntoIterator<Item = &'a Listing>,
{
    let mut totals: BTreeMap<(&str, &str), (f64, u64)> = BTreeMap::new();

    for listing in listings {
        if brush.is_some_and(|range| !range.contains(listing.longitude)) {
            continue;
        }
        let entry = totals
            .entry((
                listing.neighbourhood.as_str(),
                listing.neighbourhood_group.as_str(),
            ))
            .or_insert((0.0, 0));
        entry.0 += listing.price;
        entry.1 += 1;
    }

    totals
        .into_iter()
        .map(|((neighbourhood, borough), (sum, count))| NeighbourhoodPrice {
            neighbourhood: neighbourhood.to_string(),
            borough: borough.to_string(),
            average_price: sum / count as f64,
            listing_count: count,
        })
        .collect()
}
