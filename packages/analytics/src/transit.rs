//! Price versus subway proximity.

use airbnb_insights_analytics_models::{TransitCorrelation, TransitProximity};
use airbnb_insights_listing_models::Listing;
use airbnb_insights_spatial::{SubwayLine, nearest_line_distance};

/// Measures each listing's distance to the nearest subway line and
/// correlates it with price.
#[allow(clippy::cast_precision_loss)]
pub fn transit_correlation<'a, I>(listings: I, lines: &[SubwayLine]) -> TransitCorrelation
where
    I: IntoIterator<Item = &'a Listing>,
{
    let proximity: Vec<TransitProximity> = listings
        .into_iter()
        .filter_map(|listing| {
            nearest_line_distance(listing.longitude, listing.latitude, lines).map(|distance| {
                TransitProximity {
                    name: listing.name.clone(),
                    price: listing.price,
                    distance_degrees: distance,
                }
            })
        })
        .collect();

    let mean_distance_degrees = if proximity.is_empty() {
        None
    } else {
        Some(proximity.iter().map(|p| p.distance_degrees).sum::<f64>() / proximity.len() as f64)
    };

    let prices: Vec<f64> = proximity.iter().map(|p| p.price).collect();
    let distances: Vec<f64> = proximity.iter().map(|p| p.distance_degrees).collect();

    TransitCorrelation {
        line_count: lines.len() as u64,
        listings_measured: proximity.len() as u64,
        mean_distance_degrees,
        price_distance_correlation: pearson(&prices, &distances),
        listings: proximity,
    }
}

/// Pearson correlation coefficient of two equal-length series.
///
/// `None` for fewer than two samples, when either series has zero
/// variance, or when a value is not finite.
#[allow(clippy::cast_precision_loss)]
fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }

    // r is scale invariant; rescaling keeps the sums of squares finite.
    let xs = rescaled(&xs[..n])?;
    let ys = rescaled(&ys[..n])?;

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(&ys) {
        let (dx, dy) = (x - mean_x, y - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }

    let r = cov / (var_x.sqrt() * var_y.sqrt());
    r.is_finite().then_some(r)
}

/// Divides a series by its largest magnitude. `None` if any value is not
/// finite.
fn rescaled(values: &[f64]) -> Option<Vec<f64>> {
    if !values.iter().all(|v| v.is_finite()) {
        return None;
    }
    let scale = values.iter().fold(0.0_f64, |max, v| max.max(v.abs()));
    if scale == 0.0 {
        return Some(values.to_vec());
    }
    Some(values.iter().map(|v| v / scale).collect())
}
