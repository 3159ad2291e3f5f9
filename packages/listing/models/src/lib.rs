#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Airbnb listing row types, borough taxonomy, and price tiers.
//!
//! A [`Listing`] is one validated row of the public NYC Airbnb dataset.
//! Rows are only constructed by the ingestion boundary, so every value of
//! this type already satisfies the coordinate and price invariants.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Listings priced strictly below this (USD per night) are [`PriceTier::Budget`].
pub const PREMIUM_PRICE_THRESHOLD: f64 = 100.0;

/// One listing from the dataset.
///
/// Coordinates are WGS84 degrees. `neighbourhood_group` holds the borough
/// exactly as spelled in the source data; filters compare it by exact
/// string match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Source listing id, when the dataset provides one.
    pub id: Option<u64>,
    /// Listing title. Empty when the source row has no name.
    pub name: String,
    /// Latitude in degrees, within `[-90, 90]`.
    pub latitude: f64,
    /// Longitude in degrees, within `[-180, 180]`.
    pub longitude: f64,
    /// Nightly price in USD. Never negative, may be zero.
    pub price: f64,
    /// Neighbourhood name (e.g. "Williamsburg").
    pub neighbourhood: String,
    /// Borough name (e.g. "Brooklyn").
    pub neighbourhood_group: String,
    /// Total number of reviews.
    pub number_of_reviews: u32,
    /// Review rating, on whichever scale the source schema uses (0-5 or 0-100).
    pub review_scores_rating: f64,
}

impl Listing {
    /// Returns the listing position as `(longitude, latitude)`, the axis
    /// order used by every geometry in this workspace.
    #[must_use]
    pub const fn position(&self) -> (f64, f64) {
        (self.longitude, self.latitude)
    }

    /// Parses the borough field into a known [`Borough`], if it is one.
    #[must_use]
    pub fn borough(&self) -> Option<Borough> {
        self.neighbourhood_group.parse().ok()
    }

    /// Returns the price tier used for map marker colouring.
    #[must_use]
    pub fn price_tier(&self) -> PriceTier {
        PriceTier::from_price(self.price)
    }
}

/// The five New York City boroughs, spelled as in the dataset.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Borough {
    /// Manhattan
    Manhattan,
    /// Brooklyn
    Brooklyn,
    /// Queens
    Queens,
    /// The Bronx
    Bronx,
    /// Staten Island
    #[serde(rename = "Staten Island")]
    #[strum(serialize = "Staten Island")]
    StatenIsland,
}

impl Borough {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Manhattan,
            Self::Brooklyn,
            Self::Queens,
            Self::Bronx,
            Self::StatenIsland,
        ]
    }
}

/// Coarse price bucket for map markers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceTier {
    /// Below [`PREMIUM_PRICE_THRESHOLD`]
    Budget,
    /// At or above [`PREMIUM_PRICE_THRESHOLD`]
    Premium,
}

impl PriceTier {
    /// Buckets a nightly price.
    #[must_use]
    pub fn from_price(price: f64) -> Self {
        if price < PREMIUM_PRICE_THRESHOLD {
            Self::Budget
        } else {
            Self::Premium
        }
    }

    /// Marker colour for this tier (hex RGB).
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Budget => "#3186cc",
            Self::Premium => "#cc3131",
        }
    }
}
