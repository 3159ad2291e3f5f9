//! Optional TOML configuration for the dashboard binary.
//!
//! Every key is optional; anything omitted falls back to the dashboard
//! defaults. Command line flags override whatever the file sets.

use std::path::{Path, PathBuf};

use airbnb_insights_analytics_models::{
    DEFAULT_HISTOGRAM_BINS, DEFAULT_PRICE_MAX, DEFAULT_PRICE_MIN, FilterCriteria,
};
use airbnb_insights_listing_models::Borough;
use serde::Deserialize;
use thiserror::Error;

/// Default location of the listing table.
pub const DEFAULT_LISTINGS_PATH: &str = "data/listings.csv";

/// Errors that can occur while loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unexpected keys.
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Dashboard configuration as read from `airbnb_insights.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Listing table CSV.
    pub listings: PathBuf,
    /// Subway line `GeoJSON`. Transit views are empty without it.
    pub subway_lines: Option<PathBuf>,
    /// Borough boundary `GeoJSON`. Required by the `boroughs` command.
    pub borough_boundaries: Option<PathBuf>,
    /// Additional `[[landmark]]` definitions loaded after the built-in ones.
    pub extra_landmarks: Option<PathBuf>,
    /// Initial lower price bound.
    pub price_min: f64,
    /// Initial upper price bound.
    pub price_max: f64,
    /// Initially selected boroughs.
    pub boroughs: Vec<String>,
    /// Number of price histogram bins.
    pub histogram_bins: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            listings: PathBuf::from(DEFAULT_LISTINGS_PATH),
            subway_lines: None,
            borough_boundaries: None,
            extra_landmarks: None,
            price_min: DEFAULT_PRICE_MIN,
            price_max: DEFAULT_PRICE_MAX,
            boroughs: Borough::all().iter().map(ToString::to_string).collect(),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl DashboardConfig {
    /// Parses a config from TOML content.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] on malformed content or unknown keys.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::de::from_str(content)?)
    }

    /// Loads the config at `path`, or the defaults when no path is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());

        Self::parse(&content)
    }

    /// The filter selection this config starts the dashboard with.
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(self.price_min, self.price_max, self.boroughs.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = DashboardConfig::parse("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.criteria(), FilterCriteria::default());
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let config = DashboardConfig::parse(
            r#"
listings = "listings-2024.csv"
price_max = 500
boroughs = ["Queens", "Bronx"]
"#,
        )
        .unwrap();

        assert_eq!(config.listings, PathBuf::from("listings-2024.csv"));
        assert!((config.price_min - DEFAULT_PRICE_MIN).abs() < f64::EPSILON);
        assert!((config.price_max - 500.0).abs() < f64::EPSILON);
        assert_eq!(config.boroughs, ["Queens", "Bronx"]);
        assert_eq!(config.histogram_bins, DEFAULT_HISTOGRAM_BINS);
        assert!(config.subway_lines.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = DashboardConfig::parse("price_minimum = 10").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = DashboardConfig::load(Some(Path::new("/nonexistent/airbnb_insights.toml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn no_path_means_defaults() {
        let config = DashboardConfig::load(None).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }
}
