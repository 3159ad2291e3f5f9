//! `GeoJSON` layer loaders for borough boundaries and subway lines.

use std::path::Path;

use airbnb_insights_spatial::{BoroughBoundary, SubwayLine};
use geo::MultiPolygon;
use geojson::{Feature, FeatureCollection, GeoJson, JsonValue};

use crate::IngestError;

/// Property keys tried, in order, for a borough's name.
const BOROUGH_NAME_KEYS: &[&str] = &["boro_name", "borough", "name"];

/// Property keys tried, in order, for a subway route's label.
const LINE_NAME_KEYS: &[&str] = &["name", "rt_symbol", "line"];

/// Loads borough boundaries from a `GeoJSON` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_borough_boundaries(path: &Path) -> Result<Vec<BoroughBoundary>, IngestError> {
    let content = std::fs::read_to_string(path)?;
    parse_borough_boundaries(&content)
}

/// Parses a borough boundary `FeatureCollection`.
///
/// Each `Polygon` or `MultiPolygon` feature becomes one boundary. Features
/// with other geometry types or no usable name are skipped.
///
/// # Errors
///
/// Returns an error if the content is not a `FeatureCollection` or a
/// polygon's coordinates are malformed.
pub fn parse_borough_boundaries(content: &str) -> Result<Vec<BoroughBoundary>, IngestError> {
    let collection = parse_feature_collection(content)?;
    let mut boundaries = Vec::new();

    for feature in collection.features {
        let Some(name) = feature_name(&feature, BOROUGH_NAME_KEYS) else {
            log::warn!("Skipping borough feature without a name property");
            continue;
        };
        let Some(geometry) = feature.geometry else {
            log::warn!("Skipping borough {name} without geometry");
            continue;
        };

        let polygon = match geo::Geometry::<f64>::try_from(geometry)? {
            geo::Geometry::MultiPolygon(mp) => mp,
            geo::Geometry::Polygon(p) => MultiPolygon(vec![p]),
            _ => {
                log::warn!("Skipping borough {name}: geometry is not a polygon");
                continue;
            }
        };

        boundaries.push(BoroughBoundary { name, polygon });
    }

    log::info!("Parsed {} borough boundaries", boundaries.len());

    Ok(boundaries)
}

/// Loads subway lines from a `GeoJSON` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_subway_lines(path: &Path) -> Result<Vec<SubwayLine>, IngestError> {
    let content = std::fs::read_to_string(path)?;
    parse_subway_lines(&content)
}

/// Parses a subway route `FeatureCollection`.
///
/// Only `LineString` features are kept; routes drawn as `MultiLineString`
/// or any other type are skipped. Unnamed routes are labelled `line-<n>`
/// by feature position.
///
/// # Errors
///
/// Returns an error if the content is not a `FeatureCollection` or a line's
/// coordinates are malformed.
pub fn parse_subway_lines(content: &str) -> Result<Vec<SubwayLine>, IngestError> {
    let collection = parse_feature_collection(content)?;
    let mut lines = Vec::new();

    for (idx, feature) in collection.features.into_iter().enumerate() {
        let name = feature_name(&feature, LINE_NAME_KEYS).unwrap_or_else(|| format!("line-{idx}"));
        let Some(geometry) = feature.geometry else {
            continue;
        };

        match geo::Geometry::<f64>::try_from(geometry)? {
            geo::Geometry::LineString(line) => lines.push(SubwayLine { name, line }),
            other => log::debug!("Skipping subway feature {name}: {other:?} is not a LineString"),
        }
    }

    log::info!("Parsed {} subway lines", lines.len());

    Ok(lines)
}

fn parse_feature_collection(content: &str) -> Result<FeatureCollection, IngestError> {
    match content.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        GeoJson::Feature(_) => Err(IngestError::Conversion {
            message: "expected a FeatureCollection, found a single Feature".to_string(),
        }),
        GeoJson::Geometry(_) => Err(IngestError::Conversion {
            message: "expected a FeatureCollection, found a bare Geometry".to_string(),
        }),
    }
}

/// Returns the first non-blank string property among `keys`.
fn feature_name(feature: &Feature, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| feature.property(key).and_then(JsonValue::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOROUGHS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "boro_name": "Manhattan", "boro_code": "1" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [[[[-74.02, 40.70], [-73.92, 40.70], [-73.92, 40.88], [-74.02, 40.88], [-74.02, 40.70]]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "borough": "Brooklyn" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-74.05, 40.57], [-73.85, 40.57], [-73.85, 40.70], [-74.05, 40.70], [-74.05, 40.57]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "boro_name": "Queens" },
                "geometry": { "type": "Point", "coordinates": [-73.8, 40.7] }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": null
            }
        ]
    }"#;

    const SUBWAY: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "name": "A-C-E" },
                "geometry": { "type": "LineString", "coordinates": [[-74.0, 40.70], [-73.99, 40.75]] }
            },
            {
                "type": "Feature",
                "properties": { "rt_symbol": "L" },
                "geometry": { "type": "LineString", "coordinates": [[-74.0, 40.74], [-73.90, 40.68]] }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": { "type": "MultiLineString", "coordinates": [[[-73.9, 40.7], [-73.8, 40.7]]] }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": { "type": "LineString", "coordinates": [[-73.95, 40.80], [-73.94, 40.81]] }
            }
        ]
    }"#;

    #[test]
    fn parses_polygon_and_multipolygon_boroughs() {
        let boundaries = parse_borough_boundaries(BOROUGHS).unwrap();
        let names: Vec<&str> = boundaries.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Manhattan", "Brooklyn"]);
        assert_eq!(boundaries[1].polygon.0.len(), 1);
    }

    #[test]
    fn keeps_only_line_strings() {
        let lines = parse_subway_lines(SUBWAY).unwrap();
        let names: Vec<&str> = lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["A-C-E", "L", "line-3"]);
        assert_eq!(lines[0].line.0.len(), 2);
    }

    #[test]
    fn rejects_non_collection() {
        let err =
            parse_subway_lines(r#"{"type": "Point", "coordinates": [0.0, 0.0]}"#).unwrap_err();
        assert!(matches!(err, IngestError::Conversion { .. }));
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            parse_borough_boundaries("not json"),
            Err(IngestError::GeoJson(_))
        ));
    }
}
