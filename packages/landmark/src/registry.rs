//! Compile-time registry of landmark definitions.
//!
//! Each entry is a `(name, toml_content)` pair embedded via `include_str!`.
//! Adding a landmark requires creating a TOML file in `sources/` and adding
//! a corresponding entry here.

use airbnb_insights_landmark_models::LandmarkDefinition;

/// Number of registered landmarks. Enforced by a test.
#[cfg(test)]
const EXPECTED_LANDMARK_COUNT: usize = 2;

/// Embedded TOML landmark definitions.
const LANDMARK_TOMLS: &[(&str, &str)] = &[
    ("central_park", include_str!("../sources/central_park.toml")),
    (
        "statue_of_liberty",
        include_str!("../sources/statue_of_liberty.toml"),
    ),
];

/// Returns all registered landmark definitions, unvalidated.
///
/// # Panics
///
/// Panics if any embedded TOML file fails to parse. Since these are
/// compile-time constants, parse failures indicate a development error
/// and are caught by the tests below.
#[must_use]
pub fn all_definitions() -> Vec<LandmarkDefinition> {
    LANDMARK_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse landmark '{name}': {e}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn loads_all_landmarks() {
        let defs = all_definitions();
        assert_eq!(
            defs.len(),
            EXPECTED_LANDMARK_COUNT,
            "Expected {EXPECTED_LANDMARK_COUNT} landmarks, found {}. \
             Update EXPECTED_LANDMARK_COUNT after adding/removing landmarks.",
            defs.len()
        );
    }

    #[test]
    fn landmark_ids_are_unique_and_match_file_names() {
        let mut seen = BTreeSet::new();
        for ((file_name, _), def) in LANDMARK_TOMLS.iter().zip(all_definitions()) {
            assert_eq!(*file_name, def.id, "Landmark file/id mismatch");
            assert!(seen.insert(def.id.clone()), "Duplicate landmark ID: {}", def.id);
        }
    }

    #[test]
    fn all_landmarks_have_required_fields() {
        for def in &all_definitions() {
            assert!(!def.name.is_empty(), "Landmark {} has empty name", def.id);
            assert!(
                def.buffer_degrees >= 0.0,
                "Landmark {} has negative buffer",
                def.id
            );
        }
    }
}
