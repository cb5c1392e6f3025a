//! Safe place dataset loading.
//!
//! The built-in dataset is embedded via `include_str!`. Replacement
//! datasets can be read from TOML or JSON files using the
//! [`PlaceDataset`] layout, or from a `GeoJSON` `FeatureCollection` of
//! points whose properties carry the remaining [`SafePlace`] fields.

use std::collections::BTreeSet;
use std::path::Path;

use geojson::GeoJson;
use safeguard_places_models::{PlaceDataset, SafePlace};
use serde_json::Value;

use crate::PlacesError;

/// Number of places in the built-in dataset. Enforced by a test.
#[cfg(test)]
const EXPECTED_PLACE_COUNT: usize = 10;

/// Embedded default dataset.
const DEFAULT_DATASET: &str = include_str!("../data/default.toml");

/// Returns the built-in places.
///
/// # Panics
///
/// Panics if the embedded TOML fails to parse or validate. It is a
/// compile-time constant, so a failure is a development error and is
/// caught by the tests below.
#[must_use]
pub fn default_places() -> Vec<SafePlace> {
    let places = parse_toml(DEFAULT_DATASET)
        .unwrap_or_else(|e| panic!("Failed to parse built-in safe place dataset: {e}"));
    validate(&places).unwrap_or_else(|e| panic!("Invalid built-in safe place dataset: {e}"));
    places
}

/// Reads places from `path`, choosing the format by file extension
/// (`toml`, `json`, or `geojson`).
///
/// # Errors
///
/// Returns [`PlacesError`] if the file cannot be read, the extension is
/// not recognized, parsing fails, or the places fail validation.
pub fn load_file(path: &Path) -> Result<Vec<SafePlace>, PlacesError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let text = std::fs::read_to_string(path)?;

    let places = match extension.as_deref() {
        Some("toml") => parse_toml(&text)?,
        Some("json") => parse_json(&text)?,
        Some("geojson") => parse_geojson(&text)?,
        _ => {
            return Err(PlacesError::UnsupportedFormat {
                path: path.display().to_string(),
            });
        }
    };

    validate(&places)?;
    log::info!("Loaded {} safe places from {}", places.len(), path.display());

    Ok(places)
}

/// Parses a TOML dataset (`[[places]]` tables).
///
/// # Errors
///
/// Returns [`PlacesError::Toml`] on malformed input.
pub fn parse_toml(text: &str) -> Result<Vec<SafePlace>, PlacesError> {
    let dataset: PlaceDataset = toml::de::from_str(text)?;
    Ok(dataset.places)
}

/// Parses a JSON dataset (`{"places": [...]}`).
///
/// # Errors
///
/// Returns [`PlacesError::Json`] on malformed input.
pub fn parse_json(text: &str) -> Result<Vec<SafePlace>, PlacesError> {
    let dataset: PlaceDataset = serde_json::from_str(text)?;
    Ok(dataset.places)
}

/// Parses a `GeoJSON` `FeatureCollection` of `Point` features.
///
/// Each feature's properties supply `name`, `type` and the optional text
/// fields. The `id` comes from the properties, falling back to the
/// feature id.
///
/// # Errors
///
/// Returns [`PlacesError`] if the document is not a feature collection, a
/// feature is not a point, or its properties do not describe a place.
pub fn parse_geojson(text: &str) -> Result<Vec<SafePlace>, PlacesError> {
    let geojson: GeoJson = text.parse()?;
    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(PlacesError::InvalidFeature {
            index: 0,
            message: "expected a FeatureCollection".to_string(),
        });
    };

    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| -> Result<SafePlace, PlacesError> {
            let invalid = |message: &str| PlacesError::InvalidFeature {
                index,
                message: message.to_string(),
            };

            let geometry = feature
                .geometry
                .ok_or_else(|| invalid("feature has no geometry"))?;
            let geojson::Value::Point(position) = geometry.value else {
                return Err(invalid("geometry is not a Point"));
            };
            let [longitude, latitude, ..] = position.as_slice() else {
                return Err(invalid("point has fewer than two ordinates"));
            };

            let mut properties = feature.properties.unwrap_or_default();
            if !properties.contains_key("id")
                && let Some(id) = feature.id
            {
                let id = match id {
                    geojson::feature::Id::String(s) => s,
                    geojson::feature::Id::Number(n) => n.to_string(),
                };
                properties.insert("id".to_string(), Value::String(id));
            }
            properties.insert(
                "coordinate".to_string(),
                serde_json::json!({ "latitude": latitude, "longitude": longitude }),
            );

            serde_json::from_value(Value::Object(properties))
                .map_err(|e| invalid(&format!("invalid place properties: {e}")))
        })
        .collect()
}

/// Checks ids are unique and non-empty, names are present, and every
/// coordinate is within bounds.
///
/// # Errors
///
/// Returns the first [`PlacesError`] found, in dataset order.
pub fn validate(places: &[SafePlace]) -> Result<(), PlacesError> {
    let mut seen = BTreeSet::new();

    for place in places {
        if place.id.is_empty() {
            return Err(PlacesError::MissingField {
                id: place.name.clone(),
                field: "id",
            });
        }
        if place.name.is_empty() {
            return Err(PlacesError::MissingField {
                id: place.id.clone(),
                field: "name",
            });
        }
        if let Err(source) = place.coordinate.validate() {
            return Err(PlacesError::InvalidCoordinate {
                id: place.id.clone(),
                source,
            });
        }
        if !seen.insert(place.id.as_str()) {
            return Err(PlacesError::DuplicateId {
                id: place.id.clone(),
            });
        }
    }

    Ok(())
}
