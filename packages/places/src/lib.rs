#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Nearest safe place search.
//!
//! [`SafePlaceFinder`] owns a read-only reference set of [`SafePlace`]s and
//! ranks them by haversine distance from a query origin. Queries never
//! fail: an empty result is a valid answer.

pub mod distance;
pub mod registry;

use std::path::Path;
use std::sync::Arc;

use safeguard_location_models::{Coordinate, CoordinateError};
use safeguard_places_models::{PlaceType, RankedSafePlace, SafePlace};
use thiserror::Error;

pub use distance::{EARTH_RADIUS_METERS, distance_meters, format_distance};

/// Errors that can occur while loading a safe place dataset.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Reading the dataset file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML dataset could not be parsed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON dataset could not be parsed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// `GeoJSON` dataset could not be parsed.
    #[error("GeoJSON parse error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// A `GeoJSON` feature does not describe a place.
    #[error("Invalid feature #{index}: {message}")]
    InvalidFeature {
        /// Position of the feature in the collection.
        index: usize,
        /// Description of what went wrong.
        message: String,
    },

    /// The file extension is not one of `toml`, `json`, `geojson`.
    #[error("Unsupported dataset format: {path}")]
    UnsupportedFormat {
        /// The offending path.
        path: String,
    },

    /// Two places share an id.
    #[error("Duplicate place id: {id}")]
    DuplicateId {
        /// The repeated id.
        id: String,
    },

    /// A place has an empty required field.
    #[error("Place {id} is missing {field}")]
    MissingField {
        /// Id of the place (or its name when the id itself is missing).
        id: String,
        /// Name of the empty field.
        field: &'static str,
    },

    /// A place's coordinate is outside the valid bounds.
    #[error("Place {id} has an invalid coordinate: {source}")]
    InvalidCoordinate {
        /// Id of the place.
        id: String,
        /// The underlying bounds error.
        source: CoordinateError,
    },
}

/// Read-only safe place reference set with distance queries.
///
/// Cloning is cheap; clones share the same places.
#[derive(Debug, Clone)]
pub struct SafePlaceFinder {
    places: Arc<[SafePlace]>,
}

impl Default for SafePlaceFinder {
    fn default() -> Self {
        Self::default_dataset()
    }
}

impl SafePlaceFinder {
    /// Creates a finder over `places` after validating them.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError`] if ids repeat, a required field is empty, or
    /// a coordinate is out of range.
    pub fn new(places: Vec<SafePlace>) -> Result<Self, PlacesError> {
        registry::validate(&places)?;
        Ok(Self {
            places: places.into(),
        })
    }

    /// Creates a finder over the built-in dataset.
    #[must_use]
    pub fn default_dataset() -> Self {
        Self {
            places: registry::default_places().into(),
        }
    }

    /// Creates a finder from a dataset file. See [`registry::load_file`].
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError`] if the file cannot be read, parsed, or
    /// validated.
    pub fn load(path: &Path) -> Result<Self, PlacesError> {
        Ok(Self {
            places: registry::load_file(path)?.into(),
        })
    }

    /// All places, in dataset order.
    #[must_use]
    pub fn places(&self) -> &[SafePlace] {
        &self.places
    }

    /// Looks up a place by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SafePlace> {
        self.places.iter().find(|place| place.id == id)
    }

    /// Number of places in the reference set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Whether the reference set holds no places.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Returns up to `limit` places within `max_distance_meters` of
    /// `origin`, closest first, optionally restricted to one type.
    ///
    /// Places at equal distance keep their dataset order. An out-of-range
    /// origin yields no results.
    #[must_use]
    pub fn find_nearest(
        &self,
        origin: &Coordinate,
        max_distance_meters: f64,
        limit: usize,
        type_filter: Option<PlaceType>,
    ) -> Vec<RankedSafePlace> {
        if let Err(e) = origin.validate() {
            log::warn!("Ignoring safe place query: {e}");
            return Vec::new();
        }
        if limit == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<RankedSafePlace> = self
            .places
            .iter()
            .filter(|place| type_filter.is_none_or(|t| place.place_type == t))
            .filter_map(|place| {
                let distance_meters = distance_meters(origin, &place.coordinate);
                (distance_meters <= max_distance_meters).then(|| RankedSafePlace {
                    place: place.clone(),
                    distance_meters,
                })
            })
            .collect();

        ranked.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
        ranked.truncate(limit);

        log::debug!(
            "Found {} safe places within {max_distance_meters} m of {origin}",
            ranked.len()
        );

        ranked
    }

    /// Returns the closest place of `place_type` within
    /// `max_distance_meters`, if any.
    #[must_use]
    pub fn nearest_of_type(
        &self,
        origin: &Coordinate,
        place_type: PlaceType,
        max_distance_meters: f64,
    ) -> Option<RankedSafePlace> {
        self.find_nearest(origin, max_distance_meters, 1, Some(place_type))
            .into_iter()
            .next()
    }
}
