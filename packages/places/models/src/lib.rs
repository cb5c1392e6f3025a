#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Safe place reference data types.
//!
//! A [`SafePlace`] is a point of interest usable as a nearby refuge. The
//! reference set is read-only for the lifetime of the process; ranked
//! query results wrap a place with its distance from the query origin.

use safeguard_location_models::Coordinate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Kind of safe place.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlaceType {
    /// Police station
    Police,
    /// Hospital or emergency room
    Hospital,
    /// Shopping mall or other staffed public building
    Mall,
}

impl PlaceType {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Police => "Police Station",
            Self::Hospital => "Hospital",
            Self::Mall => "Shopping Mall",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Police, Self::Hospital, Self::Mall]
    }
}

/// A reference point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafePlace {
    /// Unique identifier within the dataset.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Kind of place.
    #[serde(rename = "type")]
    pub place_type: PlaceType,
    /// Location of the entrance.
    pub coordinate: Coordinate,
    /// Street address.
    #[serde(default)]
    pub address: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
    /// Opening hours, free-form (e.g. "24/7").
    #[serde(default)]
    pub hours: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
}

/// A [`SafePlace`] with its distance from a query origin.
///
/// Only meaningful for the query that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedSafePlace {
    /// The place itself.
    #[serde(flatten)]
    pub place: SafePlace,
    /// Great-circle distance from the origin in meters.
    pub distance_meters: f64,
}

/// On-disk dataset layout: a list of places under a `places` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceDataset {
    /// The places, in dataset order.
    #[serde(default)]
    pub places: Vec<SafePlace>,
}
