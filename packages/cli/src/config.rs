//! Runtime configuration resolved from flags and environment variables.
//!
//! | Variable                  | Meaning                                     |
//! |---------------------------|---------------------------------------------|
//! | `SAFEGUARD_PLACES`        | Safe place dataset file (toml/json/geojson) |
//! | `SAFEGUARD_LOCATION_RISK` | Fixed location risk instead of random       |
//!
//! Command-line flags take precedence over the environment.

use std::env::VarError;
use std::path::PathBuf;

use safeguard_places::{PlacesError, SafePlaceFinder};
use safeguard_risk::{FixedLocationRisk, RiskScorer};
use thiserror::Error;

/// Environment variable naming a safe place dataset file.
pub const PLACES_ENV: &str = "SAFEGUARD_PLACES";

/// Environment variable holding a fixed location risk value.
pub const LOCATION_RISK_ENV: &str = "SAFEGUARD_LOCATION_RISK";

/// Builds the safe place finder from `--places`, then `SAFEGUARD_PLACES`,
/// then the built-in dataset.
///
/// # Errors
///
/// Returns [`PlacesError`] if a configured dataset file cannot be loaded.
pub fn finder(places_flag: Option<PathBuf>) -> Result<SafePlaceFinder, PlacesError> {
    let path = places_flag.or_else(|| std::env::var_os(PLACES_ENV).map(PathBuf::from));

    path.map_or_else(
        || {
            log::debug!("Using built-in safe place dataset");
            Ok(SafePlaceFinder::default_dataset())
        },
        |path| SafePlaceFinder::load(&path),
    )
}

/// Builds the risk scorer from `--location-risk`, then
/// `SAFEGUARD_LOCATION_RISK`, then the random placeholder provider.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if `SAFEGUARD_LOCATION_RISK` is
/// set but is not valid Unicode or not a number.
pub fn scorer(location_risk_flag: Option<f64>) -> Result<RiskScorer, ConfigError> {
    let fixed = match location_risk_flag {
        Some(value) => Some(value),
        None => env_location_risk()?,
    };

    Ok(fixed.map_or_else(RiskScorer::default, |value| {
        log::debug!("Using fixed location risk {value}");
        RiskScorer::new(FixedLocationRisk(value))
    }))
}

fn env_location_risk() -> Result<Option<f64>, ConfigError> {
    let invalid = |value: String| ConfigError::InvalidValue {
        variable: LOCATION_RISK_ENV,
        value,
    };

    match std::env::var(LOCATION_RISK_ENV) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(invalid(raw)),
        },
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(invalid(raw.to_string_lossy().into_owned())),
    }
}

/// Errors that can occur while resolving runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held an unusable value.
    #[error("invalid value for {variable}: '{value}'")]
    InvalidValue {
        /// The variable name.
        variable: &'static str,
        /// The raw value, lossily decoded.
        value: String,
    },
}
