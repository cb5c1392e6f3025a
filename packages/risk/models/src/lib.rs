#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Risk factor inputs and assessment result types.
//!
//! [`RiskFactors`] is what the app state hands to the scorer, and
//! [`RiskAssessment`] is what comes back. Both are plain data: an
//! assessment is created fresh on every call and never mutated.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Recommendation attached to an [`RiskLevel::Unknown`] assessment.
pub const UNABLE_TO_ASSESS: &str = "Unable to assess risk level";

/// Score at or above which an assessment is [`RiskLevel::Moderate`].
pub const MODERATE_THRESHOLD: f64 = 40.0;

/// Score at or above which an assessment is [`RiskLevel::Unsafe`].
pub const UNSAFE_THRESHOLD: f64 = 70.0;

/// Three-level safety classification, plus `Unknown` for failed
/// assessments.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RiskLevel {
    /// Score below 40.
    Safe,
    /// Score in `40..70`.
    Moderate,
    /// Score of 70 or more.
    Unsafe,
    /// The assessment could not be computed.
    Unknown,
}

impl RiskLevel {
    /// Classifies a `0..=100` score.
    ///
    /// Non-finite scores classify as [`RiskLevel::Unknown`].
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if !score.is_finite() {
            Self::Unknown
        } else if score >= UNSAFE_THRESHOLD {
            Self::Unsafe
        } else if score >= MODERATE_THRESHOLD {
            Self::Moderate
        } else {
            Self::Safe
        }
    }

    /// Human-readable badge label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::Moderate => "Moderate Risk",
            Self::Unsafe => "Unsafe",
            Self::Unknown => "Unknown",
        }
    }

    /// Hex badge color for the level.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Safe => "#4CAF50",
            Self::Moderate => "#FF9800",
            Self::Unsafe => "#F44336",
            Self::Unknown => "#9E9E9E",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Safe, Self::Moderate, Self::Unsafe, Self::Unknown]
    }
}

/// Current weather conditions. Each reading is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Weather {
    /// Visibility in meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
    /// Precipitation in millimeters per hour.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<f64>,
    /// Temperature in degrees Celsius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Context flags and readings supplied by the caller.
///
/// Every field is optional: an unset flag or a missing reading simply
/// does not contribute to the score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskFactors {
    /// The user is on their own.
    pub is_alone: bool,
    /// The current area is dark.
    pub is_dark_area: bool,
    /// Street lighting is poor.
    pub is_poor_lighting: bool,
    /// Incidents were recently reported nearby.
    pub has_recent_incidents: bool,
    /// Caller-asserted weekend flag, independent of the timestamp.
    pub is_weekend: bool,
    /// Current weather, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,
    /// The user has not moved recently.
    pub is_stationary: bool,
    /// How long the user has been stationary, in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stationary_time_ms: Option<u64>,
    /// Current speed in km/h.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// The user is distracted (e.g. looking at the phone while walking).
    pub is_distracted: bool,
}

impl RiskFactors {
    /// Sets [`Self::is_alone`].
    #[must_use]
    pub const fn alone(mut self, value: bool) -> Self {
        self.is_alone = value;
        self
    }

    /// Sets [`Self::is_dark_area`].
    #[must_use]
    pub const fn dark_area(mut self, value: bool) -> Self {
        self.is_dark_area = value;
        self
    }

    /// Sets [`Self::is_poor_lighting`].
    #[must_use]
    pub const fn poor_lighting(mut self, value: bool) -> Self {
        self.is_poor_lighting = value;
        self
    }

    /// Sets [`Self::has_recent_incidents`].
    #[must_use]
    pub const fn recent_incidents(mut self, value: bool) -> Self {
        self.has_recent_incidents = value;
        self
    }

    /// Sets [`Self::is_weekend`].
    #[must_use]
    pub const fn weekend(mut self, value: bool) -> Self {
        self.is_weekend = value;
        self
    }

    /// Sets [`Self::is_distracted`].
    #[must_use]
    pub const fn distracted(mut self, value: bool) -> Self {
        self.is_distracted = value;
        self
    }

    /// Attaches current weather readings.
    #[must_use]
    pub const fn with_weather(mut self, weather: Weather) -> Self {
        self.weather = Some(weather);
        self
    }

    /// Sets the current speed, in km/h.
    #[must_use]
    pub const fn with_speed(mut self, speed_kmh: f64) -> Self {
        self.speed = Some(speed_kmh);
        self
    }

    /// Marks the user as stationary for `duration_ms` milliseconds.
    #[must_use]
    pub const fn stationary_for(mut self, duration_ms: u64) -> Self {
        self.is_stationary = true;
        self.stationary_time_ms = Some(duration_ms);
        self
    }
}

/// Per-category sub-scores, each in `0..=100`, before weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorScores {
    /// Time-of-day and day-of-week risk.
    pub time: f64,
    /// Location risk from the configured provider.
    pub location: f64,
    /// Weather and lighting risk.
    pub environmental: f64,
    /// Movement and attention risk.
    pub behavioral: f64,
}

/// Result of a single risk assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Classification derived from `score`.
    pub level: RiskLevel,
    /// Final score in `0..=100`.
    pub score: f64,
    /// Sub-scores that fed the weighted sum. `None` when the assessment
    /// failed.
    pub factors: Option<FactorScores>,
    /// Level-specific advice, in display order.
    pub recommendations: Vec<String>,
}

impl RiskAssessment {
    /// The assessment returned when scoring fails internally.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            level: RiskLevel::Unknown,
            score: 0.0,
            factors: None,
            recommendations: vec![UNABLE_TO_ASSESS.to_string()],
        }
    }

    /// Returns `true` if this is the fallback for a failed assessment.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.level == RiskLevel::Unknown
    }
}
