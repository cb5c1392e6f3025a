//! Fixed advice shown alongside each risk level.

use safeguard_risk_models::{RiskLevel, UNABLE_TO_ASSESS};

const SAFE: &[&str] = &[
    "Stay aware of your surroundings",
    "Keep your phone charged",
    "Share your location with trusted contacts",
];

const MODERATE: &[&str] = &[
    "Stay in well-lit areas",
    "Avoid isolated shortcuts",
    "Keep emergency contacts ready",
    "Consider sharing your live location",
];

const UNSAFE: &[&str] = &[
    "Move to a populated, well-lit area immediately",
    "Contact a trusted person now",
    "Be ready to trigger an emergency alert",
    "Head to the nearest safe place",
];

const UNKNOWN: &[&str] = &[UNABLE_TO_ASSESS];

/// Returns the recommendations for `level`, in display order.
#[must_use]
pub const fn for_level(level: RiskLevel) -> &'static [&'static str] {
    match level {
        RiskLevel::Safe => SAFE,
        RiskLevel::Moderate => MODERATE,
        RiskLevel::Unsafe => UNSAFE,
        RiskLevel::Unknown => UNKNOWN,
    }
}

/// Owned copy of [`for_level`] for embedding in an assessment.
#[must_use]
pub fn owned_for_level(level: RiskLevel) -> Vec<String> {
    for_level(level).iter().map(ToString::to_string).collect()
}
