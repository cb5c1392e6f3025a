//! Environmental and behavioral sub-scores, plus the flat bonuses applied
//! on top of the weighted sum.

use safeguard_risk_models::RiskFactors;

use crate::clamp_score;

/// Visibility below this many meters counts as poor.
pub const LOW_VISIBILITY_METERS: f64 = 1000.0;

/// Stationary for longer than this many milliseconds counts as a risk.
pub const STATIONARY_THRESHOLD_MS: u64 = 5 * 60 * 1000;

/// Speed above this many km/h counts as a risk.
pub const HIGH_SPEED_KMH: f64 = 50.0;

/// Weather and lighting sub-score, in `0..=100`.
#[must_use]
pub fn environmental_risk(factors: &RiskFactors) -> f64 {
    let mut risk = 0.0;

    if let Some(weather) = &factors.weather {
        if weather
            .visibility
            .is_some_and(|visibility| visibility < LOW_VISIBILITY_METERS)
        {
            risk += 30.0;
        }
        if weather
            .precipitation
            .is_some_and(|precipitation| precipitation > 0.0)
        {
            risk += 20.0;
        }
        if weather
            .temperature
            .is_some_and(|temperature| temperature < 0.0)
        {
            risk += 10.0;
        }
    }

    if factors.is_dark_area {
        risk += 40.0;
    }
    if factors.is_poor_lighting {
        risk += 25.0;
    }

    clamp_score(risk)
}

/// Movement and attention sub-score, in `0..=100`.
#[must_use]
pub fn behavioral_risk(factors: &RiskFactors) -> f64 {
    let mut risk = 0.0;

    if factors.is_stationary
        && factors
            .stationary_time_ms
            .is_some_and(|ms| ms > STATIONARY_THRESHOLD_MS)
    {
        risk += 30.0;
    }
    if factors.speed.is_some_and(|speed| speed > HIGH_SPEED_KMH) {
        risk += 20.0;
    }
    if factors.is_alone {
        risk += 25.0;
    }
    if factors.is_distracted {
        risk += 15.0;
    }

    clamp_score(risk)
}

/// Flat bonuses added after weighting.
///
/// `is_alone` and `is_dark_area` also feed the weighted sub-scores, so they
/// count twice.
#[must_use]
pub fn flat_bonus(factors: &RiskFactors) -> f64 {
    let mut bonus = 0.0;

    if factors.is_alone {
        bonus += 10.0;
    }
    if factors.is_dark_area {
        bonus += 15.0;
    }
    if factors.has_recent_incidents {
        bonus += 20.0;
    }
    if factors.is_weekend {
        bonus += 5.0;
    }

    bonus
}
