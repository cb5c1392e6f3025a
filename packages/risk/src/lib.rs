#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Heuristic personal-safety risk scoring.
//!
//! [`RiskScorer::assess`] combines four sub-scores into a weighted sum:
//!
//! | Sub-score     | Weight | Source                              |
//! |---------------|--------|-------------------------------------|
//! | time          | 0.4    | hour of day and day of week         |
//! | location      | 0.3    | a [`LocationRiskProvider`]          |
//! | environmental | 0.2    | weather, darkness, lighting         |
//! | behavioral    | 0.1    | movement, speed, company, attention |
//!
//! Flat bonuses from [`factors::flat_bonus`] are added on top, the total is
//! clamped to `0..=100` and classified with [`RiskLevel::from_score`].
//!
//! Scoring never fails from the caller's point of view: any internal error
//! produces [`RiskAssessment::unknown`].

pub mod factors;
pub mod provider;
pub mod recommendations;
pub mod time;

use std::sync::Arc;

use chrono::NaiveDateTime;
use safeguard_location_models::{Coordinate, CoordinateError};
use safeguard_risk_models::{FactorScores, RiskAssessment, RiskFactors, RiskLevel};
use thiserror::Error;

pub use provider::{FixedLocationRisk, LocationRiskProvider, RandomLocationRisk};

/// Weight of the time sub-score.
pub const TIME_WEIGHT: f64 = 0.4;
/// Weight of the location sub-score.
pub const LOCATION_WEIGHT: f64 = 0.3;
/// Weight of the environmental sub-score.
pub const ENVIRONMENTAL_WEIGHT: f64 = 0.2;
/// Weight of the behavioral sub-score.
pub const BEHAVIORAL_WEIGHT: f64 = 0.1;

/// Errors that can occur inside the scoring pipeline.
///
/// These never reach callers of [`RiskScorer::assess`]; they are logged and
/// replaced with an `Unknown` assessment. [`RiskScorer::try_assess`]
/// exposes them directly.
#[derive(Debug, Error)]
pub enum RiskError {
    /// The coordinate is outside the valid lat/long bounds.
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(#[from] CoordinateError),

    /// The location risk provider could not produce a value.
    #[error("Location risk unavailable: {message}")]
    LocationUnavailable {
        /// Description of what went wrong.
        message: String,
    },

    /// A sub-score or the final score was NaN or infinite.
    #[error("Non-finite {component} score: {value}")]
    NonFinite {
        /// Which part of the pipeline produced the value.
        component: &'static str,
        /// The offending value.
        value: f64,
    },
}

/// Clamps a raw score to `0..=100`.
#[must_use]
pub fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}

fn finite(component: &'static str, value: f64) -> Result<f64, RiskError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RiskError::NonFinite { component, value })
    }
}

/// Stateless risk scorer.
///
/// Holds only the location risk provider, so one scorer can be shared
/// across threads.
#[derive(Clone)]
pub struct RiskScorer {
    provider: Arc<dyn LocationRiskProvider>,
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new(RandomLocationRisk::default())
    }
}

impl std::fmt::Debug for RiskScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiskScorer").finish_non_exhaustive()
    }
}

impl RiskScorer {
    /// Creates a scorer using `provider` for the location sub-score.
    #[must_use]
    pub fn new(provider: impl LocationRiskProvider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Creates a scorer from an already shared provider.
    #[must_use]
    pub fn with_provider(provider: Arc<dyn LocationRiskProvider>) -> Self {
        Self { provider }
    }

    /// Assesses the risk at `coordinate` given the caller's context
    /// `factors` and the local wall-clock time `now`.
    ///
    /// Never fails. Internal errors, including an out-of-range coordinate,
    /// yield [`RiskAssessment::unknown`].
    #[must_use]
    pub fn assess(
        &self,
        coordinate: &Coordinate,
        factors: &RiskFactors,
        now: NaiveDateTime,
    ) -> RiskAssessment {
        match self.try_assess(coordinate, factors, now) {
            Ok(assessment) => assessment,
            Err(e) => {
                log::warn!("Risk assessment failed at {coordinate}: {e}");
                RiskAssessment::unknown()
            }
        }
    }

    /// [`RiskScorer::assess`] using the current local time.
    #[must_use]
    pub fn assess_now(&self, coordinate: &Coordinate, factors: &RiskFactors) -> RiskAssessment {
        self.assess(coordinate, factors, chrono::Local::now().naive_local())
    }

    /// Runs the scoring pipeline, surfacing internal errors.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError`] if the coordinate is invalid, the location
    /// provider fails, or any score is not finite.
    #[allow(clippy::suboptimal_flops)]
    pub fn try_assess(
        &self,
        coordinate: &Coordinate,
        factors: &RiskFactors,
        now: NaiveDateTime,
    ) -> Result<RiskAssessment, RiskError> {
        coordinate.validate()?;

        let scores = FactorScores {
            time: time::time_risk(now),
            location: clamp_score(finite(
                "location",
                self.provider.location_risk(coordinate)?,
            )?),
            environmental: factors::environmental_risk(factors),
            behavioral: factors::behavioral_risk(factors),
        };

        let weighted = TIME_WEIGHT * scores.time
            + LOCATION_WEIGHT * scores.location
            + ENVIRONMENTAL_WEIGHT * scores.environmental
            + BEHAVIORAL_WEIGHT * scores.behavioral;
        let bonus = factors::flat_bonus(factors);
        let score = clamp_score(finite("final", weighted + bonus)?);
        let level = RiskLevel::from_score(score);

        log::debug!(
            "Risk at {coordinate}: time={:.1} location={:.1} environmental={:.1} \
             behavioral={:.1} weighted={weighted:.1} bonus={bonus:.1} score={score:.1} ({level})",
            scores.time,
            scores.location,
            scores.environmental,
            scores.behavioral,
        );

        Ok(RiskAssessment {
            level,
            score,
            factors: Some(scores),
            recommendations: recommendations::owned_for_level(level),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use safeguard_risk_models::Weather;

    use super::*;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        // January 2024: the 15th is a Monday, the 20th a Saturday.
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn origin() -> Coordinate {
        Coordinate::new(40.7128, -74.0060).unwrap()
    }

    #[test]
    fn monday_afternoon_with_no_factors_is_safe() {
        let scorer = RiskScorer::default();
        for _ in 0..100 {
            let assessment = scorer.assess(&origin(), &RiskFactors::default(), at(15, 14, 0));
            assert_eq!(assessment.level, RiskLevel::Safe);
            assert!((0.0..=100.0).contains(&assessment.score));
            let factors = assessment.factors.unwrap();
            assert!((factors.time - 10.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn saturday_night_alone_in_the_dark_is_unsafe() {
        let scorer = RiskScorer::default();
        let factors = RiskFactors::default()
            .alone(true)
            .dark_area(true)
            .recent_incidents(true);
        for _ in 0..100 {
            let assessment = scorer.assess(&origin(), &factors, at(20, 23, 30));
            assert_eq!(assessment.level, RiskLevel::Unsafe);
            assert!((assessment.score - 100.0).abs() < f64::EPSILON);
            assert!((assessment.factors.unwrap().time - 100.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn deterministic_provider_gives_exact_score() {
        let scorer = RiskScorer::new(FixedLocationRisk(50.0));
        let assessment = scorer.assess(&origin(), &RiskFactors::default(), at(15, 14, 0));
        // 0.4 * 10 + 0.3 * 50
        assert!((assessment.score - 19.0).abs() < 1e-9);
        assert_eq!(
            assessment.recommendations,
            recommendations::owned_for_level(RiskLevel::Safe)
        );
    }

    #[test]
    fn moderate_band() {
        let scorer = RiskScorer::new(FixedLocationRisk(50.0));
        let factors = RiskFactors::default().dark_area(true).poor_lighting(true);
        let assessment = scorer.assess(&origin(), &factors, at(15, 19, 0));
        // 0.4 * 40 + 0.3 * 50 + 0.2 * 65 + 15
        assert!((assessment.score - 59.0).abs() < 1e-9);
        assert_eq!(assessment.level, RiskLevel::Moderate);
    }

    #[test]
    fn empty_factors_always_classify() {
        let scorer = RiskScorer::default();
        for day in 15..=21 {
            for hour in 0..24 {
                let assessment = scorer.assess(&origin(), &RiskFactors::default(), at(day, hour, 0));
                assert!((0.0..=100.0).contains(&assessment.score));
                assert_ne!(assessment.level, RiskLevel::Unknown);
            }
        }
    }

    #[test]
    fn adding_flags_never_lowers_the_score() {
        let scorer = RiskScorer::new(FixedLocationRisk(35.0));
        let now = at(17, 6, 30);
        let steps: &[fn(RiskFactors) -> RiskFactors] = &[
            |f| f.alone(true),
            |f| f.dark_area(true),
            |f| f.poor_lighting(true),
            |f| f.recent_incidents(true),
            |f| f.weekend(true),
            |f| f.distracted(true),
            |f| f.with_speed(70.0),
            |f| f.stationary_for(600_000),
            |f| {
                f.with_weather(Weather {
                    visibility: Some(100.0),
                    precipitation: Some(2.0),
                    temperature: Some(-5.0),
                })
            },
        ];

        for (i, step) in steps.iter().enumerate() {
            let before = RiskFactors::default();
            let after = step(before.clone());
            let a = scorer.assess(&origin(), &before, now).score;
            let b = scorer.assess(&origin(), &after, now).score;
            assert!(b >= a, "step {i} lowered score from {a} to {b}");
        }

        let mut factors = RiskFactors::default();
        let mut previous = scorer.assess(&origin(), &factors, now).score;
        for step in steps {
            factors = step(factors);
            let score = scorer.assess(&origin(), &factors, now).score;
            assert!(score >= previous, "{score} < {previous} after {factors:?}");
            previous = score;
        }
    }

    #[test]
    fn provider_failure_yields_unknown() {
        let scorer = RiskScorer::new(|_: &Coordinate| -> Result<f64, RiskError> {
            Err(RiskError::LocationUnavailable {
                message: "offline".to_string(),
            })
        });
        let assessment = scorer.assess(&origin(), &RiskFactors::default(), at(15, 14, 0));
        assert_eq!(assessment, RiskAssessment::unknown());
        assert!(matches!(
            scorer.try_assess(&origin(), &RiskFactors::default(), at(15, 14, 0)),
            Err(RiskError::LocationUnavailable { .. })
        ));
    }

    #[test]
    fn non_finite_location_yields_unknown() {
        let scorer = RiskScorer::new(FixedLocationRisk(f64::NAN));
        let assessment = scorer.assess(&origin(), &RiskFactors::default(), at(15, 14, 0));
        assert!(assessment.is_unknown());
        assert!(assessment.score.abs() < f64::EPSILON);
        assert!(assessment.factors.is_none());
    }

    #[test]
    fn infinite_random_spread_yields_unknown() {
        let scorer = RiskScorer::new(RandomLocationRisk::new(30.0, f64::INFINITY));
        let assessment = scorer.assess(&origin(), &RiskFactors::default(), at(15, 14, 0));
        assert_eq!(assessment, RiskAssessment::unknown());
    }

    #[test]
    fn out_of_range_location_is_clamped() {
        let scorer = RiskScorer::new(FixedLocationRisk(500.0));
        let assessment = scorer.assess(&origin(), &RiskFactors::default(), at(15, 14, 0));
        assert!((assessment.factors.unwrap().location - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_coordinate_yields_unknown() {
        let scorer = RiskScorer::new(FixedLocationRisk(30.0));
        let bad = Coordinate {
            latitude: 100.0,
            longitude: 0.0,
        };
        let assessment = scorer.assess(&bad, &RiskFactors::default(), at(15, 14, 0));
        assert!(assessment.is_unknown());
        assert!(matches!(
            scorer.try_assess(&bad, &RiskFactors::default(), at(15, 14, 0)),
            Err(RiskError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn scorer_is_shareable_across_threads() {
        let scorer = RiskScorer::new(FixedLocationRisk(30.0));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let scorer = scorer.clone();
                std::thread::spawn(move || {
                    scorer
                        .assess(&origin(), &RiskFactors::default(), at(15, 14, 0))
                        .score
                })
            })
            .collect();
        let scores: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(scores.windows(2).all(|w| (w[0] - w[1]).abs() < f64::EPSILON));
    }
}
