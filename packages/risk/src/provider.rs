//! Location risk providers.
//!
//! There is no real geodata integration behind the location sub-score. The
//! default provider is a random stand-in; deterministic providers can be
//! swapped in through [`LocationRiskProvider`].

use rand::Rng as _;
use safeguard_location_models::Coordinate;

use crate::RiskError;

/// Source of the location sub-score for a coordinate.
///
/// Implementations return a raw risk value; the scorer rejects non-finite
/// values and clamps the rest to `0..=100`.
pub trait LocationRiskProvider: Send + Sync {
    /// Returns the location risk for `coordinate`.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError`] if the risk cannot be determined. The scorer
    /// turns any error into an `Unknown` assessment.
    fn location_risk(&self, coordinate: &Coordinate) -> Result<f64, RiskError>;
}

impl<F> LocationRiskProvider for F
where
    F: Fn(&Coordinate) -> Result<f64, RiskError> + Send + Sync,
{
    fn location_risk(&self, coordinate: &Coordinate) -> Result<f64, RiskError> {
        self(coordinate)
    }
}

/// Placeholder provider: `base` plus a uniform random value in
/// `0..spread`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomLocationRisk {
    base: f64,
    spread: f64,
}

impl RandomLocationRisk {
    /// Default base risk.
    pub const DEFAULT_BASE: f64 = 30.0;
    /// Default width of the random range.
    pub const DEFAULT_SPREAD: f64 = 30.0;

    /// Creates a provider drawing from `base..base + spread`.
    ///
    /// A non-positive `spread` always yields `base`. An infinite `spread`
    /// makes every lookup fail with [`RiskError::NonFinite`].
    #[must_use]
    pub const fn new(base: f64, spread: f64) -> Self {
        Self { base, spread }
    }
}

impl Default for RandomLocationRisk {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE, Self::DEFAULT_SPREAD)
    }
}

impl LocationRiskProvider for RandomLocationRisk {
    fn location_risk(&self, _coordinate: &Coordinate) -> Result<f64, RiskError> {
        if self.spread.is_nan() || self.spread <= 0.0 {
            return Ok(self.base);
        }
        if !self.spread.is_finite() {
            return Err(RiskError::NonFinite {
                component: "location spread",
                value: self.spread,
            });
        }
        Ok(self.base + rand::thread_rng().gen_range(0.0..self.spread))
    }
}

/// Provider returning the same risk for every coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocationRisk(pub f64);

impl LocationRiskProvider for FixedLocationRisk {
    fn location_risk(&self, _coordinate: &Coordinate) -> Result<f64, RiskError> {
        Ok(self.0)
    }
}
