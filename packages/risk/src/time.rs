//! Time-of-day and day-of-week risk.

use chrono::{Datelike as _, NaiveDateTime, Timelike as _, Weekday};

/// Coarse time-of-day bucket used for the time sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    /// 22:00 through 05:59.
    Night,
    /// 18:00 through 21:59 and 06:00 through 07:59.
    DuskDawn,
    /// 08:00 through 17:59.
    Day,
}

impl TimeOfDay {
    /// Buckets an hour of the day (`0..24`).
    ///
    /// The night check runs first, so hours that satisfy both the night and
    /// dusk/dawn ranges are night.
    #[must_use]
    pub const fn from_hour(hour: u32) -> Self {
        if hour >= 22 || hour <= 5 {
            Self::Night
        } else if hour >= 18 || hour <= 7 {
            Self::DuskDawn
        } else {
            Self::Day
        }
    }

    /// Base risk contributed by this bucket.
    #[must_use]
    pub const fn base_risk(self) -> f64 {
        match self {
            Self::Night => 80.0,
            Self::DuskDawn => 40.0,
            Self::Day => 10.0,
        }
    }

    /// Display name of this bucket.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Night => "night",
            Self::DuskDawn => "dusk/dawn",
            Self::Day => "daytime",
        }
    }
}

/// Extra risk on Saturdays and Sundays.
pub const WEEKEND_BONUS: f64 = 20.0;

/// Returns `true` for Saturday and Sunday.
#[must_use]
pub const fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

/// Time sub-score for a local wall-clock timestamp, in `0..=100`.
#[must_use]
pub fn time_risk(now: NaiveDateTime) -> f64 {
    let mut risk = TimeOfDay::from_hour(now.hour()).base_risk();
    if is_weekend(now.weekday()) {
        risk += WEEKEND_BONUS;
    }
    crate::clamp_score(risk)
}
