//! Release constants and the version and cycle value types shared by both release trains.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

/// Days between a monthly code freeze and the release it gates.
pub const FREEZE_TO_RELEASE_DAYS: u64 = 19;
/// Look-back used to land safely in the month of the previous monthly release.
pub const PREVIOUS_RELEASE_LOOKBACK_DAYS: u64 = FREEZE_TO_RELEASE_DAYS + 2;
/// Calendar month whose monthly release defines the version numbering epoch.
pub const EPOCH_YEAR: i32 = 2023;
pub const EPOCH_MONTH: u32 = 7;
/// Version 8.0 expressed in tenths.
pub const EPOCH_VERSION_TENTHS: i32 = 80;
pub const MONTHLY_STEP_DAYS: u64 = 28;
pub const ACCELERATED_STEP_DAYS: u64 = 7;
pub const BRANCH_PREFIX: &str = "release/";

/// Whether a cycle is being looked up from inside its development window or after it shipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePhase {
    /// The reference date is where work happens; a passed freeze rolls over to the next cycle.
    #[default]
    Development,
    /// The reference date looks at the cycle that has shipped (or is about to).
    Released,
}

impl CyclePhase {
    pub fn is_development(self) -> bool {
        matches!(self, CyclePhase::Development)
    }
}

/// A release number anchored to the 2023-07 epoch.
///
/// Monthly versions render as `8.0.0`; accelerated ones carry a trailing suffix (`8.0.0.30`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReleaseVersion {
    month_index: i32,
    acceleration: Option<i64>,
}

impl ReleaseVersion {
    pub fn monthly(month_index: i32) -> Self {
        Self {
            month_index,
            acceleration: None,
        }
    }

    pub fn accelerated(month_index: i32, acceleration: i64) -> Self {
        Self {
            month_index,
            acceleration: Some(acceleration),
        }
    }

    /// Version of the monthly cycle whose previous release fell in `previous_release`'s month.
    pub fn from_previous_release(previous_release: NaiveDate) -> Self {
        Self::monthly(month_index(previous_release))
    }

    pub fn month_index(&self) -> i32 {
        self.month_index
    }

    pub fn acceleration(&self) -> Option<i64> {
        self.acceleration
    }

    pub fn is_accelerated(&self) -> bool {
        self.acceleration.is_some()
    }

    /// Same version without the accelerated suffix.
    pub fn to_monthly(&self) -> Self {
        Self::monthly(self.month_index)
    }

    pub fn with_acceleration(&self, acceleration: i64) -> Self {
        Self::accelerated(self.month_index, acceleration)
    }

    /// `major.minor`, e.g. `8.0`.
    pub fn major_minor(&self) -> String {
        format!(
            "{:.1}",
            f64::from(EPOCH_VERSION_TENTHS + self.month_index) / 10.0
        )
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.acceleration {
            Some(acceleration) => write!(f, "{}.0.{}", self.major_minor(), acceleration),
            None => write!(f, "{}.0", self.major_minor()),
        }
    }
}

impl Serialize for ReleaseVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Months elapsed between the epoch month and `date`'s month.
pub fn month_index(date: NaiveDate) -> i32 {
    (date.year() - EPOCH_YEAR) * 12 + date.month() as i32 - EPOCH_MONTH as i32
}

/// One release window. Values are recomputed on every query and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ReleaseCycle {
    pub version: ReleaseVersion,
    pub begin: NaiveDate,
    pub freeze: NaiveDate,
    pub release: NaiveDate,
}
