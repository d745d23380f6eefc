//! Derived lookups used by release automation: versions, branch names and milestone dates.

use chrono::NaiveDate;
use serde::Serialize;

use crate::accelerated::accelerated_cycle;
use crate::calendar::{iso_weekday, minus_days, plus_days, plus_months, weeks_between_round};
use crate::cycle::{
    BRANCH_PREFIX, CyclePhase, FREEZE_TO_RELEASE_DAYS, MONTHLY_STEP_DAYS,
    PREVIOUS_RELEASE_LOOKBACK_DAYS, ReleaseCycle, ReleaseVersion, month_index,
};
use crate::monthly::{is_second_tuesday, monthly_cycle, second_tuesday, upcoming_monthly_release};

const MONTHLY_VERSION_LOOKAHEAD_DAYS: u64 = 14;

/// Version under development on `reference`, with the weekly suffix (`8.0.0.10`).
///
/// Weeks since the previous monthly release are rounded here, whereas
/// [`accelerated_cycle`] floors them.
pub fn current_version(reference: NaiveDate) -> ReleaseVersion {
    let upcoming = upcoming_monthly_release(reference);
    let previous = second_tuesday(minus_days(upcoming, PREVIOUS_RELEASE_LOOKBACK_DAYS));
    let acceleration = weeks_between_round(reference, previous) * 10 + 10;
    ReleaseVersion::accelerated(month_index(previous), acceleration)
}

/// Monthly version that will be current two weeks after `reference`.
pub fn monthly_version(reference: NaiveDate) -> ReleaseVersion {
    current_version(plus_days(reference, MONTHLY_VERSION_LOOKAHEAD_DAYS)).to_monthly()
}

pub fn branch_name(reference: NaiveDate) -> String {
    format!("{BRANCH_PREFIX}{}", current_version(reference))
}

pub fn monthly_branch_name(reference: NaiveDate) -> String {
    format!("{BRANCH_PREFIX}{}", current_version(reference).major_minor())
}

pub fn next_milestone(reference: NaiveDate) -> ReleaseVersion {
    monthly_version(second_tuesday(plus_days(reference, MONTHLY_STEP_DAYS)))
}

/// Next Tuesday strictly after `reference`.
pub fn next_release_date(reference: NaiveDate) -> NaiveDate {
    let weekday = iso_weekday(reference);
    let days = if weekday == 1 { 1 } else { 9 - weekday };
    plus_days(reference, u64::from(days))
}

/// This month's second Tuesday while it is still ahead, otherwise next month's.
pub fn next_monthly_release_date(reference: NaiveDate) -> NaiveDate {
    let current = second_tuesday(reference);
    if current > reference {
        current
    } else {
        second_tuesday(plus_months(current, 1))
    }
}

/// True when a monthly release lands exactly 19 days after `reference`.
pub fn is_code_freeze_day(reference: NaiveDate) -> bool {
    is_second_tuesday(plus_days(reference, FREEZE_TO_RELEASE_DAYS))
}

/// First code-freeze day on or after `reference`.
pub fn next_code_freeze_day(reference: NaiveDate) -> NaiveDate {
    let release = upcoming_monthly_release(plus_days(reference, FREEZE_TO_RELEASE_DAYS));
    minus_days(release, FREEZE_TO_RELEASE_DAYS)
}

/// All query results for a single reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseSummary {
    pub reference: NaiveDate,
    pub version: ReleaseVersion,
    pub branch: String,
    pub monthly_version: ReleaseVersion,
    pub monthly_branch: String,
    pub next_milestone: ReleaseVersion,
    pub next_release_date: NaiveDate,
    pub next_monthly_release_date: NaiveDate,
    pub is_code_freeze_day: bool,
    pub monthly_cycle: ReleaseCycle,
    pub accelerated_cycle: ReleaseCycle,
}

impl ReleaseSummary {
    pub fn at(reference: NaiveDate) -> Self {
        Self {
            reference,
            version: current_version(reference),
            branch: branch_name(reference),
            monthly_version: monthly_version(reference),
            monthly_branch: monthly_branch_name(reference),
            next_milestone: next_milestone(reference),
            next_release_date: next_release_date(reference),
            next_monthly_release_date: next_monthly_release_date(reference),
            is_code_freeze_day: is_code_freeze_day(reference),
            monthly_cycle: monthly_cycle(reference, CyclePhase::Development),
            accelerated_cycle: accelerated_cycle(reference, CyclePhase::Development),
        }
    }

    /// Flat `key=value` pairs in the shape GitHub Actions step outputs expect.
    pub fn output_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("reference", self.reference.to_string()),
            ("version", self.version.to_string()),
            ("branch", self.branch.clone()),
            ("monthly_version", self.monthly_version.to_string()),
            ("monthly_branch", self.monthly_branch.clone()),
            ("next_milestone", self.next_milestone.to_string()),
            ("next_release_date", self.next_release_date.to_string()),
            (
                "next_monthly_release_date",
                self.next_monthly_release_date.to_string(),
            ),
            ("is_code_freeze_day", self.is_code_freeze_day.to_string()),
            ("freeze_date", self.monthly_cycle.freeze.to_string()),
            ("release_date", self.monthly_cycle.release.to_string()),
        ]
    }
}
