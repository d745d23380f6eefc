//! Accelerated (weekly) release train nested inside each monthly cycle.
//!
//! Accelerated releases freeze on Wednesday and ship the following Tuesday. Their version
//! is the enclosing monthly version plus a suffix counting weeks since the previous
//! monthly release.

use chrono::NaiveDate;
use tracing::trace;

use crate::calendar::{iso_weekday, minus_days, plus_days, weeks_between_floor};
use crate::cycle::{ACCELERATED_STEP_DAYS, CyclePhase, MONTHLY_STEP_DAYS, ReleaseCycle};
use crate::monthly::{monthly_cycle, second_tuesday, upcoming_monthly_release};

const WEDNESDAY: u32 = 3;
const THURSDAY: u32 = 4;

/// Days from `date` until the next Wednesday; zero when `date` is a Wednesday.
pub fn days_until_wednesday(date: NaiveDate) -> u64 {
    let weekday = iso_weekday(date);
    let days = if weekday < THURSDAY {
        WEDNESDAY - weekday
    } else {
        WEDNESDAY + 7 - weekday
    };
    u64::from(days)
}

/// Resolve the accelerated cycle for `reference`.
///
/// The released phase looks one week back so it reports the cycle that most recently shipped.
pub fn accelerated_cycle(reference: NaiveDate, phase: CyclePhase) -> ReleaseCycle {
    let reference = match phase {
        CyclePhase::Development => reference,
        CyclePhase::Released => minus_days(reference, ACCELERATED_STEP_DAYS),
    };

    let freeze = plus_days(reference, days_until_wednesday(reference));
    let last_accelerated_day = minus_days(freeze, 1);
    let release = plus_days(freeze, 6);
    let begin = minus_days(freeze, 6);

    let monthly = monthly_cycle(
        upcoming_monthly_release(last_accelerated_day),
        CyclePhase::Released,
    );
    let previous_monthly_release = second_tuesday(minus_days(monthly.release, MONTHLY_STEP_DAYS));
    let weeks = weeks_between_floor(last_accelerated_day, previous_monthly_release);
    let acceleration = 10 * (weeks + 1);

    trace!(
        %reference,
        %freeze,
        monthly = %monthly.version,
        %previous_monthly_release,
        acceleration,
        "resolved accelerated cycle"
    );

    ReleaseCycle {
        version: monthly.version.with_acceleration(acceleration),
        begin,
        freeze,
        release,
    }
}
