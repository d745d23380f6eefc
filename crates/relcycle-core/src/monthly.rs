//! Monthly release train: every release lands on the second Tuesday of a month.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::calendar::{iso_weekday, minus_days, plus_months};
use crate::cycle::{
    CyclePhase, FREEZE_TO_RELEASE_DAYS, PREVIOUS_RELEASE_LOOKBACK_DAYS, ReleaseCycle,
    ReleaseVersion,
};

/// Second Tuesday of `date`'s calendar month.
pub fn second_tuesday(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    let weekday = iso_weekday(first);
    let day = if weekday <= 2 {
        10 - weekday
    } else {
        17 - weekday
    };
    // Days 8..=14 exist in every month.
    first.with_day(day).unwrap_or(first)
}

pub fn is_second_tuesday(date: NaiveDate) -> bool {
    second_tuesday(date) == date
}

/// The first monthly release on or after `date`.
pub fn upcoming_monthly_release(date: NaiveDate) -> NaiveDate {
    let current = second_tuesday(date);
    if date <= current {
        current
    } else {
        second_tuesday(plus_months(current, 1))
    }
}

/// Resolve the monthly cycle for `reference`.
///
/// In the development phase a reference past the code freeze belongs to the following
/// cycle, so the lookup runs once more from the next release in the released phase.
pub fn monthly_cycle(reference: NaiveDate, phase: CyclePhase) -> ReleaseCycle {
    let mut reference = reference;
    let mut phase = phase;

    loop {
        let release = upcoming_monthly_release(reference);
        let previous_release = second_tuesday(minus_days(release, PREVIOUS_RELEASE_LOOKBACK_DAYS));
        let freeze = minus_days(release, FREEZE_TO_RELEASE_DAYS + 1);
        let begin = minus_days(previous_release, FREEZE_TO_RELEASE_DAYS);

        if phase.is_development() && reference > freeze {
            let next_release = second_tuesday(plus_months(release, 1));
            debug!(
                %reference,
                %freeze,
                %next_release,
                "code freeze passed; resolving the following monthly cycle"
            );
            reference = next_release;
            phase = CyclePhase::Released;
            continue;
        }

        return ReleaseCycle {
            version: ReleaseVersion::from_previous_release(previous_release),
            begin,
            freeze,
            release,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_second_tuesday_when_month_starts_on_tuesday() {
        // August 2023 starts on a Tuesday.
        assert_eq!(second_tuesday(date(2023, 8, 20)), date(2023, 8, 8));
    }

    #[test]
    fn test_second_tuesday_when_month_starts_late_in_week() {
        // July 2023 starts on a Saturday.
        assert_eq!(second_tuesday(date(2023, 7, 1)), date(2023, 7, 11));
        // October 2023 starts on a Sunday.
        assert_eq!(second_tuesday(date(2023, 10, 31)), date(2023, 10, 10));
        // May 2023 starts on a Monday.
        assert_eq!(second_tuesday(date(2023, 5, 15)), date(2023, 5, 9));
        // November 2023 starts on a Wednesday.
        assert_eq!(second_tuesday(date(2023, 11, 1)), date(2023, 11, 14));
    }

    #[test]
    fn test_second_tuesday_is_always_a_tuesday_in_range() {
        let mut day = date(2020, 1, 1);
        while day < date(2030, 1, 1) {
            let tuesday = second_tuesday(day);
            assert_eq!(tuesday.weekday(), Weekday::Tue, "{day}");
            assert!((8..=14).contains(&tuesday.day()), "{day}");
            assert_eq!(tuesday.month(), day.month());
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_monthly_cycle_at_epoch() {
        let cycle = monthly_cycle(date(2023, 7, 12), CyclePhase::Development);
        assert_eq!(cycle.version.to_string(), "8.0.0");
        assert_eq!(cycle.version.major_minor(), "8.0");
        assert_eq!(cycle.release, date(2023, 8, 8));
        assert_eq!(cycle.freeze, date(2023, 7, 19));
        assert_eq!(cycle.begin, date(2023, 6, 22));
    }

    #[test]
    fn test_release_day_belongs_to_its_own_cycle() {
        let cycle = monthly_cycle(date(2023, 8, 8), CyclePhase::Released);
        assert_eq!(cycle.release, date(2023, 8, 8));
        assert_eq!(cycle.version.to_string(), "8.0.0");
    }

    #[test]
    fn test_development_rolls_over_after_freeze() {
        // Freeze for 8.0 is 2023-07-19, so the next day develops 8.1.
        let on_freeze = monthly_cycle(date(2023, 7, 19), CyclePhase::Development);
        assert_eq!(on_freeze.version.to_string(), "8.0.0");

        let after_freeze = monthly_cycle(date(2023, 7, 20), CyclePhase::Development);
        assert_eq!(after_freeze.version.to_string(), "8.1.0");
        assert_eq!(after_freeze.release, date(2023, 9, 12));
        assert_eq!(after_freeze.freeze, date(2023, 8, 23));

        let released = monthly_cycle(date(2023, 7, 20), CyclePhase::Released);
        assert_eq!(released.version.to_string(), "8.0.0");
    }

    #[test]
    fn test_cycle_ordering_invariant() {
        let mut day = date(2022, 12, 1);
        while day < date(2026, 12, 31) {
            for phase in [CyclePhase::Development, CyclePhase::Released] {
                let cycle = monthly_cycle(day, phase);
                assert!(cycle.begin < cycle.freeze, "{day}: {cycle:?}");
                assert!(cycle.freeze < cycle.release, "{day}: {cycle:?}");
                assert!(is_second_tuesday(cycle.release));
            }
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_year_boundary() {
        // 2024-01-09 release; previous release 2023-12-12.
        let cycle = monthly_cycle(date(2024, 1, 2), CyclePhase::Released);
        assert_eq!(cycle.release, date(2024, 1, 9));
        assert_eq!(cycle.version.to_string(), "8.5.0");
        assert_eq!(cycle.begin, date(2023, 11, 23));
    }
}
