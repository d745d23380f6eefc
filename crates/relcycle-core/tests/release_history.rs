use chrono::{Datelike, Months, NaiveDate, Weekday};
use relcycle_core::{
    CyclePhase, ReleaseSummary, accelerated_cycle, is_code_freeze_day, monthly_cycle,
    next_release_date, second_tuesday, versions_between,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

const SHIPPED: &[(&str, (i32, u32, u32))] = &[
    ("8.0.0", (2023, 8, 8)),
    ("8.1.0", (2023, 9, 12)),
    ("8.2.0", (2023, 10, 10)),
    ("8.3.0", (2023, 11, 14)),
    ("8.4.0", (2023, 12, 12)),
    ("8.5.0", (2024, 1, 9)),
    ("8.6.0", (2024, 2, 13)),
    ("8.7.0", (2024, 3, 12)),
    ("8.8.0", (2024, 4, 9)),
    ("8.9.0", (2024, 5, 14)),
    ("9.0.0", (2024, 6, 11)),
];

#[test]
fn monthly_cycles_match_shipped_releases() {
    for (version, (y, m, d)) in SHIPPED {
        let release = date(*y, *m, *d);
        let cycle = monthly_cycle(release, CyclePhase::Released);
        assert_eq!(cycle.version.to_string(), *version, "release on {release}");
        assert_eq!(cycle.release, release);
        assert!(is_code_freeze_day(
            release - chrono::Duration::days(19)
        ));
    }
}

#[test]
fn cycle_recomputed_from_its_release_is_itself() {
    let mut day = date(2023, 1, 1);
    while day < date(2027, 1, 1) {
        let cycle = monthly_cycle(day, CyclePhase::Development);
        assert_eq!(monthly_cycle(cycle.release, CyclePhase::Released), cycle);
        day = day.succ_opt().expect("next day");
    }
}

#[test]
fn monthly_versions_never_decrease() {
    let mut reference = date(2022, 1, 15);
    let mut previous = monthly_cycle(reference, CyclePhase::Released).version;
    for _ in 0..72 {
        reference = reference + Months::new(1);
        let current = monthly_cycle(reference, CyclePhase::Released).version;
        assert!(current >= previous, "{current} < {previous} at {reference}");
        previous = current;
    }
}

#[test]
fn second_tuesday_holds_across_leap_years() {
    for year in [2023, 2024, 2028, 2100] {
        let feb = second_tuesday(date(year, 2, 28));
        assert_eq!(feb.weekday(), Weekday::Tue);
        assert!((8..=14).contains(&feb.day()));
    }
}

#[test]
fn calendar_is_symmetric_and_covers_both_trains() {
    let a = date(2023, 7, 1);
    let b = date(2023, 12, 31);
    let forward = versions_between(a, b);
    assert_eq!(forward, versions_between(b, a));
    assert!(forward.iter().any(|cycle| !cycle.version.is_accelerated()));
    assert!(forward.iter().any(|cycle| cycle.version.is_accelerated()));
}

#[test]
fn next_release_date_examples() {
    // 2024-06-10 is a Monday, 2024-06-12 a Wednesday.
    assert_eq!(next_release_date(date(2024, 6, 10)), date(2024, 6, 11));
    assert_eq!(next_release_date(date(2024, 6, 12)), date(2024, 6, 18));
}

#[test]
fn cycles_serialize_with_iso_dates() {
    let cycle = accelerated_cycle(date(2023, 7, 20), CyclePhase::Development);
    let json = serde_json::to_value(cycle).expect("serialize");
    assert_eq!(json["version"], "8.0.0.30");
    assert_eq!(json["begin"], "2023-07-20");
    assert_eq!(json["freeze"], "2023-07-26");
    assert_eq!(json["release"], "2023-08-01");
}

#[test]
fn summary_serializes_every_field() {
    let summary = ReleaseSummary::at(date(2023, 7, 12));
    let json = serde_json::to_value(&summary).expect("serialize");
    assert_eq!(json["version"], "8.0.0.10");
    assert_eq!(json["branch"], "release/8.0.0.10");
    assert_eq!(json["monthly_branch"], "release/8.0");
    assert_eq!(json["next_milestone"], "8.1.0");
    assert_eq!(json["is_code_freeze_day"], false);
    assert_eq!(json["monthly_cycle"]["release"], "2023-08-08");
}
