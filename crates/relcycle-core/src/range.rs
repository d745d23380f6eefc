use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::accelerated::accelerated_cycle;
use crate::calendar::plus_days;
use crate::cycle::{
    ACCELERATED_STEP_DAYS, CyclePhase, MONTHLY_STEP_DAYS, ReleaseCycle, ReleaseVersion,
};
use crate::monthly::monthly_cycle;

/// Every monthly and accelerated cycle touched while walking from `start` to `end`.
///
/// Arguments may come in either order. Both endpoints are sampled; each version appears once,
/// and the result is sorted by version.
pub fn versions_between(start: NaiveDate, end: NaiveDate) -> Vec<ReleaseCycle> {
    let (start, end) = if start > end {
        (end, start)
    } else {
        (start, end)
    };

    let mut cycles: BTreeMap<ReleaseVersion, ReleaseCycle> = BTreeMap::new();

    for day in walk(start, end, MONTHLY_STEP_DAYS) {
        let cycle = monthly_cycle(day, CyclePhase::Released);
        cycles.insert(cycle.version, cycle);
    }
    for day in walk(start, end, ACCELERATED_STEP_DAYS) {
        let cycle = accelerated_cycle(day, CyclePhase::Released);
        cycles.insert(cycle.version, cycle);
    }

    debug!(%start, %end, count = cycles.len(), "enumerated release cycles");
    cycles.into_values().collect()
}

fn walk(start: NaiveDate, end: NaiveDate, step: u64) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(start), move |day| {
        let next = plus_days(*day, step);
        (next > *day).then_some(next)
    })
    .take_while(move |day| *day <= end)
}
