//! Views derived from a snapshot of the adventure log.
//!
//! Everything here is recomputed from the full entry list on each call and
//! takes "now" as an argument, so results depend only on the inputs.

use crate::entries::{Day, Entry};
use serde::Serialize;
use std::collections::BTreeMap;
use time::{Duration, OffsetDateTime};

/// Entries logged on one day, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyGroup {
    pub day: Day,
    pub entries: Vec<Entry>,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IconCount {
    pub icon: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_this_week: usize,
    pub most_frequent_icon: IconCount,
    pub daily_counts: BTreeMap<Day, usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub day: Day,
    pub count: usize,
}

/// Everything the stats screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_adventures: usize,
    #[serde(flatten)]
    pub stats: Stats,
    pub streak: usize,
    pub most_active_day: Option<DayCount>,
}

/// Groups entries by their stored day. Groups come newest day first, and
/// entries within a group newest first.
pub fn group_by_date(entries: &[Entry]) -> Vec<DailyGroup> {
    let mut by_day: BTreeMap<Day, Vec<Entry>> = BTreeMap::new();
    for entry in entries {
        by_day.entry(entry.day).or_default().push(entry.clone());
    }

    by_day
        .into_iter()
        .rev()
        .map(|(day, mut entries)| {
            entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            DailyGroup {
                day,
                count: entries.len(),
                entries,
            }
        })
        .collect()
}

/// Entries stored under `day`, in log order.
pub fn entries_on(entries: &[Entry], day: Day) -> Vec<Entry> {
    entries.iter().filter(|e| e.day == day).cloned().collect()
}

/// First and last millisecond of the Sunday-to-Saturday week containing
/// `now`, both inclusive, in `now`'s offset.
///
/// Sunday midnight is taken in `now`'s fixed offset. There is no zone
/// database here, so when a DST change falls between Sunday and `now` the
/// window is shifted by the size of that change.
pub fn week_bounds(now: OffsetDateTime) -> (OffsetDateTime, OffsetDateTime) {
    let start = week_start(now);

    (start, start + Duration::days(7) - Duration::milliseconds(1))
}

fn week_start(now: OffsetDateTime) -> OffsetDateTime {
    let since_sunday = i64::from(now.weekday().number_days_from_sunday());

    (now.date() - Duration::days(since_sunday))
        .midnight()
        .assume_offset(now.offset())
}

/// The icon used most often, with its count. Ties go to the smallest icon
/// string. An empty log yields an empty icon with a count of zero.
pub fn most_frequent_icon(entries: &[Entry]) -> IconCount {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in entries {
        *counts.entry(entry.icon.as_str()).or_default() += 1;
    }

    counts
        .into_iter()
        .fold(IconCount::default(), |best, (icon, count)| {
            if count > best.count {
                IconCount {
                    icon: icon.to_owned(),
                    count,
                }
            } else {
                best
            }
        })
}

pub fn daily_counts(entries: &[Entry]) -> BTreeMap<Day, usize> {
    let mut counts = BTreeMap::new();
    for entry in entries {
        *counts.entry(entry.day).or_default() += 1;
    }
    counts
}

pub fn compute_stats(entries: &[Entry], now: OffsetDateTime) -> Stats {
    // Half-open, so timestamps finer than a millisecond still land in a week.
    let start = week_start(now);
    let week = start..start + Duration::days(7);
    let total_this_week = entries
        .iter()
        .filter(|e| week.contains(&e.created_at))
        .count();

    Stats {
        total_this_week,
        most_frequent_icon: most_frequent_icon(entries),
        daily_counts: daily_counts(entries),
    }
}

/// Number of consecutive days with at least one entry, counting back from
/// `now`'s calendar day. Stops at the first day without entries.
pub fn compute_streak(daily_counts: &BTreeMap<Day, usize>, now: OffsetDateTime) -> usize {
    let mut streak = 0;
    let mut day = Some(Day::from(now.date()));

    while let Some(current) = day {
        if daily_counts.get(&current).copied().unwrap_or(0) == 0 {
            break;
        }

        streak += 1;
        day = current.previous();
    }

    streak
}

/// The day with the most entries, earliest day on ties. `None` when there is
/// no data.
pub fn most_active_day(daily_counts: &BTreeMap<Day, usize>) -> Option<DayCount> {
    daily_counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .fold(None, |best: Option<DayCount>, (&day, &count)| match best {
            Some(best) if best.count >= count => Some(best),
            _ => Some(DayCount { day, count }),
        })
}

pub fn summarize(entries: &[Entry], now: OffsetDateTime) -> Summary {
    let stats = compute_stats(entries, now);

    Summary {
        total_adventures: entries.len(),
        streak: compute_streak(&stats.daily_counts, now),
        most_active_day: most_active_day(&stats.daily_counts),
        stats,
    }
}
