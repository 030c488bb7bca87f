//! Per-day totals, goal streaks and the 7-day history window.
//!
//! Every view is derived from a fresh [`DailyTotals`] built from the whole log
//! collection; nothing is maintained incrementally. Days are bucketed by the
//! calendar date of the timestamp in one time zone (local time for the public
//! wrappers), so totals, streaks and history always agree on what "a day" is.

use crate::domain::entities::{DailySummary, IntakeLog, StreakStats};
use chrono::{DateTime, Days, Local, NaiveDate, TimeZone, Utc};
use std::collections::BTreeMap;
use tracing::debug;

/// Length of the history window, today included.
pub const HISTORY_DAYS: u64 = 7;

/// Format a calendar date as a `YYYY-MM-DD` day key.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Calendar date of an epoch-millisecond timestamp in `tz`.
/// `None` if the timestamp is outside chrono's range.
pub fn day_of<Tz: TimeZone>(timestamp_ms: i64, tz: &Tz) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(timestamp_ms).map(|utc| utc.with_timezone(tz).date_naive())
}

/// Today's calendar date in `tz`.
pub fn today_in<Tz: TimeZone>(tz: &Tz) -> NaiveDate {
    Utc::now().with_timezone(tz).date_naive()
}

/// Summed intake per calendar day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyTotals {
    by_day: BTreeMap<NaiveDate, f64>,
}

impl DailyTotals {
    /// Bucket logs by local calendar day.
    pub fn from_logs(logs: &[IntakeLog]) -> Self {
        Self::from_logs_in(logs, &Local)
    }

    pub fn from_logs_in<Tz: TimeZone>(logs: &[IntakeLog], tz: &Tz) -> Self {
        let mut by_day = BTreeMap::new();
        for log in logs {
            match day_of(log.timestamp, tz) {
                Some(day) => *by_day.entry(day).or_insert(0.0) += log.amount,
                None => debug!(
                    id = %log.id,
                    timestamp = log.timestamp,
                    "skipping log with out-of-range timestamp"
                ),
            }
        }
        Self { by_day }
    }

    pub fn is_empty(&self) -> bool {
        self.by_day.is_empty()
    }

    /// Total for `day`; days without logs are 0.
    pub fn total_on(&self, day: NaiveDate) -> f64 {
        self.by_day.get(&day).copied().unwrap_or(0.0)
    }

    pub fn met_goal(&self, day: NaiveDate, goal: u32) -> bool {
        self.total_on(day) >= f64::from(goal)
    }

    /// Earliest day with at least one log.
    pub fn first_day(&self) -> Option<NaiveDate> {
        self.by_day.keys().next().copied()
    }

    /// Day key -> total rounded to whole mL.
    pub fn to_day_keys(&self) -> BTreeMap<String, i64> {
        self.by_day
            .iter()
            .map(|(day, total)| (day_key(*day), total.round() as i64))
            .collect()
    }
}

/// Streaks as of `today`.
///
/// Today is still open: missing the goal today neither breaks the current
/// streak (it is anchored on yesterday instead) nor resets the running count
/// used for the best streak.
pub fn streaks_on(totals: &DailyTotals, goal: u32, today: NaiveDate) -> StreakStats {
    let Some(first_day) = totals.first_day() else {
        return StreakStats::default();
    };
    StreakStats {
        current_streak: current_streak(totals, goal, today, first_day),
        best_streak: best_streak(totals, goal, today, first_day),
    }
}

fn current_streak(totals: &DailyTotals, goal: u32, today: NaiveDate, first_day: NaiveDate) -> u32 {
    let anchor = if totals.met_goal(today, goal) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if totals.met_goal(yesterday, goal) => yesterday,
            _ => return 0,
        }
    };

    let mut count = 0;
    let mut day = anchor;
    while day >= first_day && totals.met_goal(day, goal) {
        count += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    count
}

fn best_streak(totals: &DailyTotals, goal: u32, today: NaiveDate, first_day: NaiveDate) -> u32 {
    let mut best = 0;
    let mut run = 0;
    for day in first_day.iter_days().take_while(|day| *day <= today) {
        if totals.met_goal(day, goal) {
            run += 1;
            best = best.max(run);
        } else if day != today {
            run = 0;
        }
    }
    best
}

/// The `HISTORY_DAYS` days ending at `today`, oldest first.
pub fn history_on(totals: &DailyTotals, goal: u32, today: NaiveDate) -> Vec<DailySummary> {
    (0..HISTORY_DAYS)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| DailySummary {
            date: day_key(date),
            total: totals.total_on(date),
            goal,
        })
        .collect()
}

/// Logs whose calendar day in `tz` is `day`, in collection order.
pub fn logs_on<'a, Tz: TimeZone>(
    logs: &'a [IntakeLog],
    day: NaiveDate,
    tz: &Tz,
) -> Vec<&'a IntakeLog> {
    logs.iter()
        .filter(|log| day_of(log.timestamp, tz) == Some(day))
        .collect()
}

/// Day key -> total intake (whole mL), local time.
pub fn compute_daily_totals(logs: &[IntakeLog]) -> BTreeMap<String, i64> {
    DailyTotals::from_logs(logs).to_day_keys()
}

/// Current and best goal streaks as of the local today.
pub fn compute_streaks(logs: &[IntakeLog], daily_goal: u32) -> StreakStats {
    streaks_on(&DailyTotals::from_logs(logs), daily_goal, today_in(&Local))
}

/// Seven daily summaries ending at the local today, oldest first.
pub fn compute_seven_day_history(logs: &[IntakeLog], daily_goal: u32) -> Vec<DailySummary> {
    history_on(&DailyTotals::from_logs(logs), daily_goal, today_in(&Local))
}
