//! Per-habit completion aggregation: rates, streaks, and the daily presence
//! map backing both.

use crate::window::{Window, date_key, parse_date_key};
use chrono::NaiveDate;
use habitmap_store::HabitLog;
use std::collections::{BTreeMap, HashMap};

/// Per-day completion flags for one habit, keyed by `YYYY-MM-DD`.
///
/// Duplicate logs for one date are a storage anomaly (the store upserts by
/// `(habit_id, date)`); when they occur anyway, the first match in supplied
/// order wins and later entries are ignored, never merged or averaged.
#[derive(Debug)]
pub struct DailyPresence<'a> {
    days: BTreeMap<&'a str, bool>,
}

impl<'a> DailyPresence<'a> {
    pub fn build<I>(logs: I) -> Self
    where
        I: IntoIterator<Item = &'a HabitLog>,
    {
        let mut days = BTreeMap::new();
        for log in logs {
            days.entry(log.date.as_str()).or_insert(log.completed);
        }
        Self { days }
    }

    /// Number of distinct days with any log at all.
    pub fn logged_days(&self) -> usize {
        self.days.len()
    }

    /// Number of distinct days marked completed.
    pub fn completed_days(&self) -> usize {
        self.days.values().filter(|&&c| c).count()
    }

    /// Whether the given date key is marked completed. No log and
    /// `completed == false` are observably equivalent.
    pub fn is_completed(&self, key: &str) -> bool {
        self.days.get(key).copied().unwrap_or(false)
    }

    /// `round(100 * completed / logged)`, half rounding up; `0` when no days
    /// are logged ("no data" is a valid steady state, not an error).
    pub fn completion_rate(&self) -> u8 {
        rate_from_counts(self.completed_days(), self.logged_days())
    }
}

fn rate_from_counts(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (100.0 * completed as f64 / total as f64).round() as u8
}

/// Completion rate over the supplied logs. See
/// [`DailyPresence::completion_rate`].
pub fn completion_rate<'a, I>(logs: I) -> u8
where
    I: IntoIterator<Item = &'a HabitLog>,
{
    DailyPresence::build(logs).completion_rate()
}

/// True iff a log exists for that exact date key with `completed == true`.
pub fn is_completed_on<'a, I>(logs: I, date: NaiveDate) -> bool
where
    I: IntoIterator<Item = &'a HabitLog>,
{
    DailyPresence::build(logs).is_completed(&date_key(date))
}

/// Consecutive completed days counting back from `today`.
///
/// An unlogged (or not-yet-completed) today does not break a streak that ran
/// through yesterday; it just isn't counted yet.
pub fn current_streak<'a, I>(logs: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = &'a HabitLog>,
{
    let presence = DailyPresence::build(logs);
    let mut day = if presence.is_completed(&date_key(today)) {
        today
    } else {
        match today.pred_opt() {
            Some(d) => d,
            None => return 0,
        }
    };
    let mut streak = 0u32;
    while presence.is_completed(&date_key(day)) {
        streak += 1;
        match day.pred_opt() {
            Some(d) => day = d,
            None => break,
        }
    }
    streak
}

/// Per-habit log groups restricted to one window, built once per aggregation
/// pass so repeated lookups stay constant-time instead of re-scanning the
/// full log set per habit.
#[derive(Debug)]
pub struct LogIndex<'a> {
    by_habit: HashMap<&'a str, Vec<&'a HabitLog>>,
}

impl<'a> LogIndex<'a> {
    /// Group `logs` by habit id, keeping only entries whose date falls in
    /// `window`. Entries whose date fails to parse as a calendar day are
    /// outside every window. Supplied order is preserved within each group.
    pub fn build(logs: &'a [HabitLog], window: &Window) -> Self {
        let mut by_habit: HashMap<&str, Vec<&HabitLog>> = HashMap::new();
        for log in logs {
            let Some(date) = parse_date_key(&log.date) else {
                continue;
            };
            if window.contains(date) {
                by_habit.entry(log.habit_id.as_str()).or_default().push(log);
            }
        }
        Self { by_habit }
    }

    pub fn logs_for(&self, habit_id: &str) -> &[&'a HabitLog] {
        self.by_habit.get(habit_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Habit ids present in the index, i.e. habits with at least one
    /// in-window log.
    pub fn habit_ids(&self) -> impl Iterator<Item = &str> {
        self.by_habit.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("date")
    }

    fn log(habit_id: &str, date: &str, completed: bool) -> HabitLog {
        HabitLog {
            id: format!("{habit_id}-{date}"),
            habit_id: habit_id.into(),
            date: date.into(),
            completed,
        }
    }

    #[test]
    fn completion_rate_zero_logs_is_zero() {
        let logs: Vec<HabitLog> = vec![];
        assert_eq!(completion_rate(&logs), 0);
    }

    #[test]
    fn completion_rate_rounds_half_up() {
        let logs = [
            log("h1", "2024-01-01", true),
            log("h1", "2024-01-02", false),
            log("h1", "2024-01-03", false),
        ];
        assert_eq!(completion_rate(&logs), 33); // 1/3

        let logs = [
            log("h1", "2024-01-01", true),
            log("h1", "2024-01-02", true),
            log("h1", "2024-01-03", false),
        ];
        assert_eq!(completion_rate(&logs), 67); // 2/3

        let logs = [log("h1", "2024-01-01", true), log("h1", "2024-01-02", false)];
        assert_eq!(completion_rate(&logs), 50);
    }

    #[test]
    fn completion_rate_all_completed_is_100() {
        let logs = [log("h1", "2024-01-01", true), log("h1", "2024-01-02", true)];
        assert_eq!(completion_rate(&logs), 100);
    }

    #[test]
    fn completion_rate_is_deterministic() {
        let logs = [
            log("h1", "2024-01-01", true),
            log("h1", "2024-01-02", false),
            log("h1", "2024-01-03", true),
        ];
        let first = completion_rate(&logs);
        for _ in 0..10 {
            assert_eq!(completion_rate(&logs), first);
        }
    }

    #[test]
    fn duplicate_dates_first_match_wins() {
        let logs = [log("h1", "2024-01-01", false), log("h1", "2024-01-01", true)];
        let presence = DailyPresence::build(&logs);
        assert_eq!(presence.logged_days(), 1);
        assert!(!presence.is_completed("2024-01-01"));
    }

    #[test]
    fn is_completed_on_treats_missing_and_false_alike() {
        let logs = [log("h1", "2024-01-01", false)];
        assert!(!is_completed_on(&logs, day("2024-01-01")));
        assert!(!is_completed_on(&logs, day("2024-01-02")));

        let logs = [log("h1", "2024-01-01", true)];
        assert!(is_completed_on(&logs, day("2024-01-01")));
    }

    #[test]
    fn streak_counts_back_from_today() {
        let logs = [
            log("h1", "2024-01-03", true),
            log("h1", "2024-01-04", true),
            log("h1", "2024-01-05", true),
        ];
        assert_eq!(current_streak(&logs, day("2024-01-05")), 3);
    }

    #[test]
    fn streak_survives_unlogged_today() {
        let logs = [log("h1", "2024-01-03", true), log("h1", "2024-01-04", true)];
        assert_eq!(current_streak(&logs, day("2024-01-05")), 2);
    }

    #[test]
    fn streak_broken_by_missed_day() {
        let logs = [
            log("h1", "2024-01-01", true),
            log("h1", "2024-01-02", false),
            log("h1", "2024-01-03", true),
        ];
        assert_eq!(current_streak(&logs, day("2024-01-03")), 1);
    }

    #[test]
    fn streak_zero_without_recent_completions() {
        let logs = [log("h1", "2024-01-01", true)];
        assert_eq!(current_streak(&logs, day("2024-01-05")), 0);
    }

    #[test]
    fn log_index_restricts_to_window_and_groups() {
        let logs = vec![
            log("h1", "2024-01-01", true),
            log("h1", "2023-12-01", true), // outside
            log("h2", "2024-01-02", false),
            log("h1", "bogus-date", true), // unparseable, outside every window
        ];
        let window = Window::trailing(day("2024-01-02"), 30).expect("window");
        let index = LogIndex::build(&logs, &window);
        assert_eq!(index.logs_for("h1").len(), 1);
        assert_eq!(index.logs_for("h2").len(), 1);
        assert!(index.logs_for("h3").is_empty());
    }
}
