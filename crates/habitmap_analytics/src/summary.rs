//! The cross-habit, cross-mood summary consumed by the insights view and the
//! narrative-generation request builder.

use crate::completion::{DailyPresence, LogIndex};
use crate::error::AnalyticsResult;
use crate::mood;
use crate::window::Window;
use chrono::NaiveDate;
use habitmap_store::{Habit, HabitLog, MoodLog};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-habit stats within the summary window.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct HabitStat {
    pub name: String,
    /// 0..=100, round-half-up percentage of logged days marked completed.
    pub completion_rate: u8,
    pub total_completions: u32,
}

/// Derived snapshot over one trailing window. Recomputed on demand, never
/// persisted, and carries no back-reference to the source records.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Summary {
    pub total_habits: u32,
    pub total_completions: u32,
    /// One-decimal rolling average, `None` when the window holds no mood
    /// logs ("no data", as opposed to an average of zero).
    pub avg_mood: Option<f64>,
    pub habit_stats: BTreeMap<String, HabitStat>,
}

/// Compose the summary for one user's snapshot.
///
/// A single window (`window_len` days ending at `today`, inclusive) is
/// threaded through every sub-aggregation: habit stats and the mood average
/// always describe the same span. Every habit appears in `habit_stats` even
/// with zero in-window logs; habit logs whose `habit_id` matches no habit in
/// the snapshot are skipped (an acceptable fetch race, not an error).
pub fn compose(
    habits: &[Habit],
    habit_logs: &[HabitLog],
    mood_logs: &[MoodLog],
    today: NaiveDate,
    window_len: i64,
) -> AnalyticsResult<Summary> {
    let window = Window::trailing(today, window_len)?;
    let index = LogIndex::build(habit_logs, &window);

    let mut habit_stats = BTreeMap::new();
    let mut total_completions = 0u32;
    for habit in habits {
        let presence = DailyPresence::build(index.logs_for(&habit.id).iter().copied());
        let completed = presence.completed_days() as u32;
        total_completions += completed;
        habit_stats.insert(
            habit.id.clone(),
            HabitStat {
                name: habit.name.clone(),
                completion_rate: presence.completion_rate(),
                total_completions: completed,
            },
        );
    }

    let avg_mood = mood::average_mood(mood_logs, &window)?.map(round_one_decimal);

    Ok(Summary {
        total_habits: habits.len() as u32,
        total_completions,
        avg_mood,
        habit_stats,
    })
}

fn round_one_decimal(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
