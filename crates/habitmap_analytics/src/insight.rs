//! Builds the structured payload handed to the narrative-generation service.
//!
//! Pure, deterministic transforms only: the request is assembled here, the
//! model call happens in a collaborator outside this crate, and the free-text
//! response never flows back through the engine.

use crate::completion::LogIndex;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::summary::{HabitStat, Summary};
use crate::window::Window;
use habitmap_store::{Habit, HabitLog, MoodLog};
use schemars::JsonSchema;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// How many recent mood/completion pairings the payload carries.
pub const CORRELATION_SAMPLE_LIMIT: usize = 10;

/// One day where a mood entry coincided with habit completions.
#[derive(Clone, Debug, Serialize, PartialEq, Eq, JsonSchema)]
pub struct CorrelationSample {
    pub date: String, // YYYY-MM-DD
    pub mood_level: i64,
    pub completed_habits: Vec<String>,
}

/// Input contract of the narrative-generation service. Field names are part
/// of that contract and must stay stable.
#[derive(Clone, Debug, Serialize, PartialEq, JsonSchema)]
pub struct InsightRequest {
    pub total_habits: u32,
    pub total_completions: u32,
    pub avg_mood: Option<f64>,
    pub habit_stats: BTreeMap<String, HabitStat>,
    /// Raw in-window log counts per habit id (not deduplicated by day).
    pub log_counts: BTreeMap<String, u32>,
    /// Most recent days pairing a mood entry with that day's completions,
    /// newest first.
    pub correlation_samples: Vec<CorrelationSample>,
}

impl InsightRequest {
    /// Assemble a request from a composed summary.
    ///
    /// Every habit id referenced by `log_counts` must have a `habit_stats`
    /// entry; a miss means the summary and the counts were produced from
    /// different snapshots, which is a programming error surfaced as
    /// [`AnalyticsError::IncompleteSummary`].
    pub fn build(
        summary: &Summary,
        log_counts: BTreeMap<String, u32>,
        correlation_samples: Vec<CorrelationSample>,
    ) -> AnalyticsResult<Self> {
        for habit_id in log_counts.keys() {
            if !summary.habit_stats.contains_key(habit_id) {
                return Err(AnalyticsError::IncompleteSummary(habit_id.clone()));
            }
        }
        Ok(Self {
            total_habits: summary.total_habits,
            total_completions: summary.total_completions,
            avg_mood: summary.avg_mood,
            habit_stats: summary.habit_stats.clone(),
            log_counts,
            correlation_samples,
        })
    }

    /// The JSON body sent to the narrative-generation service.
    pub fn to_payload(&self) -> AnalyticsResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Pair recent in-window mood entries with the habit names completed that
/// day, newest first.
///
/// Selection looks at the `limit` newest mood entries only; of those, days
/// without a completion are left out, so fewer than `limit` samples may come
/// back. Completions for habits missing from the snapshot are skipped too
/// (the usual orphan-skip rule).
pub fn correlation_samples(
    habits: &[Habit],
    habit_logs: &[HabitLog],
    mood_logs: &[MoodLog],
    window: &Window,
    limit: usize,
) -> Vec<CorrelationSample> {
    let names: HashMap<&str, &str> = habits
        .iter()
        .map(|h| (h.id.as_str(), h.name.as_str()))
        .collect();

    let index = LogIndex::build(habit_logs, window);
    let mut completed_by_date: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for habit_id in index.habit_ids().collect::<Vec<_>>() {
        let Some(name) = names.get(habit_id) else {
            continue;
        };
        for log in index.logs_for(habit_id) {
            if log.completed {
                completed_by_date
                    .entry(log.date.as_str())
                    .or_default()
                    .push((*name).to_string());
            }
        }
    }
    for completed in completed_by_date.values_mut() {
        completed.sort();
    }

    let mut moods: Vec<&MoodLog> = mood_logs
        .iter()
        .filter(|m| {
            crate::window::parse_date_key(&m.date).is_some_and(|d| window.contains(d))
        })
        .collect();
    moods.sort_by(|a, b| b.date.cmp(&a.date));
    moods.truncate(limit);

    moods
        .into_iter()
        .filter_map(|m| {
            completed_by_date
                .get(m.date.as_str())
                .map(|completed| CorrelationSample {
                    date: m.date.clone(),
                    mood_level: m.mood_level,
                    completed_habits: completed.clone(),
                })
        })
        .collect()
}
