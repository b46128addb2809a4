//! Snapshot-then-aggregate service over a [`LogStore`].
//!
//! The three collections are fetched concurrently so one pass sees them at
//! approximately the same instant; the store gives no cross-collection
//! transaction, which is why the composer skips habit logs whose habit is
//! missing from the snapshot. All computation after the fetch is pure and
//! synchronous.

use crate::completion::LogIndex;
use crate::error::AnalyticsResult;
use crate::heatmap::{self, HeatmapDay};
use crate::insight::{self, CorrelationSample, InsightRequest};
use crate::mood;
use crate::summary::{self, Summary};
use crate::window::Window;
use chrono::NaiveDate;
use habitmap_store::{Habit, HabitLog, LogStore, MoodLog};
use std::collections::BTreeMap;
use std::sync::Arc;

/// One consistent read of the user's collections.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub habits: Vec<Habit>,
    pub habit_logs: Vec<HabitLog>,
    pub mood_logs: Vec<MoodLog>,
}

#[derive(Clone)]
pub struct SummaryService {
    store: Arc<dyn LogStore>,
    window_len: i64,
}

impl SummaryService {
    pub fn new(store: Arc<dyn LogStore>) -> Self {
        Self::with_window_len(store, Window::DEFAULT_LENGTH)
    }

    pub fn with_window_len(store: Arc<dyn LogStore>, window_len: i64) -> Self {
        Self { store, window_len }
    }

    /// Fetch all three collections concurrently. Any store failure fails the
    /// whole pass; retry policy belongs to the caller.
    pub async fn snapshot(&self) -> AnalyticsResult<Snapshot> {
        let (habits, habit_logs, mood_logs) = tokio::try_join!(
            self.store.list_habits(),
            self.store.list_habit_logs(),
            self.store.list_mood_logs(),
        )?;
        tracing::debug!(
            habits = habits.len(),
            habit_logs = habit_logs.len(),
            mood_logs = mood_logs.len(),
            "snapshot fetched"
        );
        Ok(Snapshot {
            habits,
            habit_logs,
            mood_logs,
        })
    }

    /// Compose the trailing-window summary as of `today`.
    pub async fn summary(&self, today: NaiveDate) -> AnalyticsResult<Summary> {
        let snap = self.snapshot().await?;
        summary::compose(
            &snap.habits,
            &snap.habit_logs,
            &snap.mood_logs,
            today,
            self.window_len,
        )
    }

    /// Dense heatmap cells for one habit's trailing window.
    pub async fn heatmap(
        &self,
        habit_id: &str,
        today: NaiveDate,
    ) -> AnalyticsResult<Vec<HeatmapDay>> {
        let logs = self.store.list_habit_logs().await?;
        let habit_logs = logs.iter().filter(|l| l.habit_id == habit_id);
        heatmap::project(habit_logs, today, self.window_len)
    }

    /// Trailing mood timeline, ascending by date.
    pub async fn mood_timeline(&self, limit: usize) -> AnalyticsResult<Vec<MoodLog>> {
        let logs = self.store.list_mood_logs().await?;
        Ok(mood::timeline(&logs, limit))
    }

    /// Build the narrative-generation request for the current snapshot.
    pub async fn insight_request(&self, today: NaiveDate) -> AnalyticsResult<InsightRequest> {
        let snap = self.snapshot().await?;
        let summary = summary::compose(
            &snap.habits,
            &snap.habit_logs,
            &snap.mood_logs,
            today,
            self.window_len,
        )?;

        let window = Window::trailing(today, self.window_len)?;
        let index = LogIndex::build(&snap.habit_logs, &window);
        let mut log_counts = BTreeMap::new();
        for habit in &snap.habits {
            log_counts.insert(habit.id.clone(), index.logs_for(&habit.id).len() as u32);
        }

        let samples: Vec<CorrelationSample> = insight::correlation_samples(
            &snap.habits,
            &snap.habit_logs,
            &snap.mood_logs,
            &window,
            insight::CORRELATION_SAMPLE_LIMIT,
        );

        InsightRequest::build(&summary, log_counts, samples)
    }
}
