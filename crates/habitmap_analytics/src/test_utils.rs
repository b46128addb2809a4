//! Shared in-memory `LogStore` used by unit tests.
//!
//! Read-only: the aggregation engine never writes, so the write half of the
//! trait is left unimplemented here.
#![cfg(test)]

use async_trait::async_trait;
use habitmap_store::{
    Habit, HabitDraft, HabitLog, HabitLogEntry, LogStore, MoodEntry, MoodLog, SettingsPatch,
    StoreError, Theme, UserSettings,
};

#[derive(Default)]
pub struct InMemoryStore {
    habits: Vec<Habit>,
    habit_logs: Vec<HabitLog>,
    mood_logs: Vec<MoodLog>,
    fail_mood_logs: bool,
}

impl InMemoryStore {
    pub fn with_habit(mut self, id: &str, name: &str, color: &str) -> Self {
        self.habits.push(Habit {
            id: id.into(),
            user_id: "u1".into(),
            name: name.into(),
            color: color.into(),
        });
        self
    }

    pub fn with_habit_log(mut self, habit_id: &str, date: &str, completed: bool) -> Self {
        self.habit_logs.push(HabitLog {
            id: format!("{habit_id}-{date}"),
            habit_id: habit_id.into(),
            date: date.into(),
            completed,
        });
        self
    }

    pub fn with_mood_log(mut self, date: &str, level: i64) -> Self {
        self.mood_logs.push(MoodLog {
            date: date.into(),
            mood_level: level,
            emoji: habitmap_store::emoji_for_level(level).unwrap_or("?").into(),
            note: None,
        });
        self
    }

    pub fn failing_mood_logs(mut self) -> Self {
        self.fail_mood_logs = true;
        self
    }
}

#[async_trait]
impl LogStore for InMemoryStore {
    async fn list_habits(&self) -> Result<Vec<Habit>, StoreError> {
        Ok(self.habits.clone())
    }

    async fn list_habit_logs(&self) -> Result<Vec<HabitLog>, StoreError> {
        Ok(self.habit_logs.clone())
    }

    async fn list_mood_logs(&self) -> Result<Vec<MoodLog>, StoreError> {
        if self.fail_mood_logs {
            return Err(StoreError::Unavailable {
                status: 503,
                body: "mood logs offline".into(),
            });
        }
        Ok(self.mood_logs.clone())
    }

    async fn get_settings(&self) -> Result<UserSettings, StoreError> {
        Ok(UserSettings {
            theme: Theme::Light,
            color_palette: "default".into(),
        })
    }

    async fn create_habit(&self, _draft: HabitDraft) -> Result<Habit, StoreError> {
        unimplemented!()
    }

    async fn update_habit(&self, _habit_id: &str, _draft: HabitDraft) -> Result<Habit, StoreError> {
        unimplemented!()
    }

    async fn delete_habit(&self, _habit_id: &str) -> Result<(), StoreError> {
        unimplemented!()
    }

    async fn upsert_habit_log(&self, _entry: HabitLogEntry) -> Result<HabitLog, StoreError> {
        unimplemented!()
    }

    async fn upsert_mood_log(&self, _entry: MoodEntry) -> Result<MoodLog, StoreError> {
        unimplemented!()
    }

    async fn delete_mood_log(&self, _date: &str) -> Result<(), StoreError> {
        unimplemented!()
    }

    async fn update_settings(&self, _patch: SettingsPatch) -> Result<UserSettings, StoreError> {
        unimplemented!()
    }
}
