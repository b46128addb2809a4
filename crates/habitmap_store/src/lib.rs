//! Domain types, write-boundary validation, and the `LogStore` trait for the
//! HabitMap persistence service.
//!
//! The aggregation engine in `habitmap_analytics` treats everything here as an
//! immutable snapshot: it reads collections through [`LogStore`] and never
//! mutates them. Writes are invoked by the surrounding application.

use async_trait::async_trait;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

pub mod config;
pub mod http_client;
pub mod retry;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store unavailable (status {status}): {body}")]
    Unavailable { status: u16, body: String },
    #[error("authentication rejected: {0}")]
    Auth(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("configuration error: {0}")]
    Config(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A user-defined recurring activity tracked by daily completion.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct Habit {
    pub id: String,
    pub user_id: String,
    pub name: String,
    /// `#`-prefixed 6-hex-digit triplet, e.g. `#a8b5a1`.
    pub color: String,
}

/// One day's completion record for one habit. At most one per
/// `(habit_id, date)` pair; the store upserts on conflict.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct HabitLog {
    pub id: String,
    pub habit_id: String,
    pub date: String, // YYYY-MM-DD
    pub completed: bool,
}

/// One day's mood rating plus optional note. At most one per date per user.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct MoodLog {
    pub date: String, // YYYY-MM-DD
    pub mood_level: i64,
    pub emoji: String,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

/// Pass-through presentation configuration; the aggregation core never
/// inspects it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct UserSettings {
    pub theme: Theme,
    pub color_palette: String,
}

/// The fixed mood scale: `(level, emoji, label)`.
pub const MOOD_SCALE: [(i64, &str, &str); 5] = [
    (1, "\u{1F622}", "Very Bad"),
    (2, "\u{1F615}", "Bad"),
    (3, "\u{1F610}", "Okay"),
    (4, "\u{1F60A}", "Good"),
    (5, "\u{1F604}", "Excellent"),
];

/// Map a mood level to its emoji glyph. Total over `1..=5`, `None` otherwise.
pub fn emoji_for_level(level: i64) -> Option<&'static str> {
    MOOD_SCALE
        .iter()
        .find(|(l, _, _)| *l == level)
        .map(|(_, emoji, _)| *emoji)
}

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("hex color regex"));

static DATE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date key regex"));

/// Payload for creating or renaming a habit.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct HabitDraft {
    pub name: String,
    pub color: String,
}

impl HabitDraft {
    pub fn validate(&self) -> StoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(StoreError::InvalidInput("habit name must not be blank".into()));
        }
        if !HEX_COLOR.is_match(&self.color) {
            return Err(StoreError::InvalidInput(format!(
                "habit color must be a #RRGGBB hex triplet, got {:?}",
                self.color
            )));
        }
        Ok(())
    }
}

/// Upsert payload for a habit's daily completion.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct HabitLogEntry {
    pub habit_id: String,
    pub date: String, // YYYY-MM-DD
    pub completed: bool,
}

impl HabitLogEntry {
    pub fn validate(&self) -> StoreResult<()> {
        if !DATE_KEY.is_match(&self.date) {
            return Err(StoreError::InvalidInput(format!(
                "log date must be a YYYY-MM-DD key, got {:?}",
                self.date
            )));
        }
        Ok(())
    }
}

/// Upsert payload for a day's mood. The emoji is derived from the level,
/// never supplied by the caller.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct MoodEntry {
    pub date: String, // YYYY-MM-DD
    pub mood_level: i64,
    pub emoji: String,
    #[serde(default)]
    pub note: Option<String>,
}

impl MoodEntry {
    /// Build a validated entry, filling the emoji from [`MOOD_SCALE`].
    pub fn new(date: impl Into<String>, mood_level: i64, note: Option<String>) -> StoreResult<Self> {
        let date = date.into();
        if !DATE_KEY.is_match(&date) {
            return Err(StoreError::InvalidInput(format!(
                "mood date must be a YYYY-MM-DD key, got {date:?}"
            )));
        }
        let emoji = emoji_for_level(mood_level).ok_or_else(|| {
            StoreError::InvalidInput(format!("mood level must be in 1..=5, got {mood_level}"))
        })?;
        Ok(Self {
            date,
            mood_level,
            emoji: emoji.to_string(),
            note,
        })
    }
}

/// Partial settings update; `None` fields are left untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_palette: Option<String>,
}

/// Read/write contract against the persistence service.
///
/// One `LogStore` instance is bound to one authenticated user; the bearer
/// token carries the identity, so no method takes a user id. Reads return
/// snapshots the caller may aggregate over; the three `list_*` calls are
/// expected to be issued at approximately the same instant when a consistent
/// snapshot is wanted (the store gives no cross-collection transaction).
#[async_trait]
pub trait LogStore: Send + Sync + 'static {
    async fn list_habits(&self) -> StoreResult<Vec<Habit>>;
    async fn list_habit_logs(&self) -> StoreResult<Vec<HabitLog>>;
    async fn list_mood_logs(&self) -> StoreResult<Vec<MoodLog>>;
    async fn get_settings(&self) -> StoreResult<UserSettings>;

    async fn create_habit(&self, draft: HabitDraft) -> StoreResult<Habit>;
    async fn update_habit(&self, habit_id: &str, draft: HabitDraft) -> StoreResult<Habit>;
    /// Deletes the habit and cascades to its logs.
    async fn delete_habit(&self, habit_id: &str) -> StoreResult<()>;

    /// Upsert keyed by `(habit_id, date)`.
    async fn upsert_habit_log(&self, entry: HabitLogEntry) -> StoreResult<HabitLog>;
    /// Upsert keyed by `date`.
    async fn upsert_mood_log(&self, entry: MoodEntry) -> StoreResult<MoodLog>;
    async fn delete_mood_log(&self, date: &str) -> StoreResult<()>;

    async fn update_settings(&self, patch: SettingsPatch) -> StoreResult<UserSettings>;
}
