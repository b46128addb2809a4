//! HTTP implementation of the [`LogStore`](crate::LogStore) trait.
//!
//! Talks to the HabitMap backend REST API with an opaque bearer token. The
//! backend enforces the upsert invariants (one habit log per `(habit_id,
//! date)`, one mood log per date); this client only validates payload shape
//! before sending.

use crate::{
    Habit, HabitDraft, HabitLog, HabitLogEntry, LogStore, MoodEntry, MoodLog, SettingsPatch,
    StoreError, UserSettings,
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

/// Client for the HabitMap backend API using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestLogStore {
    base_url: String,
    api_token: SecretString,
    client: reqwest::Client,
}

impl ReqwestLogStore {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the backend (e.g., "http://localhost:8000")
    /// * `api_token` - The bearer token issued by the auth service
    pub fn new(base_url: &str, api_token: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("reqwest client build should not fail");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
            client,
        }
    }

    pub fn from_config(cfg: &crate::config::Config) -> Self {
        Self::new(&cfg.base_url, cfg.api_token.clone())
    }

    /// Build an authenticated GET request.
    fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .bearer_auth(self.api_token.expose_secret())
    }

    /// Build an authenticated POST request.
    fn post_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .bearer_auth(self.api_token.expose_secret())
    }

    /// Build an authenticated PUT request.
    fn put_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .put(url)
            .bearer_auth(self.api_token.expose_secret())
    }

    /// Build an authenticated DELETE request.
    fn delete_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .delete(url)
            .bearer_auth(self.api_token.expose_secret())
    }

    /// Execute a request and expect a JSON response.
    async fn execute_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, StoreError> {
        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(self.error_from_response(resp).await);
        }
        tracing::trace!(status = status.as_u16(), "store response");
        Ok(resp.json::<T>().await?)
    }

    /// Execute a request with no expected response body.
    async fn execute_empty(&self, request: reqwest::RequestBuilder) -> Result<(), StoreError> {
        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(self.error_from_response(resp).await);
        }
        Ok(())
    }

    /// Extract error information from a failed response.
    async fn error_from_response(&self, resp: reqwest::Response) -> StoreError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let body_snippet: String = body.chars().take(256).collect();

        match status {
            404 => StoreError::NotFound(body_snippet),
            401 | 403 => StoreError::Auth(body_snippet),
            400 | 422 => StoreError::InvalidInput(body_snippet),
            _ => StoreError::Unavailable {
                status,
                body: body_snippet,
            },
        }
    }
}

#[async_trait]
impl LogStore for ReqwestLogStore {
    async fn list_habits(&self) -> Result<Vec<Habit>, StoreError> {
        let url = format!("{}/api/habits", self.base_url);
        self.execute_json(self.get_request(&url)).await
    }

    async fn list_habit_logs(&self) -> Result<Vec<HabitLog>, StoreError> {
        let url = format!("{}/api/habit-logs", self.base_url);
        self.execute_json(self.get_request(&url)).await
    }

    async fn list_mood_logs(&self) -> Result<Vec<MoodLog>, StoreError> {
        let url = format!("{}/api/mood-logs", self.base_url);
        self.execute_json(self.get_request(&url)).await
    }

    async fn get_settings(&self) -> Result<UserSettings, StoreError> {
        let url = format!("{}/api/settings", self.base_url);
        self.execute_json(self.get_request(&url)).await
    }

    async fn create_habit(&self, draft: HabitDraft) -> Result<Habit, StoreError> {
        draft.validate()?;
        let url = format!("{}/api/habits", self.base_url);
        self.execute_json(self.post_request(&url).json(&draft)).await
    }

    async fn update_habit(&self, habit_id: &str, draft: HabitDraft) -> Result<Habit, StoreError> {
        draft.validate()?;
        let url = format!("{}/api/habits/{}", self.base_url, habit_id);
        self.execute_json(self.put_request(&url).json(&draft)).await
    }

    async fn delete_habit(&self, habit_id: &str) -> Result<(), StoreError> {
        let url = format!("{}/api/habits/{}", self.base_url, habit_id);
        self.execute_empty(self.delete_request(&url)).await
    }

    async fn upsert_habit_log(&self, entry: HabitLogEntry) -> Result<HabitLog, StoreError> {
        entry.validate()?;
        let url = format!("{}/api/habit-logs", self.base_url);
        self.execute_json(self.post_request(&url).json(&entry)).await
    }

    async fn upsert_mood_log(&self, entry: MoodEntry) -> Result<MoodLog, StoreError> {
        let url = format!("{}/api/mood-logs", self.base_url);
        self.execute_json(self.post_request(&url).json(&entry)).await
    }

    async fn delete_mood_log(&self, date: &str) -> Result<(), StoreError> {
        let url = format!("{}/api/mood-logs/{}", self.base_url, date);
        self.execute_empty(self.delete_request(&url)).await
    }

    async fn update_settings(&self, patch: SettingsPatch) -> Result<UserSettings, StoreError> {
        let url = format!("{}/api/settings", self.base_url);
        self.execute_json(self.put_request(&url).json(&patch)).await
    }
}
