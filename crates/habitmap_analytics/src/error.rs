//! Error taxonomy for the aggregation engine.

use thiserror::Error;

/// Aggregation errors.
///
/// None of these are swallowed or logged by the engine itself; every variant
/// is returned synchronously from the offending call so the caller can tell
/// "no data" (empty/`None` results) apart from "something is wrong".
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// A non-positive window length was requested. Fatal to the single
    /// aggregation call, not to the process.
    #[error("invalid window length: {0}")]
    InvalidWindow(i64),

    /// A mood log outside `1..=5` reached the aggregator. This is an upstream
    /// write-validation bug; the aggregator refuses to clamp.
    #[error("invalid mood level: {0}")]
    InvalidMoodLevel(i64),

    /// A summary references a habit id with no `habit_stats` entry. Always a
    /// programming error, never user-triggered.
    #[error("incomplete summary: no stats entry for habit {0}")]
    IncompleteSummary(String),

    /// Propagated from the read boundary; retry/backoff policy belongs to
    /// the caller.
    #[error("store error: {0}")]
    Store(#[from] habitmap_store::StoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for aggregation operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
