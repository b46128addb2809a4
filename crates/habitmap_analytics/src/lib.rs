//! Analytics aggregation engine for HabitMap.
//!
//! Transforms raw, append-only daily log records (habit completions, mood
//! entries) into the derived metrics the rest of the application displays:
//! completion rates and streaks, dense heatmap projections, rolling mood
//! averages, the cross-habit summary, and the structured payload fed to the
//! narrative-generation service.
//!
//! Every aggregator is a pure, synchronous function over immutable snapshots
//! with "today" injected by the caller; only [`service::SummaryService`]
//! touches the network, and only to fetch.

pub mod completion;
pub mod error;
pub mod heatmap;
pub mod insight;
pub mod mood;
pub mod service;
pub mod summary;
pub mod window;

#[cfg(test)]
mod test_utils;

pub use error::{AnalyticsError, AnalyticsResult};
pub use heatmap::HeatmapDay;
pub use insight::{CorrelationSample, InsightRequest};
pub use service::{Snapshot, SummaryService};
pub use summary::{HabitStat, Summary};
pub use window::Window;
