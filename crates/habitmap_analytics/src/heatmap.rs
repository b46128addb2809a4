//! Heatmap projection: a dense per-day intensity sequence over a trailing
//! window, gap-filled with zero for unlogged days.

use crate::completion::DailyPresence;
use crate::error::AnalyticsResult;
use crate::window::{Window, date_key};
use chrono::NaiveDate;
use habitmap_store::HabitLog;
use schemars::JsonSchema;
use serde::Serialize;

/// One cell of a habit heatmap.
///
/// Intensity is binary today (1 = completed) but typed wide enough that a
/// future multi-level scheme needs no interface change.
#[derive(Clone, Debug, Serialize, PartialEq, Eq, JsonSchema)]
pub struct HeatmapDay {
    pub date: String, // YYYY-MM-DD
    pub intensity: u32,
}

/// Project one habit's logs onto a trailing window ending at `today`.
///
/// Returns exactly `length` entries, oldest first, with no gaps: days absent
/// from the log set appear with intensity 0 rather than being omitted.
/// `today` is injected by the caller, never read from the wall clock.
pub fn project<'a, I>(logs: I, today: NaiveDate, length: i64) -> AnalyticsResult<Vec<HeatmapDay>>
where
    I: IntoIterator<Item = &'a HabitLog>,
{
    let window = Window::trailing(today, length)?;
    let presence = DailyPresence::build(logs);
    Ok(window
        .days()
        .map(|day| {
            let key = date_key(day);
            let intensity = u32::from(presence.is_completed(&key));
            HeatmapDay {
                date: key,
                intensity,
            }
        })
        .collect())
}
