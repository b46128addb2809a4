//! Mood aggregation: rolling averages, trailing timelines, and the fixed
//! level-to-emoji mapping.

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::window::{Window, parse_date_key};
use habitmap_store::MoodLog;

/// Arithmetic mean of `mood_level` over logs whose date falls in `window`.
///
/// Returns `None` when the window holds no logs: "no mood data" must stay
/// distinguishable from "average mood is 0", which is not even a valid level.
/// A log with a level outside `1..=5` is an upstream write-validation bug and
/// fails the call rather than being clamped.
pub fn average_mood(logs: &[MoodLog], window: &Window) -> AnalyticsResult<Option<f64>> {
    let mut sum = 0i64;
    let mut count = 0u32;
    for log in logs {
        let Some(date) = parse_date_key(&log.date) else {
            continue;
        };
        if !window.contains(date) {
            continue;
        }
        check_level(log.mood_level)?;
        sum += log.mood_level;
        count += 1;
    }
    if count == 0 {
        Ok(None)
    } else {
        Ok(Some(sum as f64 / f64::from(count)))
    }
}

/// Mood logs sorted ascending by date, at most the most recent `limit`
/// entries. Date keys sort lexicographically in calendar order, and the
/// one-log-per-date invariant means ties cannot occur.
pub fn timeline(logs: &[MoodLog], limit: usize) -> Vec<MoodLog> {
    let mut sorted = logs.to_vec();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));
    if sorted.len() > limit {
        sorted.split_off(sorted.len() - limit)
    } else {
        sorted
    }
}

/// Count of in-window logs per mood level, index 0 holding level 1.
pub fn distribution(logs: &[MoodLog], window: &Window) -> AnalyticsResult<[u32; 5]> {
    let mut counts = [0u32; 5];
    for log in logs {
        let Some(date) = parse_date_key(&log.date) else {
            continue;
        };
        if !window.contains(date) {
            continue;
        }
        check_level(log.mood_level)?;
        counts[(log.mood_level - 1) as usize] += 1;
    }
    Ok(counts)
}

/// The fixed level-to-emoji mapping, total over `1..=5`.
pub fn emoji_for_level(level: i64) -> AnalyticsResult<&'static str> {
    habitmap_store::emoji_for_level(level).ok_or(AnalyticsError::InvalidMoodLevel(level))
}

fn check_level(level: i64) -> AnalyticsResult<()> {
    if (1..=5).contains(&level) {
        Ok(())
    } else {
        Err(AnalyticsError::InvalidMoodLevel(level))
    }
}
