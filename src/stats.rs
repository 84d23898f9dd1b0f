use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::Serialize;

use crate::github::types::PullRequest;

/// How many days of history the trend report covers by default
pub const DEFAULT_SPAN_DAYS: i64 = 150;

/// Default size of the trailing window the per-day average is taken over
pub const DEFAULT_WINDOW_DAYS: i64 = 14;

#[derive(Debug, Clone, PartialEq)]
pub struct MergeSummary {
    /// Number of merged PRs that contributed
    pub count: usize,
    pub mean_secs: f64,
    pub median_secs: i64,
}

/// Mean and median open-duration over the merged PRs in the list.
///
/// Returns `None` when no PR contributes a duration, so callers report
/// "no data" instead of dividing by zero. The median is the element at
/// index n/2 of the sorted durations: for even-length lists that is the
/// upper-middle value, not an average of the two middle values. This
/// matches the tool's historical output and is kept for compatibility.
pub fn summarize(prs: &[PullRequest]) -> Option<MergeSummary> {
    let mut durations: Vec<i64> = prs
        .iter()
        .filter_map(|pr| pr.open_duration())
        .map(|duration| duration.num_seconds())
        .collect();

    if durations.is_empty() {
        return None;
    }

    let total: i64 = durations.iter().sum();
    let mean_secs = total as f64 / durations.len() as f64;

    durations.sort_unstable();
    let median_secs = durations[durations.len() / 2];

    Some(MergeSummary {
        count: durations.len(),
        mean_secs,
        median_secs,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    /// Day boundary (midnight UTC) the trailing window ends at
    pub day: DateTime<Utc>,
    /// Number of PRs merged inside the window
    pub merged: usize,
    /// Mean open-duration over the window, 0 when the window is empty
    pub mean_secs: f64,
}

/// Day-by-day rolling average of open-duration.
///
/// For each day boundary from `now - span_days` up to (exclusive) `now`,
/// averages the open-durations of PRs merged strictly inside the trailing
/// `window_days`-day window ending at that boundary. Pass `now` as a day
/// boundary (see [`start_of_tomorrow`]) so windows line up with calendar
/// days. An empty window yields a mean of 0.
pub fn rolling_trend(
    prs: &[PullRequest],
    now: DateTime<Utc>,
    span_days: i64,
    window_days: i64,
) -> Vec<TrendPoint> {
    let mut points = Vec::new();
    let mut day = now - Duration::days(span_days);

    while day < now {
        let window_start = day - Duration::days(window_days);

        let durations: Vec<i64> = prs
            .iter()
            .filter(|pr| {
                pr.merged_at
                    .is_some_and(|merged_at| merged_at > window_start && merged_at < day)
            })
            .filter_map(|pr| pr.open_duration())
            .map(|duration| duration.num_seconds())
            .collect();

        let mean_secs = if durations.is_empty() {
            0.0
        } else {
            durations.iter().sum::<i64>() as f64 / durations.len() as f64
        };

        points.push(TrendPoint {
            day,
            merged: durations.len(),
            mean_secs,
        });

        day += Duration::days(1);
    }

    points
}

/// Midnight UTC at the start of the day after `now`
pub fn start_of_tomorrow(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc() + Duration::days(1)
}
