use std::io::IsTerminal;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::stats::{MergeSummary, TrendPoint};

/// Format a number of seconds in compact form: "3h23m23s", "12s", "400d0h0m0s".
/// Once a unit appears, every smaller unit is shown too.
pub fn pretty_duration(total_secs: i64) -> String {
    let secs = total_secs.max(0);
    let days = secs / 86_400;
    let hours = secs % 86_400 / 3_600;
    let minutes = secs % 3_600 / 60;
    let seconds = secs % 60;

    if days > 0 {
        format!("{}d{}h{}m{}s", days, hours, minutes, seconds)
    } else if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format the average/median summary, or a "no data" line when the filter
/// chain left nothing to aggregate.
pub fn format_summary(summary: Option<&MergeSummary>, use_colors: bool) -> String {
    let Some(summary) = summary else {
        return "No merged pull requests matched the filters.".to_string();
    };

    let mean = pretty_duration(summary.mean_secs as i64);
    let median = pretty_duration(summary.median_secs);

    if use_colors {
        format!(
            "Average time to merge: {}\nMedian time to merge: {}",
            mean.bold(),
            median.bold()
        )
    } else {
        format!("Average time to merge: {}\nMedian time to merge: {}", mean, median)
    }
}

/// Width available for trend bars, when stdout is a terminal wide enough
/// to fit one next to the fixed columns.
pub fn trend_bar_width() -> Option<usize> {
    if !std::io::stdout().is_terminal() {
        return None;
    }

    // date + counts + pretty duration columns take roughly 45 cells
    const FIXED_COLS: usize = 45;

    terminal_size().and_then(|(Width(w), _)| {
        let width = (w as usize).saturating_sub(FIXED_COLS);
        if width >= 10 {
            Some(width.min(60))
        } else {
            None
        }
    })
}

/// Format trend points as tab-separated lines:
/// date, merged count, mean seconds, pretty duration, mean in days.
/// With `bar_width`, a proportional bar column is appended, scaled so the
/// largest mean fills the width.
pub fn format_trend_lines(points: &[TrendPoint], bar_width: Option<usize>) -> String {
    let max_mean = points.iter().map(|point| point.mean_secs).fold(0.0, f64::max);

    points
        .iter()
        .map(|point| {
            let mut line = format!(
                "{}\t{}\t{}\t{}\t{:.2}",
                point.day.format("%Y-%m-%d"),
                point.merged,
                point.mean_secs as i64,
                pretty_duration(point.mean_secs as i64),
                point.mean_secs / 86_400.0,
            );

            if let Some(width) = bar_width {
                if max_mean > 0.0 {
                    let len = (point.mean_secs / max_mean * width as f64).round() as usize;
                    line.push('\t');
                    line.push_str(&"#".repeat(len));
                }
            }

            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serialize trend points as a JSON array for scripting
pub fn format_trend_json(points: &[TrendPoint]) -> Result<String> {
    serde_json::to_string_pretty(points).context("Failed to serialize trend report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn point(day_of_month: u32, merged: usize, mean_secs: f64) -> TrendPoint {
        TrendPoint {
            day: Utc.with_ymd_and_hms(2026, 3, day_of_month, 0, 0, 0).unwrap(),
            merged,
            mean_secs,
        }
    }

    #[test]
    fn test_pretty_duration_simple() {
        assert_eq!(pretty_duration(12203), "3h23m23s");
    }

    #[test]
    fn test_pretty_duration_short() {
        assert_eq!(pretty_duration(12), "12s");
    }

    #[test]
    fn test_pretty_duration_long() {
        assert_eq!(pretty_duration(400 * 24 * 60 * 60), "400d0h0m0s");
    }

    #[test]
    fn test_pretty_duration_zero() {
        assert_eq!(pretty_duration(0), "0s");
    }

    #[test]
    fn test_pretty_duration_exact_units() {
        assert_eq!(pretty_duration(60), "1m0s");
        assert_eq!(pretty_duration(3600), "1h0m0s");
        assert_eq!(pretty_duration(86_400), "1d0h0m0s");
    }

    #[test]
    fn test_format_summary_no_data() {
        assert_eq!(
            format_summary(None, false),
            "No merged pull requests matched the filters."
        );
    }

    #[test]
    fn test_format_summary_plain() {
        let summary = MergeSummary {
            count: 3,
            mean_secs: 12203.9,
            median_secs: 12,
        };
        let result = format_summary(Some(&summary), false);
        assert_eq!(
            result,
            "Average time to merge: 3h23m23s\nMedian time to merge: 12s"
        );
    }

    #[test]
    fn test_format_trend_lines_columns() {
        let points = vec![point(1, 2, 200.0)];
        let result = format_trend_lines(&points, None);
        assert_eq!(result, "2026-03-01\t2\t200\t3m20s\t0.00");
    }

    #[test]
    fn test_format_trend_lines_day_fraction() {
        let points = vec![point(1, 1, 43_200.0)];
        let result = format_trend_lines(&points, None);
        assert!(result.ends_with("\t0.50"));
    }

    #[test]
    fn test_format_trend_lines_bars_scaled_to_max() {
        let points = vec![point(1, 1, 100.0), point(2, 1, 50.0), point(3, 0, 0.0)];
        let result = format_trend_lines(&points, Some(10));
        let lines: Vec<&str> = result.lines().collect();
        assert!(lines[0].ends_with(&format!("\t{}", "#".repeat(10))));
        assert!(lines[1].ends_with(&format!("\t{}", "#".repeat(5))));
        assert!(lines[2].ends_with("\t"));
    }

    #[test]
    fn test_format_trend_lines_no_bars_when_all_zero() {
        let points = vec![point(1, 0, 0.0)];
        let result = format_trend_lines(&points, Some(10));
        assert_eq!(result, "2026-03-01\t0\t0\t0s\t0.00");
    }

    #[test]
    fn test_format_trend_json_shape() {
        let points = vec![point(1, 2, 200.0)];
        let json = format_trend_json(&points).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["merged"], 2);
        assert_eq!(value[0]["mean_secs"], 200.0);
        assert!(value[0]["day"].as_str().unwrap().starts_with("2026-03-01"));
    }
}
