pub mod formatter;

pub use formatter::{
    format_summary, format_trend_json, format_trend_lines, pretty_duration, should_use_colors,
    trend_bar_width,
};
