//! Time formatting utilities

use std::time::Duration;

/// Seconds with two decimals, the precision used for media tool arguments
/// and persisted tables
pub fn format_seconds(seconds: f64) -> String {
    format!("{:.2}", seconds)
}

/// Format duration for display
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    let milliseconds = duration.subsec_millis();

    if hours > 0 {
        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, milliseconds)
    } else {
        format!("{:02}:{:02}.{:03}", minutes, seconds, milliseconds)
    }
}
