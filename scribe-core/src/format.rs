//! Display helpers shared by every front end

use std::time::Duration;

use crate::domain::job::Job;

/// Format seconds as `m:ss`, or `h:mm:ss` from one hour on
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.round() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Whole-percent progress for a processing job
pub fn progress_percent(job: &Job) -> Option<u8> {
    job.determinate_progress()
        .map(|p| (p * 100.0).round().clamp(0.0, 100.0) as u8)
}

/// Short human label for a remaining-time estimate
pub fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    if secs < 60 {
        format!("~{} s", secs)
    } else {
        format!("~{} min", (secs + 30) / 60)
    }
}

/// Byte count in binary units with one decimal
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// Text-mode progress bar, `width` cells wide
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
