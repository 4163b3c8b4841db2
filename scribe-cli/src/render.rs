//! Terminal rendering of jobs and related values

use chrono::{DateTime, Local, Utc};
use colored::*;
use scribe_core::domain::job::{Job, JobCounts, JobStatus};
use scribe_core::estimate::estimate_remaining;
use scribe_core::format::{
    format_duration, format_file_size, format_remaining, progress_bar, progress_percent,
};
use scribe_core::password::{PasswordReport, PasswordStrength};

const BAR_WIDTH: usize = 20;

/// Colorize job status for display
pub fn colorize_status(status: JobStatus) -> ColoredString {
    let label = status.as_str();
    match status {
        JobStatus::Queued => label.yellow(),
        JobStatus::Pending => label.yellow(),
        JobStatus::Processing => label.cyan(),
        JobStatus::Completed => label.green(),
        JobStatus::Failed => label.red(),
    }
}

/// Progress column: a bar for processing jobs, the status otherwise
fn progress_cell(job: &Job) -> String {
    match (job.determinate_progress(), progress_percent(job)) {
        (Some(fraction), Some(percent)) => {
            format!("{} {:>3}%", progress_bar(fraction, BAR_WIDTH), percent)
        }
        _ if job.is_terminal() => String::new(),
        _ => format!("{}", "(waiting)".dimmed()),
    }
}

/// One line per job
pub fn print_job_table(jobs: &[Job], now: DateTime<Utc>) {
    println!(
        "{}",
        format!(
            "  {:<8} {:<24} {:<11} {:<9} {:<9} {}",
            "ID", "NAME", "STATUS", "DURATION", "ETA", "PROGRESS"
        )
        .bold()
    );

    for job in jobs {
        let duration = job.duration.map(format_duration).unwrap_or_else(|| "-".to_string());
        let eta = estimate_remaining(job, now)
            .map(format_remaining)
            .unwrap_or_else(|| "-".to_string());

        println!(
            "  {:<8} {:<24} {:<11} {:<9} {:<9} {}",
            job.id.to_string().dimmed(),
            truncate(&job.display_name(), 24),
            colorize_status(job.status),
            duration,
            eta,
            progress_cell(job)
        );
    }
}

/// Aggregate counts line
pub fn print_counts(counts: &JobCounts) {
    println!(
        "{} total · {} queued · {} pending · {} processing · {} completed · {} failed",
        counts.total().to_string().bold(),
        counts.queued,
        counts.pending,
        counts.processing.to_string().cyan(),
        counts.completed.to_string().green(),
        counts.failed.to_string().red()
    );
}

/// Print detailed job information
pub fn print_job_details(job: &Job, now: DateTime<Utc>) {
    println!("{}", "Job Details:".bold());
    println!("  ID:         {}", job.id.to_string().cyan());
    println!("  Name:       {}", job.display_name());
    println!("  Status:     {}", colorize_status(job.status));

    if let Some(filename) = &job.filename {
        println!("  File:       {}", filename);
    }
    if let Some(size) = job.file_size {
        println!("  Size:       {}", format_file_size(size));
    }
    if let Some(model) = &job.model {
        println!("  Model:      {}", model);
    }
    if let Some(hint) = &job.language_hint {
        println!("  Language:   {}", hint);
    }
    if let Some(detected) = &job.detected_language {
        println!("  Detected:   {}", detected);
    }
    if let Some(created) = job.created_at {
        println!("  Created:    {}", local_time(created));
    }
    if let Some(started) = job.start_timestamp {
        println!("  Started:    {}", local_time(started));
    }
    if let Some(percent) = progress_percent(job) {
        println!("  Progress:   {}%", percent);
    }
    if let Some(remaining) = estimate_remaining(job, now) {
        println!("  Remaining:  {}", format_remaining(remaining));
    }
    if let Some(audio) = job.audio_duration {
        println!("  Audio:      {}", format_duration(audio));
    }
    if let Some(duration) = job.duration {
        println!("  Duration:   {}", format_duration(duration));
    }

    if let Some(error) = &job.error_message {
        println!("\n{}", "Error:".bold());
        println!("{}", error.red());
    }

    match (job.status, &job.result) {
        (JobStatus::Completed, Some(text)) => {
            println!("\n{}", "Transcript:".bold());
            println!("{}", "─".repeat(80).dimmed());
            println!("{}", text);
            println!("{}", "─".repeat(80).dimmed());
        }
        (JobStatus::Failed, Some(text)) if job.error_message.is_none() => {
            println!("\n{}", "Error:".bold());
            println!("{}", text.red());
        }
        _ => {}
    }
}

/// Strength label plus a checklist of the five criteria
pub fn print_password_report(report: &PasswordReport) {
    let strength = report.strength.to_string();
    let strength = match report.strength {
        PasswordStrength::Weak => strength.red(),
        PasswordStrength::Medium => strength.yellow(),
        PasswordStrength::Strong => strength.green(),
    };

    println!(
        "Password strength: {} {}",
        strength.bold(),
        progress_bar(f64::from(report.score) / 5.0, 5).dimmed()
    );
    for (label, ok) in report.checks.labeled() {
        if ok {
            println!("  {} {}", "✓".green(), label);
        } else {
            println!("  {} {}", "✗".dimmed(), label.dimmed());
        }
    }
}

fn local_time(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
