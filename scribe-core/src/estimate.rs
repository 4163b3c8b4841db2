//! Remaining-time estimation for processing jobs
//!
//! Purely advisory: the value is only ever displayed.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::job::{Job, JobStatus};

/// Below this progress the extrapolation is too noisy to show
pub const MIN_PROGRESS: f64 = 0.1;

/// Floor for any positive estimate, in seconds
pub const MIN_REMAINING_SECS: f64 = 10.0;

/// Extrapolate remaining seconds from elapsed time and progress
///
/// Returns `None` when progress is at or below [`MIN_PROGRESS`] or the
/// extrapolation is not positive.
pub fn remaining_seconds(elapsed_secs: f64, progress: f64) -> Option<f64> {
    if !progress.is_finite() || progress <= MIN_PROGRESS {
        return None;
    }

    let remaining = elapsed_secs / progress - elapsed_secs;
    if remaining.is_finite() && remaining > 0.0 {
        Some(remaining.max(MIN_REMAINING_SECS))
    } else {
        None
    }
}

/// Estimate how long a processing job still needs
pub fn estimate_remaining(job: &Job, now: DateTime<Utc>) -> Option<Duration> {
    if job.status != JobStatus::Processing {
        return None;
    }

    let started = job.start_timestamp?;
    let progress = job.progress?;
    let elapsed = (now - started).num_milliseconds() as f64 / 1000.0;

    remaining_seconds(elapsed, progress).map(Duration::from_secs_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn processing(progress: f64, started: DateTime<Utc>) -> Job {
        let mut job = Job::new(1, JobStatus::Processing);
        job.progress = Some(progress);
        job.start_timestamp = Some(started);
        job
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_basic_extrapolation() {
        // 60s for 25% -> 180s left
        let job = processing(0.25, at(0));
        let remaining = estimate_remaining(&job, at(60)).unwrap();
        assert_eq!(remaining.as_secs(), 180);
    }

    #[test]
    fn test_naive_backend_timestamp() {
        // utcnow().isoformat() output, independent of the local time zone
        let now = Utc::now();
        let started = (now - chrono::Duration::seconds(60))
            .naive_utc()
            .format("%Y-%m-%dT%H:%M:%S%.6f")
            .to_string();
        let json = format!(
            r#"{{"id": 1, "status": "processing", "progress": 0.25, "start_timestamp": "{started}"}}"#
        );
        let job: Job = serde_json::from_str(&json).unwrap();

        let remaining = estimate_remaining(&job, now).unwrap();
        assert_eq!(remaining.as_secs(), 180);
    }

    #[test]
    fn test_clamped_to_floor() {
        // 90s for 95% -> ~4.7s, shown as 10s
        let job = processing(0.95, at(0));
        let remaining = estimate_remaining(&job, at(90)).unwrap();
        assert_eq!(remaining.as_secs(), 10);
    }

    #[test]
    fn test_low_progress_has_no_estimate() {
        assert_eq!(remaining_seconds(100.0, 0.1), None);
        assert_eq!(remaining_seconds(100.0, 0.05), None);
        assert!(remaining_seconds(100.0, 0.11).is_some());
    }

    #[test]
    fn test_non_positive_remaining() {
        assert_eq!(remaining_seconds(100.0, 1.0), None);
        assert_eq!(remaining_seconds(0.0, 0.5), None);
        // clock skew: start in the future
        assert_eq!(remaining_seconds(-30.0, 0.5), None);
    }

    #[test]
    fn test_defined_estimates_respect_floor() {
        for elapsed in [1.0, 5.0, 42.0, 600.0] {
            for progress in [0.11, 0.3, 0.5, 0.9, 0.99] {
                if let Some(r) = remaining_seconds(elapsed, progress) {
                    assert!(r >= MIN_REMAINING_SECS);
                }
            }
        }
    }

    #[test]
    fn test_requires_processing_and_fields() {
        let mut job = processing(0.5, at(0));
        job.status = JobStatus::Queued;
        assert_eq!(estimate_remaining(&job, at(60)), None);

        let mut job = processing(0.5, at(0));
        job.start_timestamp = None;
        assert_eq!(estimate_remaining(&job, at(60)), None);

        let mut job = processing(0.5, at(0));
        job.progress = None;
        assert_eq!(estimate_remaining(&job, at(60)), None);
    }
}
