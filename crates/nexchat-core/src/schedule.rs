//! In-process sweep schedule wrapping `tokio-cron-scheduler`.
//!
//! `sweep.schedule` is either a cron expression (5 fields, or 6 with seconds)
//! or a cadence in words, and drives one recurring sweep job.

use std::future::Future;

use chrono::Utc;
use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;

/// Errors that can occur during scheduling operations.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// Failed to create or manipulate a cron job.
    #[error("scheduler error: {0}")]
    JobError(String),

    /// Invalid cron expression or schedule string.
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),
}

/// Recurring sweep cadence written in words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cadence {
    Seconds(u32),
    Minutes(u32),
    Hours(u32),
}

impl Cadence {
    /// Parse `"hourly"`, `"daily"`, `"every minute"` or `"every N <unit>s"`.
    fn parse(lower: &str) -> Option<Self> {
        match lower {
            "hourly" => return Some(Self::Hours(1)),
            "daily" => return Some(Self::Hours(24)),
            _ => {}
        }

        let mut words = lower.strip_prefix("every ")?.split_whitespace();
        let (count, unit) = match (words.next()?, words.next(), words.next()) {
            (unit, None, None) => (1, unit),
            (count, Some(unit), None) => (count.parse().ok()?, unit),
            _ => return None,
        };

        match unit.trim_end_matches('s') {
            "second" => Some(Self::Seconds(count)),
            "minute" => Some(Self::Minutes(count)),
            "hour" => Some(Self::Hours(count)),
            "day" if count == 1 => Some(Self::Hours(24)),
            _ => None,
        }
    }

    /// Six-field cron expression, or `None` when the step does not fit its field.
    fn to_cron(self) -> Option<String> {
        match self {
            Self::Seconds(n @ 1..=59) => Some(format!("*/{n} * * * * *")),
            Self::Minutes(n @ 1..=59) => Some(format!("0 */{n} * * * *")),
            Self::Hours(n @ 1..=23) => Some(format!("0 0 */{n} * * *")),
            Self::Hours(24) => Some("0 0 0 * * *".to_string()),
            _ => None,
        }
    }
}

/// Normalize `sweep.schedule` to the 6-field cron form the scheduler expects.
///
/// Accepts a 5-field cron expression (a zero seconds field is prepended), a
/// 6-field one (kept as-is), or a cadence such as `"every 30 minutes"`,
/// `"every hour"`, `"hourly"` or `"daily"`. Steps must fit their cron field:
/// seconds and minutes below 60, hours up to 24.
pub fn normalize_schedule(input: &str) -> Result<String, SchedulerError> {
    let trimmed = input.trim();

    match trimmed.split_whitespace().count() {
        5 => return Ok(format!("0 {trimmed}")),
        6 => return Ok(trimmed.to_string()),
        _ => {}
    }

    Cadence::parse(&trimmed.to_lowercase())
        .and_then(Cadence::to_cron)
        .ok_or_else(|| SchedulerError::InvalidSchedule(format!("unrecognized schedule '{trimmed}'")))
}

/// A running recurring sweep job.
pub struct SweepScheduler {
    scheduler: JobScheduler,
    job_id: Uuid,
    cron_expr: String,
}

impl SweepScheduler {
    /// Start a scheduler running `callback` each time `schedule` fires.
    pub async fn start<F, Fut>(schedule: &str, callback: F) -> Result<Self, SchedulerError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cron_expr = normalize_schedule(schedule)?;

        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| SchedulerError::JobError(e.to_string()))?;

        let job = Job::new_async(cron_expr.as_str(), move |_uuid, _lock| {
            let run = callback();
            Box::pin(async move {
                tracing::debug!(now = %Utc::now(), "scheduled sweep fired");
                run.await;
            })
        })
        .map_err(|e| SchedulerError::InvalidSchedule(e.to_string()))?;

        let job_id = scheduler
            .add(job)
            .await
            .map_err(|e| SchedulerError::JobError(e.to_string()))?;

        scheduler
            .start()
            .await
            .map_err(|e| SchedulerError::JobError(e.to_string()))?;

        tracing::info!(%job_id, cron = %cron_expr, "sweep scheduler started");
        Ok(Self {
            scheduler,
            job_id,
            cron_expr,
        })
    }

    /// The normalized cron expression in use.
    pub fn cron_expr(&self) -> &str {
        &self.cron_expr
    }

    /// Stop the scheduler and drop the job.
    pub async fn shutdown(mut self) -> Result<(), SchedulerError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| SchedulerError::JobError(e.to_string()))?;
        tracing::info!(job_id = %self.job_id, "sweep scheduler stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn test_normalize_cadences() {
        assert_eq!(normalize_schedule("every 30 minutes").unwrap(), "0 */30 * * * *");
        assert_eq!(normalize_schedule("every 2 hours").unwrap(), "0 0 */2 * * *");
        assert_eq!(normalize_schedule("Every 10 Seconds").unwrap(), "*/10 * * * * *");
        assert_eq!(normalize_schedule("every minute").unwrap(), "0 */1 * * * *");
        assert_eq!(normalize_schedule("hourly").unwrap(), "0 0 */1 * * *");
        assert_eq!(normalize_schedule("every day").unwrap(), "0 0 0 * * *");
        assert_eq!(normalize_schedule(" daily ").unwrap(), "0 0 0 * * *");
        assert_eq!(normalize_schedule("every 24 hours").unwrap(), "0 0 0 * * *");
    }

    #[test]
    fn test_normalize_cron_expressions() {
        assert_eq!(normalize_schedule("*/5 * * * *").unwrap(), "0 */5 * * * *");
        assert_eq!(normalize_schedule("0 0 * * * *").unwrap(), "0 0 * * * *");
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(normalize_schedule("every 0 minutes").is_err());
        assert!(normalize_schedule("every 90 minutes").is_err());
        assert!(normalize_schedule("every 25 hours").is_err());
        assert!(normalize_schedule("every 2 days").is_err());
        assert!(normalize_schedule("every 5 fortnights").is_err());
        assert!(normalize_schedule("every -5 minutes").is_err());
        assert!(normalize_schedule("whenever").is_err());
    }

    #[tokio::test]
    async fn test_scheduler_fires_callback() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let callback = move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        };

        let scheduler = SweepScheduler::start("every 1 seconds", callback).await.unwrap();
        assert_eq!(scheduler.cron_expr(), "*/1 * * * * *");
        tokio::time::sleep(Duration::from_millis(2500)).await;
        scheduler.shutdown().await.unwrap();

        assert!(fired.load(Ordering::SeqCst) >= 1);
    }
}
