// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Job health derived from recency and last outcome, plus next-run lookup.

use chrono::{DateTime, Duration, Utc};
use croner::Cron;
use serde::Serialize;
use strum::Display;

use crate::error::SchedulerError;
use crate::job::JobResult;

/// Daily jobs that have not run for this long are reported as failing.
pub const STALE_AFTER_HOURS: i64 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerHealth {
    pub job_name: String,
    pub status: HealthState,
    pub last_execution: Option<DateTime<Utc>>,
    pub next_execution: Option<DateTime<Utc>>,
    pub message: String,
}

/// Health of `job_name` as of now.
pub fn create_scheduler_health_check<T>(
    job_name: &str,
    last_execution: Option<DateTime<Utc>>,
    next_execution: Option<DateTime<Utc>>,
    last_result: Option<&JobResult<T>>,
) -> SchedulerHealth {
    scheduler_health_at(Utc::now(), job_name, last_execution, next_execution, last_result)
}

/// Health of `job_name` as of `now`.
///
/// Never run → warning. Stale or last run failed → error.
pub fn scheduler_health_at<T>(
    now: DateTime<Utc>,
    job_name: &str,
    last_execution: Option<DateTime<Utc>>,
    next_execution: Option<DateTime<Utc>>,
    last_result: Option<&JobResult<T>>,
) -> SchedulerHealth {
    let (status, message) = match last_execution {
        None => (HealthState::Warning, "Job has never been executed".to_string()),
        Some(last) if now - last > Duration::hours(STALE_AFTER_HOURS) => (
            HealthState::Error,
            format!("Job has not run for more than {STALE_AFTER_HOURS} hours"),
        ),
        Some(_) => match last_result {
            Some(result) if !result.success => (
                HealthState::Error,
                format!(
                    "Last execution failed: {}",
                    result.error.as_deref().unwrap_or("unknown error")
                ),
            ),
            _ => (HealthState::Healthy, "Job is running normally".to_string()),
        },
    };

    SchedulerHealth {
        job_name: job_name.to_string(),
        status,
        last_execution,
        next_execution,
        message,
    }
}

/// Next fire time of `cron` strictly after `after`.
pub fn next_execution(cron: &str, after: DateTime<Utc>) -> Result<DateTime<Utc>, SchedulerError> {
    let invalid = |reason: String| SchedulerError::InvalidCron {
        expression: cron.to_string(),
        reason,
    };
    let schedule: Cron = cron.trim().parse().map_err(|e| invalid(format!("{e}")))?;
    schedule
        .find_next_occurrence(&after, false)
        .map_err(|e| invalid(format!("{e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, h, m, 0).unwrap()
    }

    fn result(success: bool) -> JobResult<()> {
        JobResult {
            success,
            message: String::new(),
            data: None,
            error: (!success).then(|| "feed timed out".to_string()),
            timestamp: at(0, 0),
            duration_ms: 5,
        }
    }

    #[test]
    fn never_run_is_a_warning() {
        let h = scheduler_health_at::<()>(at(12, 0), "rotate", None, None, None);
        assert_eq!(h.status, HealthState::Warning);
    }

    #[test]
    fn stale_run_is_an_error() {
        let now = at(12, 0);
        let last = now - Duration::hours(26);
        let h = scheduler_health_at(now, "rotate", Some(last), None, Some(&result(true)));
        assert_eq!(h.status, HealthState::Error);

        let last = now - Duration::hours(24);
        let h = scheduler_health_at(now, "rotate", Some(last), None, Some(&result(true)));
        assert_eq!(h.status, HealthState::Healthy);
    }

    #[test]
    fn failed_last_result_is_an_error() {
        let now = at(12, 0);
        let h = scheduler_health_at(now, "rotate", Some(at(11, 0)), None, Some(&result(false)));
        assert_eq!(h.status, HealthState::Error);
        assert!(h.message.contains("feed timed out"));
    }

    #[test]
    fn recent_run_without_result_is_healthy() {
        let h = scheduler_health_at::<()>(at(12, 0), "rotate", Some(at(11, 59)), None, None);
        assert_eq!(h.status, HealthState::Healthy);
        assert_eq!(h.status.to_string(), "healthy");
    }

    #[test]
    fn next_run_of_a_daily_job() {
        let next = next_execution("0 6 * * *", at(7, 30)).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 5, 5, 6, 0, 0).unwrap());

        let next = next_execution("*/15 * * * *", at(7, 30)).unwrap();
        assert_eq!(next, at(7, 45));
    }

    #[test]
    fn unparseable_cron_is_an_error() {
        let err = next_execution("not a cron", at(0, 0)).unwrap_err();
        assert!(err.to_string().contains("not a cron"));
    }
}
