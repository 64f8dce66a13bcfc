// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `realorai jobs` command implementation.
//!
//! `check` validates every `[[scheduler.jobs]]` entry, describes its schedule
//! and computes the next run. `run` executes a built-in job once.

use std::io::IsTerminal;

use chrono::{DateTime, Utc};
use realorai_config::{JobConfig, RealoraiConfig};
use realorai_core::RealoraiError;
use realorai_scheduler::{
    JobContext, describe_cron_expression, next_execution, sweep_expired,
    validate_job_configuration,
};
use serde::Serialize;

use crate::BuiltinJob;

/// One row of `jobs check` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobReport {
    pub name: String,
    pub cron: String,
    pub endpoint: String,
    pub valid: bool,
    pub errors: Vec<String>,
    pub schedule: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_execution: Option<DateTime<Utc>>,
}

/// Build the report for one configured job as of `now`.
pub fn report_job(job: &JobConfig, now: DateTime<Utc>) -> JobReport {
    let validation = validate_job_configuration(job);
    let mut errors = validation.errors;
    let next = if validation.valid {
        match next_execution(&job.cron, now) {
            Ok(next) => Some(next),
            Err(e) => {
                errors.push(e.to_string());
                None
            }
        }
    } else {
        None
    };

    JobReport {
        name: job.name.clone(),
        cron: job.cron.clone(),
        endpoint: job.endpoint.clone(),
        valid: errors.is_empty(),
        errors,
        schedule: describe_cron_expression(&job.cron),
        next_execution: next,
    }
}

/// Run `realorai jobs check`. Fails when any job is invalid.
pub fn run_jobs_check(config: &RealoraiConfig, json: bool, plain: bool) -> Result<(), RealoraiError> {
    let now = Utc::now();
    let reports: Vec<JobReport> = config
        .scheduler
        .jobs
        .iter()
        .map(|job| report_job(job, now))
        .collect();
    let invalid = reports.iter().filter(|r| !r.valid).count();

    if json {
        let text = serde_json::to_string_pretty(&reports)
            .map_err(|e| RealoraiError::Internal(format!("failed to encode output: {e}")))?;
        println!("{text}");
    } else {
        print_reports(&reports, !plain && std::io::stdout().is_terminal());
    }

    if invalid > 0 {
        return Err(RealoraiError::Config(format!(
            "{invalid} of {} scheduled job(s) are invalid",
            reports.len()
        )));
    }
    Ok(())
}

fn print_reports(reports: &[JobReport], use_color: bool) {
    println!();
    println!("  realorai jobs");
    println!("  {}", "-".repeat(50));

    if reports.is_empty() {
        println!("    no jobs configured");
    }

    for report in reports {
        let next = report
            .next_execution
            .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "-".to_string());
        if report.valid {
            let marker = if use_color {
                use colored::Colorize;
                "✓".green().to_string()
            } else {
                "[OK]  ".to_string()
            };
            println!(
                "    {marker} {:<20} {} (next: {next})",
                report.name, report.schedule
            );
        } else {
            let marker = if use_color {
                use colored::Colorize;
                "✗".red().to_string()
            } else {
                "[FAIL]".to_string()
            };
            println!("    {marker} {:<20} {}", report.name, report.cron);
            for error in &report.errors {
                println!("             - {error}");
            }
        }
    }
    println!();
}

/// Run `realorai jobs run <job>` once against the configured store.
pub async fn run_builtin_job(
    config: &RealoraiConfig,
    job: BuiltinJob,
    json: bool,
) -> Result<(), RealoraiError> {
    let result = match job {
        BuiltinJob::SweepExpired => {
            let store = realorai_storage::open_store(&config.store).await?;
            sweep_expired(store, Some(JobContext::new(realorai_scheduler::SWEEP_EXPIRED_JOB))).await
        }
    };

    if json {
        let text = serde_json::to_string_pretty(&result)
            .map_err(|e| RealoraiError::Internal(format!("failed to encode output: {e}")))?;
        println!("{text}");
    } else if let Some(removed) = result.data {
        println!("{} ({removed} expired key(s) removed, {}ms)", result.message, result.duration_ms);
    } else {
        println!("{}", result.message);
    }

    match result.error {
        Some(error) if !result.success => Err(RealoraiError::Internal(error)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 7, 30, 0).unwrap()
    }

    #[test]
    fn valid_job_gets_description_and_next_run() {
        let report = report_job(&JobConfig::new("rotate", "0 6 * * *", "/api/rotate"), now());
        assert!(report.valid);
        assert_eq!(report.schedule, "Daily at 06:00 UTC");
        assert_eq!(
            report.next_execution,
            Some(Utc.with_ymd_and_hms(2026, 5, 5, 6, 0, 0).unwrap())
        );
    }

    #[test]
    fn invalid_job_reports_all_errors_and_no_next_run() {
        let report = report_job(&JobConfig::new("", "bad", "y"), now());
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 3);
        assert_eq!(report.schedule, "Invalid cron expression");
        assert!(report.next_execution.is_none());
    }

    #[test]
    fn out_of_range_fields_fail_at_next_run() {
        let report = report_job(&JobConfig::new("x", "99 99 * * *", "/y"), now());
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn check_fails_on_invalid_jobs() {
        let mut config = RealoraiConfig::default();
        config.scheduler.jobs.push(JobConfig::new("x", "bad", "/y"));
        let err = run_jobs_check(&config, true, true).unwrap_err();
        assert!(matches!(err, RealoraiError::Config(_)));
    }
}
