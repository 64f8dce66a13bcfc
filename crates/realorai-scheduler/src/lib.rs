// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Harness for externally triggered Realorai jobs.
//!
//! Triggering is someone else's concern (a platform cron, the CLI). This crate
//! wraps a job's execution in a uniform [`JobResult`], validates and describes
//! job definitions, and derives a health status from recent runs.

pub mod describe;
pub mod error;
pub mod health;
pub mod job;
pub mod sweep;
pub mod validation;

pub use describe::describe_cron_expression;
pub use error::SchedulerError;
pub use health::{
    HealthState, SchedulerHealth, create_scheduler_health_check, next_execution,
    scheduler_health_at,
};
pub use job::{JobContext, JobResult, execute_scheduler_job};
pub use sweep::{SWEEP_EXPIRED_JOB, sweep_expired};
pub use validation::{JobValidation, validate_job_configuration};
