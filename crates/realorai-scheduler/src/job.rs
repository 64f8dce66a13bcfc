// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Uniform execution harness for scheduled jobs.
//!
//! [`execute_scheduler_job`] always yields a [`JobResult`]; job errors and
//! panics are reported through `success: false`, never propagated.

use std::any::Any;
use std::error::Error;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Trigger metadata supplied by whatever fired the job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobContext {
    pub job_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<DateTime<Utc>>,
    pub execution_time: DateTime<Utc>,
}

impl JobContext {
    /// Context for a job executing now with no scheduled instant.
    pub fn new(job_name: impl Into<String>) -> Self {
        Self {
            job_name: job_name.into(),
            scheduled_time: None,
            execution_time: Utc::now(),
        }
    }

    pub fn scheduled_for(mut self, at: DateTime<Utc>) -> Self {
        self.scheduled_time = Some(at);
        self
    }
}

/// Outcome of one job execution.
///
/// `data` is only present on success and `error` only on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResult<T> {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub duration_ms: u64,
}

impl<T> JobResult<T> {
    fn succeeded(job_name: &str, data: T, duration_ms: u64) -> Self {
        Self {
            success: true,
            message: format!("Job {job_name} completed successfully"),
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
            duration_ms,
        }
    }

    fn failed(job_name: &str, error: String, duration_ms: u64) -> Self {
        Self {
            success: false,
            message: format!("Job {job_name} failed"),
            data: None,
            error: Some(error),
            timestamp: Utc::now(),
            duration_ms,
        }
    }
}

/// Run `job`, time it, log the outcome and fold it into a [`JobResult`].
///
/// Errors are logged with their full source chain. A panic inside the job is
/// caught and reported as a failure.
pub async fn execute_scheduler_job<T, E, F, Fut>(
    job_name: &str,
    job: F,
    context: Option<JobContext>,
) -> JobResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<Box<dyn Error + Send + Sync>>,
{
    let context = context.unwrap_or_else(|| JobContext::new(job_name));
    let started = Instant::now();

    let outcome = AssertUnwindSafe(async move { job().await })
        .catch_unwind()
        .await;
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let scheduled_time = context.scheduled_time.map(|t| t.to_rfc3339());

    match outcome {
        Ok(Ok(data)) => {
            info!(
                job = job_name,
                context_job = %context.job_name,
                scheduled_time = scheduled_time.as_deref(),
                execution_time = %context.execution_time.to_rfc3339(),
                duration_ms,
                "scheduled job completed"
            );
            JobResult::succeeded(job_name, data, duration_ms)
        }
        Ok(Err(e)) => {
            let e: Box<dyn Error + Send + Sync> = e.into();
            let chain = error_chain(e.as_ref());
            error!(
                job = job_name,
                context_job = %context.job_name,
                scheduled_time = scheduled_time.as_deref(),
                execution_time = %context.execution_time.to_rfc3339(),
                duration_ms,
                error = %e,
                chain = %chain,
                "scheduled job failed"
            );
            JobResult::failed(job_name, e.to_string(), duration_ms)
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!(
                job = job_name,
                context_job = %context.job_name,
                scheduled_time = scheduled_time.as_deref(),
                execution_time = %context.execution_time.to_rfc3339(),
                duration_ms,
                panic = %message,
                "scheduled job panicked"
            );
            JobResult::failed(job_name, format!("job panicked: {message}"), duration_ms)
        }
    }
}

/// `outer: cause: root cause`
fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        parts.push(cause.to_string());
        source = cause.source();
    }
    parts.join(": ")
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
