// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structural checks on job definitions.

use realorai_config::JobConfig;
use serde::Serialize;

/// Result of [`validate_job_configuration`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Check that a job has a name, a `/`-rooted endpoint and a five-field cron.
///
/// Field values are not range-checked.
pub fn validate_job_configuration(job: &JobConfig) -> JobValidation {
    let mut errors = Vec::new();

    if job.name.trim().is_empty() {
        errors.push("Job name is required".to_string());
    }

    let cron = job.cron.trim();
    if cron.is_empty() {
        errors.push("Cron expression is required".to_string());
    } else {
        let fields = cron.split_whitespace().count();
        if fields != 5 {
            errors.push(format!(
                "Cron expression must have exactly 5 fields, found {fields}"
            ));
        }
    }

    let endpoint = job.endpoint.trim();
    if endpoint.is_empty() {
        errors.push("Endpoint is required".to_string());
    } else if !endpoint.starts_with('/') {
        errors.push(format!("Endpoint `{endpoint}` must start with '/'"));
    }

    JobValidation {
        valid: errors.is_empty(),
        errors,
    }
}
