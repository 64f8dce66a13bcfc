// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in retention job: drop keys whose ttl has passed.

use std::sync::Arc;

use realorai_core::KeyValueStore;

use crate::job::{JobContext, JobResult, execute_scheduler_job};

pub const SWEEP_EXPIRED_JOB: &str = "sweep_expired";

/// Purge expired keys from `store`. `data` is the number removed.
pub async fn sweep_expired(
    store: Arc<dyn KeyValueStore>,
    context: Option<JobContext>,
) -> JobResult<u64> {
    execute_scheduler_job(
        SWEEP_EXPIRED_JOB,
        move || async move { store.purge_expired().await },
        context,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use realorai_storage::MemoryKvStore;

    #[tokio::test]
    async fn sweeps_only_expired_keys() {
        let kv = Arc::new(MemoryKvStore::new());
        kv.set("stale", "1").await.unwrap();
        kv.set("fresh", "2").await.unwrap();
        kv.expire("stale", 0).await.unwrap();
        kv.expire("fresh", 3600).await.unwrap();

        let result = sweep_expired(kv.clone(), None).await;
        assert!(result.success);
        assert_eq!(result.data, Some(1));
        assert!(kv.exists("fresh").await.unwrap());
    }
}
