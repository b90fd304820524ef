//! Backend trait and configuration.
//!
//! The [`Backend`] trait defines the lifecycle for interacting with an
//! execution target:
//!
//! ```text
//!   submit() ──→ status() ──→ result()
//!    (async)      (async)      (async)
//! ```
//!
//! All I/O methods are async; the `Send + Sync` bound enables shared
//! ownership across tasks. `wait()` is a provided method that polls until
//! the job reaches a terminal state, with a bounded timeout — there is no
//! unbounded blocking wait on any backend, remote ones included.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use qq_ir::Circuit;

use crate::error::{HalError, HalResult};
use crate::job::{JobId, JobStatus};
use crate::result::ExecutionResult;

/// Configuration for a backend instance.
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name of the backend.
    pub name: String,
    /// API endpoint or device identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Additional configuration.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the endpoint or device identifier.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Add extra configuration.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .field("extra", &self.extra)
            .finish()
    }
}

/// Trait for circuit execution backends.
///
/// Covers the full job lifecycle: submission, status polling, result
/// retrieval, and cancellation.
///
/// # Contract
///
/// - `submit()` MUST return a [`JobId`] with initial status `Queued`.
/// - `result()` MUST only be called when status is `Completed`.
/// - `wait()` has a default implementation (500 ms poll, 5-minute timeout);
///   after the timeout it fails with [`HalError::Timeout`].
#[async_trait]
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Submit a circuit for execution.
    ///
    /// Returns a job ID that can be used to check status and retrieve
    /// results.
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId>;

    /// Get the status of a job.
    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus>;

    /// Get the result of a completed job.
    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult>;

    /// Cancel a running job.
    async fn cancel(&self, job_id: &JobId) -> HalResult<()>;

    /// Wait for a job to complete and return its result.
    ///
    /// Default implementation polls every 500 ms for up to 5 minutes.
    async fn wait(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        use tokio::time::sleep;

        let poll_interval = Duration::from_millis(500);
        let max_polls = 600; // 5 minutes max

        for _ in 0..max_polls {
            let status = self.status(job_id).await?;

            match status {
                JobStatus::Completed => return self.result(job_id).await,
                JobStatus::Failed(msg) => return Err(HalError::JobFailed(msg)),
                JobStatus::Cancelled => return Err(HalError::JobCancelled),
                JobStatus::Queued | JobStatus::Running => {
                    sleep(poll_interval).await;
                }
            }
        }

        Err(HalError::Timeout(job_id.0.clone()))
    }
}

/// Trait for creating backends from configuration.
pub trait BackendFactory: Backend + Sized {
    /// Create a backend from configuration.
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_config() {
        let config = BackendConfig::new("test")
            .with_endpoint("arn:aws:braket:us-west-2::device/qpu/ionq/H1")
            .with_extra("max_qubits", serde_json::json!(25));

        assert_eq!(config.name, "test");
        assert!(config.endpoint.as_deref().unwrap().contains("ionq"));
        assert!(config.extra.contains_key("max_qubits"));
    }
}
