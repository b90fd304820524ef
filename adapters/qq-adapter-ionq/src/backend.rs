//! IonQ device backend implementation.

use std::sync::Arc;

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use qq_hal::{Backend, Counts, ExecutionResult, HalError, HalResult, JobId, JobStatus};
use qq_ir::Circuit;

use crate::client::{BraketClient, TaskStatus};
use crate::error::{IonqError, IonqResult};

/// ARN of the IonQ device all remote runs are dispatched to.
pub const DEVICE_ARN: &str = "arn:aws:braket:us-west-2::device/qpu/ionq/H1";

/// Qubit count of the device; lesson circuits use 1-2.
const DEVICE_QUBITS: usize = 25;

/// Maximum number of cached jobs before eviction of terminal entries.
const MAX_CACHED_JOBS: usize = 10_000;

/// A cached job entry.
#[derive(Debug)]
struct CachedJob {
    /// Job status.
    status: JobStatus,
    /// Cached result (if completed).
    result: Option<ExecutionResult>,
    /// Number of shots requested at submission time (used to convert
    /// probability-only result formats to approximate counts).
    shots: u32,
}

/// Make room in the job cache before inserting a new entry.
///
/// Terminal entries go first; if the cache is still full (all entries
/// queued and never polled), non-terminal entries are dropped too, so
/// the cache never grows past `MAX_CACHED_JOBS`.
fn evict_for_insert(jobs: &mut FxHashMap<String, CachedJob>) {
    if jobs.len() < MAX_CACHED_JOBS {
        return;
    }
    jobs.retain(|_, job| !job.status.is_terminal());
    while jobs.len() >= MAX_CACHED_JOBS {
        let Some(key) = jobs.keys().next().cloned() else {
            break;
        };
        jobs.remove(&key);
    }
}

/// AWS Braket backend adapter for the IonQ device.
///
/// Translates circuits to OpenQASM 3, submits them as Braket quantum
/// tasks to the fixed IonQ device, and fetches measurement results back
/// from S3 once the task completes.
#[derive(Debug)]
pub struct IonqBackend {
    /// Braket API client.
    client: Arc<BraketClient>,
    /// Job cache: task ARN -> cached job.
    jobs: Arc<Mutex<FxHashMap<String, CachedJob>>>,
}

impl IonqBackend {
    /// Connect to the IonQ device.
    ///
    /// Reads configuration from environment variables:
    /// - `QQ_BRAKET_S3_BUCKET` (required) — S3 bucket for task results
    /// - `QQ_BRAKET_S3_PREFIX` (optional, default: `"qubitquest-results"`)
    /// - `AWS_REGION` (optional, default: `"us-west-2"`)
    ///
    /// AWS credentials are loaded from the default chain (environment,
    /// SSO, config files, IAM role).
    pub async fn connect() -> IonqResult<Self> {
        let s3_bucket =
            std::env::var("QQ_BRAKET_S3_BUCKET").map_err(|_| IonqError::MissingS3Bucket)?;
        let s3_prefix = std::env::var("QQ_BRAKET_S3_PREFIX")
            .unwrap_or_else(|_| "qubitquest-results".to_string());
        let region = std::env::var("AWS_REGION").unwrap_or_else(|_| "us-west-2".to_string());

        let client = BraketClient::new(&region, &s3_bucket, &s3_prefix).await?;

        Ok(Self {
            client: Arc::new(client),
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
        })
    }

    /// Parse a task result into execution counts.
    ///
    /// `submitted_shots` is used as the denominator when the only available
    /// result format is `measurementProbabilities`. Pass 0 to use the
    /// default fallback of 1000.
    fn parse_result(result: &crate::client::TaskResult, submitted_shots: u32) -> Counts {
        let mut counts = Counts::new();

        // Prefer measurementCounts (bitstring -> count)
        if let Some(measurement_counts) = &result.measurement_counts {
            for (bitstring, &count) in measurement_counts {
                counts.insert(bitstring.clone(), count);
            }
            return counts;
        }

        // Fall back to raw measurements (array of arrays)
        if let Some(measurements) = &result.measurements {
            for measurement in measurements {
                let bitstring: String = measurement
                    .iter()
                    .map(|b| if *b == 0 { '0' } else { '1' })
                    .collect();
                counts.insert(bitstring, 1);
            }
            return counts;
        }

        // Fall back to measurementProbabilities
        if let Some(probs) = &result.measurement_probabilities {
            let total_shots = if submitted_shots > 0 {
                f64::from(submitted_shots)
            } else {
                1000.0_f64
            };
            for (bitstring, &prob) in probs {
                let count = (prob * total_shots).max(0.0).round() as u64;
                if count > 0 {
                    counts.insert(bitstring.clone(), count);
                }
            }
        }

        counts
    }
}

#[async_trait]
impl Backend for IonqBackend {
    fn name(&self) -> &str {
        "ionq"
    }

    #[instrument(skip(self, circuit))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        if circuit.num_qubits() > DEVICE_QUBITS {
            return Err(IonqError::TooManyQubits {
                required: circuit.num_qubits(),
                available: DEVICE_QUBITS,
            }
            .into());
        }

        let qasm = qq_lang::emit_qasm(circuit);

        let task_arn = self
            .client
            .create_task(DEVICE_ARN, &qasm, shots)
            .await
            .map_err(|e| HalError::SubmissionFailed(e.to_string()))?;

        debug!("Created quantum task: {}", task_arn);

        {
            let mut jobs = self.jobs.lock().await;
            evict_for_insert(&mut jobs);
            jobs.insert(
                task_arn.clone(),
                CachedJob {
                    status: JobStatus::Queued,
                    result: None,
                    shots,
                },
            );
        }

        Ok(JobId(task_arn))
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let task_status = self
            .client
            .get_task_status(&job_id.0)
            .await
            .map_err(|e| match e {
                IonqError::TaskNotFound(id) => HalError::JobNotFound(id),
                other => HalError::Backend(other.to_string()),
            })?;

        let job_status = match task_status {
            TaskStatus::Created | TaskStatus::Queued => JobStatus::Queued,
            TaskStatus::Running => JobStatus::Running,
            TaskStatus::Completed => JobStatus::Completed,
            TaskStatus::Failed(msg) => JobStatus::Failed(msg),
            TaskStatus::Cancelling | TaskStatus::Cancelled => JobStatus::Cancelled,
        };

        {
            let mut jobs = self.jobs.lock().await;
            if let Some(cached) = jobs.get_mut(&job_id.0) {
                cached.status = job_status.clone();
            }
        }

        Ok(job_status)
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        // Check cache first
        {
            let jobs = self.jobs.lock().await;
            if let Some(cached) = jobs.get(&job_id.0) {
                if let Some(ref result) = cached.result {
                    return Ok(result.clone());
                }
            }
        }

        // Check that the task is completed
        let task_status = self
            .client
            .get_task_status(&job_id.0)
            .await
            .map_err(|e| HalError::Backend(e.to_string()))?;

        match task_status {
            TaskStatus::Failed(msg) => return Err(HalError::JobFailed(msg)),
            TaskStatus::Cancelled | TaskStatus::Cancelling => return Err(HalError::JobCancelled),
            TaskStatus::Completed => {}
            _ => {
                return Err(HalError::Backend(format!(
                    "Task {} not yet completed",
                    job_id.0
                )));
            }
        }

        // Fetch result from S3
        let task_result = self
            .client
            .get_task_result(&job_id.0)
            .await
            .map_err(|e| HalError::Backend(e.to_string()))?;

        let submitted_shots = {
            let jobs = self.jobs.lock().await;
            jobs.get(&job_id.0).map_or(0u32, |j| j.shots)
        };

        let counts = Self::parse_result(&task_result, submitted_shots);
        let total_shots = counts.total_shots() as u32;
        let result = ExecutionResult::new(counts, total_shots);

        // Cache the result
        {
            let mut jobs = self.jobs.lock().await;
            if let Some(cached) = jobs.get_mut(&job_id.0) {
                cached.result = Some(result.clone());
                cached.status = JobStatus::Completed;
            }
        }

        Ok(result)
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        self.client
            .cancel_task(&job_id.0)
            .await
            .map_err(|e| HalError::Backend(e.to_string()))?;

        {
            let mut jobs = self.jobs.lock().await;
            if let Some(cached) = jobs.get_mut(&job_id.0) {
                cached.status = JobStatus::Cancelled;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cached(status: JobStatus) -> CachedJob {
        CachedJob {
            status,
            result: None,
            shots: 100,
        }
    }

    #[test]
    fn test_eviction_prefers_terminal_entries() {
        let mut jobs = FxHashMap::default();
        for i in 0..MAX_CACHED_JOBS {
            let status = if i % 2 == 0 {
                JobStatus::Completed
            } else {
                JobStatus::Queued
            };
            jobs.insert(format!("arn:{i}"), cached(status));
        }

        evict_for_insert(&mut jobs);

        assert!(jobs.len() < MAX_CACHED_JOBS);
        assert!(jobs.values().all(|j| j.status == JobStatus::Queued));
    }

    #[test]
    fn test_eviction_bounds_a_cache_of_queued_jobs() {
        let mut jobs = FxHashMap::default();
        for i in 0..MAX_CACHED_JOBS {
            jobs.insert(format!("arn:{i}"), cached(JobStatus::Queued));
        }

        // None of the entries are terminal, so eviction must still
        // make room for the next insertion.
        evict_for_insert(&mut jobs);
        assert!(jobs.len() < MAX_CACHED_JOBS);

        jobs.insert("arn:new".to_string(), cached(JobStatus::Queued));
        assert!(jobs.len() <= MAX_CACHED_JOBS);
    }

    #[test]
    fn test_parse_result_counts() {
        let result = crate::client::TaskResult {
            measurement_counts: Some({
                let mut m = std::collections::HashMap::new();
                m.insert("00".to_string(), 500);
                m.insert("11".to_string(), 500);
                m
            }),
            measurement_probabilities: None,
            measurements: None,
            measured_qubits: Some(vec![0, 1]),
        };

        let counts = IonqBackend::parse_result(&result, 1000);
        assert_eq!(counts.get("00"), 500);
        assert_eq!(counts.get("11"), 500);
        assert_eq!(counts.total_shots(), 1000);
    }

    #[test]
    fn test_parse_result_measurements() {
        let result = crate::client::TaskResult {
            measurement_counts: None,
            measurement_probabilities: None,
            measurements: Some(vec![vec![0, 0], vec![1, 1], vec![0, 0], vec![1, 1]]),
            measured_qubits: Some(vec![0, 1]),
        };

        let counts = IonqBackend::parse_result(&result, 4);
        assert_eq!(counts.get("00"), 2);
        assert_eq!(counts.get("11"), 2);
        assert_eq!(counts.total_shots(), 4);
    }

    #[test]
    fn test_parse_result_probabilities() {
        let result = crate::client::TaskResult {
            measurement_counts: None,
            measurement_probabilities: Some({
                let mut m = std::collections::HashMap::new();
                m.insert("0".to_string(), 0.5);
                m.insert("1".to_string(), 0.5);
                m
            }),
            measurements: None,
            measured_qubits: Some(vec![0]),
        };

        let counts = IonqBackend::parse_result(&result, 200);
        assert_eq!(counts.get("0"), 100);
        assert_eq!(counts.get("1"), 100);
    }

    #[test]
    fn test_device_arn() {
        assert!(DEVICE_ARN.contains("ionq"));
        assert!(DEVICE_ARN.starts_with("arn:aws:braket:us-west-2"));
    }

    #[tokio::test]
    async fn test_connect_requires_bucket() {
        // Clear the variable for this process; connect must fail before
        // touching the network.
        unsafe { std::env::remove_var("QQ_BRAKET_S3_BUCKET") };
        let err = IonqBackend::connect().await.unwrap_err();
        assert!(matches!(err, IonqError::MissingS3Bucket));
    }
}
