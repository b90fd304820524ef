//! Simulator backend implementation.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

use qq_hal::{
    Backend, BackendConfig, BackendFactory, Counts, ExecutionResult, HalError, HalResult, Job,
    JobId, JobStatus,
};
use qq_ir::Circuit;

use crate::statevector::Statevector;

/// Job data for the simulator.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Local simulator backend.
///
/// Simulates circuits with a full statevector and samples measurement
/// outcomes per shot. Supports circuits up to ~20 qubits (limited by
/// memory).
pub struct SimulatorBackend {
    /// Backend configuration.
    config: BackendConfig,
    /// Completed and cancelled jobs.
    jobs: Arc<Mutex<FxHashMap<String, SimJob>>>,
    /// Maximum number of qubits supported.
    max_qubits: u32,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self {
            config: BackendConfig::new("simulator"),
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            max_qubits: 20,
        }
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            config: BackendConfig::new("simulator"),
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            max_qubits,
        }
    }

    /// Run the simulation synchronously.
    #[instrument(skip(self, circuit))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> ExecutionResult {
        let start = Instant::now();

        let num_qubits = circuit.num_qubits();
        debug!("Starting simulation: {} qubits, {} shots", num_qubits, shots);

        let mut counts = Counts::new();

        for shot in 0..shots {
            let mut sv = Statevector::new(num_qubits);
            for inst in circuit.instructions() {
                sv.apply(inst);
            }

            let outcome = sv.sample();
            let bitstring = sv.outcome_to_bitstring(outcome);
            counts.insert(bitstring, 1);

            if shot > 0 && shot % 1000 == 0 {
                debug!("Completed {} shots", shot);
            }
        }

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        ExecutionResult::new(counts, shots).with_execution_time(elapsed.as_millis() as u64)
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    #[instrument(skip(self, circuit))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        if circuit.num_qubits() > self.max_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.max_qubits
            )));
        }

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let job = Job::new(job_id.clone(), shots).with_backend("simulator");

        {
            let mut jobs = self
                .jobs
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            jobs.insert(job_id.0.clone(), SimJob { job, result: None });
        }

        debug!("Submitted job: {}", job_id);

        // The local simulator runs inline; the job is already terminal
        // when submit() returns.
        let result = self.run_simulation(circuit, shots);

        {
            let mut jobs = self
                .jobs
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            if let Some(sim_job) = jobs.get_mut(&job_id.0) {
                sim_job.result = Some(result);
                sim_job.job = sim_job.job.clone().with_status(JobStatus::Completed);
            }
        }

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        jobs.get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        jobs.get(&job_id.0)
            .and_then(|j| j.result.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let mut jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(sim_job) = jobs.get_mut(&job_id.0) {
            sim_job.job = sim_job.job.clone().with_status(JobStatus::Cancelled);
            Ok(())
        } else {
            Err(HalError::JobNotFound(job_id.0.clone()))
        }
    }
}

impl BackendFactory for SimulatorBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = config
            .extra
            .get("max_qubits")
            .and_then(serde_json::value::Value::as_u64)
            .map_or(20, |v| v as u32);

        Ok(Self {
            config,
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            max_qubits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qq_ir::QubitId;

    fn bell() -> Circuit {
        let mut circuit = Circuit::with_size("bell", 2, 0);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cnot(QubitId(0), QubitId(1))
            .unwrap()
            .measure_all()
            .unwrap();
        circuit
    }

    #[tokio::test]
    async fn test_simulator_bell_state() {
        let backend = SimulatorBackend::new();

        let job_id = backend.submit(&bell(), 1000).await.unwrap();

        let status = backend.status(&job_id).await.unwrap();
        assert!(status.is_success());

        let result = backend.result(&job_id).await.unwrap();
        assert_eq!(result.shots, 1000);

        // Bell state should produce only 00 and 11
        let counts = &result.counts;
        assert_eq!(counts.get("00") + counts.get("11"), 1000);
        assert_eq!(counts.get("01") + counts.get("10"), 0);
    }

    #[tokio::test]
    async fn test_simulator_hadamard_split() {
        let backend = SimulatorBackend::new();

        let mut circuit = Circuit::with_size("hadamard", 1, 0);
        circuit.h(QubitId(0)).unwrap().measure_all().unwrap();

        let job_id = backend.submit(&circuit, 1000).await.unwrap();
        let result = backend.wait(&job_id).await.unwrap();

        let zeros = result.counts.get("0");
        let ones = result.counts.get("1");
        assert_eq!(zeros + ones, 1000);
        // Both outcomes should appear; a miss is a ~1e-300 event.
        assert!(zeros > 0 && ones > 0);
    }

    #[tokio::test]
    async fn test_simulator_deterministic_x() {
        let backend = SimulatorBackend::new();

        let mut circuit = Circuit::with_size("pauli-x", 1, 0);
        circuit.x(QubitId(0)).unwrap().measure_all().unwrap();

        let job_id = backend.submit(&circuit, 500).await.unwrap();
        let result = backend.result(&job_id).await.unwrap();

        assert_eq!(result.counts.get("1"), 500);
    }

    #[tokio::test]
    async fn test_simulator_too_many_qubits() {
        let backend = SimulatorBackend::with_max_qubits(5);

        let circuit = Circuit::with_size("test", 10, 0);
        let result = backend.submit(&circuit, 100).await;

        assert!(matches!(result, Err(HalError::CircuitTooLarge(_))));
    }

    #[tokio::test]
    async fn test_unknown_job_rejected() {
        let backend = SimulatorBackend::new();
        let missing = JobId::new("nope");

        assert!(matches!(
            backend.status(&missing).await,
            Err(HalError::JobNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_from_config_reads_max_qubits() {
        let config =
            BackendConfig::new("simulator").with_extra("max_qubits", serde_json::json!(8));
        let backend = SimulatorBackend::from_config(config).unwrap();
        assert_eq!(backend.max_qubits, 8);
    }
}
