//! Backend dispatch for circuit runs.

use std::fmt;

use tracing::debug;

use qq_adapter_ionq::IonqBackend;
use qq_adapter_sim::SimulatorBackend;
use qq_hal::{Backend, Counts, HalError};
use qq_ir::Circuit;

use crate::error::{TutorialError, TutorialResult};

/// Minimum accepted shot count.
pub const MIN_SHOTS: u32 = 100;
/// Maximum accepted shot count.
pub const MAX_SHOTS: u32 = 5000;
/// Default shot count offered by the interactive loop.
pub const DEFAULT_SHOTS: u32 = 1000;

/// Which backend to run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendChoice {
    /// In-process statevector simulator.
    Simulator,
    /// IonQ trapped-ion device via AWS Braket.
    IonqDevice,
}

impl BackendChoice {
    /// Human-readable label used when presenting results.
    pub fn label(&self) -> &'static str {
        match self {
            BackendChoice::Simulator => "Simulator",
            BackendChoice::IonqDevice => "IonQ QPU",
        }
    }
}

/// A single run of a compiled circuit.
pub struct RunRequest {
    /// The circuit to execute.
    pub circuit: Circuit,
    /// Backend selection.
    pub backend: BackendChoice,
    /// Number of shots, must lie in `[MIN_SHOTS, MAX_SHOTS]`.
    pub shots: u32,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Measurement counts keyed by bitstring.
    pub counts: Counts,
    /// Shots actually executed.
    pub shots: u32,
    /// Label of the backend that produced the counts.
    pub backend_label: &'static str,
    /// Textual circuit preview, rendered before submission.
    pub preview: String,
    /// Wall-clock execution time, when the backend reports one.
    pub execution_time_ms: Option<u64>,
}

/// A failed run.
///
/// Carries the circuit preview so callers can show the learner what was
/// about to execute even when the run itself fails. `None` only when
/// compilation never produced a circuit.
#[derive(Debug)]
pub struct RunFailure {
    /// Textual circuit preview, rendered before dispatch.
    pub preview: Option<String>,
    /// What went wrong.
    pub error: TutorialError,
}

impl fmt::Display for RunFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl std::error::Error for RunFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl From<qq_lang::CompileError> for RunFailure {
    fn from(error: qq_lang::CompileError) -> Self {
        RunFailure {
            preview: None,
            error: error.into(),
        }
    }
}

/// Validate the request, dispatch to the chosen backend, and wait for
/// the measurement counts.
///
/// Shots are checked before any backend is constructed, so an invalid
/// shot count never opens an AWS connection. The preview is rendered up
/// front and carried in the result, or in [`RunFailure`] when the run
/// does not complete.
pub async fn run(request: RunRequest) -> Result<RunResult, RunFailure> {
    let preview = request.circuit.to_string();
    match dispatch(request, preview.clone()).await {
        Ok(result) => Ok(result),
        Err(error) => Err(RunFailure {
            preview: Some(preview),
            error,
        }),
    }
}

async fn dispatch(request: RunRequest, preview: String) -> TutorialResult<RunResult> {
    if request.shots < MIN_SHOTS || request.shots > MAX_SHOTS {
        return Err(TutorialError::InvalidShots {
            got: request.shots,
            min: MIN_SHOTS,
            max: MAX_SHOTS,
        });
    }

    debug!(backend = request.backend.label(), shots = request.shots, "dispatching run");

    let backend: Box<dyn Backend> = match request.backend {
        BackendChoice::Simulator => Box::new(SimulatorBackend::new()),
        BackendChoice::IonqDevice => {
            let backend = IonqBackend::connect().await.map_err(HalError::from)?;
            Box::new(backend)
        }
    };

    let job_id = backend.submit(&request.circuit, request.shots).await?;
    let result = backend.wait(&job_id).await?;

    Ok(RunResult {
        counts: result.counts,
        shots: result.shots,
        backend_label: request.backend.label(),
        preview,
        execution_time_ms: result.execution_time_ms,
    })
}
