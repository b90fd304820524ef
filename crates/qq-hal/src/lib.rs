//! QubitQuest Backend Abstraction Layer
//!
//! A unified interface for circuit execution targets, so the tutorial can
//! dispatch the same compiled circuit to the in-process simulator or to
//! remote trapped-ion hardware behind one contract.
//!
//! # Overview
//!
//! - A common [`Backend`] trait for job submission and management
//! - Job lifecycle types ([`JobId`], [`JobStatus`], [`Job`])
//! - Unified result handling via [`ExecutionResult`] and [`Counts`]
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use qq_hal::Backend;
//! use qq_adapter_sim::SimulatorBackend;
//! use qq_ir::Circuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut circuit = Circuit::with_size("h", 1, 1);
//!     circuit.h(qq_ir::QubitId(0))?;
//!     circuit.measure_all()?;
//!
//!     let backend = SimulatorBackend::new();
//!     let job_id = backend.submit(&circuit, 1000).await?;
//!     let result = backend.wait(&job_id).await?;
//!     println!("{:?}", result.counts);
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{Backend, BackendConfig, BackendFactory};
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
