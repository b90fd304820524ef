//! QubitQuest Local Statevector Simulator
//!
//! Local execution backend for lesson circuits. Uses full statevector
//! simulation, which gives exact amplitudes and is comfortable for the
//! 1-2 qubit lesson circuits, with headroom to ~20 qubits.
//!
//! Each shot replays the circuit from |0...0⟩ and samples one outcome
//! from the final state, so the returned counts carry realistic sampling
//! noise just like a shot-based device.
//!
//! # Example
//!
//! ```ignore
//! use qq_adapter_sim::SimulatorBackend;
//! use qq_hal::Backend;
//! use qq_ir::{Circuit, QubitId};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SimulatorBackend::new();
//!
//!     let mut circuit = Circuit::with_size("bell", 2, 0);
//!     circuit.h(QubitId(0))?.cnot(QubitId(0), QubitId(1))?.measure_all()?;
//!
//!     let job_id = backend.submit(&circuit, 1000).await?;
//!     let result = backend.wait(&job_id).await?;
//!
//!     // Expect ~50% "00" and ~50% "11"
//!     println!("Results: {:?}", result.counts);
//!
//!     Ok(())
//! }
//! ```

mod simulator;
mod statevector;

pub use simulator::SimulatorBackend;
