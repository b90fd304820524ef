//! QubitQuest Circuit Intermediate Representation
//!
//! Core data structures for representing the small quantum circuits the
//! tutorial builds and runs. The [`Circuit`] API provides a builder pattern
//! for constructing circuits; its `Display` rendering is the textual
//! preview shown alongside run results.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qq_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell", 2, 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cnot(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.num_ops(), 4);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
