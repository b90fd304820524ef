//! High-level circuit builder API.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::qubit::{ClbitId, QubitId};

/// A quantum circuit.
///
/// Instructions are kept in application order; this is the object handed
/// to execution backends, and its `Display` rendering is the textual
/// preview shown to the learner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Number of classical bits.
    num_clbits: u32,
    /// Instructions in application order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            num_qubits: 0,
            num_clbits: 0,
            instructions: vec![],
        }
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            instructions: vec![],
        }
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.num_qubits);
        self.num_qubits += 1;
        id
    }

    /// Add a single classical bit to the circuit.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.num_clbits);
        self.num_clbits += 1;
        id
    }

    fn check_qubit(&self, qubit: QubitId, gate_name: &str) -> IrResult<()> {
        if qubit.0 >= self.num_qubits {
            return Err(IrError::QubitNotFound {
                qubit,
                gate_name: gate_name.to_string(),
            });
        }
        Ok(())
    }

    fn apply_single(&mut self, gate: StandardGate, qubit: QubitId) -> IrResult<&mut Self> {
        self.check_qubit(qubit, gate.name())?;
        self.instructions
            .push(Instruction::single_qubit_gate(gate, qubit));
        Ok(self)
    }

    fn apply_two(&mut self, gate: StandardGate, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.check_qubit(q1, gate.name())?;
        self.check_qubit(q2, gate.name())?;
        if q1 == q2 {
            return Err(IrError::DuplicateQubit {
                qubit: q1,
                gate_name: gate.name().to_string(),
            });
        }
        self.instructions
            .push(Instruction::two_qubit_gate(gate, q1, q2));
        Ok(self)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_single(StandardGate::H, qubit)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_single(StandardGate::X, qubit)
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_single(StandardGate::Y, qubit)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_single(StandardGate::Z, qubit)
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_single(StandardGate::S, qubit)
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_single(StandardGate::Sdg, qubit)
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_single(StandardGate::T, qubit)
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_single(StandardGate::Tdg, qubit)
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_single(StandardGate::Rx(theta), qubit)
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_single(StandardGate::Ry(theta), qubit)
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_single(StandardGate::Rz(theta), qubit)
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT gate (control, target).
    pub fn cnot(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply_two(StandardGate::Cnot, control, target)
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply_two(StandardGate::Cz, control, target)
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply_two(StandardGate::Swap, q1, q2)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.check_qubit(qubit, "measure")?;
        if clbit.0 >= self.num_clbits {
            return Err(IrError::ClbitNotFound { clbit });
        }
        self.instructions.push(Instruction::measure(qubit, clbit));
        Ok(self)
    }

    /// Measure all qubits to corresponding classical bits, allocating
    /// classical bits as needed.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        while self.num_clbits < self.num_qubits {
            self.add_clbit();
        }
        for i in 0..self.num_qubits {
            self.instructions
                .push(Instruction::measure(QubitId(i), ClbitId(i)));
        }
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    /// Get the instructions in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Get the number of instructions.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Check whether the circuit contains any measurement.
    pub fn has_measurement(&self) -> bool {
        self.instructions.iter().any(Instruction::is_measure)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "circuit '{}': {} qubit(s), {} clbit(s)",
            self.name, self.num_qubits, self.num_clbits
        )?;
        for inst in &self.instructions {
            writeln!(f, "  {inst}")?;
        }
        Ok(())
    }
}
