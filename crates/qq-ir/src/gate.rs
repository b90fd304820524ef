//! Quantum gate types.

use serde::{Deserialize, Serialize};

/// Standard gates with known semantics.
///
/// Rotation gates carry concrete angles in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Pauli-X (bit-flip) gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),

    // Two-qubit gates
    /// Controlled-NOT gate (first operand controls, second is target).
    Cnot,
    /// Controlled-Z gate.
    Cz,
    /// SWAP gate.
    Swap,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::Cnot => "cnot",
            StandardGate::Cz => "cz",
            StandardGate::Swap => "swap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_) => 1,

            StandardGate::Cnot | StandardGate::Cz | StandardGate::Swap => 2,
        }
    }

    /// Get the rotation angle, if this is a rotation gate.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::Rx(theta) | StandardGate::Ry(theta) | StandardGate::Rz(theta) => {
                Some(*theta)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::Cnot.num_qubits(), 2);
        assert_eq!(StandardGate::H.name(), "h");
        assert_eq!(StandardGate::Cnot.name(), "cnot");
    }

    #[test]
    fn test_rotation_angle() {
        assert_eq!(StandardGate::Rx(PI).angle(), Some(PI));
        assert_eq!(StandardGate::H.angle(), None);
    }
}
