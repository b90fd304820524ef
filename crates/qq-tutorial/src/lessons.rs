//! Lesson registry and reference circuit builders.
//!
//! Four fixed lessons, one per introductory gate. Each lesson carries a
//! reference builder; the snippet shown in the editor is derived from the
//! builder's actual circuit via [`qq_lang::emit_snippet`], so the displayed
//! code and the executed reference can never drift apart.

use qq_ir::{Circuit, IrResult, QubitId};

use crate::error::{TutorialError, TutorialResult};

/// A single tutorial lesson.
#[derive(Debug)]
pub struct LessonEntry {
    /// Unique display name, e.g. "Hadamard Gate (H)".
    pub name: &'static str,
    /// Reference circuit builder.
    pub builder: fn() -> IrResult<Circuit>,
    /// Operator rendering in LaTeX, quantum-mechanical convention.
    pub operator: &'static str,
    /// One-sentence description of what the gate does.
    pub description: &'static str,
}

/// The registry, in teaching order.
static LESSONS: [LessonEntry; 4] = [
    LessonEntry {
        name: "Measurement Gate (M)",
        builder: build_measure,
        operator: r"M = |0\rangle\langle0| + |1\rangle\langle1|",
        description: "Measure qubit 0: collapse its state to 0 or 1 and record the result.",
    },
    LessonEntry {
        name: "Hadamard Gate (H)",
        builder: build_hadamard,
        operator: r"H = \frac1{\sqrt2}\begin{pmatrix}1 & 1\\1 & -1\end{pmatrix}",
        description: "Creates an equal superposition: H|0⟩ = (|0⟩ + |1⟩)/√2",
    },
    LessonEntry {
        name: "Pauli-X Gate (X)",
        builder: build_pauli_x,
        operator: r"X = \begin{pmatrix}0 & 1\\1 & 0\end{pmatrix}",
        description: "Bit-flip: X|0⟩ → |1⟩, X|1⟩ → |0⟩",
    },
    LessonEntry {
        name: "CNOT Gate",
        builder: build_cnot,
        operator: r"\mathrm{CNOT} = |0\rangle\langle0|\otimes I + |1\rangle\langle1|\otimes X",
        description: "Controlled-NOT: flip target qubit 1 if control qubit 0 is |1⟩",
    },
];

/// Lesson names in registry order, for the selection menu.
pub fn names() -> Vec<&'static str> {
    LESSONS.iter().map(|l| l.name).collect()
}

/// All lessons in registry order.
pub fn all() -> &'static [LessonEntry] {
    &LESSONS
}

/// Look up a lesson by name.
pub fn lookup(name: &str) -> TutorialResult<&'static LessonEntry> {
    LESSONS
        .iter()
        .find(|l| l.name == name)
        .ok_or_else(|| TutorialError::LessonNotFound(name.to_string()))
}

/// Derive the editor snippet for a lesson from its builder's circuit.
pub fn snippet(entry: &LessonEntry) -> TutorialResult<String> {
    let circuit = (entry.builder)()?;
    Ok(qq_lang::emit_snippet(&circuit))
}

// =============================================================================
// Reference builders
// =============================================================================

fn build_measure() -> IrResult<Circuit> {
    let mut circuit = Circuit::with_size("measurement", 1, 0);
    circuit.measure_all()?;
    Ok(circuit)
}

fn build_hadamard() -> IrResult<Circuit> {
    let mut circuit = Circuit::with_size("hadamard", 1, 0);
    circuit.h(QubitId(0))?.measure_all()?;
    Ok(circuit)
}

fn build_pauli_x() -> IrResult<Circuit> {
    let mut circuit = Circuit::with_size("pauli-x", 1, 0);
    circuit.x(QubitId(0))?.measure_all()?;
    Ok(circuit)
}

fn build_cnot() -> IrResult<Circuit> {
    let mut circuit = Circuit::with_size("cnot", 2, 0);
    circuit.cnot(QubitId(0), QubitId(1))?.measure_all()?;
    Ok(circuit)
}
