//! Source emitters: lesson-script snippets for the editor and OpenQASM 3
//! for remote submission.

use qq_ir::{Circuit, Instruction, InstructionKind, StandardGate};

/// Emit a circuit as lesson-script source for the code editor.
///
/// The output is the canonical editor snippet: a `def build()` wrapper
/// around one register declaration and the instruction list, with no body
/// indentation (the editor applies its own). Measurements are emitted in
/// the bare form, which allocates classical bits in encounter order; that
/// matches any circuit whose measurements appear in ascending clbit order.
pub fn emit_snippet(circuit: &Circuit) -> String {
    let mut out = String::from("def build() {\n");
    out.push_str(&format!("qubit[{}] q;\n", circuit.num_qubits()));
    for inst in circuit.instructions() {
        match &inst.kind {
            InstructionKind::Gate(gate) => {
                out.push_str(&gate_line(gate, inst));
            }
            InstructionKind::Measure => {
                out.push_str(&format!("measure q[{}];\n", inst.qubits[0].0));
            }
        }
    }
    out.push('}');
    out
}

/// Emit a circuit as an OpenQASM 3 program in the dialect Braket devices
/// accept (`si`/`ti` spellings, assignment-form measurement).
pub fn emit_qasm(circuit: &Circuit) -> String {
    let mut out = String::from("OPENQASM 3.0;\n\n");
    out.push_str(&format!("qubit[{}] q;\n", circuit.num_qubits()));
    if circuit.num_clbits() > 0 {
        out.push_str(&format!("bit[{}] c;\n", circuit.num_clbits()));
    }
    out.push('\n');
    for inst in circuit.instructions() {
        match &inst.kind {
            InstructionKind::Gate(gate) => {
                let mut line = gate_line(gate, inst);
                // Braket spells the dagger gates differently.
                match gate {
                    StandardGate::Sdg => line.replace_range(0..3, "si"),
                    StandardGate::Tdg => line.replace_range(0..3, "ti"),
                    _ => {}
                }
                out.push_str(&line);
            }
            InstructionKind::Measure => {
                out.push_str(&format!(
                    "c[{}] = measure q[{}];\n",
                    inst.clbits[0].0, inst.qubits[0].0
                ));
            }
        }
    }
    out
}

/// Render one gate application, e.g. `cnot q[0], q[1];\n`.
fn gate_line(gate: &StandardGate, inst: &Instruction) -> String {
    let mut line = String::from(gate.name());
    if let Some(theta) = gate.angle() {
        line.push_str(&format!("({theta})"));
    }
    for (i, q) in inst.qubits.iter().enumerate() {
        let sep = if i == 0 { " " } else { ", " };
        line.push_str(&format!("{sep}q[{}]", q.0));
    }
    line.push_str(";\n");
    line
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

    #[test]
    fn snippet_shape() {
        let snippet = emit_snippet(&bell());
        assert_eq!(
            snippet,
            "def build() {\n\
             qubit[2] q;\n\
             h q[0];\n\
             cnot q[0], q[1];\n\
             measure q[0];\n\
             measure q[1];\n\
             }"
        );
    }

    #[test]
    fn snippet_compiles_back_to_the_same_circuit() {
        let original = bell();
        let reparsed = crate::compile(&emit_snippet(&original)).unwrap();
        assert_eq!(reparsed.num_qubits(), original.num_qubits());
        assert_eq!(reparsed.num_clbits(), original.num_clbits());
        assert_eq!(reparsed.instructions(), original.instructions());
    }

    #[test]
    fn snippet_with_rotation_angle() {
        let mut circuit = Circuit::with_size("rot", 1, 0);
        circuit.rx(0.5, QubitId(0)).unwrap();
        assert!(emit_snippet(&circuit).contains("rx(0.5) q[0];"));
    }

    #[test]
    fn qasm_program() {
        let qasm = emit_qasm(&bell());
        assert_eq!(
            qasm,
            "OPENQASM 3.0;\n\n\
             qubit[2] q;\n\
             bit[2] c;\n\n\
             h q[0];\n\
             cnot q[0], q[1];\n\
             c[0] = measure q[0];\n\
             c[1] = measure q[1];\n"
        );
    }

    #[test]
    fn qasm_braket_spellings() {
        let mut circuit = Circuit::with_size("dagger", 1, 0);
        circuit.sdg(QubitId(0)).unwrap().tdg(QubitId(0)).unwrap();
        let qasm = emit_qasm(&circuit);
        assert!(qasm.contains("si q[0];"));
        assert!(qasm.contains("ti q[0];"));
    }
}
