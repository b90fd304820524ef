//! Containment tests: lesson-script source can build circuits and
//! nothing else.

use qq_lang::{CompileError, compile};

#[test]
fn reference_style_source_compiles() {
    let circuit = compile(
        "def build() {\n\
         \x20   qubit[1] q;\n\
         \x20   h q[0];\n\
         \x20   measure q[0];\n\
         \x20   }",
    )
    .unwrap();
    assert_eq!(circuit.num_qubits(), 1);
    assert_eq!(circuit.num_ops(), 2);
}

#[test]
fn indentation_is_insignificant() {
    let flat = compile("def build() { qubit q; h q; measure q; }").unwrap();
    let indented = compile("def build() {\n        qubit q;\n        h q;\n        measure q;\n}")
        .unwrap();
    assert_eq!(flat.instructions(), indented.instructions());
}

#[test]
fn python_style_source_is_rejected() {
    // The editor used to hold Python; make sure it is firmly rejected now.
    let err = compile(
        "def build():\n\
         \x20   circuit = Circuit()\n\
         \x20   circuit.h(0)\n\
         \x20   return circuit",
    )
    .unwrap_err();
    assert!(matches!(err, CompileError::Lexer { .. }));
}

#[test]
fn host_escape_attempts_fail_to_compile() {
    for source in [
        "def build() { import os; }",
        "def build() { open file; }",
        "def build() { qubit q; while q { h q; } }",
        "def build() { qubit q; h q; exec payload; }",
    ] {
        assert!(compile(source).is_err(), "accepted: {source}");
    }
}

#[test]
fn extra_defs_are_allowed_but_only_build_runs() {
    let circuit = compile(
        "def helper() { qubit[2] q; h q[0]; }\n\
         def build() { qubit q; x q; measure q; }",
    )
    .unwrap();
    assert_eq!(circuit.num_qubits(), 1);
    assert_eq!(circuit.instructions()[0].name(), "x");
}

#[test]
fn compile_is_pure() {
    // Same source, same circuit; no hidden state between invocations.
    let source = "def build() { qubit[2] q; cnot q[0], q[1]; measure q[0]; measure q[1]; }";
    let a = compile(source).unwrap();
    let b = compile(source).unwrap();
    assert_eq!(a.instructions(), b.instructions());
    assert_eq!(a.num_clbits(), b.num_clbits());
}
