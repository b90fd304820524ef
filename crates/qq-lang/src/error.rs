//! Compilation errors for lesson-script source.

use thiserror::Error;

/// Errors raised while compiling lesson-script source into a circuit.
///
/// Every variant carries enough context to show the learner what went wrong
/// without exposing internals. Lexer and parser errors report 1-based line
/// numbers.
#[derive(Error, Debug)]
pub enum CompileError {
    /// The source contains characters outside the language.
    #[error("line {line}: unexpected character sequence '{text}'")]
    Lexer { line: usize, text: String },

    /// The token stream does not match the grammar.
    #[error("line {line}: expected {expected}, found {found}")]
    UnexpectedToken {
        line: usize,
        expected: String,
        found: String,
    },

    /// The source ended mid-construct.
    #[error("unexpected end of input: expected {0}")]
    UnexpectedEof(String),

    /// No `def build()` definition was found.
    #[error("no 'def build()' found: the editor must define a zero-argument build function")]
    MissingBuild,

    /// A gate name is not part of the supported set.
    #[error("line {line}: unknown gate '{name}'")]
    UnknownGate { line: usize, name: String },

    /// A rotation gate was called without its angle argument.
    #[error("line {line}: gate '{name}' requires an angle argument")]
    MissingAngle { line: usize, name: String },

    /// A non-rotation gate was called with an angle argument.
    #[error("line {line}: gate '{name}' takes no angle argument")]
    UnexpectedAngle { line: usize, name: String },

    /// A gate was applied to the wrong number of qubits.
    #[error("line {line}: gate '{name}' expects {expected} qubit(s), got {got}")]
    WrongQubitCount {
        line: usize,
        name: String,
        expected: usize,
        got: usize,
    },

    /// An operand names a register that was never declared.
    #[error("line {line}: undefined register '{name}'")]
    UndefinedRegister { line: usize, name: String },

    /// A register name was declared twice.
    #[error("line {line}: register '{name}' is already declared")]
    DuplicateRegister { line: usize, name: String },

    /// An index is outside the declared register size.
    #[error("line {line}: index {index} is out of bounds for register '{register}' of size {size}")]
    IndexOutOfBounds {
        line: usize,
        register: String,
        index: u32,
        size: u32,
    },

    /// A multi-element register was referenced without an index.
    #[error("line {line}: register '{register}' has {size} elements, an index is required")]
    IndexRequired {
        line: usize,
        register: String,
        size: u32,
    },

    /// The build function produced a circuit with no qubits.
    #[error("build() produced an empty circuit: declare at least one qubit")]
    EmptyCircuit,

    /// The lowered instructions violated a circuit invariant.
    #[error(transparent)]
    Circuit(#[from] qq_ir::IrError),
}

/// Convenience alias for compilation results.
pub type CompileResult<T> = Result<T, CompileError>;
