//! Lesson-script: the small circuit-description language behind the
//! QubitQuest code editor.
//!
//! Learner-edited source is compiled into a [`qq_ir::Circuit`] through a
//! closed grammar: register declarations, gate calls from a fixed gate set,
//! and measurements. There are no loops, no imports, and no way to reach
//! the host from source text; everything outside the grammar is a
//! [`CompileError`].
//!
//! ```
//! let circuit = qq_lang::compile(
//!     "def build() {\n\
//!      qubit[2] q;\n\
//!      h q[0];\n\
//!      cnot q[0], q[1];\n\
//!      measure q[0];\n\
//!      measure q[1];\n\
//!      }",
//! )?;
//! assert_eq!(circuit.num_qubits(), 2);
//! # Ok::<(), qq_lang::CompileError>(())
//! ```

pub mod ast;
pub mod emitter;
pub mod error;
pub mod lexer;
pub mod parser;

pub use emitter::{emit_qasm, emit_snippet};
pub use error::{CompileError, CompileResult};
pub use parser::{compile, parse};
