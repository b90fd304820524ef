//! Abstract syntax tree for lesson-script programs.

/// A parsed program: a sequence of function definitions.
#[derive(Debug, Clone)]
pub struct Program {
    pub defs: Vec<Def>,
}

impl Program {
    /// Look up a definition by name.
    pub fn def(&self, name: &str) -> Option<&Def> {
        self.defs.iter().find(|d| d.name == name)
    }
}

/// A zero-argument function definition: `def name() { ... }`.
#[derive(Debug, Clone)]
pub struct Def {
    pub name: String,
    pub body: Vec<Stmt>,
    /// 1-based source line of the `def` keyword.
    pub line: usize,
}

/// A statement inside a definition body.
#[derive(Debug, Clone)]
pub enum Stmt {
    /// `qubit[n] name;` or `qubit name;`
    QubitDecl { name: String, size: u32, line: usize },
    /// `bit[n] name;` or `bit name;`
    BitDecl { name: String, size: u32, line: usize },
    /// `h q[0];` or `rx(pi/2) q[0];`
    GateCall {
        name: String,
        angle: Option<f64>,
        operands: Vec<Operand>,
        line: usize,
    },
    /// `measure q[0];` or `c[0] = measure q[0];` or `measure q[0] -> c[0];`
    Measure {
        target: Operand,
        into: Option<Operand>,
        line: usize,
    },
}

/// A register reference, optionally indexed: `q` or `q[1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    pub register: String,
    pub index: Option<u32>,
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}[{}]", self.register, i),
            None => write!(f, "{}", self.register),
        }
    }
}
