//! Recursive-descent parser and circuit lowering for lesson-script.
//!
//! Parsing happens in two stages: the token stream is first parsed into a
//! small AST ([`Program`]), then the `build` definition is lowered into a
//! [`Circuit`] with full register and arity checking. Anything outside the
//! grammar is rejected; there is no way for learner source to reach the host
//! environment.

use std::collections::HashMap;

use qq_ir::{Circuit, ClbitId, QubitId, StandardGate};

use crate::ast::{Def, Operand, Program, Stmt};
use crate::error::{CompileError, CompileResult};
use crate::lexer::{self, SpannedToken, Token};

/// Parse lesson-script source into a [`Program`].
pub fn parse(source: &str) -> CompileResult<Program> {
    let tokens = lexer::tokenize(source).map_err(|(offset, text)| CompileError::Lexer {
        line: lexer::line_of(source, offset),
        text,
    })?;
    Parser::new(source, tokens).parse_program()
}

/// Compile lesson-script source into a circuit.
///
/// The source must contain a `def build()` definition; its body is lowered
/// into a [`Circuit`] named after the definition. Fails if the resulting
/// circuit has no qubits.
pub fn compile(source: &str) -> CompileResult<Circuit> {
    let program = parse(source)?;
    let def = program.def("build").ok_or(CompileError::MissingBuild)?;
    lower(def)
}

struct Parser<'src> {
    source: &'src str,
    tokens: Vec<SpannedToken>,
    pos: usize,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str, tokens: Vec<SpannedToken>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    /// 1-based line of the current token (or the last token at EOF).
    fn current_line(&self) -> usize {
        let offset = self
            .tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| t.span.start)
            .unwrap_or(0);
        lexer::line_of(self.source, offset)
    }

    fn unexpected(&self, expected: &str) -> CompileError {
        match self.tokens.get(self.pos) {
            Some(t) => CompileError::UnexpectedToken {
                line: lexer::line_of(self.source, t.span.start),
                expected: expected.to_string(),
                found: self.source[t.span.clone()].to_string(),
            },
            None => CompileError::UnexpectedEof(expected.to_string()),
        }
    }

    fn expect(&mut self, token: Token, expected: &str) -> CompileResult<()> {
        if self.peek() == Some(&token) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_identifier(&mut self, expected: &str) -> CompileResult<String> {
        match self.peek() {
            Some(Token::Identifier(name)) => {
                let name = name.clone();
                self.pos += 1;
                Ok(name)
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    fn parse_program(&mut self) -> CompileResult<Program> {
        let mut defs = Vec::new();
        while self.peek().is_some() {
            defs.push(self.parse_def()?);
        }
        Ok(Program { defs })
    }

    fn parse_def(&mut self) -> CompileResult<Def> {
        let line = self.current_line();
        self.expect(Token::Def, "'def'")?;
        let name = self.expect_identifier("function name")?;
        self.expect(Token::LParen, "'('")?;
        self.expect(Token::RParen, "')'")?;
        self.expect(Token::LBrace, "'{'")?;

        let mut body = Vec::new();
        while self.peek() != Some(&Token::RBrace) {
            if self.peek().is_none() {
                return Err(CompileError::UnexpectedEof("'}'".to_string()));
            }
            body.push(self.parse_stmt()?);
        }
        self.expect(Token::RBrace, "'}'")?;

        Ok(Def { name, body, line })
    }

    fn parse_stmt(&mut self) -> CompileResult<Stmt> {
        let line = self.current_line();
        match self.peek() {
            Some(Token::Qubit) => {
                self.pos += 1;
                let (name, size) = self.parse_decl_tail()?;
                Ok(Stmt::QubitDecl { name, size, line })
            }
            Some(Token::Bit) => {
                self.pos += 1;
                let (name, size) = self.parse_decl_tail()?;
                Ok(Stmt::BitDecl { name, size, line })
            }
            Some(Token::Measure) => {
                // `measure q[0];` or `measure q[0] -> c[0];`
                self.pos += 1;
                let target = self.parse_operand()?;
                let into = if self.peek() == Some(&Token::Arrow) {
                    self.pos += 1;
                    Some(self.parse_operand()?)
                } else {
                    None
                };
                self.expect(Token::Semicolon, "';'")?;
                Ok(Stmt::Measure { target, into, line })
            }
            Some(Token::Identifier(_)) => self.parse_call_or_assign(line),
            _ => Err(self.unexpected("a statement")),
        }
    }

    /// `[n] name ;` or `name ;` following a `qubit`/`bit` keyword.
    fn parse_decl_tail(&mut self) -> CompileResult<(String, u32)> {
        let size = if self.peek() == Some(&Token::LBracket) {
            self.pos += 1;
            let size = self.parse_index()?;
            self.expect(Token::RBracket, "']'")?;
            size
        } else {
            1
        };
        let name = self.expect_identifier("register name")?;
        self.expect(Token::Semicolon, "';'")?;
        Ok((name, size))
    }

    /// A gate call, or the `c[0] = measure q[0];` assignment form.
    fn parse_call_or_assign(&mut self, line: usize) -> CompileResult<Stmt> {
        let start = self.pos;
        let name = self.expect_identifier("gate name")?;

        // Assignment form: rewind and re-parse the left side as an operand.
        let is_assign = matches!(self.peek(), Some(Token::LBracket | Token::Equals))
            && self.lookahead_is_assignment(start);
        if is_assign {
            self.pos = start;
            let into = self.parse_operand()?;
            self.expect(Token::Equals, "'='")?;
            self.expect(Token::Measure, "'measure'")?;
            let target = self.parse_operand()?;
            self.expect(Token::Semicolon, "';'")?;
            return Ok(Stmt::Measure {
                target,
                into: Some(into),
                line,
            });
        }

        let angle = if self.peek() == Some(&Token::LParen) {
            self.pos += 1;
            let angle = self.parse_angle()?;
            self.expect(Token::RParen, "')'")?;
            Some(angle)
        } else {
            None
        };

        let mut operands = vec![self.parse_operand()?];
        while self.peek() == Some(&Token::Comma) {
            self.pos += 1;
            operands.push(self.parse_operand()?);
        }
        self.expect(Token::Semicolon, "';'")?;

        Ok(Stmt::GateCall {
            name,
            angle,
            operands,
            line,
        })
    }

    /// Check whether the tokens from `start` form `operand '='`.
    fn lookahead_is_assignment(&self, start: usize) -> bool {
        let mut pos = start + 1;
        if matches!(self.tokens.get(pos).map(|t| &t.token), Some(Token::LBracket)) {
            // identifier '[' int ']'
            pos += 3;
        }
        matches!(self.tokens.get(pos).map(|t| &t.token), Some(Token::Equals))
    }

    fn parse_operand(&mut self) -> CompileResult<Operand> {
        let register = self.expect_identifier("register reference")?;
        let index = if self.peek() == Some(&Token::LBracket) {
            self.pos += 1;
            let index = self.parse_index()?;
            self.expect(Token::RBracket, "']'")?;
            Some(index)
        } else {
            None
        };
        Ok(Operand { register, index })
    }

    fn parse_index(&mut self) -> CompileResult<u32> {
        match self.peek() {
            Some(&Token::IntLiteral(n)) if n <= u32::MAX as u64 => {
                self.pos += 1;
                Ok(n as u32)
            }
            _ => Err(self.unexpected("an integer")),
        }
    }

    /// `angle := ['-'] (FLOAT | INT | 'pi') ['/' (FLOAT | INT)]`
    fn parse_angle(&mut self) -> CompileResult<f64> {
        let negative = if self.peek() == Some(&Token::Minus) {
            self.pos += 1;
            true
        } else {
            false
        };
        let mut value = match self.peek() {
            Some(&Token::FloatLiteral(v)) => {
                self.pos += 1;
                v
            }
            Some(&Token::IntLiteral(n)) => {
                self.pos += 1;
                n as f64
            }
            Some(Token::Pi) => {
                self.pos += 1;
                std::f64::consts::PI
            }
            _ => return Err(self.unexpected("an angle")),
        };
        if self.peek() == Some(&Token::Slash) {
            self.pos += 1;
            let divisor = match self.peek() {
                Some(&Token::FloatLiteral(v)) => {
                    self.pos += 1;
                    v
                }
                Some(&Token::IntLiteral(n)) => {
                    self.pos += 1;
                    n as f64
                }
                _ => return Err(self.unexpected("a divisor")),
            };
            value /= divisor;
        }
        Ok(if negative { -value } else { value })
    }
}

/// A declared register: starting id in the flat circuit space, plus size.
#[derive(Debug, Clone, Copy)]
struct Register {
    base: u32,
    size: u32,
}

/// Lower a parsed definition into a circuit.
pub fn lower(def: &Def) -> CompileResult<Circuit> {
    let mut circuit = Circuit::new(def.name.clone());
    let mut qregs: HashMap<String, Register> = HashMap::new();
    let mut cregs: HashMap<String, Register> = HashMap::new();

    for stmt in &def.body {
        match stmt {
            Stmt::QubitDecl { name, size, line } => {
                check_fresh(&qregs, &cregs, name, *line)?;
                let base = circuit.num_qubits() as u32;
                for _ in 0..*size {
                    circuit.add_qubit();
                }
                qregs.insert(name.clone(), Register { base, size: *size });
            }
            Stmt::BitDecl { name, size, line } => {
                check_fresh(&qregs, &cregs, name, *line)?;
                let base = circuit.num_clbits() as u32;
                for _ in 0..*size {
                    circuit.add_clbit();
                }
                cregs.insert(name.clone(), Register { base, size: *size });
            }
            Stmt::GateCall {
                name,
                angle,
                operands,
                line,
            } => {
                let gate = resolve_gate(name, *angle, *line)?;
                let expected = gate.num_qubits() as usize;
                if operands.len() != expected {
                    return Err(CompileError::WrongQubitCount {
                        line: *line,
                        name: name.clone(),
                        expected,
                        got: operands.len(),
                    });
                }
                let qubits: Vec<QubitId> = operands
                    .iter()
                    .map(|op| resolve(&qregs, op, *line).map(QubitId))
                    .collect::<CompileResult<_>>()?;
                apply_gate(&mut circuit, gate, &qubits)?;
            }
            Stmt::Measure { target, into, line } => {
                let qubit = QubitId(resolve(&qregs, target, *line)?);
                let clbit = match into {
                    Some(op) => ClbitId(resolve(&cregs, op, *line)?),
                    // Bare measure allocates the next classical bit.
                    None => circuit.add_clbit(),
                };
                circuit.measure(qubit, clbit)?;
            }
        }
    }

    if circuit.num_qubits() == 0 {
        return Err(CompileError::EmptyCircuit);
    }
    Ok(circuit)
}

fn check_fresh(
    qregs: &HashMap<String, Register>,
    cregs: &HashMap<String, Register>,
    name: &str,
    line: usize,
) -> CompileResult<()> {
    if qregs.contains_key(name) || cregs.contains_key(name) {
        return Err(CompileError::DuplicateRegister {
            line,
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Resolve an operand to a flat id within the given register space.
fn resolve(regs: &HashMap<String, Register>, op: &Operand, line: usize) -> CompileResult<u32> {
    let reg = regs
        .get(&op.register)
        .ok_or_else(|| CompileError::UndefinedRegister {
            line,
            name: op.register.clone(),
        })?;
    match op.index {
        Some(index) => {
            if index >= reg.size {
                return Err(CompileError::IndexOutOfBounds {
                    line,
                    register: op.register.clone(),
                    index,
                    size: reg.size,
                });
            }
            Ok(reg.base + index)
        }
        None if reg.size == 1 => Ok(reg.base),
        None => Err(CompileError::IndexRequired {
            line,
            register: op.register.clone(),
            size: reg.size,
        }),
    }
}

fn resolve_gate(name: &str, angle: Option<f64>, line: usize) -> CompileResult<StandardGate> {
    let gate = match name {
        "h" => StandardGate::H,
        "x" => StandardGate::X,
        "y" => StandardGate::Y,
        "z" => StandardGate::Z,
        "s" => StandardGate::S,
        "sdg" => StandardGate::Sdg,
        "t" => StandardGate::T,
        "tdg" => StandardGate::Tdg,
        "rx" | "ry" | "rz" => {
            let theta = angle.ok_or_else(|| CompileError::MissingAngle {
                line,
                name: name.to_string(),
            })?;
            return Ok(match name {
                "rx" => StandardGate::Rx(theta),
                "ry" => StandardGate::Ry(theta),
                _ => StandardGate::Rz(theta),
            });
        }
        "cnot" | "cx" => StandardGate::Cnot,
        "cz" => StandardGate::Cz,
        "swap" => StandardGate::Swap,
        _ => {
            return Err(CompileError::UnknownGate {
                line,
                name: name.to_string(),
            });
        }
    };
    if angle.is_some() {
        return Err(CompileError::UnexpectedAngle {
            line,
            name: name.to_string(),
        });
    }
    Ok(gate)
}

fn apply_gate(circuit: &mut Circuit, gate: StandardGate, qubits: &[QubitId]) -> CompileResult<()> {
    match gate {
        StandardGate::H => circuit.h(qubits[0])?,
        StandardGate::X => circuit.x(qubits[0])?,
        StandardGate::Y => circuit.y(qubits[0])?,
        StandardGate::Z => circuit.z(qubits[0])?,
        StandardGate::S => circuit.s(qubits[0])?,
        StandardGate::Sdg => circuit.sdg(qubits[0])?,
        StandardGate::T => circuit.t(qubits[0])?,
        StandardGate::Tdg => circuit.tdg(qubits[0])?,
        StandardGate::Rx(theta) => circuit.rx(theta, qubits[0])?,
        StandardGate::Ry(theta) => circuit.ry(theta, qubits[0])?,
        StandardGate::Rz(theta) => circuit.rz(theta, qubits[0])?,
        StandardGate::Cnot => circuit.cnot(qubits[0], qubits[1])?,
        StandardGate::Cz => circuit.cz(qubits[0], qubits[1])?,
        StandardGate::Swap => circuit.swap(qubits[0], qubits[1])?,
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bell_program() {
        let program = parse(
            "def build() {\n\
             qubit[2] q;\n\
             h q[0];\n\
             cnot q[0], q[1];\n\
             measure q[0];\n\
             measure q[1];\n\
             }",
        )
        .unwrap();
        assert_eq!(program.defs.len(), 1);
        assert_eq!(program.defs[0].name, "build");
        assert_eq!(program.defs[0].body.len(), 5);
    }

    #[test]
    fn lower_bell_program() {
        let circuit = compile(
            "def build() {\n\
             qubit[2] q;\n\
             h q[0];\n\
             cnot q[0], q[1];\n\
             measure q[0];\n\
             measure q[1];\n\
             }",
        )
        .unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.num_ops(), 4);
        assert!(circuit.has_measurement());
    }

    #[test]
    fn cx_is_an_alias_for_cnot() {
        let circuit = compile("def build() { qubit[2] q; cx q[0], q[1]; }").unwrap();
        assert_eq!(circuit.instructions()[0].name(), "cnot");
    }

    #[test]
    fn assignment_measure_form() {
        let circuit =
            compile("def build() { qubit[1] q; bit[1] c; h q[0]; c[0] = measure q[0]; }").unwrap();
        assert_eq!(circuit.num_clbits(), 1);
        assert!(circuit.has_measurement());
    }

    #[test]
    fn unindexed_single_register() {
        let circuit = compile("def build() { qubit q; x q; measure q; }").unwrap();
        assert_eq!(circuit.num_qubits(), 1);
        assert_eq!(circuit.num_ops(), 2);
    }

    #[test]
    fn rotation_angle_expressions() {
        let circuit = compile("def build() { qubit q; rx(pi/2) q; rz(-0.5) q; }").unwrap();
        match circuit.instructions()[0].as_gate() {
            Some(StandardGate::Rx(theta)) => {
                assert!((theta - std::f64::consts::FRAC_PI_2).abs() < 1e-12)
            }
            other => panic!("unexpected instruction: {other:?}"),
        }
        match circuit.instructions()[1].as_gate() {
            Some(StandardGate::Rz(theta)) => assert!((theta + 0.5).abs() < 1e-12),
            other => panic!("unexpected instruction: {other:?}"),
        }
    }

    #[test]
    fn missing_build_is_rejected() {
        let err = compile("def setup() { qubit q; h q; }").unwrap_err();
        assert!(matches!(err, CompileError::MissingBuild));
    }

    #[test]
    fn empty_build_is_rejected() {
        let err = compile("def build() { }").unwrap_err();
        assert!(matches!(err, CompileError::EmptyCircuit));
    }

    #[test]
    fn unknown_gate_is_rejected() {
        let err = compile("def build() { qubit q; warp q; }").unwrap_err();
        assert!(matches!(err, CompileError::UnknownGate { .. }));
    }

    #[test]
    fn undefined_register_is_rejected() {
        let err = compile("def build() { qubit q; h r[0]; }").unwrap_err();
        assert!(matches!(
            err,
            CompileError::UndefinedRegister { ref name, .. } if name == "r"
        ));
    }

    #[test]
    fn index_out_of_bounds_is_rejected() {
        let err = compile("def build() { qubit[2] q; h q[5]; }").unwrap_err();
        assert!(matches!(
            err,
            CompileError::IndexOutOfBounds { index: 5, size: 2, .. }
        ));
    }

    #[test]
    fn wrong_qubit_count_is_rejected() {
        let err = compile("def build() { qubit[2] q; cnot q[0]; }").unwrap_err();
        assert!(matches!(
            err,
            CompileError::WrongQubitCount { expected: 2, got: 1, .. }
        ));
    }

    #[test]
    fn duplicate_register_is_rejected() {
        let err = compile("def build() { qubit q; bit q; }").unwrap_err();
        assert!(matches!(err, CompileError::DuplicateRegister { .. }));
    }

    #[test]
    fn angle_on_fixed_gate_is_rejected() {
        let err = compile("def build() { qubit q; h(0.5) q; }").unwrap_err();
        assert!(matches!(err, CompileError::UnexpectedAngle { .. }));
    }

    #[test]
    fn python_source_is_rejected_at_the_lexer() {
        let err = compile("def build():\n    return Circuit(1)").unwrap_err();
        assert!(matches!(err, CompileError::Lexer { line: 1, .. }));
    }

    #[test]
    fn arbitrary_statements_are_rejected() {
        // No loops, no imports, no host escape hatches.
        let err = compile("def build() { import os; }").unwrap_err();
        assert!(matches!(err, CompileError::UnknownGate { .. } | CompileError::UnexpectedToken { .. }));
    }

    #[test]
    fn error_reports_source_line() {
        let err = compile("def build() {\nqubit q;\nboop q;\n}").unwrap_err();
        match err {
            CompileError::UnknownGate { line, name } => {
                assert_eq!(line, 3);
                assert_eq!(name, "boop");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
