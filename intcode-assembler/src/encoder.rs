//! Statement encoding to raw words
//!
//! An instruction becomes its canonical opcode word followed by one word
//! per operand; `.word` data is emitted as-is.

use crate::error::{AssemblerError, Result};
use crate::parser::{Body, Expr};
use intcode_spec::{encode, Instruction, Mode, Value, MAX_PARAMS};
use std::collections::HashMap;

/// Number of words `body` occupies
pub fn statement_width(body: &Body) -> usize {
    match body {
        Body::Instruction { opcode, .. } => 1 + opcode.param_count(),
        Body::Words(values) => values.len(),
    }
}

/// Encode one statement, resolving labels against `labels`
pub fn encode_statement(body: &Body, labels: &HashMap<String, Value>) -> Result<Vec<Value>> {
    match body {
        Body::Instruction { opcode, operands } => {
            let mut modes = [Mode::Positional; MAX_PARAMS];
            for (slot, operand) in modes.iter_mut().zip(operands) {
                *slot = operand.mode;
            }

            let mut words = Vec::with_capacity(1 + operands.len());
            words.push(encode(&Instruction::with_modes(*opcode, modes)));
            for operand in operands {
                words.push(resolve(&operand.expr, labels)?);
            }
            Ok(words)
        }
        Body::Words(values) => values.iter().map(|expr| resolve(expr, labels)).collect(),
    }
}

fn resolve(expr: &Expr, labels: &HashMap<String, Value>) -> Result<Value> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Label(name) => labels
            .get(name)
            .copied()
            .ok_or_else(|| AssemblerError::UndefinedLabel(name.clone())),
    }
}
