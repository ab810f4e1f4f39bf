//! Main assembler logic

use crate::encoder::{encode_statement, statement_width};
use crate::error::{AssemblerError, Result};
use crate::parser::parse;
use intcode_spec::{Program, Value};
use std::collections::HashMap;

/// Assemble source code into a program.
///
/// The first pass assigns every label the address of the statement it
/// precedes; the second encodes statements with those addresses resolved.
pub fn assemble(source: &str) -> Result<Program> {
    let statements = parse(source)?;

    let mut labels: HashMap<String, Value> = HashMap::new();
    let mut address: Value = 0;
    for stmt in &statements {
        for label in &stmt.labels {
            if labels.insert(label.clone(), address).is_some() {
                return Err(AssemblerError::DuplicateLabel(label.clone()));
            }
        }
        if let Some(body) = &stmt.body {
            address += statement_width(body) as Value;
        }
    }

    let mut words = Vec::with_capacity(address as usize);
    for body in statements.iter().filter_map(|stmt| stmt.body.as_ref()) {
        words.extend(encode_statement(body, &labels)?);
    }

    Ok(Program::new(words))
}
