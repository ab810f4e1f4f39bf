//! # Error Types for the Intcode Specification

use crate::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntcodeError {
    // Instruction errors
    #[error("Invalid operation: {0}")]
    InvalidOperation(Value),

    // Program format errors
    #[error("Invalid program literal {literal:?} at position {position}")]
    InvalidLiteral { position: usize, literal: String },

    #[error("Empty program")]
    EmptyProgram,
}

pub type Result<T> = std::result::Result<T, IntcodeError>;
