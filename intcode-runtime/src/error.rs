//! Runtime error types for the Intcode VM
//!
//! Every variant is a fault: the run stops and the error is returned to the
//! caller.

use intcode_spec::{Address, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("Invalid operation {raw} at address {address}")]
    InvalidOperation { raw: Value, address: Address },

    #[error("Invalid address: {address}")]
    InvalidAddress { address: Value },

    #[error("Input exhausted at address {address}")]
    InputExhausted { address: Address },

    #[error("Arithmetic overflow at address {address}")]
    ArithmeticOverflow { address: Address },
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
