//! # Intcode Specification
//!
//! Core types for the Intcode machine: a flat sequence of signed integers
//! executed with a cursor, a relative base, and three addressing modes.
//!
//! ## Key Features
//! - 64-bit signed words; code and data share one sparse address space
//! - Nine operations plus halt
//! - Per-parameter addressing modes packed into the decimal opcode word
//! - Comma-separated program text format

pub mod opcode;
pub mod instruction;
pub mod encoding;
pub mod error;
pub mod program;

pub use opcode::Opcode;
pub use instruction::{Instruction, Mode};
pub use encoding::{decode, encode, mode_digits};
pub use error::{IntcodeError, Result};
pub use program::Program;

/// Memory cell, operand, and I/O value
pub type Value = i64;

/// Validated (non-negative) memory position
pub type Address = u64;

/// Largest raw word accepted by the decoder.
///
/// This is a fixed bound, not derived from the opcode table: any word whose
/// absolute value exceeds it fails to decode even when `raw % 100` names a
/// valid opcode. Below it, the thousands and hundreds digits may still hold
/// values above 2.
pub const MAX_RAW_OPCODE: Value = 22299;

/// Maximum number of parameters carried by any instruction
pub const MAX_PARAMS: usize = 3;
