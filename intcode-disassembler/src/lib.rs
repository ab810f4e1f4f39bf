//! # Intcode Disassembler
//!
//! Render Intcode programs as mnemonic assembly.
//!
//! Code and data share one address space, so disassembly is a linear sweep:
//! a word is shown as an instruction only when it is the canonical encoding
//! of a decodable instruction whose parameters fit in the program. Anything
//! else becomes a `.word` directive. The output is valid assembler input
//! and reassembles to the identical program.
//!
//! ## Example
//!
//! ```rust
//! use intcode_disassembler::disassemble;
//!
//! let asm = disassemble(&[1101, 2, 3, 0, 99]);
//! assert!(asm.contains("add 2, 3, [0]"));
//! assert!(asm.contains("halt"));
//! ```

pub mod formatter;
pub mod disassembler;

pub use disassembler::disassemble;
pub use formatter::{format, format_operand};
