//! Intcode Assembler
//!
//! Assemble mnemonic source into a loadable [`Program`](intcode_spec::Program).
//!
//! ## Syntax
//!
//! ```text
//! ; comments start with ';' or '#'
//! start:  in [rb+1]           ; relative destination
//!         add [value], 5, [value]
//!         jnz [value], start  ; label used as an immediate
//!         halt
//! value:  .word 0
//! ```
//!
//! Operands are `[expr]` (positional), `expr` (immediate) or `[rb]`,
//! `[rb+expr]`, `[rb-N]` (relative). An expression is an integer or a label.
//!
//! ## Example
//!
//! ```rust
//! use intcode_assembler::assemble;
//!
//! let source = r#"
//!     out 42
//!     halt
//! "#;
//!
//! let program = assemble(source).unwrap();
//! assert_eq!(program.words(), &[104, 42, 99]);
//! ```

pub mod error;
pub mod lexer;
pub mod parser;
pub mod encoder;
pub mod assembler;

pub use error::{AssemblerError, Result};
pub use assembler::assemble;
pub use parser::{parse, Body, Expr, Operand, Statement};
pub use encoder::encode_statement;
