//! # Intcode Runtime
//!
//! Execute Intcode programs.
//!
//! The VM keeps a sparse, unbounded memory, a cursor and a relative base,
//! and runs a fetch/decode/execute loop until HALT, the end of the loaded
//! program, or a fault. Input and output go through two replaceable hooks.
//!
//! ## Example
//!
//! ```rust
//! use intcode_runtime::{VM, VMConfig, ScriptedInput, SharedOutput};
//!
//! // Outputs 1 if the input equals 8, 0 otherwise
//! let program = [3, 9, 8, 9, 10, 9, 4, 9, 99, -1, 8];
//! let mut vm = VM::with_program(&program, VMConfig::default());
//! let output = SharedOutput::new();
//! vm.set_input_source(ScriptedInput::new([8]));
//! vm.set_output_sink(output.clone());
//!
//! vm.run().unwrap();
//! assert_eq!(output.values(), vec![1]);
//! ```

pub mod error;
pub mod state;
pub mod memory;
pub mod io;
pub mod execute;
pub mod vm;

pub use state::{VMState, Status, HaltReason};
pub use memory::Memory;
pub use io::{
    parse_input_literal, ConsoleInput, ConsoleOutput, InputSource, MalformedInputLiteral,
    OutputSink, ScriptedInput, SharedOutput,
};
pub use vm::{VM, VMConfig, ExecutionResult};
pub use error::RuntimeError;

use intcode_spec::Value;

/// Simple execution helper
///
/// Runs a program with the given inputs and returns the outputs.
pub fn run(program: &[Value], inputs: Vec<Value>) -> Result<Vec<Value>, RuntimeError> {
    let mut vm = VM::with_program(program, VMConfig::default());
    let output = SharedOutput::new();
    vm.set_input_source(ScriptedInput::from(inputs));
    vm.set_output_sink(output.clone());
    vm.run()?;
    Ok(output.take())
}
