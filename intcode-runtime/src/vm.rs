//! Virtual Machine for Intcode

use crate::error::{Result, RuntimeError};
use crate::execute::execute;
use crate::io::{ConsoleInput, ConsoleOutput, InputSource, OutputSink};
use crate::memory::Memory;
use crate::state::{HaltReason, Status, VMState};
use intcode_spec::{decode, Address, Instruction, Value};
use std::collections::BTreeMap;

/// VM configuration
#[derive(Debug, Clone, Default)]
pub struct VMConfig {
    /// Emit a `trace` event with the disassembly of every executed
    /// instruction
    pub trace: bool,

    /// Stop with [`HaltReason::CycleLimit`] after this many instructions.
    /// `None` runs until HALT, the end of memory, or a fault.
    pub max_cycles: Option<u64>,
}

/// Execution result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Number of instructions executed, including the final HALT
    pub cycles: u64,

    /// Reason for halting
    pub halt_reason: HaltReason,
}

/// Intcode Virtual Machine
pub struct VM {
    /// Cursor, relative base, status
    state: VMState,

    /// Memory subsystem
    memory: Memory,

    /// Input hook used by the input instruction
    input: Box<dyn InputSource>,

    /// Output hook used by the output instruction
    output: Box<dyn OutputSink>,

    /// Configuration
    config: VMConfig,
}

impl VM {
    /// Create an empty VM wired to the console
    pub fn new(config: VMConfig) -> Self {
        Self {
            state: VMState::new(),
            memory: Memory::new(),
            input: Box::new(ConsoleInput::stdin()),
            output: Box::new(ConsoleOutput::stdout()),
            config,
        }
    }

    /// Create a VM with `program` already loaded
    pub fn with_program(program: &[Value], config: VMConfig) -> Self {
        let mut vm = Self::new(config);
        vm.load_program(program);
        vm
    }

    /// Replace memory with `program`. Must not be called while running;
    /// `run` holds the VM exclusively so it cannot be.
    pub fn load_program(&mut self, program: &[Value]) {
        self.memory.load(program);
        self.state = VMState::new();
    }

    /// Install the input hook, replacing the current one
    pub fn set_input_source(&mut self, source: impl InputSource + 'static) {
        self.input = Box::new(source);
    }

    /// Install the output hook, replacing the current one
    pub fn set_output_sink(&mut self, sink: impl OutputSink + 'static) {
        self.output = Box::new(sink);
    }

    /// Run from address 0 until HALT, the end of memory, the cycle limit,
    /// or a fault.
    ///
    /// Cursor and relative base are reset; memory is not, so a second run
    /// sees whatever the first one wrote.
    pub fn run(&mut self) -> Result<ExecutionResult> {
        self.state = VMState::new();
        tracing::debug!(program_len = self.memory.loaded_len(), "starting run");

        match self.run_loop() {
            Ok(halt_reason) => {
                self.state.halt(halt_reason);
                tracing::debug!(?halt_reason, cycles = self.state.cycles, "halted");
                Ok(ExecutionResult {
                    cycles: self.state.cycles,
                    halt_reason,
                })
            }
            Err(error) => {
                self.state.fault();
                tracing::debug!(%error, cursor = self.state.cursor, "faulted");
                Err(error)
            }
        }
    }

    fn run_loop(&mut self) -> Result<HaltReason> {
        while self.state.is_running() {
            if self
                .config
                .max_cycles
                .is_some_and(|limit| self.state.cycles >= limit)
            {
                return Ok(HaltReason::CycleLimit);
            }

            // Cells written past the loaded program extend the runnable range
            if self.state.cursor >= self.memory.extent() {
                return Ok(HaltReason::EndOfProgram);
            }

            let address = self.state.cursor;
            let instr = self.fetch_and_decode()?;

            if self.config.trace {
                tracing::trace!(
                    cycle = self.state.cycles,
                    address,
                    "{}",
                    self.format_at(&instr, address)
                );
            }

            execute(
                &instr,
                address,
                &mut self.state,
                &mut self.memory,
                self.input.as_mut(),
                self.output.as_mut(),
            )?;

            self.state.inc_cycles();
        }

        // Only the HALT instruction changes status inside the loop
        Ok(HaltReason::Halt)
    }

    /// Fetch and decode the instruction at the cursor
    fn fetch_and_decode(&mut self) -> Result<Instruction> {
        let address = self.state.advance();
        let raw = self.memory.get(address);
        decode(raw).map_err(|_| RuntimeError::InvalidOperation { raw, address })
    }

    /// Disassemble `instr` with its parameter words as they sit in memory
    fn format_at(&self, instr: &Instruction, address: Address) -> String {
        let operands: Vec<Value> = (1..=instr.param_count() as Address)
            .map(|offset| self.memory.get(address + offset))
            .collect();
        intcode_disassembler::format(instr, &operands)
    }

    /// Explicitly stored memory cells, ordered by address
    pub fn dump_memory(&self) -> BTreeMap<Address, Value> {
        self.memory.snapshot()
    }

    /// Address of the next word to fetch.
    ///
    /// After a fault this is the cursor at the moment of failure, i.e. past
    /// every word the faulting instruction had fetched.
    pub fn current_cursor(&self) -> Address {
        self.state.cursor
    }

    pub fn relative_base(&self) -> Value {
        self.state.relative_base
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    /// Get current state (for debugging)
    pub fn state(&self) -> &VMState {
        &self.state
    }

    /// Get memory (for debugging)
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn config(&self) -> &VMConfig {
        &self.config
    }
}

impl Default for VM {
    fn default() -> Self {
        Self::new(VMConfig::default())
    }
}
