//! Instruction execution for the Intcode VM
//!
//! The opcode word has already been fetched and decoded; parameter words
//! are fetched here, each one post-incrementing the cursor.

use crate::error::{Result, RuntimeError};
use crate::io::{InputSource, OutputSink};
use crate::memory::Memory;
use crate::state::{HaltReason, VMState};
use intcode_spec::{Address, Instruction, Mode, Opcode, Value};

/// Execute single instruction.
///
/// `address` is where the opcode word was fetched from and is only used to
/// report faults.
pub fn execute(
    instr: &Instruction,
    address: Address,
    state: &mut VMState,
    memory: &mut Memory,
    input: &mut dyn InputSource,
    output: &mut dyn OutputSink,
) -> Result<()> {
    match instr.opcode {
        Opcode::Add => {
            let a = read_param(instr, 0, address, state, memory)?;
            let b = read_param(instr, 1, address, state, memory)?;
            let dest = write_target(instr, 2, address, state, memory)?;
            let result = a
                .checked_add(b)
                .ok_or(RuntimeError::ArithmeticOverflow { address })?;
            memory.write(dest, result)?;
        }

        Opcode::Multiply => {
            let a = read_param(instr, 0, address, state, memory)?;
            let b = read_param(instr, 1, address, state, memory)?;
            let dest = write_target(instr, 2, address, state, memory)?;
            let result = a
                .checked_mul(b)
                .ok_or(RuntimeError::ArithmeticOverflow { address })?;
            memory.write(dest, result)?;
        }

        Opcode::Input => {
            let dest = write_target(instr, 0, address, state, memory)?;
            let value = input
                .request_input()
                .ok_or(RuntimeError::InputExhausted { address })?;
            memory.write(dest, value)?;
        }

        Opcode::Output => {
            let a = read_param(instr, 0, address, state, memory)?;
            output.emit_output(a);
        }

        Opcode::JumpIfTrue => {
            let a = read_param(instr, 0, address, state, memory)?;
            let target = read_param(instr, 1, address, state, memory)?;
            if a != 0 {
                jump(state, target)?;
            }
        }

        Opcode::JumpIfFalse => {
            let a = read_param(instr, 0, address, state, memory)?;
            let target = read_param(instr, 1, address, state, memory)?;
            if a == 0 {
                jump(state, target)?;
            }
        }

        Opcode::LessThan => {
            let a = read_param(instr, 0, address, state, memory)?;
            let b = read_param(instr, 1, address, state, memory)?;
            let dest = write_target(instr, 2, address, state, memory)?;
            memory.write(dest, (a < b) as Value)?;
        }

        Opcode::Equals => {
            let a = read_param(instr, 0, address, state, memory)?;
            let b = read_param(instr, 1, address, state, memory)?;
            let dest = write_target(instr, 2, address, state, memory)?;
            memory.write(dest, (a == b) as Value)?;
        }

        Opcode::AdjustRelativeBase => {
            let a = read_param(instr, 0, address, state, memory)?;
            state.relative_base = state
                .relative_base
                .checked_add(a)
                .ok_or(RuntimeError::ArithmeticOverflow { address })?;
        }

        Opcode::Halt => {
            tracing::debug!("HALT at {}", address);
            state.halt(HaltReason::Halt);
        }
    }

    Ok(())
}

/// Fetch the next parameter word
#[inline]
fn next_word(state: &mut VMState, memory: &Memory) -> Value {
    memory.get(state.advance())
}

/// Fetch parameter `index` and realize it according to its mode
fn read_param(
    instr: &Instruction,
    index: usize,
    address: Address,
    state: &mut VMState,
    memory: &Memory,
) -> Result<Value> {
    let raw = next_word(state, memory);
    match instr.mode(index) {
        Mode::Positional => memory.read(raw),
        Mode::Immediate => Ok(raw),
        Mode::Relative => memory.read(offset(raw, address, state)?),
    }
}

/// Fetch parameter `index` as a write address.
///
/// Destinations are never realized. Immediate mode is not rejected and
/// addresses memory exactly like positional mode.
fn write_target(
    instr: &Instruction,
    index: usize,
    address: Address,
    state: &mut VMState,
    memory: &Memory,
) -> Result<Value> {
    let raw = next_word(state, memory);
    match instr.mode(index) {
        Mode::Relative => offset(raw, address, state),
        Mode::Positional | Mode::Immediate => Ok(raw),
    }
}

#[inline]
fn offset(raw: Value, address: Address, state: &VMState) -> Result<Value> {
    raw.checked_add(state.relative_base)
        .ok_or(RuntimeError::ArithmeticOverflow { address })
}

fn jump(state: &mut VMState, target: Value) -> Result<()> {
    state.cursor =
        Address::try_from(target).map_err(|_| RuntimeError::InvalidAddress { address: target })?;
    Ok(())
}
