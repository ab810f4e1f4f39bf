//! # Intcode Opcode Definitions
//!
//! The two low decimal digits of a raw instruction word select the
//! operation. Nine operations are defined plus halt (99).
//!
//! | Code | Mnemonic | Parameters |
//! |------|----------|------------|
//! | 1    | `add`    | a, b, dest |
//! | 2    | `mul`    | a, b, dest |
//! | 3    | `in`     | dest       |
//! | 4    | `out`    | a          |
//! | 5    | `jnz`    | a, target  |
//! | 6    | `jz`     | a, target  |
//! | 7    | `lt`     | a, b, dest |
//! | 8    | `eq`     | a, b, dest |
//! | 9    | `arb`    | a          |
//! | 99   | `halt`   | none       |

use serde::{Deserialize, Serialize};

/// Instruction opcode (raw word modulo 100)
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// ADD: dest = a + b
    Add = 1,
    /// MUL: dest = a * b
    Multiply = 2,
    /// IN: dest = next input value
    Input = 3,
    /// OUT: emit a
    Output = 4,
    /// JNZ: if a != 0, cursor = target
    JumpIfTrue = 5,
    /// JZ: if a == 0, cursor = target
    JumpIfFalse = 6,
    /// LT: dest = (a < b) ? 1 : 0
    LessThan = 7,
    /// EQ: dest = (a == b) ? 1 : 0
    Equals = 8,
    /// ARB: relative_base += a
    AdjustRelativeBase = 9,
    /// HALT: stop execution
    Halt = 99,
}

impl Opcode {
    /// All opcodes in numeric order
    pub const ALL: [Opcode; 10] = [
        Opcode::Add,
        Opcode::Multiply,
        Opcode::Input,
        Opcode::Output,
        Opcode::JumpIfTrue,
        Opcode::JumpIfFalse,
        Opcode::LessThan,
        Opcode::Equals,
        Opcode::AdjustRelativeBase,
        Opcode::Halt,
    ];

    /// Try to convert from the two-digit opcode field
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Opcode::Add),
            2 => Some(Opcode::Multiply),
            3 => Some(Opcode::Input),
            4 => Some(Opcode::Output),
            5 => Some(Opcode::JumpIfTrue),
            6 => Some(Opcode::JumpIfFalse),
            7 => Some(Opcode::LessThan),
            8 => Some(Opcode::Equals),
            9 => Some(Opcode::AdjustRelativeBase),
            99 => Some(Opcode::Halt),
            _ => None,
        }
    }

    /// Convert to the two-digit opcode field
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Number of parameter words following the opcode word
    #[inline]
    pub const fn param_count(self) -> usize {
        match self {
            Opcode::Add | Opcode::Multiply | Opcode::LessThan | Opcode::Equals => 3,
            Opcode::JumpIfTrue | Opcode::JumpIfFalse => 2,
            Opcode::Input | Opcode::Output | Opcode::AdjustRelativeBase => 1,
            Opcode::Halt => 0,
        }
    }

    /// Index of the parameter that names a write address, if any
    #[inline]
    pub const fn destination(self) -> Option<usize> {
        match self {
            Opcode::Add | Opcode::Multiply | Opcode::LessThan | Opcode::Equals => Some(2),
            Opcode::Input => Some(0),
            _ => None,
        }
    }

    /// Get the mnemonic for this opcode
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Add => "add",
            Opcode::Multiply => "mul",
            Opcode::Input => "in",
            Opcode::Output => "out",
            Opcode::JumpIfTrue => "jnz",
            Opcode::JumpIfFalse => "jz",
            Opcode::LessThan => "lt",
            Opcode::Equals => "eq",
            Opcode::AdjustRelativeBase => "arb",
            Opcode::Halt => "halt",
        }
    }

    /// Look up an opcode by mnemonic (case-insensitive)
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}
