//! Decoded Intcode instructions
//!
//! An instruction is the opcode plus one addressing mode per parameter
//! slot. Parameter words themselves are not part of the instruction; they
//! are fetched from memory while it executes.

use crate::opcode::Opcode;
use crate::MAX_PARAMS;
use serde::{Deserialize, Serialize};

/// Parameter addressing mode
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// The parameter is an address to dereference
    #[default]
    Positional = 0,
    /// The parameter is the value itself
    Immediate = 1,
    /// The parameter is an address offset by the relative base
    Relative = 2,
}

impl Mode {
    /// Map a mode digit to a mode.
    ///
    /// Digits other than 0 and 2 read the parameter word as-is, so they
    /// behave as immediate.
    #[inline]
    pub const fn from_digit(digit: u8) -> Self {
        match digit {
            0 => Mode::Positional,
            2 => Mode::Relative,
            _ => Mode::Immediate,
        }
    }

    /// Canonical digit for this mode
    #[inline]
    pub const fn digit(self) -> u8 {
        self as u8
    }
}

/// Decoded instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    /// Operation
    pub opcode: Opcode,
    /// Addressing mode of each parameter, indexed by parameter position
    pub modes: [Mode; MAX_PARAMS],
}

impl Instruction {
    /// Instruction with every parameter in positional mode
    pub const fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            modes: [Mode::Positional; MAX_PARAMS],
        }
    }

    /// Instruction with explicit modes
    pub const fn with_modes(opcode: Opcode, modes: [Mode; MAX_PARAMS]) -> Self {
        Self { opcode, modes }
    }

    /// Mode of parameter `index` (0-based)
    #[inline]
    pub fn mode(&self, index: usize) -> Mode {
        self.modes[index]
    }

    /// Number of parameter words
    #[inline]
    pub const fn param_count(&self) -> usize {
        self.opcode.param_count()
    }

    /// Total width in words, including the opcode word
    #[inline]
    pub const fn width(&self) -> usize {
        1 + self.opcode.param_count()
    }

    /// Get the mnemonic for this instruction
    pub const fn mnemonic(&self) -> &'static str {
        self.opcode.mnemonic()
    }

    /// Check if the destination parameter is declared immediate.
    ///
    /// The engine does not reject this; the write goes to the raw word as
    /// an address.
    pub fn has_immediate_destination(&self) -> bool {
        self.opcode
            .destination()
            .is_some_and(|dest| self.modes[dest] == Mode::Immediate)
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.opcode)?;
        let count = self.param_count();
        if count > 0 {
            let modes: Vec<String> = self.modes[..count]
                .iter()
                .map(|m| format!("{m:?}").to_lowercase())
                .collect();
            write!(f, " ({})", modes.join(", "))?;
        }
        Ok(())
    }
}
