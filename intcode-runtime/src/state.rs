//! VM state for the Intcode machine

use intcode_spec::{Address, Value};
use serde::{Deserialize, Serialize};

/// Execution state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VMState {
    /// Address of the next word to fetch
    pub cursor: Address,

    /// Offset applied by relative-mode parameters
    pub relative_base: Value,

    /// Instructions executed in the current run
    pub cycles: u64,

    /// Run status
    pub status: Status,
}

/// Run status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Running,
    Halted(HaltReason),
    Faulted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HaltReason {
    /// HALT instruction (99)
    Halt,
    /// Cursor moved past the highest loaded or written word
    EndOfProgram,
    /// `VMConfig::max_cycles` instructions executed
    CycleLimit,
}

impl VMState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch address for the next word, post-incrementing the cursor
    #[inline]
    pub fn advance(&mut self) -> Address {
        let address = self.cursor;
        self.cursor += 1;
        address
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    /// Halt execution
    pub fn halt(&mut self, reason: HaltReason) {
        self.status = Status::Halted(reason);
    }

    pub fn fault(&mut self) {
        self.status = Status::Faulted;
    }

    #[inline]
    pub fn inc_cycles(&mut self) {
        self.cycles += 1;
    }
}
