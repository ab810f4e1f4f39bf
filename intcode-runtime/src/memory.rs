//! Memory subsystem
//!
//! Sparse, unbounded word storage. Addresses are signed at the API boundary
//! so that negative resolved addresses can be rejected here; stored keys are
//! always non-negative.

use crate::error::{Result, RuntimeError};
use intcode_spec::{Address, Value};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default)]
pub struct Memory {
    data: HashMap<Address, Value>,
    loaded_len: u64,
    extent: u64,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole address space with `program`, address 0 first
    pub fn load(&mut self, program: &[Value]) {
        self.data = program
            .iter()
            .enumerate()
            .map(|(i, &word)| (i as Address, word))
            .collect();
        self.loaded_len = program.len() as u64;
        self.extent = self.loaded_len;
    }

    /// Number of words placed by the last [`load`](Self::load)
    pub fn loaded_len(&self) -> u64 {
        self.loaded_len
    }

    /// One past the highest address loaded or written since the last
    /// [`load`](Self::load)
    pub fn extent(&self) -> u64 {
        self.extent
    }

    /// Read a word; never-written addresses hold zero
    pub fn read(&self, address: Value) -> Result<Value> {
        let address = validate(address)?;
        Ok(self.get(address))
    }

    /// Write a word, growing the address space as needed
    pub fn write(&mut self, address: Value, value: Value) -> Result<()> {
        let address = validate(address)?;
        self.data.insert(address, value);
        self.extent = self.extent.max(address + 1);
        Ok(())
    }

    /// Read an already validated address
    #[inline]
    pub fn get(&self, address: Address) -> Value {
        self.data.get(&address).copied().unwrap_or(0)
    }

    /// Explicitly stored cells, ordered by address
    pub fn snapshot(&self) -> BTreeMap<Address, Value> {
        self.data.iter().map(|(&a, &v)| (a, v)).collect()
    }

    /// Number of explicitly stored cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[inline]
fn validate(address: Value) -> Result<Address> {
    Address::try_from(address).map_err(|_| RuntimeError::InvalidAddress { address })
}
