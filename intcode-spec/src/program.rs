//! # Program Text Format
//!
//! Programs are written as one line of comma-separated signed decimal
//! integers, e.g. `1,9,10,3,2,3,11,0,99,30,40,50`.

use crate::error::{IntcodeError, Result};
use crate::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A loadable Intcode program
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    words: Vec<Value>,
}

impl Program {
    /// Create a program from raw words
    pub fn new(words: Vec<Value>) -> Self {
        Self { words }
    }

    /// Program words, address 0 first
    pub fn words(&self) -> &[Value] {
        &self.words
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn into_words(self) -> Vec<Value> {
        self.words
    }
}

impl From<Vec<Value>> for Program {
    fn from(words: Vec<Value>) -> Self {
        Self::new(words)
    }
}

impl FromStr for Program {
    type Err = IntcodeError;

    fn from_str(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(IntcodeError::EmptyProgram);
        }

        let words = text
            .split(',')
            .enumerate()
            .map(|(position, literal)| {
                let literal = literal.trim();
                literal
                    .parse::<Value>()
                    .map_err(|_| IntcodeError::InvalidLiteral {
                        position,
                        literal: literal.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { words })
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{word}")?;
        }
        Ok(())
    }
}
