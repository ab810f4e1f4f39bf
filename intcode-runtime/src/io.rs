//! I/O boundary
//!
//! The VM holds exactly one [`InputSource`] and one [`OutputSink`]. The
//! defaults talk to the console; tests and embedders swap in scripted
//! sources, collecting sinks, or plain closures.

use intcode_spec::Value;
use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

/// Prompt written by [`ConsoleInput`] before each read
pub const DEFAULT_PROMPT: &str = "? ";

/// Produces values for the input instruction
pub trait InputSource: Send {
    /// Next input value, or `None` once the source is exhausted
    fn request_input(&mut self) -> Option<Value>;
}

/// Consumes values from the output instruction
pub trait OutputSink: Send {
    fn emit_output(&mut self, value: Value);
}

impl<F> InputSource for F
where
    F: FnMut() -> Option<Value> + Send,
{
    fn request_input(&mut self) -> Option<Value> {
        self()
    }
}

impl<F> OutputSink for F
where
    F: FnMut(Value) + Send,
{
    fn emit_output(&mut self, value: Value) {
        self(value)
    }
}

/// Text that does not round-trip to an integer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed input literal: {literal:?}")]
pub struct MalformedInputLiteral {
    pub literal: String,
}

/// Parse an input line.
///
/// Surrounding whitespace is ignored; the rest must be exactly the decimal
/// rendering of an `i64`, so `+5`, `007` and `-0` are rejected.
pub fn parse_input_literal(text: &str) -> Result<Value, MalformedInputLiteral> {
    let text = text.trim();
    text.parse::<Value>()
        .ok()
        .filter(|value| value.to_string() == text)
        .ok_or_else(|| MalformedInputLiteral {
            literal: text.to_string(),
        })
}

/// FIFO of predetermined inputs
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: VecDeque<Value>,
}

impl ScriptedInput {
    pub fn new(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            queue: values.into_iter().collect(),
        }
    }

    pub fn push(&mut self, value: Value) {
        self.queue.push_back(value);
    }

    /// Values not yet consumed
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl From<Vec<Value>> for ScriptedInput {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

impl InputSource for ScriptedInput {
    fn request_input(&mut self) -> Option<Value> {
        self.queue.pop_front()
    }
}

/// Interactive line-based input
#[derive(Debug)]
pub struct ConsoleInput<R, W> {
    reader: R,
    writer: W,
    prompt: String,
}

impl ConsoleInput<BufReader<Stdin>, Stdout> {
    /// Prompt on stdout, read from stdin
    pub fn stdin() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }

    fn write_prompt(&mut self) -> io::Result<()> {
        self.writer.write_all(self.prompt.as_bytes())?;
        self.writer.flush()
    }
}

impl<R, W> InputSource for ConsoleInput<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn request_input(&mut self) -> Option<Value> {
        loop {
            if let Err(error) = self.write_prompt() {
                tracing::warn!(%error, "failed to write input prompt");
            }

            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => {
                    tracing::debug!("input stream closed");
                    return None;
                }
                Ok(_) => match parse_input_literal(&line) {
                    Ok(value) => return Some(value),
                    Err(error) => tracing::debug!(%error, "re-prompting"),
                },
                Err(error) => {
                    tracing::warn!(%error, "failed to read input");
                    return None;
                }
            }
        }
    }
}

/// Writes each value in decimal followed by a newline
#[derive(Debug)]
pub struct ConsoleOutput<W> {
    writer: W,
}

impl ConsoleOutput<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> OutputSink for ConsoleOutput<W> {
    fn emit_output(&mut self, value: Value) {
        let result = writeln!(self.writer, "{value}").and_then(|_| self.writer.flush());
        if let Err(error) = result {
            tracing::warn!(%error, value, "failed to write output");
        }
    }
}

/// Collecting sink whose handle stays readable after the VM takes a clone
#[derive(Debug, Clone, Default)]
pub struct SharedOutput {
    values: Arc<Mutex<Vec<Value>>>,
}

impl SharedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything emitted so far
    pub fn values(&self) -> Vec<Value> {
        self.lock().clone()
    }

    /// Drain everything emitted so far
    pub fn take(&self) -> Vec<Value> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Value>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl OutputSink for SharedOutput {
    fn emit_output(&mut self, value: Value) {
        self.lock().push(value);
    }
}
