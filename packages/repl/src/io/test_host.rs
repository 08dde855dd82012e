//! In-memory host for driving sessions without a terminal.
//!
//! Lines and signals are queued in one ordered script and consumed one per
//! `wait_for_input()` call, the way a terminal delivers them. When the script
//! runs out the host reports end of input, so a session driven by it always
//! terminates.

use std::collections::VecDeque;

use super::{InputLine, IoError, IoHost, Output, OutputStyle, PromptConfig, Signal};

#[derive(Debug, Clone)]
enum Scripted {
    Line(String),
    Signal(Signal),
}

/// Test host with in-memory I/O buffers.
#[derive(Debug, Default)]
pub struct TestHost {
    /// Lines and signals, in the order the user "typed" them.
    script: VecDeque<Scripted>,
    pending_input: Option<InputLine>,
    pending_signal: Option<Signal>,
    /// Buffer of all output written via `write_output()`.
    output_buffer: Vec<Output>,
    /// Every prompt configuration, oldest first.
    prompts: Vec<PromptConfig>,
    /// The recall list, oldest first.
    history: Vec<String>,
    /// Number of times `clear_line()` was called.
    clear_count: usize,
    /// Number of times `flush()` was called.
    flush_count: usize,
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an input line.
    pub fn queue_input(&mut self, line: impl Into<String>) {
        self.script.push_back(Scripted::Line(line.into()));
    }

    /// Queue multiple input lines.
    pub fn queue_inputs(&mut self, lines: impl IntoIterator<Item = impl Into<String>>) {
        for line in lines {
            self.queue_input(line);
        }
    }

    /// Queue a signal after everything queued so far.
    pub fn queue_signal(&mut self, signal: Signal) {
        self.script.push_back(Scripted::Signal(signal));
    }

    /// Get all output that was written.
    pub fn output(&self) -> &[Output] {
        &self.output_buffer
    }

    /// Get output text only, concatenated.
    pub fn output_text(&self) -> String {
        self.output_buffer
            .iter()
            .map(|o| o.text.as_str())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Get output of a specific style.
    pub fn output_with_style(&self, style: OutputStyle) -> Vec<&str> {
        self.output_buffer
            .iter()
            .filter(|o| o.style == style)
            .map(|o| o.text.as_str())
            .collect()
    }

    /// Get all error output.
    pub fn errors(&self) -> Vec<&str> {
        self.output_with_style(OutputStyle::Error)
    }

    /// Get the last prompt configuration, if any.
    pub fn last_prompt(&self) -> Option<&PromptConfig> {
        self.prompts.last()
    }

    /// Get every prompt configuration written so far.
    pub fn prompts(&self) -> &[PromptConfig] {
        &self.prompts
    }

    /// The recall list, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn clear_count(&self) -> usize {
        self.clear_count
    }

    pub fn flush_count(&self) -> usize {
        self.flush_count
    }

    /// Clear the output buffer.
    pub fn clear_output(&mut self) {
        self.output_buffer.clear();
    }

    /// Check if there is anything left in the script.
    pub fn has_pending(&self) -> bool {
        !self.script.is_empty()
    }
}

impl IoHost for TestHost {
    fn wait_for_input(&mut self) -> Result<(), IoError> {
        match self.script.pop_front() {
            Some(Scripted::Line(line)) => self.pending_input = Some(InputLine { line }),
            Some(Scripted::Signal(signal)) => self.pending_signal = Some(signal),
            None => self.pending_signal = Some(Signal::Eof),
        }
        Ok(())
    }

    fn read_input(&mut self) -> Result<Option<InputLine>, IoError> {
        Ok(self.pending_input.take())
    }

    fn read_signal(&mut self) -> Result<Option<Signal>, IoError> {
        Ok(self.pending_signal.take())
    }

    fn write_output(&mut self, output: Output) -> Result<(), IoError> {
        self.output_buffer.push(output);
        Ok(())
    }

    fn write_prompt(&mut self, config: PromptConfig) -> Result<(), IoError> {
        self.prompts.push(config);
        Ok(())
    }

    fn clear_line(&mut self) -> Result<(), IoError> {
        self.clear_count += 1;
        Ok(())
    }

    fn seed_history(&mut self, entries: &[String]) -> Result<(), IoError> {
        self.history = entries.to_vec();
        Ok(())
    }

    fn add_history(&mut self, entry: &str) -> Result<(), IoError> {
        self.history.push(entry.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), IoError> {
        self.flush_count += 1;
        Ok(())
    }
}
