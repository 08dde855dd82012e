//! I/O abstraction for the REPL.
//!
//! This module defines the interface between the input engine and its host
//! environment. The engine interacts only through the `IoHost` trait, allowing
//! different hosts (terminal, testing) to provide their own implementations.

pub mod test_host;
pub mod types;

pub use test_host::TestHost;
pub use types::*;

/// Error type for I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(String),
}

/// Host interface for REPL I/O operations.
///
/// The session driver and the input engine call these methods to interact
/// with the user. The terminal host backs them with a line editor; the test
/// host backs them with in-memory queues.
pub trait IoHost {
    /// Wait for input to become available.
    ///
    /// This may block (for terminal hosts). After this returns,
    /// `read_input()` should return `Some(InputLine)` if a line was entered,
    /// or `read_signal()` should return `Some(Signal)` if a signal was
    /// received.
    fn wait_for_input(&mut self) -> Result<(), IoError>;

    /// Read the next input line, if available.
    fn read_input(&mut self) -> Result<Option<InputLine>, IoError>;

    /// Read any pending signal (Ctrl+C, Ctrl+D).
    fn read_signal(&mut self) -> Result<Option<Signal>, IoError>;

    /// Write output to the user.
    fn write_output(&mut self, output: Output) -> Result<(), IoError>;

    /// Update the prompt configuration.
    ///
    /// The host uses this to render the prompt before the next input.
    fn write_prompt(&mut self, config: PromptConfig) -> Result<(), IoError>;

    /// Erase the unterminated text on the current input line.
    fn clear_line(&mut self) -> Result<(), IoError> {
        Ok(())
    }

    /// Replace the recall list with `entries`, oldest first.
    fn seed_history(&mut self, _entries: &[String]) -> Result<(), IoError> {
        Ok(())
    }

    /// Append one entry to the recall list.
    fn add_history(&mut self, _entry: &str) -> Result<(), IoError> {
        Ok(())
    }

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<(), IoError> {
        Ok(())
    }
}
