//! Platform-independent input engine.
//!
//! The engine owns the line buffer. It decides when buffered lines form a
//! statement, hands statements to the handler one at a time, renders the
//! prompt, and runs the interrupt state machine. It interacts with the user
//! only through the `IoHost` trait.

pub mod commit;
pub mod interrupt;

pub use commit::{next_statement, CommitMode, Extraction};
pub use interrupt::{InterruptAction, InterruptState};

use crate::balance::BalanceChecker;
use crate::error::{ReplError, Result};
use crate::handler::{ReplEvent, StatementHandler};
use crate::io::{IoError, IoHost, Output, PromptConfig};

const EXIT_HINT: &str = "(To exit, press Ctrl+C again or Ctrl+D)";

/// Accumulates lines and commits statements.
pub struct InputEngine<C, H> {
    checker: C,
    handler: H,
    mode: CommitMode,
    lines: Vec<String>,
    /// Set while a drain is in flight. `append` takes `&mut self`, so safe
    /// callers can never observe it set; it mirrors that borrow guarantee.
    locked: bool,
    interrupt: InterruptState,
}

impl<C: BalanceChecker, H: StatementHandler> InputEngine<C, H> {
    pub fn new(checker: C, handler: H, mode: CommitMode) -> Self {
        Self {
            checker,
            handler,
            mode,
            lines: Vec::new(),
            locked: false,
            interrupt: InterruptState::Idle,
        }
    }

    /// Lines typed since the last committed statement.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn mode(&self) -> CommitMode {
        self.mode
    }

    /// Whether a drain is in flight.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn interrupt_state(&self) -> InterruptState {
        self.interrupt
    }

    pub fn checker(&self) -> &C {
        &self.checker
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Let the handler greet the user.
    pub fn greet(&mut self, io: &mut impl IoHost) -> std::result::Result<(), IoError> {
        self.handler.greeting(io)
    }

    /// Buffer one line and commit whatever statements it completes.
    ///
    /// While a drain is in flight the line is only buffered. A handler
    /// failure is returned after the lock has been released; statements
    /// after the failing one stay buffered.
    pub async fn append(&mut self, line: impl Into<String>, io: &mut impl IoHost) -> Result<()> {
        let line = line.into();
        self.interrupt = self.interrupt.on_line();

        let defer = self.mode.defers(&line);
        self.lines.push(line);
        if defer || self.locked {
            return Ok(());
        }

        self.locked = true;
        let drained = self.drain_statements(io).await;
        self.locked = false;
        drained
    }

    async fn drain_statements(&mut self, io: &mut impl IoHost) -> Result<()> {
        loop {
            match next_statement(&mut self.lines, &self.checker, self.mode) {
                Extraction::Statement(text) => {
                    tracing::debug!(
                        lines = text.lines().count(),
                        remaining = self.lines.len(),
                        "committing statement"
                    );
                    self.handler
                        .handle(ReplEvent { text }, io)
                        .await
                        .map_err(ReplError::Handler)?;
                }
                Extraction::Malformed(error) => {
                    tracing::warn!(%error, "discarding malformed input");
                    self.checker.report_error(&error, io)?;
                    break;
                }
                Extraction::Pending => break,
            }
        }

        self.prompt(io)?;
        Ok(())
    }

    /// Send the prompt for the current nesting depth to the host.
    pub fn prompt(&self, io: &mut impl IoHost) -> std::result::Result<(), IoError> {
        let depth = self.checker.depth(&self.lines.join("\n"));
        io.write_prompt(PromptConfig { depth })
    }

    /// Handle Ctrl+C. `pending` is the unterminated text on the input line.
    ///
    /// Returns [`InterruptAction::Close`] when the session should end.
    pub fn interrupt(
        &mut self,
        pending: &str,
        io: &mut impl IoHost,
    ) -> std::result::Result<InterruptAction, IoError> {
        let input_is_empty = self.lines.concat().trim().is_empty() && pending.is_empty();
        let (state, action) = self.interrupt.on_interrupt(input_is_empty);
        self.interrupt = state;

        match action {
            InterruptAction::Warn => {
                io.write_output(Output::normal(""))?;
                io.write_output(Output::info(EXIT_HINT))?;
            }
            InterruptAction::Close => {}
            InterruptAction::ClearInput => {
                if !pending.is_empty() {
                    io.clear_line()?;
                    // Keep the last line of a multi-line entry on screen.
                    if !self.lines.is_empty() {
                        io.write_output(Output::normal(pending))?;
                    }
                }
                if !self.lines.is_empty() {
                    tracing::debug!(discarded = self.lines.len(), "interrupt cleared buffer");
                    self.lines.clear();
                    io.write_output(Output::normal(""))?;
                }
                self.prompt(io)?;
            }
        }

        Ok(action)
    }
}
