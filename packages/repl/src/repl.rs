//! Session driver.
//!
//! Wires a line source to the input engine, keeps the history record in sync
//! with the key/value store, and decides when the session ends.

use stanza_file_store::{KeyValueStore, LocalDiskStore};

use crate::balance::{BalanceChecker, BracketChecker};
use crate::config::ReplConfig;
use crate::core::{InputEngine, InterruptAction};
use crate::error::{ReplError, Result};
use crate::handler::{EchoHandler, StatementHandler};
use crate::history::{HistoryRecord, HISTORY_KEY};
use crate::host::TerminalHost;
use crate::io::{ExitReason, IoError, IoHost, Output, Signal};

/// One interactive session.
pub struct Repl<C, H, S> {
    engine: InputEngine<C, H>,
    store: S,
    history: HistoryRecord,
}

impl<C, H, S> Repl<C, H, S>
where
    C: BalanceChecker,
    H: StatementHandler,
    S: KeyValueStore,
{
    /// Create a session, loading the persisted history from `store`.
    pub async fn create(
        engine: InputEngine<C, H>,
        mut store: S,
        history_size: usize,
    ) -> Result<Self> {
        let history = match store.get(HISTORY_KEY).await? {
            Some(text) => HistoryRecord::from_stored(&text, history_size),
            None => HistoryRecord::new(history_size),
        };
        tracing::debug!(entries = history.len(), "loaded history");

        Ok(Self {
            engine,
            store,
            history,
        })
    }

    pub fn engine(&self) -> &InputEngine<C, H> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut InputEngine<C, H> {
        &mut self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn history(&self) -> &HistoryRecord {
        &self.history
    }

    /// Run the session until the user exits or the input source ends.
    pub async fn run(&mut self, io: &mut impl IoHost) -> Result<ExitReason> {
        io.seed_history(&self.history.entries())?;
        self.engine.greet(io)?;
        self.engine.prompt(io)?;
        io.flush()?;

        loop {
            io.wait_for_input()?;

            if let Some(signal) = io.read_signal()? {
                match signal {
                    Signal::Eof => {
                        io.flush()?;
                        return Ok(ExitReason::Eof);
                    }
                    Signal::Interrupt { pending } => {
                        let action = self.engine.interrupt(&pending, io)?;
                        io.flush()?;
                        if action == InterruptAction::Close {
                            return Ok(ExitReason::Interrupt);
                        }
                        continue;
                    }
                }
            }

            let input = match io.read_input()? {
                Some(input) => input,
                None => continue,
            };

            self.record_history(&input.line, io).await?;

            match self.engine.append(input.line, io).await {
                Ok(()) => {}
                Err(ReplError::Handler(error)) => {
                    tracing::error!(%error, "statement handler failed");
                    io.write_output(Output::error(error.to_string()))?;
                    self.engine.prompt(io)?;
                }
                Err(other) => return Err(other),
            }

            io.flush()?;
        }
    }

    async fn record_history(
        &mut self,
        line: &str,
        io: &mut impl IoHost,
    ) -> std::result::Result<(), IoError> {
        if !self.history.record(line) {
            return Ok(());
        }
        io.add_history(line)?;

        let text = self.history.to_stored();
        tracing::debug!(entries = self.history.len(), "saving history");
        if let Err(error) = self.store.set(HISTORY_KEY, &text).await {
            tracing::warn!(%error, "failed to save history");
            io.write_output(Output::error(format!("could not save history: {error}")))?;
        }
        Ok(())
    }
}

/// Run an interactive terminal session with the default checker and handler.
pub fn run(config: ReplConfig) -> Result<ExitReason> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| IoError::Io(format!("could not start runtime: {e}")))?;

    runtime.block_on(run_terminal(config))
}

async fn run_terminal(config: ReplConfig) -> Result<ExitReason> {
    let store = LocalDiskStore::create(config.dir.clone())?;
    let engine = InputEngine::new(
        BracketChecker::new(),
        EchoHandler::new(),
        config.commit_mode,
    );
    let mut repl = Repl::create(engine, store, config.history_size).await?;

    let mut host = TerminalHost::new(config.resolved_edit_mode(), config.history_size)?;
    repl.run(&mut host).await
}
