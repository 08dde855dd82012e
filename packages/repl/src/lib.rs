//! # stanza-repl
//!
//! A multi-line REPL input engine.
//!
//! Lines typed at the prompt are buffered until a balance checker says they
//! form a complete statement. Each statement is handed to a
//! [`StatementHandler`] one at a time, and the prompt shows how deeply the
//! pending input is nested.
//!
//! ## Features
//!
//! - Pluggable balance checking, with a bracket checker by default
//! - Immediate or blank-line-terminated statement commit
//! - Two-stage Ctrl+C exit
//! - Line history persisted to a key/value store
//! - Vi mode support (detected from EDITOR, .inputrc, or STANZA_EDIT_MODE)
//!
//! ## Usage
//!
//! ```bash
//! stanza
//!
//! > (list 1
//! ...   2 3)
//! (list 1
//!   2 3)
//! ```

pub mod balance;
pub mod config;
pub mod core;
pub mod error;
pub mod handler;
pub mod highlighter;
pub mod history;
pub mod host;
pub mod io;
pub mod repl;

pub use balance::{Balance, BalanceChecker, BalanceError, BracketChecker};
pub use config::{EditMode, ReplConfig};
pub use crate::core::{CommitMode, InputEngine, InterruptAction, InterruptState};
pub use error::{HandlerError, ReplError, Result};
pub use handler::{EchoHandler, ReplEvent, StatementHandler};
pub use history::{HistoryRecord, DEFAULT_HISTORY_SIZE, HISTORY_KEY};
pub use repl::{run, Repl};
