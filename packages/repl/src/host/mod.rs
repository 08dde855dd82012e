//! Interactive line sources.
//!
//! Only a Reedline-backed terminal host lives here; tests drive sessions
//! through [`crate::io::TestHost`] instead.

pub mod terminal;

pub use terminal::TerminalHost;
