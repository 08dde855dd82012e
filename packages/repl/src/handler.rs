//! Statement handlers.
//!
//! The embedding application decides what a statement means. The engine
//! calls [`StatementHandler::greeting`] once before the first prompt and
//! [`StatementHandler::handle`] once per committed statement, awaiting each
//! call before extracting the next statement.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::HandlerError;
use crate::io::{IoError, IoHost, Output};

/// A committed statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplEvent {
    /// The statement text, continuation lines indented, ending in a newline.
    pub text: String,
}

/// Consumes committed statements.
///
/// Sessions are single-threaded, so handler futures need not be `Send`.
#[async_trait(?Send)]
pub trait StatementHandler {
    /// Called once when the session starts, before the first prompt.
    fn greeting(&mut self, io: &mut dyn IoHost) -> Result<(), IoError>;

    /// Handle one statement.
    async fn handle(&mut self, event: ReplEvent, io: &mut dyn IoHost) -> Result<(), HandlerError>;
}

#[async_trait(?Send)]
impl<T: StatementHandler + ?Sized> StatementHandler for Box<T> {
    fn greeting(&mut self, io: &mut dyn IoHost) -> Result<(), IoError> {
        self.as_mut().greeting(io)
    }

    async fn handle(&mut self, event: ReplEvent, io: &mut dyn IoHost) -> Result<(), HandlerError> {
        self.as_mut().handle(event, io).await
    }
}

/// Prints every statement back as it is committed.
#[derive(Debug, Default)]
pub struct EchoHandler {
    handled: usize,
}

impl EchoHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of statements echoed so far.
    pub fn handled(&self) -> usize {
        self.handled
    }
}

#[async_trait(?Send)]
impl StatementHandler for EchoHandler {
    fn greeting(&mut self, io: &mut dyn IoHost) -> Result<(), IoError> {
        io.write_output(Output::banner(BANNER))
    }

    async fn handle(&mut self, event: ReplEvent, io: &mut dyn IoHost) -> Result<(), HandlerError> {
        self.handled += 1;
        io.write_output(Output::normal(event.text.trim_end()))?;
        Ok(())
    }
}

const BANNER: &str = concat!(
    "stanza ",
    env!("CARGO_PKG_VERSION"),
    "\nStatements are echoed once their brackets balance.\n",
    "Press Ctrl+C twice or Ctrl+D to exit."
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{OutputStyle, TestHost};

    #[test]
    fn greeting_writes_banner() {
        let mut host = TestHost::new();
        EchoHandler::new().greeting(&mut host).unwrap();

        let banners = host.output_with_style(OutputStyle::Banner);
        assert_eq!(banners.len(), 1);
        assert!(banners[0].starts_with("stanza "));
    }

    #[tokio::test]
    async fn handle_echoes_without_trailing_newline() {
        let mut host = TestHost::new();
        let mut handler = EchoHandler::new();

        handler
            .handle(
                ReplEvent {
                    text: "(a\n  b)\n".to_string(),
                },
                &mut host,
            )
            .await
            .unwrap();

        assert_eq!(handler.handled(), 1);
        assert_eq!(host.output_text(), "(a\n  b)");
    }

    #[tokio::test]
    async fn boxed_handler_delegates() {
        let mut host = TestHost::new();
        let mut handler: Box<dyn StatementHandler> = Box::new(EchoHandler::new());

        handler
            .handle(ReplEvent { text: "x\n".to_string() }, &mut host)
            .await
            .unwrap();

        assert_eq!(host.output_text(), "x");
    }
}
