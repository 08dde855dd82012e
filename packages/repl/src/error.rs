//! Error types for the REPL.

use stanza_file_store::StoreError;

use crate::io::IoError;

/// Error returned by a [`StatementHandler`](crate::StatementHandler).
///
/// Handlers own their failure policy; the engine only carries the error
/// out to whoever drives the session.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can end or interrupt a REPL session.
#[derive(Debug, thiserror::Error)]
pub enum ReplError {
    /// The host failed to read or write.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Loading persisted state failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The statement handler failed.
    #[error("handler failed: {0}")]
    Handler(#[source] HandlerError),
}

/// Result type alias for REPL operations.
pub type Result<T> = std::result::Result<T, ReplError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn io_error_is_transparent() {
        let e = ReplError::from(IoError::Io("broken pipe".to_string()));
        assert_eq!(e.to_string(), "I/O error: broken pipe");
    }

    #[test]
    fn handler_error_display_and_source() {
        let e = ReplError::Handler("division by zero".into());
        assert_eq!(e.to_string(), "handler failed: division by zero");
        assert!(StdError::source(&e).is_some());
    }

    #[test]
    fn store_error_conversion() {
        let e: ReplError = StoreError::InvalidKey {
            key: String::new(),
            message: "empty component".to_string(),
        }
        .into();
        assert!(matches!(e, ReplError::Store(_)));
    }
}
