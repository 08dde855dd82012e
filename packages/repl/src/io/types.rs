//! I/O types for the REPL.
//!
//! These types define the interface between the input engine and its host environment.

use serde::{Deserialize, Serialize};

/// A line of input from the user, without its terminating newline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputLine {
    pub line: String,
}

/// A signal from the host (Ctrl+C, Ctrl+D).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "lowercase")]
pub enum Signal {
    /// User pressed Ctrl+C (interrupt).
    ///
    /// `pending` is the unterminated text that was on the input line when
    /// the interrupt arrived.
    Interrupt {
        #[serde(default)]
        pending: String,
    },
    /// User pressed Ctrl+D (end of file).
    Eof,
}

impl Signal {
    /// An interrupt with nothing typed on the input line.
    pub fn interrupt() -> Self {
        Signal::Interrupt {
            pending: String::new(),
        }
    }

    /// An interrupt that arrived while `pending` was typed but not entered.
    pub fn interrupt_with(pending: impl Into<String>) -> Self {
        Signal::Interrupt {
            pending: pending.into(),
        }
    }
}

/// Output to be written by the REPL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
    pub text: String,
    #[serde(default)]
    pub style: OutputStyle,
}

impl Output {
    pub fn normal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: OutputStyle::Normal,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: OutputStyle::Error,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: OutputStyle::Info,
        }
    }

    pub fn banner(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: OutputStyle::Banner,
        }
    }
}

/// Style hint for output rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// Normal output (already contains ANSI codes if applicable).
    #[default]
    Normal,
    /// Error message (host may add red prefix).
    Error,
    /// Informational message (host may style in cyan).
    Info,
    /// Banner/startup message.
    Banner,
}

/// Prompt configuration sent from the engine to the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Nesting depth of the lines buffered so far.
    pub depth: usize,
}

impl PromptConfig {
    /// The prompt text: `"> "` at depth zero, otherwise a run of dots that
    /// grows by two per level (`"... "`, `"..... "`, ...).
    pub fn indicator(&self) -> String {
        if self.depth == 0 {
            "> ".to_string()
        } else {
            format!(".{} ", "..".repeat(self.depth))
        }
    }
}

/// Reason the REPL exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitReason {
    /// User pressed Ctrl+C twice on an empty prompt.
    Interrupt,
    /// User pressed Ctrl+D, or the input source ran dry.
    Eof,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_at_depth_zero() {
        assert_eq!(PromptConfig { depth: 0 }.indicator(), "> ");
    }

    #[test]
    fn prompt_grows_with_depth() {
        assert_eq!(PromptConfig { depth: 1 }.indicator(), "... ");
        assert_eq!(PromptConfig { depth: 2 }.indicator(), "..... ");
        assert_eq!(PromptConfig { depth: 3 }.indicator(), "....... ");
    }

    #[test]
    fn interrupt_constructors() {
        assert_eq!(
            Signal::interrupt(),
            Signal::Interrupt {
                pending: String::new()
            }
        );
        assert_eq!(
            Signal::interrupt_with("abc"),
            Signal::Interrupt {
                pending: "abc".to_string()
            }
        );
    }
}
