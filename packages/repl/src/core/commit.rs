//! Statement extraction from the line buffer.

use crate::balance::{Balance, BalanceChecker, BalanceError};

/// When a balanced run of lines becomes a statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommitMode {
    /// Commit as soon as the buffered text is balanced and non-empty.
    #[default]
    Immediate,
    /// Commit a balanced, non-empty statement only once a blank line follows it.
    DoubleNewline,
}

impl CommitMode {
    /// Whether appending `line` can be left at buffering, without trying to
    /// commit anything.
    pub fn defers(self, line: &str) -> bool {
        self == CommitMode::DoubleNewline && !line.trim().is_empty()
    }
}

/// Outcome of one extraction attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// A statement was committed and its lines removed from the buffer.
    Statement(String),
    /// Nothing is committable yet; the buffer is untouched.
    Pending,
    /// The buffered text is malformed; the buffer has been emptied.
    Malformed(BalanceError),
}

/// Try to commit one statement from the front of `lines`.
///
/// Lines are accumulated one at a time, each indented two spaces per level
/// of the depth of the text before it and terminated by `\n`. The checker
/// classifies the accumulated text after every line.
pub fn next_statement(
    lines: &mut Vec<String>,
    checker: &impl BalanceChecker,
    mode: CommitMode,
) -> Extraction {
    let mut text = String::new();
    let mut outcome = None;

    for (i, line) in lines.iter().enumerate() {
        let indent = "  ".repeat(checker.depth(&text));
        text.push_str(&indent);
        text.push_str(line);
        text.push('\n');

        match checker.check(&text) {
            Err(error) => {
                outcome = Some(Err(error));
                break;
            }
            Ok(Balance::Incomplete) => {}
            Ok(Balance::Balanced) => {
                if text.trim().is_empty() {
                    continue;
                }
                match mode {
                    CommitMode::Immediate => {
                        outcome = Some(Ok(i + 1));
                        break;
                    }
                    CommitMode::DoubleNewline => {
                        if lines.get(i + 1).is_some_and(|next| next.trim().is_empty()) {
                            outcome = Some(Ok(i + 2));
                            break;
                        }
                    }
                }
            }
        }
    }

    match outcome {
        Some(Ok(count)) => {
            lines.drain(..count);
            Extraction::Statement(text)
        }
        Some(Err(error)) => {
            lines.clear();
            Extraction::Malformed(error)
        }
        None => Extraction::Pending,
    }
}
