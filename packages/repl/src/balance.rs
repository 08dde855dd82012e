//! Structure-balance checking.
//!
//! The input engine asks a [`BalanceChecker`] two questions about the text
//! accumulated so far: how deeply nested it is, and whether it forms a
//! complete statement. The checker keeps no state between calls.

use crate::io::{IoError, IoHost, Output};

/// Classification of accumulated input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Balance {
    /// Some structure is still open; more lines are needed.
    Incomplete,
    /// Every opened structure is closed.
    Balanced,
}

/// Malformed input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BalanceError {
    #[error("unexpected {found:?} at line {line}, column {column}")]
    UnexpectedClose {
        found: char,
        line: usize,
        column: usize,
    },

    #[error(
        "expected {expected:?} to close {opened:?} from line {opened_line}, \
         found {found:?} at line {line}, column {column}"
    )]
    Mismatched {
        opened: char,
        opened_line: usize,
        expected: char,
        found: char,
        line: usize,
        column: usize,
    },
}

/// Classifies text by structural balance.
pub trait BalanceChecker {
    /// Nesting depth at the end of `text`. Never fails; malformed structure
    /// is skipped over.
    fn depth(&self, text: &str) -> usize;

    /// Whether `text` is a complete statement, still open, or malformed.
    fn check(&self, text: &str) -> Result<Balance, BalanceError>;

    /// Surface a malformed-input diagnostic to the user.
    fn report_error(&self, error: &BalanceError, io: &mut dyn IoHost) -> Result<(), IoError> {
        io.write_output(Output::error(error.to_string()))
    }
}

/// The default checker: `()`, `[]` and `{}` nesting.
///
/// Brackets inside double-quoted string literals (with backslash escapes)
/// and after a line-comment marker are ignored. An unterminated string
/// counts as incomplete.
#[derive(Debug, Clone)]
pub struct BracketChecker {
    line_comment: Option<String>,
}

impl BracketChecker {
    pub fn new() -> Self {
        Self {
            line_comment: Some("//".to_string()),
        }
    }

    /// Use `marker` to start line comments, or disable them with `None`.
    pub fn with_line_comment(mut self, marker: Option<&str>) -> Self {
        self.line_comment = marker.filter(|m| !m.is_empty()).map(str::to_string);
        self
    }

    fn scan(&self, text: &str) -> Scan {
        let mut scan = Scan::default();

        for (line_index, line) in text.split('\n').enumerate() {
            let line_number = line_index + 1;
            let mut chars = line.char_indices();
            let mut column = 0;

            while let Some((offset, c)) = chars.next() {
                column += 1;

                if scan.in_string {
                    match c {
                        '\\' => {
                            chars.next();
                            column += 1;
                        }
                        '"' => scan.in_string = false,
                        _ => {}
                    }
                    continue;
                }

                if let Some(marker) = &self.line_comment {
                    if line[offset..].starts_with(marker.as_str()) {
                        break;
                    }
                }

                match c {
                    '"' => scan.in_string = true,
                    '(' | '[' | '{' => scan.open.push(Opened {
                        bracket: c,
                        line: line_number,
                    }),
                    ')' | ']' | '}' => match scan.open.pop() {
                        None => scan.fail(BalanceError::UnexpectedClose {
                            found: c,
                            line: line_number,
                            column,
                        }),
                        Some(opened) if closer(opened.bracket) != c => {
                            scan.fail(BalanceError::Mismatched {
                                opened: opened.bracket,
                                opened_line: opened.line,
                                expected: closer(opened.bracket),
                                found: c,
                                line: line_number,
                                column,
                            })
                        }
                        Some(_) => {}
                    },
                    _ => {}
                }
            }
        }

        scan
    }
}

impl Default for BracketChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl BalanceChecker for BracketChecker {
    fn depth(&self, text: &str) -> usize {
        self.scan(text).open.len()
    }

    fn check(&self, text: &str) -> Result<Balance, BalanceError> {
        let scan = self.scan(text);
        if let Some(error) = scan.error {
            return Err(error);
        }
        if scan.in_string || !scan.open.is_empty() {
            Ok(Balance::Incomplete)
        } else {
            Ok(Balance::Balanced)
        }
    }
}

#[derive(Debug)]
struct Opened {
    bracket: char,
    line: usize,
}

#[derive(Debug, Default)]
struct Scan {
    open: Vec<Opened>,
    in_string: bool,
    error: Option<BalanceError>,
}

impl Scan {
    // First error wins; scanning continues so depth stays meaningful.
    fn fail(&mut self, error: BalanceError) {
        self.error.get_or_insert(error);
    }
}

fn closer(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}
