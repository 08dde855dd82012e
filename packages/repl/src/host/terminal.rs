//! Terminal host implementation using Reedline.
//!
//! This host provides interactive terminal I/O with:
//! - Readline-style line editing (Vi and Emacs modes)
//! - Bracket highlighting
//! - An in-memory recall list seeded by the session
//! - Ctrl+C reported together with the unterminated input it interrupted

use std::borrow::Cow;
use std::io::{self, Write};

use nu_ansi_term::{Color, Style};
use reedline::{
    default_emacs_keybindings, default_vi_insert_keybindings, default_vi_normal_keybindings,
    DefaultHinter, EditCommand, EditMode as LineEditMode, Emacs, FileBackedHistory, History,
    HistoryItem, KeyCode, KeyModifiers, Keybindings, Prompt, PromptEditMode, PromptHistorySearch,
    PromptHistorySearchStatus, PromptViMode, Reedline, ReedlineEvent, Signal as ReedlineSignal,
    Vi,
};

use crate::config::EditMode;
use crate::highlighter::ReplHighlighter;
use crate::io::{InputLine, IoError, IoHost, Output, OutputStyle, PromptConfig, Signal};

/// Host command Ctrl+C is bound to. Reedline's own Ctrl+C handling empties
/// the buffer before returning, which would lose the unterminated input.
const INTERRUPT_COMMAND: &str = "\u{3}";

/// Carriage return, then erase the whole row.
const ERASE_LINE: &str = "\r\x1b[2K";

/// Terminal host using Reedline for interactive I/O.
pub struct TerminalHost {
    line_editor: Reedline,
    pending_input: Option<InputLine>,
    pending_signal: Option<Signal>,
    current_prompt: PromptConfig,
}

impl TerminalHost {
    /// Create a terminal host whose recall list holds up to `history_size`
    /// entries.
    ///
    /// Persistence is the session's job, so the recall list lives in memory.
    pub fn new(edit_mode: EditMode, history_size: usize) -> Result<Self, IoError> {
        let highlighter = Box::new(ReplHighlighter::new());
        let hinter = Box::new(
            DefaultHinter::default().with_style(Style::new().fg(Color::LightGray).dimmed()),
        );

        let history = FileBackedHistory::new(history_size)
            .map_err(|e| IoError::Io(format!("could not create history: {e}")))?;

        let line_editor = Reedline::create()
            .with_highlighter(highlighter)
            .with_hinter(hinter)
            .with_history(Box::new(history))
            .with_edit_mode(line_edit_mode(edit_mode));

        Ok(Self {
            line_editor,
            pending_input: None,
            pending_signal: None,
            current_prompt: PromptConfig::default(),
        })
    }

    fn accept_line(&mut self, line: String) {
        if line == INTERRUPT_COMMAND {
            let pending = self.line_editor.current_buffer_contents().to_string();
            self.pending_signal = Some(Signal::Interrupt { pending });
        } else {
            self.pending_input = Some(InputLine { line });
        }
    }
}

fn line_edit_mode(mode: EditMode) -> Box<dyn LineEditMode> {
    match mode {
        EditMode::Vi => Box::new(Vi::new(
            with_interrupt_binding(default_vi_insert_keybindings()),
            with_interrupt_binding(default_vi_normal_keybindings()),
        )),
        EditMode::Emacs => Box::new(Emacs::new(with_interrupt_binding(
            default_emacs_keybindings(),
        ))),
    }
}

fn with_interrupt_binding(mut keybindings: Keybindings) -> Keybindings {
    keybindings.add_binding(
        KeyModifiers::CONTROL,
        KeyCode::Char('c'),
        ReedlineEvent::ExecuteHostCommand(INTERRUPT_COMMAND.to_string()),
    );
    keybindings
}

impl IoHost for TerminalHost {
    fn wait_for_input(&mut self) -> Result<(), IoError> {
        let prompt = TerminalPrompt::from_config(&self.current_prompt);

        match self.line_editor.read_line(&prompt) {
            Ok(ReedlineSignal::Success(line)) => self.accept_line(line),
            // Only reachable if something else emits reedline's own Ctrl+C
            // event; the buffer is already empty by then.
            Ok(ReedlineSignal::CtrlC) => {
                self.pending_signal = Some(Signal::interrupt());
            }
            Ok(ReedlineSignal::CtrlD) => {
                self.pending_signal = Some(Signal::Eof);
            }
            Err(e) => {
                return Err(IoError::Io(format!("Reedline error: {}", e)));
            }
        }

        Ok(())
    }

    fn read_input(&mut self) -> Result<Option<InputLine>, IoError> {
        Ok(self.pending_input.take())
    }

    fn read_signal(&mut self) -> Result<Option<Signal>, IoError> {
        Ok(self.pending_signal.take())
    }

    fn write_output(&mut self, output: Output) -> Result<(), IoError> {
        let styled = match output.style {
            OutputStyle::Normal => output.text,
            OutputStyle::Error => {
                format!("{} {}", Color::Red.bold().paint("Error:"), output.text)
            }
            OutputStyle::Info => Color::DarkGray.paint(&output.text).to_string(),
            OutputStyle::Banner => Color::Cyan.paint(&output.text).to_string(),
        };
        println!("{}", styled);
        Ok(())
    }

    fn write_prompt(&mut self, config: PromptConfig) -> Result<(), IoError> {
        self.current_prompt = config;
        Ok(())
    }

    fn clear_line(&mut self) -> Result<(), IoError> {
        self.line_editor.run_edit_commands(&[EditCommand::Clear]);
        print!("{ERASE_LINE}");
        io::stdout().flush().map_err(|e| IoError::Io(e.to_string()))
    }

    fn seed_history(&mut self, entries: &[String]) -> Result<(), IoError> {
        let history = self.line_editor.history_mut();
        history
            .clear()
            .map_err(|e| IoError::Io(format!("could not reset history: {e}")))?;
        for entry in entries {
            history
                .save(HistoryItem::from_command_line(entry.as_str()))
                .map_err(|e| IoError::Io(format!("could not seed history: {e}")))?;
        }
        Ok(())
    }

    // Submitted lines are already recorded by the line editor.
    fn add_history(&mut self, _entry: &str) -> Result<(), IoError> {
        Ok(())
    }

    fn flush(&mut self) -> Result<(), IoError> {
        io::stdout().flush().map_err(|e| IoError::Io(e.to_string()))
    }
}

/// Prompt implementation for the terminal.
struct TerminalPrompt {
    indicator: String,
    continuation: bool,
}

impl TerminalPrompt {
    fn from_config(config: &PromptConfig) -> Self {
        Self {
            indicator: config.indicator(),
            continuation: config.depth > 0,
        }
    }
}

impl Prompt for TerminalPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, edit_mode: PromptEditMode) -> Cow<'_, str> {
        let color = match edit_mode {
            PromptEditMode::Vi(PromptViMode::Normal) => Color::Blue,
            _ if self.continuation => Color::DarkGray,
            _ => Color::Green,
        };
        Cow::Owned(color.bold().paint(&self.indicator).to_string())
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed(": ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!(
            "({}reverse-search: {}) ",
            prefix, history_search.term
        ))
    }
}
