//! Session configuration.

use std::path::PathBuf;

use crate::core::CommitMode;
use crate::history::DEFAULT_HISTORY_SIZE;

/// Line-editor key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Emacs,
    Vi,
}

impl EditMode {
    /// Pick an edit mode from the environment.
    ///
    /// Checks `EDITOR`, `VISUAL`, `.inputrc` and finally `STANZA_EDIT_MODE`.
    pub fn detect() -> Self {
        if should_use_vi_mode() {
            EditMode::Vi
        } else {
            EditMode::Emacs
        }
    }
}

/// Everything needed to start a terminal session.
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Root directory for persisted state.
    pub dir: PathBuf,
    pub commit_mode: CommitMode,
    /// Maximum number of history entries kept.
    pub history_size: usize,
    /// Forced edit mode; detected from the environment when `None`.
    pub edit_mode: Option<EditMode>,
}

impl ReplConfig {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            commit_mode: CommitMode::default(),
            history_size: DEFAULT_HISTORY_SIZE,
            edit_mode: None,
        }
    }

    /// The platform data directory for stanza, if the platform has one.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("stanza"))
    }

    pub fn with_commit_mode(mut self, mode: CommitMode) -> Self {
        self.commit_mode = mode;
        self
    }

    pub fn with_history_size(mut self, size: usize) -> Self {
        self.history_size = size;
        self
    }

    pub fn with_edit_mode(mut self, mode: Option<EditMode>) -> Self {
        self.edit_mode = mode;
        self
    }

    /// The forced edit mode, or the one the environment asks for.
    pub fn resolved_edit_mode(&self) -> EditMode {
        self.edit_mode.unwrap_or_else(EditMode::detect)
    }
}

fn names_vi(value: &str) -> bool {
    let value = value.to_lowercase();
    value.contains("vim") || value.contains("nvim") || value == "vi"
}

fn should_use_vi_mode() -> bool {
    if std::env::var("EDITOR").is_ok_and(|editor| names_vi(&editor)) {
        return true;
    }

    if std::env::var("VISUAL").is_ok_and(|visual| names_vi(&visual)) {
        return true;
    }

    if check_inputrc_vi_mode() {
        return true;
    }

    if let Ok(mode) = std::env::var("STANZA_EDIT_MODE") {
        let mode = mode.to_lowercase();
        return mode == "vi" || mode == "vim";
    }

    false
}

/// Check .inputrc for "set editing-mode vi".
fn check_inputrc_vi_mode() -> bool {
    let inputrc_paths = [
        std::env::var("INPUTRC").ok().map(PathBuf::from),
        dirs::home_dir().map(|p| p.join(".inputrc")),
        Some(PathBuf::from("/etc/inputrc")),
    ];

    inputrc_paths.into_iter().flatten().any(|path| {
        std::fs::read_to_string(path).is_ok_and(|content| inputrc_sets_vi(&content))
    })
}

fn inputrc_sets_vi(content: &str) -> bool {
    content.lines().map(str::trim).any(|line| {
        line.starts_with("set") && line.contains("editing-mode") && line.contains("vi")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_defaults() {
        let config = ReplConfig::new(PathBuf::from("/tmp/stanza"));
        assert_eq!(config.commit_mode, CommitMode::Immediate);
        assert_eq!(config.history_size, DEFAULT_HISTORY_SIZE);
        assert!(config.edit_mode.is_none());
    }

    #[test]
    fn builders_override() {
        let config = ReplConfig::new(PathBuf::from("/tmp/stanza"))
            .with_commit_mode(CommitMode::DoubleNewline)
            .with_history_size(10)
            .with_edit_mode(Some(EditMode::Vi));
        assert_eq!(config.commit_mode, CommitMode::DoubleNewline);
        assert_eq!(config.history_size, 10);
        assert_eq!(config.resolved_edit_mode(), EditMode::Vi);
    }

    #[test]
    fn vi_names() {
        assert!(names_vi("vi"));
        assert!(names_vi("/usr/bin/nvim"));
        assert!(names_vi("VIM"));
        assert!(!names_vi("emacs"));
        assert!(!names_vi("nano"));
    }

    #[test]
    fn inputrc_detection() {
        assert!(inputrc_sets_vi("# comment\n  set editing-mode vi\n"));
        assert!(!inputrc_sets_vi("set editing-mode emacs\n"));
        assert!(!inputrc_sets_vi(""));
    }
}
