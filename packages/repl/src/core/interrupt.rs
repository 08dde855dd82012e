//! Two-stage "press Ctrl+C again to exit" state machine.

/// Whether an exit warning is outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InterruptState {
    /// No interrupt since the last line.
    #[default]
    Idle,
    /// One interrupt arrived on empty input; the next one exits.
    Warned,
}

/// What the engine must do in response to an interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptAction {
    /// Show the "press again to exit" hint.
    Warn,
    /// Close the session.
    Close,
    /// Discard the partial input and start a fresh prompt.
    ClearInput,
}

impl InterruptState {
    /// Any line event starts the count over.
    pub fn on_line(self) -> Self {
        InterruptState::Idle
    }

    /// Transition on an interrupt. `input_is_empty` is true when neither the
    /// line buffer nor the live input line holds any text.
    pub fn on_interrupt(self, input_is_empty: bool) -> (Self, InterruptAction) {
        match (self, input_is_empty) {
            (state, false) => (state, InterruptAction::ClearInput),
            (InterruptState::Idle, true) => (InterruptState::Warned, InterruptAction::Warn),
            (InterruptState::Warned, true) => (InterruptState::Warned, InterruptAction::Close),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_interrupt_warns() {
        assert_eq!(
            InterruptState::Idle.on_interrupt(true),
            (InterruptState::Warned, InterruptAction::Warn)
        );
    }

    #[test]
    fn second_interrupt_closes() {
        assert_eq!(
            InterruptState::Warned.on_interrupt(true),
            (InterruptState::Warned, InterruptAction::Close)
        );
    }

    #[test]
    fn line_resets() {
        assert_eq!(InterruptState::Warned.on_line(), InterruptState::Idle);
        assert_eq!(InterruptState::Idle.on_line(), InterruptState::Idle);
    }

    #[test]
    fn pending_input_clears_without_counting() {
        assert_eq!(
            InterruptState::Idle.on_interrupt(false),
            (InterruptState::Idle, InterruptAction::ClearInput)
        );
        assert_eq!(
            InterruptState::Warned.on_interrupt(false),
            (InterruptState::Warned, InterruptAction::ClearInput)
        );
    }
}
