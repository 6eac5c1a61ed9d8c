//! The quote wizard state machine.
//!
//! A [`WizardSession`] owns everything one visitor enters and moves through
//! `Landing → Question(0..N) → ContactForm → Success`, where `N` is the number
//! of questions applicable to the current answers.

mod screen;
mod session;

use std::time::Duration;

pub use screen::Screen;
pub use session::{DEFAULT_FORM_NAME, SubmitError, SummaryRow, WizardError, WizardSession};

/// Pause after a choice is picked, so the highlight is visible before the
/// next question replaces it.
pub const SELECTION_DELAY: Duration = Duration::from_millis(200);

/// Progress shown on the first question.
pub const START_PROGRESS: f64 = 10.0;

/// Progress percentage for `screen` given `applicable` questions.
///
/// Derived purely from position so the bar can never drift from the step.
pub fn progress_percent(
    screen: Screen,
    applicable: usize,
) -> f64 {
    match screen {
        Screen::Landing => 0.0,
        Screen::Question(0) => START_PROGRESS,
        Screen::Question(i) => (i + 1) as f64 * 100.0 / (applicable + 1) as f64,
        Screen::ContactForm | Screen::Success => 100.0,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn landing_has_no_progress() {
        assert_eq!(progress_percent(Screen::Landing, 9), 0.0);
    }

    #[test]
    fn first_question_uses_start_seed() {
        assert_eq!(progress_percent(Screen::Question(0), 9), START_PROGRESS);
    }

    #[test]
    fn later_questions_use_position_over_total() {
        assert_eq!(progress_percent(Screen::Question(1), 9), 20.0);
        assert_eq!(progress_percent(Screen::Question(8), 9), 90.0);
    }

    #[test]
    fn terminal_screens_are_complete() {
        assert_eq!(progress_percent(Screen::ContactForm, 9), 100.0);
        assert_eq!(progress_percent(Screen::Success, 9), 100.0);
    }
}
