use std::fmt;

/// Screens of the wizard. `Question` carries the index into the applicable
/// question list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Landing,
    Question(usize),
    ContactForm,
    Success,
}

impl fmt::Display for Screen {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Landing => write!(f, "landing"),
            Self::Question(i) => write!(f, "question {}", i + 1),
            Self::ContactForm => write!(f, "contact form"),
            Self::Success => write!(f, "success"),
        }
    }
}
