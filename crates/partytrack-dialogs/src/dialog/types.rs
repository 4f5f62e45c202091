use std::fmt;

/// How a modal dialog was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogResult {
    /// Closed through an affirmative action (OK, Save, Yes).
    Accepted,
    /// Closed through a negative action (Cancel, No).
    Cancelled,
    /// Closed without an explicit result, e.g. via the window close button.
    #[default]
    Unset,
}

impl DialogResult {
    /// Tri-state view: `Some(true)`, `Some(false)` or `None`.
    pub fn as_option(self) -> Option<bool> {
        match self {
            DialogResult::Accepted => Some(true),
            DialogResult::Cancelled => Some(false),
            DialogResult::Unset => None,
        }
    }

    pub fn is_accepted(self) -> bool {
        self == DialogResult::Accepted
    }
}

impl From<Option<bool>> for DialogResult {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => DialogResult::Accepted,
            Some(false) => DialogResult::Cancelled,
            None => DialogResult::Unset,
        }
    }
}

impl fmt::Display for DialogResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialogResult::Accepted => write!(f, "accepted"),
            DialogResult::Cancelled => write!(f, "cancelled"),
            DialogResult::Unset => write!(f, "unset"),
        }
    }
}
