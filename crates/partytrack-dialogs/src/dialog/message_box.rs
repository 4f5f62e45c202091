use std::fmt;
use std::str::FromStr;

/// Button set shown by a message box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageBoxButtons {
    #[default]
    Ok,
    OkCancel,
    YesNo,
    YesNoCancel,
}

impl MessageBoxButtons {
    /// Results a user can produce with this button set.
    pub fn results(self) -> &'static [MessageBoxResult] {
        match self {
            MessageBoxButtons::Ok => &[MessageBoxResult::Ok],
            MessageBoxButtons::OkCancel => &[MessageBoxResult::Ok, MessageBoxResult::Cancel],
            MessageBoxButtons::YesNo => &[MessageBoxResult::Yes, MessageBoxResult::No],
            MessageBoxButtons::YesNoCancel => &[
                MessageBoxResult::Yes,
                MessageBoxResult::No,
                MessageBoxResult::Cancel,
            ],
        }
    }
}

impl FromStr for MessageBoxButtons {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ok" => Ok(MessageBoxButtons::Ok),
            "ok-cancel" => Ok(MessageBoxButtons::OkCancel),
            "yes-no" => Ok(MessageBoxButtons::YesNo),
            "yes-no-cancel" => Ok(MessageBoxButtons::YesNoCancel),
            other => Err(format!(
                "unknown button set '{other}' (expected ok, ok-cancel, yes-no, yes-no-cancel)"
            )),
        }
    }
}

/// Icon shown next to the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageBoxIcon {
    #[default]
    None,
    Information,
    Question,
    Warning,
    Error,
}

impl FromStr for MessageBoxIcon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(MessageBoxIcon::None),
            "info" | "information" => Ok(MessageBoxIcon::Information),
            "question" => Ok(MessageBoxIcon::Question),
            "warning" => Ok(MessageBoxIcon::Warning),
            "error" => Ok(MessageBoxIcon::Error),
            other => Err(format!(
                "unknown icon '{other}' (expected none, info, question, warning, error)"
            )),
        }
    }
}

/// Button the user pressed. `None` when the box was dismissed otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageBoxResult {
    #[default]
    None,
    Ok,
    Cancel,
    Yes,
    No,
}

impl fmt::Display for MessageBoxResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageBoxResult::None => write!(f, "none"),
            MessageBoxResult::Ok => write!(f, "ok"),
            MessageBoxResult::Cancel => write!(f, "cancel"),
            MessageBoxResult::Yes => write!(f, "yes"),
            MessageBoxResult::No => write!(f, "no"),
        }
    }
}

/// Everything a native message box needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBoxRequest {
    pub text: String,
    pub caption: String,
    pub buttons: MessageBoxButtons,
    pub icon: MessageBoxIcon,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_parse() {
        assert_eq!("ok".parse(), Ok(MessageBoxButtons::Ok));
        assert_eq!("Yes-No-Cancel".parse(), Ok(MessageBoxButtons::YesNoCancel));
        assert!("maybe".parse::<MessageBoxButtons>().is_err());
    }

    #[test]
    fn test_icon_parse_accepts_short_names() {
        assert_eq!("info".parse(), Ok(MessageBoxIcon::Information));
        assert_eq!("error".parse(), Ok(MessageBoxIcon::Error));
        assert!("skull".parse::<MessageBoxIcon>().is_err());
    }

    #[test]
    fn test_results_per_button_set() {
        assert_eq!(MessageBoxButtons::Ok.results(), &[MessageBoxResult::Ok]);
        assert!(
            MessageBoxButtons::YesNoCancel
                .results()
                .contains(&MessageBoxResult::Cancel)
        );
        assert!(
            !MessageBoxButtons::YesNo
                .results()
                .contains(&MessageBoxResult::Ok)
        );
    }
}
