//! Blocking notifications shown over the main view.

use crate::error::InvalidInput;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Error,
    Info,
}

/// A notification the user has to dismiss before doing anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub kind: Kind,
    pub title: String,
    pub message: String,
}

impl Modal {
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: Kind::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: Kind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    /// The countdown reached zero.
    pub fn finished() -> Self {
        Self::info("Time's up!", "⏰ Countdown finished!")
    }

    pub fn invalid_input(err: &InvalidInput) -> Self {
        Self::error("Invalid Input", err.to_string())
    }

    pub fn view(&self, theme: &Theme) -> String {
        let title = match self.kind {
            Kind::Error => theme.modal_error_title.render(&self.title),
            Kind::Info => theme.modal_info_title.render(&self.title),
        };
        let hint = theme.status.render("press enter to dismiss");
        theme
            .modal
            .render(&format!("{}\n\n{}\n\n{}", title, self.message, hint))
    }
}
