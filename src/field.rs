//! Numeric entry field for the minutes and seconds inputs.
//!
//! A trimmed-down text input: it only accepts ASCII digits from the
//! keyboard, has a character limit, and shows a block cursor at the end of
//! the value while focused. Values set programmatically (presets, CLI
//! prefill) are taken as-is so that validation stays in one place, the
//! engine's `configure`.

use crate::theme::Theme;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};

/// Default maximum number of characters.
pub const DEFAULT_CHAR_LIMIT: usize = 4;

#[derive(Debug, Clone)]
pub struct Model {
    /// Text shown before the value, e.g. `Minutes`.
    pub label: String,
    /// Shown dimmed while the value is empty.
    pub placeholder: String,
    /// Maximum number of characters; 0 means unlimited.
    pub char_limit: usize,
    value: String,
    focus: bool,
}

/// Creates an empty, unfocused field.
pub fn new(label: impl Into<String>) -> Model {
    Model {
        label: label.into(),
        placeholder: "0".to_string(),
        char_limit: DEFAULT_CHAR_LIMIT,
        value: String::new(),
        focus: false,
    }
}

impl Model {
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the value as-is. The character limit only applies to typing.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    pub fn reset(&mut self) {
        self.value.clear();
    }

    /// Handles a key press while focused. Returns whether the key was used.
    pub fn update(&mut self, msg: &Msg) -> bool {
        if !self.focus {
            return false;
        }
        let Some(key) = msg.downcast_ref::<KeyMsg>() else {
            return false;
        };
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.key == KeyCode::Char('u') {
                self.reset();
                return true;
            }
            return false;
        }
        match key.key {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.char_limit == 0 || self.value.chars().count() < self.char_limit {
                    self.value.push(c);
                }
                true
            }
            KeyCode::Backspace => {
                self.value.pop();
                true
            }
            KeyCode::Delete => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    pub fn view(&self, theme: &Theme) -> String {
        let label = theme.label.render(&format!("{}:", self.label));
        let style = if self.focus {
            &theme.field_focused
        } else {
            &theme.field
        };

        let mut body = if self.value.is_empty() {
            theme.status.render(&self.placeholder)
        } else {
            style.render(&self.value)
        };
        if self.focus {
            body.push_str(&theme.cursor.render(" "));
        }
        format!("{} {}", label, body)
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
