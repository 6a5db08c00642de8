//! Which controls are available in each phase, and the key map they drive.

use crate::engine::Phase;
use crate::key::{self, new_binding, with_help, with_keys, with_keys_str, Binding, KeyPress};
use crossterm::event::KeyCode;

/// Presets reachable from the keyboard, one per function key.
pub const MAX_PRESET_KEYS: usize = 12;

/// Enabled state of the Start / Pause / Reset controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub start: bool,
    pub pause: bool,
    pub reset: bool,
}

impl Controls {
    /// Idle and Finished can start; Paused can resume; Running can pause;
    /// Running and Paused can reset.
    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::Idle | Phase::Finished => Self {
                start: true,
                pause: false,
                reset: false,
            },
            Phase::Running => Self {
                start: false,
                pause: true,
                reset: true,
            },
            Phase::Paused => Self {
                start: true,
                pause: false,
                reset: true,
            },
        }
    }
}

/// Every key binding the app reacts to.
#[derive(Debug, Clone)]
pub struct Keys {
    pub start: Binding,
    pub pause: Binding,
    pub reset: Binding,
    pub next_field: Binding,
    pub prev_field: Binding,
    pub presets: Binding,
    pub theme: Binding,
    pub help: Binding,
    pub quit: Binding,
    pub dismiss: Binding,
}

impl Keys {
    /// Bindings for a preset list of `preset_count` entries.
    pub fn new(preset_count: usize) -> Self {
        let count = preset_count.min(MAX_PRESET_KEYS);
        let preset_keys: Vec<KeyPress> = (1..=count as u8)
            .map(|n| KeyPress::from(KeyCode::F(n)))
            .collect();
        let preset_help = match count {
            0 => String::new(),
            1 => "f1".to_string(),
            n => format!("f1-f{}", n),
        };

        Self {
            start: new_binding(vec![with_keys_str(&["enter"]), with_help("enter", "start")]),
            pause: new_binding(vec![
                with_keys_str(&["p", "space"]),
                with_help("p", "pause"),
            ]),
            reset: new_binding(vec![with_keys_str(&["r"]), with_help("r", "reset")]),
            next_field: new_binding(vec![
                with_keys_str(&["tab", "down"]),
                with_help("tab", "next field"),
            ]),
            prev_field: new_binding(vec![
                with_keys_str(&["shift+tab", "up"]),
                with_help("shift+tab", "prev field"),
            ]),
            presets: new_binding(vec![with_keys(preset_keys), with_help(preset_help, "presets")]),
            theme: new_binding(vec![with_keys_str(&["t"]), with_help("t", "theme")]),
            help: new_binding(vec![with_keys_str(&["?"]), with_help("?", "more")]),
            quit: new_binding(vec![
                with_keys_str(&["q", "ctrl+c"]),
                with_help("q", "quit"),
            ]),
            dismiss: new_binding(vec![
                with_keys_str(&["enter", "esc", "space"]),
                with_help("enter", "dismiss"),
            ]),
        }
    }

    /// Enables and disables bindings to match `controls`. The field
    /// bindings follow `editing`; `dismiss` is only live while a modal is up.
    pub fn apply(&mut self, controls: Controls, editing: bool, modal: bool) {
        self.start.set_enabled(controls.start && !modal);
        self.pause.set_enabled(controls.pause && !modal);
        self.reset.set_enabled(controls.reset && !modal);
        self.next_field.set_enabled(editing && !modal);
        self.prev_field.set_enabled(editing && !modal);
        self.presets.set_enabled(editing && !modal);
        self.theme.set_enabled(!modal);
        self.help.set_enabled(!modal);
        self.dismiss.set_enabled(modal);

        let label = if controls.start && controls.reset { "resume" } else { "start" };
        self.start.set_help("enter", label);
    }

    /// Index of the preset selected by a function key, if any.
    pub fn preset_index(&self, msg: &bubbletea_rs::KeyMsg) -> Option<usize> {
        if !self.presets.matches(msg) {
            return None;
        }
        match msg.key {
            KeyCode::F(n) if n >= 1 => Some(usize::from(n) - 1),
            _ => None,
        }
    }
}

impl key::KeyMap for Keys {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.dismiss,
            &self.start,
            &self.pause,
            &self.reset,
            &self.presets,
            &self.help,
            &self.quit,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.dismiss, &self.start, &self.pause, &self.reset],
            vec![&self.next_field, &self.prev_field, &self.presets],
            vec![&self.theme, &self.help, &self.quit],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bubbletea_rs::KeyMsg;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_controls_per_phase() {
        assert_eq!(
            Controls::for_phase(Phase::Idle),
            Controls {
                start: true,
                pause: false,
                reset: false
            }
        );
        assert_eq!(
            Controls::for_phase(Phase::Finished),
            Controls::for_phase(Phase::Idle)
        );
        assert_eq!(
            Controls::for_phase(Phase::Running),
            Controls {
                start: false,
                pause: true,
                reset: true
            }
        );
        assert_eq!(
            Controls::for_phase(Phase::Paused),
            Controls {
                start: true,
                pause: false,
                reset: true
            }
        );
    }

    #[test]
    fn test_apply_disables_bindings() {
        let mut keys = Keys::new(3);
        keys.apply(Controls::for_phase(Phase::Running), false, false);
        assert!(!keys.start.enabled());
        assert!(keys.pause.enabled());
        assert!(keys.reset.enabled());
        assert!(!keys.presets.enabled());
        assert!(!keys.dismiss.enabled());
    }

    #[test]
    fn test_modal_only_allows_dismiss_and_quit() {
        let mut keys = Keys::new(3);
        keys.apply(Controls::for_phase(Phase::Idle), true, true);
        assert!(keys.dismiss.enabled());
        assert!(keys.quit.enabled());
        assert!(!keys.start.enabled());
        assert!(!keys.theme.enabled());
    }

    #[test]
    fn test_start_label_follows_phase() {
        let mut keys = Keys::new(3);
        keys.apply(Controls::for_phase(Phase::Paused), false, false);
        assert_eq!(keys.start.help().desc, "resume");
        keys.apply(Controls::for_phase(Phase::Idle), true, false);
        assert_eq!(keys.start.help().desc, "start");
    }

    #[test]
    fn test_preset_index() {
        let keys = Keys::new(3);
        assert_eq!(keys.preset_index(&press(KeyCode::F(1))), Some(0));
        assert_eq!(keys.preset_index(&press(KeyCode::F(3))), Some(2));
        assert_eq!(keys.preset_index(&press(KeyCode::F(4))), None);
        assert_eq!(keys.preset_index(&press(KeyCode::Char('1'))), None);
    }

    #[test]
    fn test_preset_help_range() {
        assert_eq!(Keys::new(3).presets.help().key, "f1-f3");
        assert_eq!(Keys::new(1).presets.help().key, "f1");
        assert!(!Keys::new(0).presets.enabled());
        let many = Keys::new(40);
        assert_eq!(many.presets.help().key, "f1-f12");
        assert!(many.presets.matches(&press(KeyCode::F(12))));
        assert_eq!(many.preset_index(&press(KeyCode::F(13))), None);
    }
}
