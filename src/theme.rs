//! Light and dark palettes.

use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Which palette is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Light,
    Dark,
}

impl Mode {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Mode::Dark
        } else {
            Mode::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Mode::Light => Mode::Dark,
            Mode::Dark => Mode::Light,
        }
    }
}

/// Every style the app draws with.
#[derive(Debug, Clone)]
pub struct Theme {
    pub mode: Mode,
    /// Wraps the whole screen; carries the background in dark mode.
    pub app: Style,
    pub title: Style,
    pub label: Style,
    pub field: Style,
    pub field_focused: Style,
    pub cursor: Style,
    pub clock: Style,
    pub status: Style,
    pub preset: Style,
    pub modal: Style,
    pub modal_error_title: Style,
    pub modal_info_title: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

fn boxed(style: Style) -> Style {
    style
        .border_style(lipgloss::normal_border())
        .border_top(true)
        .border_bottom(true)
        .border_left(true)
        .border_right(true)
        .padding(1, 4, 1, 4)
}

impl Theme {
    pub fn light() -> Self {
        Self {
            mode: Mode::Light,
            app: Style::new().padding(1, 2, 1, 2),
            title: Style::new().foreground(Color::from("#1e1e1e")).bold(true),
            label: Style::new().foreground(Color::from("#444444")),
            field: Style::new().foreground(Color::from("#1e1e1e")),
            field_focused: Style::new().foreground(Color::from("#1e1e1e")).bold(true),
            cursor: Style::new().reverse(true),
            clock: Style::new()
                .foreground(Color::from("#D00000"))
                .bold(true)
                .padding(1, 0, 1, 0),
            status: Style::new().foreground(Color::from("#777777")),
            preset: Style::new().foreground(Color::from("#555555")),
            modal: boxed(Style::new().foreground(Color::from("#1e1e1e"))),
            modal_error_title: Style::new().foreground(Color::from("#D00000")).bold(true),
            modal_info_title: Style::new().foreground(Color::from("#005FD7")).bold(true),
        }
    }

    pub fn dark() -> Self {
        Self {
            mode: Mode::Dark,
            app: Style::new()
                .background(Color::from("#1e1e1e"))
                .padding(1, 2, 1, 2),
            title: Style::new().foreground(Color::from("#FFFFFF")).bold(true),
            label: Style::new().foreground(Color::from("#DDDDDD")),
            field: Style::new()
                .foreground(Color::from("#FFFFFF"))
                .background(Color::from("#333333")),
            field_focused: Style::new()
                .foreground(Color::from("#FFFFFF"))
                .background(Color::from("#333333"))
                .bold(true),
            cursor: Style::new().reverse(true),
            clock: Style::new()
                .foreground(Color::from("#32CD32"))
                .bold(true)
                .padding(1, 0, 1, 0),
            status: Style::new().foreground(Color::from("#AAAAAA")),
            preset: Style::new().foreground(Color::from("#CCCCCC")),
            modal: boxed(Style::new().foreground(Color::from("#FFFFFF"))),
            modal_error_title: Style::new().foreground(Color::from("#FF5F5F")).bold(true),
            modal_info_title: Style::new().foreground(Color::from("#32CD32")).bold(true),
        }
    }

    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Light => Self::light(),
            Mode::Dark => Self::dark(),
        }
    }

    /// Swaps to the other palette.
    pub fn toggle(&mut self) {
        *self = Self::for_mode(self.mode.toggled());
    }
}
