//! Help bar built from the app's key bindings.
//!
//! By default a single line lists only the bindings that are live in the
//! current phase, so it changes as the countdown starts, pauses and finishes.
//! `?` expands it into columns with the descriptions aligned. Colours follow
//! the active theme [`Mode`].

use crate::key::{Binding, KeyMap};
use crate::theme::Mode;
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

const SEPARATOR: &str = " • ";
const COLUMN_GAP: &str = "    ";
const ELLIPSIS: &str = "…";

#[derive(Debug, Clone)]
pub struct Styles {
    pub key: Style,
    pub desc: Style,
    pub separator: Style,
}

impl Styles {
    pub fn for_mode(mode: Mode) -> Self {
        let (key, desc, separator) = match mode {
            Mode::Light => ("#6C6C6C", "#9E9E9E", "#D0D0D0"),
            Mode::Dark => ("#BDBDBD", "#7A7A7A", "#4E4E4E"),
        };
        Self {
            key: Style::new().foreground(Color::from(key)).inline(true),
            desc: Style::new().foreground(Color::from(desc)).inline(true),
            separator: Style::new().foreground(Color::from(separator)).inline(true),
        }
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::for_mode(Mode::default())
    }
}

/// The help bar.
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// Show the column view instead of the single line.
    pub show_all: bool,
    /// Maximum width in cells; 0 means unlimited.
    pub width: usize,
    styles: Styles,
}

/// A binding's help rendered once, with its unstyled width.
struct Entry {
    width: usize,
    text: String,
}

fn live<'a>(bindings: &'a [&'a Binding]) -> impl Iterator<Item = &'a Binding> + 'a {
    bindings.iter().copied().filter(|b| b.enabled())
}

impl Model {
    pub fn new(mode: Mode) -> Self {
        Self {
            styles: Styles::for_mode(mode),
            ..Self::default()
        }
    }

    /// Recolours the bar for a theme change.
    pub fn set_mode(&mut self, mode: Mode) {
        self.styles = Styles::for_mode(mode);
    }

    pub fn view<K: KeyMap>(&self, keymap: &K) -> String {
        if self.show_all {
            self.full_view(&keymap.full_help())
        } else {
            self.short_view(&keymap.short_help())
        }
    }

    fn entry(&self, binding: &Binding, key_width: usize) -> Entry {
        let help = binding.help();
        let key_cells = lipgloss::width_visible(&help.key);
        let pad = key_width.saturating_sub(key_cells);
        Entry {
            width: key_cells + pad + 1 + lipgloss::width_visible(&help.desc),
            text: format!(
                "{}{} {}",
                self.styles.key.render(&help.key),
                " ".repeat(pad),
                self.styles.desc.render(&help.desc)
            ),
        }
    }

    fn fits(&self, used: usize, extra: usize) -> bool {
        self.width == 0 || used + extra <= self.width
    }

    /// One line of live bindings. Entries that do not fit are replaced by an
    /// ellipsis.
    fn short_view(&self, bindings: &[&Binding]) -> String {
        let separator = self.styles.separator.render(SEPARATOR);
        let sep_width = lipgloss::width_visible(SEPARATOR);
        let mut line = String::new();
        let mut used = 0;

        for binding in live(bindings) {
            let entry = self.entry(binding, 0);
            let gap = if used == 0 { 0 } else { sep_width };
            if !self.fits(used, gap + entry.width) {
                if self.fits(used, 1 + lipgloss::width_visible(ELLIPSIS)) {
                    line.push(' ');
                    line.push_str(&self.styles.separator.render(ELLIPSIS));
                }
                break;
            }
            if gap > 0 {
                line.push_str(&separator);
            }
            line.push_str(&entry.text);
            used += gap + entry.width;
        }
        line
    }

    /// Columns of live bindings, descriptions aligned within each column.
    /// Columns that would overflow the width are left out.
    fn full_view(&self, groups: &[Vec<&Binding>]) -> String {
        let gap = self.styles.separator.render(COLUMN_GAP);
        let gap_width = lipgloss::width_visible(COLUMN_GAP);
        let mut columns: Vec<String> = Vec::new();
        let mut used = 0;

        for group in groups {
            let key_width = live(group)
                .map(|b| lipgloss::width_visible(&b.help().key))
                .max();
            let Some(key_width) = key_width else {
                continue;
            };
            let entries: Vec<Entry> = live(group).map(|b| self.entry(b, key_width)).collect();
            let width = entries.iter().map(|e| e.width).max().unwrap_or(0);
            let spacing = if columns.is_empty() { 0 } else { gap_width };
            if !self.fits(used, spacing + width) {
                break;
            }
            used += spacing + width;
            let rows: Vec<String> = entries.into_iter().map(|e| e.text).collect();
            columns.push(rows.join("\n"));
        }

        let mut parts: Vec<&str> = Vec::new();
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                parts.push(&gap);
            }
            parts.push(column);
        }
        if parts.is_empty() {
            return String::new();
        }
        lipgloss::join_horizontal(lipgloss::TOP, &parts)
    }
}
