//! The countdown timer application model.
//!
//! [`App`] is the bubbletea-rs model that hosts the countdown engine. It owns
//! the entry fields, the tick source, the key map and the theme, turns key
//! presses into engine operations, and applies the [`Effects`] the engine
//! hands back: redrawing the clock, arming or disarming the ticker, and
//! raising the "time's up" notification.
//!
//! ```rust,no_run
//! use bubbletea_rs::Program;
//! use countdown_timer::app::{self, App};
//! use countdown_timer::config::{Settings, Startup};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! app::set_startup(Startup {
//!     settings: Settings::default(),
//!     minutes: Some("5".into()),
//!     seconds: None,
//! });
//! let program = Program::<App>::builder().alt_screen(true).build()?;
//! program.run().await?;
//! # Ok(())
//! # }
//! ```

use crate::alert::{self, AlertSink};
use crate::config::Startup;
use crate::controls::{Controls, Keys};
use crate::engine::{Countdown, Effects, Phase, TickControl};
use crate::field;
use crate::help;
use crate::modal::Modal;
use crate::theme::{Mode, Theme};
use crate::ticker::Ticker;
use crate::Component;
use bubbletea_rs::{quit, Cmd, KeyMsg, Model as BubbleTeaModel, Msg, WindowSizeMsg};
use once_cell::sync::OnceCell;
use tracing::{debug, info};

static STARTUP: OnceCell<Startup> = OnceCell::new();

/// Hands startup configuration to [`App::init`], which takes no arguments.
///
/// Only the first call has an effect; returns whether this call won.
pub fn set_startup(startup: Startup) -> bool {
    STARTUP.set(startup).is_ok()
}

/// Which entry field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Minutes,
    Seconds,
}

/// The application model.
pub struct App {
    countdown: Countdown<Box<dyn AlertSink>>,
    ticker: Ticker,
    minutes: field::Model,
    seconds: field::Model,
    focus: Focus,
    clock: String,
    presets: Vec<u64>,
    keys: Keys,
    help: help::Model,
    theme: Theme,
    modal: Option<Modal>,
}

impl App {
    /// Builds the app with the alert sink described by the settings.
    pub fn new(startup: Startup) -> Self {
        let alerts = alert::from_settings(&startup.settings);
        Self::with_alerts(startup, alerts)
    }

    /// Builds the app with an explicit alert sink.
    pub fn with_alerts(startup: Startup, alerts: Box<dyn AlertSink>) -> Self {
        let settings = startup.settings;
        let countdown = Countdown::new(alerts);
        let clock = countdown.display();

        let mut minutes = field::new("Minutes");
        let mut seconds = field::new("Seconds");
        if let Some(m) = startup.minutes.as_deref() {
            minutes.set_value(m);
        }
        if let Some(s) = startup.seconds.as_deref() {
            seconds.set_value(s);
        }
        let _ = minutes.focus();

        let mut app = Self {
            countdown,
            ticker: Ticker::new(),
            minutes,
            seconds,
            focus: Focus::Minutes,
            clock,
            keys: Keys::new(settings.presets.len()),
            presets: settings.presets,
            help: help::Model::new(Mode::from_dark(settings.dark_mode)),
            theme: Theme::for_mode(Mode::from_dark(settings.dark_mode)),
            modal: None,
        };
        app.sync_controls();
        app
    }

    pub fn phase(&self) -> Phase {
        self.countdown.phase()
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.countdown.remaining_seconds()
    }

    /// The `MM:SS` text currently shown.
    pub fn clock(&self) -> &str {
        &self.clock
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn theme_mode(&self) -> Mode {
        self.theme.mode
    }

    /// Current text of the minutes and seconds fields.
    pub fn fields(&self) -> (&str, &str) {
        (self.minutes.value(), self.seconds.value())
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Fills the fields with `minutes` and zero seconds. Does not touch the
    /// countdown itself.
    pub fn preset(&mut self, minutes: u64) {
        debug!(minutes, "preset applied");
        self.minutes.set_value(&minutes.to_string());
        self.seconds.set_value("0");
    }

    fn editing(&self) -> bool {
        matches!(self.phase(), Phase::Idle | Phase::Finished)
    }

    fn focused_field(&mut self) -> &mut field::Model {
        match self.focus {
            Focus::Minutes => &mut self.minutes,
            Focus::Seconds => &mut self.seconds,
        }
    }

    fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Minutes => Focus::Seconds,
            Focus::Seconds => Focus::Minutes,
        };
        self.sync_controls();
    }

    /// Brings field focus and key bindings in line with the phase and modal.
    fn sync_controls(&mut self) {
        let editing = self.editing();
        self.minutes.blur();
        self.seconds.blur();
        if editing && self.modal.is_none() {
            let _ = self.focused_field().focus();
        }
        self.keys.apply(
            Controls::for_phase(self.phase()),
            editing,
            self.modal.is_some(),
        );
    }

    fn apply(&mut self, effects: Effects) -> Option<Cmd> {
        if let Some(text) = effects.display {
            self.clock = text;
        }
        if effects.finished {
            self.modal = Some(Modal::finished());
        }
        let cmd = match effects.tick {
            Some(TickControl::Arm) => self.ticker.arm(),
            Some(TickControl::Disarm) => {
                self.ticker.disarm();
                None
            }
            None => None,
        };
        self.sync_controls();
        cmd
    }

    /// Start, or resume when paused. A fresh start reads the fields first.
    pub fn start(&mut self) -> Option<Cmd> {
        if self.phase() != Phase::Paused {
            if let Err(err) = self
                .countdown
                .configure(self.minutes.value(), self.seconds.value())
            {
                self.modal = Some(Modal::invalid_input(&err));
                self.sync_controls();
                return None;
            }
        }
        let effects = self.countdown.start()?;
        self.apply(effects)
    }

    pub fn pause(&mut self) -> Option<Cmd> {
        let effects = self.countdown.pause()?;
        self.apply(effects)
    }

    pub fn reset(&mut self) -> Option<Cmd> {
        let effects = self.countdown.reset();
        self.apply(effects)
    }

    fn tick(&mut self) -> Option<Cmd> {
        let effects = self.countdown.on_tick();
        let _ = self.apply(effects);
        self.ticker.next()
    }

    pub fn toggle_theme(&mut self) {
        self.theme.toggle();
        self.help.set_mode(self.theme.mode);
        info!(mode = ?self.theme.mode, "theme toggled");
    }

    /// Closes the notification, if one is shown.
    pub fn dismiss(&mut self) {
        if self.modal.take().is_some() {
            self.sync_controls();
        }
    }

    fn handle_key(&mut self, msg: &Msg, key: &KeyMsg) -> Option<Cmd> {
        if self.keys.quit.matches(key) {
            info!("quit requested");
            return Some(quit());
        }

        if self.modal.is_some() {
            if self.keys.dismiss.matches(key) {
                self.dismiss();
            }
            return None;
        }

        if self.editing() && self.focused_field().update(msg) {
            return None;
        }

        if self.keys.start.matches(key) {
            return self.start();
        }
        if self.keys.pause.matches(key) {
            return self.pause();
        }
        if self.keys.reset.matches(key) {
            return self.reset();
        }
        if self.keys.next_field.matches(key) || self.keys.prev_field.matches(key) {
            self.switch_focus();
            return None;
        }
        if let Some(index) = self.keys.preset_index(key) {
            if let Some(minutes) = self.presets.get(index).copied() {
                self.preset(minutes);
            }
            return None;
        }
        if self.keys.theme.matches(key) {
            self.toggle_theme();
            return None;
        }
        if self.keys.help.matches(key) {
            self.help.show_all = !self.help.show_all;
        }
        None
    }

    fn presets_view(&self) -> String {
        let items: Vec<String> = self
            .presets
            .iter()
            .take(crate::controls::MAX_PRESET_KEYS)
            .enumerate()
            .map(|(i, m)| format!("F{} {} min", i + 1, m))
            .collect();
        if items.is_empty() {
            return String::new();
        }
        self.theme
            .preset
            .render(&format!("Quick presets: {}", items.join("  ")))
    }
}

impl BubbleTeaModel for App {
    fn init() -> (Self, Option<Cmd>) {
        let startup = STARTUP.get().cloned().unwrap_or_default();
        (App::new(startup), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if self.ticker.accepts_msg(&msg) {
            return self.tick();
        }

        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.help.width = usize::from(size.width).saturating_sub(4);
            return None;
        }

        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(&msg, key);
        }

        None
    }

    fn view(&self) -> String {
        let mut sections = vec![self.theme.title.render("Countdown Timer")];

        match &self.modal {
            Some(modal) => sections.push(modal.view(&self.theme)),
            None => {
                sections.push(format!(
                    "{}    {}",
                    self.minutes.view(&self.theme),
                    self.seconds.view(&self.theme)
                ));
                sections.push(self.theme.clock.render(&self.clock));
                sections.push(self.theme.status.render(self.phase().label()));
                let presets = self.presets_view();
                if !presets.is_empty() {
                    sections.push(presets);
                }
            }
        }

        sections.push(self.help.view(&self.keys));
        self.theme.app.render(&sections.join("\n\n"))
    }
}
