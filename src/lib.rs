//! # countdown-timer
//!
//! A terminal countdown timer built on [bubbletea-rs](https://docs.rs/bubbletea-rs).
//!
//! Enter minutes and seconds, press enter, and the clock counts down once a
//! second. The countdown can be paused, resumed and reset; when it reaches
//! zero an alert sounds and a notification has to be dismissed.
//!
//! ## Layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Countdown state machine, duration parsing, clock formatting |
//! | [`ticker`] | Once-a-second tick source with stale-tick rejection |
//! | [`alert`] | Sinks that make the "time's up" noise |
//! | [`app`] | The bubbletea model tying everything to the terminal |
//! | [`field`], [`help`], [`modal`], [`theme`] | View pieces |
//! | [`key`], [`controls`] | Key bindings and per-phase control availability |
//! | [`config`], [`logging`], [`error`] | Settings, CLI, log file, errors |
//!
//! The engine is usable on its own:
//!
//! ```rust
//! use countdown_timer::prelude::*;
//!
//! let mut countdown = Countdown::new(Silent);
//! assert_eq!(countdown.configure("1", "30"), Ok(90));
//! let effects = countdown.start().unwrap();
//! assert_eq!(effects.display.as_deref(), Some("01:30"));
//! assert_eq!(countdown.phase(), Phase::Running);
//! ```

pub mod alert;
pub mod app;
pub mod config;
pub mod controls;
pub mod engine;
pub mod error;
pub mod field;
pub mod help;
pub mod key;
pub mod logging;
pub mod modal;
pub mod theme;
pub mod ticker;

use bubbletea_rs::Cmd;

/// Components that can take and lose keyboard focus.
///
/// A focused component receives key presses and draws itself as active.
pub trait Component {
    /// Gives the component focus. May return a command to run on focus.
    fn focus(&mut self) -> Option<Cmd>;

    fn blur(&mut self);

    fn focused(&self) -> bool;
}

pub use alert::{AlertSink, CommandAlert, Fallback, Silent, TerminalBell};
pub use app::App;
pub use config::{Cli, Settings, Sound, Startup};
pub use engine::{
    format_clock, parse_duration, Countdown, CountdownState, Effects, Phase, TickControl,
};
pub use error::{Error, FieldKind, InvalidInput, Result};
pub use help::Model as HelpModel;
pub use key::{new_binding, with_help, with_keys, with_keys_str, Binding, KeyMap, KeyPress};
pub use ticker::{TickMsg, Ticker};

/// Common imports for driving a countdown.
///
/// ```rust
/// use countdown_timer::prelude::*;
///
/// assert_eq!(format_clock(65), "01:05");
/// assert_eq!(parse_duration("", "5"), Ok(5));
/// ```
pub mod prelude {
    pub use crate::alert::{AlertSink, Silent, TerminalBell};
    pub use crate::engine::{
        format_clock, parse_duration, Countdown, Effects, Phase, TickControl,
    };
    pub use crate::error::InvalidInput;
    pub use crate::ticker::Ticker;
    pub use crate::Component;
}
