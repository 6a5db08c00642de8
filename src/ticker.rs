//! Tick source for the countdown.
//!
//! A [`Ticker`] produces one [`TickMsg`] per interval while it is armed.
//! Each tick is a one-shot bubbletea command; the host asks for the next one
//! after handling the current tick, so there is never more than one tick in
//! flight.
//!
//! Disarming bumps the ticker's generation tag. A tick that was already
//! scheduled when the ticker was disarmed (or re-armed) still arrives, but
//! carries the old tag and is rejected by [`Ticker::accepts`]. That keeps a
//! pause or reset from being followed by a stray decrement.
//!
//! ```rust
//! use countdown_timer::ticker::Ticker;
//!
//! let mut ticker = Ticker::new();
//! assert!(!ticker.armed());
//!
//! let cmd = ticker.arm();
//! assert!(cmd.is_some());
//! assert!(ticker.armed());
//!
//! // Arming twice does not schedule a second tick.
//! assert!(ticker.arm().is_none());
//!
//! ticker.disarm();
//! assert!(!ticker.armed());
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

// Internal ID management for ticker instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Message delivered once per interval while a ticker is armed.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The ticker that scheduled this tick.
    pub id: i64,
    /// Generation the ticker was in when the tick was scheduled.
    tag: i64,
}

/// Armable one-second tick source.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    id: i64,
    tag: i64,
    armed: bool,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ticker {
    /// A disarmed ticker with a one second interval.
    pub fn new() -> Self {
        Self {
            interval: Duration::from_secs(1),
            id: next_id(),
            tag: 0,
            armed: false,
        }
    }

    pub fn armed(&self) -> bool {
        self.armed
    }

    /// Arms the ticker and returns the command for the first tick.
    ///
    /// Returns `None` if the ticker is already armed.
    pub fn arm(&mut self) -> Option<Cmd> {
        if self.armed {
            return None;
        }
        self.armed = true;
        self.tag += 1;
        Some(self.tick())
    }

    /// Disarms the ticker. Any tick already scheduled becomes stale.
    pub fn disarm(&mut self) {
        self.armed = false;
        self.tag += 1;
    }

    /// Whether `msg` is a live tick for this ticker.
    pub fn accepts(&self, msg: &TickMsg) -> bool {
        self.armed && msg.id == self.id && msg.tag == self.tag
    }

    /// Downcasts `msg` and checks it with [`Ticker::accepts`].
    pub fn accepts_msg(&self, msg: &Msg) -> bool {
        msg.downcast_ref::<TickMsg>()
            .is_some_and(|tick| self.accepts(tick))
    }

    /// Schedules the next tick, if still armed.
    pub fn next(&self) -> Option<Cmd> {
        self.armed.then(|| self.tick())
    }

    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.interval, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    /// The message the currently scheduled tick will carry.
    #[cfg(test)]
    pub(crate) fn pending_tick(&self) -> TickMsg {
        TickMsg {
            id: self.id,
            tag: self.tag,
        }
    }
}
