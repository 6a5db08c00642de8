//! The countdown engine.
//!
//! [`Countdown`] owns the remaining time and the run phase and is driven by
//! two kinds of events: user actions (`configure`, `start`, `pause`, `reset`)
//! and ticks. It never talks to the terminal directly. Every operation
//! returns [`Effects`] telling the host what to draw and whether the tick
//! source must be armed or disarmed; the one side effect the engine performs
//! itself is firing the injected [`AlertSink`] when the countdown reaches
//! zero.
//!
//! ```rust
//! use countdown_timer::alert::Silent;
//! use countdown_timer::engine::{Countdown, Phase, TickControl};
//!
//! let mut countdown = Countdown::new(Silent);
//! countdown.configure("0", "2").unwrap();
//!
//! let effects = countdown.start().unwrap();
//! assert_eq!(effects.tick, Some(TickControl::Arm));
//! assert_eq!(effects.display.as_deref(), Some("00:02"));
//!
//! let _ = countdown.on_tick();
//! let effects = countdown.on_tick();
//! assert!(effects.finished);
//! assert_eq!(countdown.phase(), Phase::Finished);
//! ```

use crate::alert::AlertSink;
use crate::error::{FieldKind, InvalidInput};
use tracing::{debug, info, warn};

/// Run state of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing started, or reset.
    #[default]
    Idle,
    /// Counting down; the tick source is armed.
    Running,
    /// Stopped with time left; `start` resumes.
    Paused,
    /// Reached zero. `start` re-arms from the configured total.
    Finished,
}

impl Phase {
    /// Human readable label for the status line.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "Ready",
            Phase::Running => "Running",
            Phase::Paused => "Paused",
            Phase::Finished => "Time's up!",
        }
    }
}

/// Snapshot of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountdownState {
    /// Seconds left on the clock.
    pub remaining_seconds: u64,
    /// Current phase.
    pub phase: Phase,
}

/// What the host must do with its tick source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    /// Start delivering one tick per second.
    Arm,
    /// Stop delivering ticks and drop any tick already in flight.
    Disarm,
}

/// Observable results of one engine operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct Effects {
    /// New `MM:SS` text for the clock, if it changed.
    pub display: Option<String>,
    /// Tick source command, if any.
    pub tick: Option<TickControl>,
    /// Set on the single tick that finishes the countdown.
    pub finished: bool,
}

impl Effects {
    fn none() -> Self {
        Self::default()
    }

    fn show(secs: u64) -> Self {
        Self {
            display: Some(format_clock(secs)),
            ..Self::default()
        }
    }

    fn with_tick(mut self, tick: TickControl) -> Self {
        self.tick = Some(tick);
        self
    }
}

/// Formats seconds as `MM:SS`.
///
/// Minutes are not wrapped into hours, so 100 minutes or more simply widen
/// the first field.
///
/// ```rust
/// use countdown_timer::engine::format_clock;
///
/// assert_eq!(format_clock(65), "01:05");
/// assert_eq!(format_clock(5), "00:05");
/// assert_eq!(format_clock(6000), "100:00");
/// ```
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn parse_field(text: &str, field: FieldKind) -> Result<u64, InvalidInput> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0);
    }
    text.parse::<u64>().map_err(|_| InvalidInput::NotNumeric {
        field,
        value: text.to_string(),
    })
}

/// Parses minute and second text into a positive total of seconds.
///
/// Empty fields count as zero. This is the pure half of
/// [`Countdown::configure`].
pub fn parse_duration(minutes: &str, seconds: &str) -> Result<u64, InvalidInput> {
    let m = parse_field(minutes, FieldKind::Minutes)?;
    let s = parse_field(seconds, FieldKind::Seconds)?;
    let total = m
        .checked_mul(60)
        .and_then(|m| m.checked_add(s))
        .ok_or_else(|| InvalidInput::NotNumeric {
            field: FieldKind::Minutes,
            value: minutes.trim().to_string(),
        })?;
    if total == 0 {
        return Err(InvalidInput::NotPositive);
    }
    Ok(total)
}

/// The countdown state machine.
pub struct Countdown<A> {
    state: CountdownState,
    configured: Option<u64>,
    alerts: A,
    alerts_fired: usize,
}

impl<A: AlertSink> Countdown<A> {
    /// Creates an idle countdown at `00:00` that reports through `alerts`.
    pub fn new(alerts: A) -> Self {
        Self {
            state: CountdownState::default(),
            configured: None,
            alerts,
            alerts_fired: 0,
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.state.remaining_seconds
    }

    /// Total used by the next fresh start, if one has been configured.
    pub fn configured_total(&self) -> Option<u64> {
        self.configured
    }

    /// Number of alerts fired since creation.
    pub fn alerts_fired(&self) -> usize {
        self.alerts_fired
    }

    /// The clock text for the current remaining time.
    pub fn display(&self) -> String {
        format_clock(self.state.remaining_seconds)
    }

    /// Parses the entry fields and remembers the total for the next fresh
    /// start.
    ///
    /// A failure leaves the previously configured total in place.
    pub fn configure(&mut self, minutes: &str, seconds: &str) -> Result<u64, InvalidInput> {
        match parse_duration(minutes, seconds) {
            Ok(total) => {
                debug!(total, "countdown configured");
                self.configured = Some(total);
                Ok(total)
            }
            Err(err) => {
                warn!(error = %err, "rejected countdown input");
                Err(err)
            }
        }
    }

    /// Starts or resumes the countdown.
    ///
    /// Returns `None` when there is nothing to start: no configured total and
    /// nothing paused. Starting while already running is a no-op that returns
    /// empty effects.
    pub fn start(&mut self) -> Option<Effects> {
        match self.state.phase {
            Phase::Running => {
                debug!("start ignored, already running");
                Some(Effects::none())
            }
            Phase::Paused => {
                info!(remaining = self.state.remaining_seconds, "countdown resumed");
                self.state.phase = Phase::Running;
                Some(Effects::show(self.state.remaining_seconds).with_tick(TickControl::Arm))
            }
            Phase::Idle | Phase::Finished => {
                let Some(total) = self.configured.filter(|t| *t > 0) else {
                    warn!(phase = ?self.state.phase, "start rejected, no time configured");
                    return None;
                };
                info!(total, "countdown started");
                self.state.remaining_seconds = total;
                self.state.phase = Phase::Running;
                Some(Effects::show(total).with_tick(TickControl::Arm))
            }
        }
    }

    /// Advances the countdown by one second.
    ///
    /// Ticks outside [`Phase::Running`] are ignored.
    pub fn on_tick(&mut self) -> Effects {
        if self.state.phase != Phase::Running {
            debug!(phase = ?self.state.phase, "tick ignored");
            return Effects::none();
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        debug!(remaining = self.state.remaining_seconds, "tick");

        if self.state.remaining_seconds > 0 {
            return Effects::show(self.state.remaining_seconds);
        }

        self.state.phase = Phase::Finished;
        self.fire_alert();
        let mut effects = Effects::show(0).with_tick(TickControl::Disarm);
        effects.finished = true;
        effects
    }

    /// Pauses a running countdown, keeping the remaining time.
    ///
    /// Returns `None` and changes nothing unless the countdown is running.
    pub fn pause(&mut self) -> Option<Effects> {
        if self.state.phase != Phase::Running {
            warn!(phase = ?self.state.phase, "pause rejected, countdown not running");
            return None;
        }
        info!(remaining = self.state.remaining_seconds, "countdown paused");
        self.state.phase = Phase::Paused;
        Some(Effects::none().with_tick(TickControl::Disarm))
    }

    /// Back to `Idle` at `00:00` from any phase.
    pub fn reset(&mut self) -> Effects {
        info!(phase = ?self.state.phase, "countdown reset");
        self.state = CountdownState::default();
        Effects::show(0).with_tick(TickControl::Disarm)
    }

    fn fire_alert(&mut self) {
        self.alerts_fired += 1;
        info!(sink = self.alerts.name(), "countdown finished");
        if let Err(err) = self.alerts.alert() {
            warn!(sink = self.alerts.name(), error = %err, "alert failed");
        }
    }
}

impl<A: AlertSink> std::fmt::Debug for Countdown<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Countdown")
            .field("state", &self.state)
            .field("configured", &self.configured)
            .field("alerts", &self.alerts.name())
            .field("alerts_fired", &self.alerts_fired)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::Recording;

    fn countdown() -> (Countdown<Recording>, Recording) {
        let sink = Recording::default();
        (Countdown::new(sink.clone()), sink)
    }

    fn started(secs: u64) -> (Countdown<Recording>, Recording) {
        let (mut c, sink) = countdown();
        c.configure("", &secs.to_string()).unwrap();
        let _ = c.start().unwrap();
        (c, sink)
    }

    #[test]
    fn test_initial_state() {
        let (c, _) = countdown();
        assert_eq!(c.state(), CountdownState::default());
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.remaining_seconds(), 0);
        assert_eq!(c.display(), "00:00");
        assert_eq!(c.configured_total(), None);
    }

    #[test]
    fn test_configure_totals() {
        let (mut c, _) = countdown();
        assert_eq!(c.configure("1", "30"), Ok(90));
        assert_eq!(c.configure("", "45"), Ok(45));
        assert_eq!(c.configure("2", ""), Ok(120));
        assert_eq!(c.configure(" 3 ", " 0 "), Ok(180));
        assert_eq!(c.configure("0", "75"), Ok(75));
        assert_eq!(c.configured_total(), Some(75));
    }

    #[test]
    fn test_configure_rejects_empty_fields() {
        let (mut c, _) = countdown();
        assert_eq!(c.configure("", ""), Err(InvalidInput::NotPositive));
        assert_eq!(c.configure("0", "0"), Err(InvalidInput::NotPositive));
    }

    #[test]
    fn test_configure_rejects_non_numeric() {
        let (mut c, _) = countdown();
        assert_eq!(
            c.configure("abc", "5"),
            Err(InvalidInput::NotNumeric {
                field: FieldKind::Minutes,
                value: "abc".into()
            })
        );
        assert!(matches!(
            c.configure("1", "-5"),
            Err(InvalidInput::NotNumeric {
                field: FieldKind::Seconds,
                ..
            })
        ));
        assert!(matches!(
            c.configure("1.5", ""),
            Err(InvalidInput::NotNumeric { .. })
        ));
    }

    #[test]
    fn test_configure_rejects_overflow() {
        let (mut c, _) = countdown();
        let huge = u64::MAX.to_string();
        assert!(matches!(
            c.configure(&huge, "0"),
            Err(InvalidInput::NotNumeric { .. })
        ));
    }

    #[test]
    fn test_failed_configure_keeps_previous_total() {
        let (mut c, _) = countdown();
        c.configure("1", "0").unwrap();
        assert!(c.configure("x", "").is_err());
        assert_eq!(c.configured_total(), Some(60));
    }

    #[test]
    fn test_configure_then_start() {
        for (m, s) in [(0u64, 1u64), (1, 0), (1, 5), (25, 0), (0, 59), (120, 30)] {
            let (mut c, _) = countdown();
            c.configure(&m.to_string(), &s.to_string()).unwrap();
            let effects = c.start().unwrap();
            assert_eq!(c.remaining_seconds(), m * 60 + s);
            assert_eq!(c.phase(), Phase::Running);
            assert_eq!(effects.tick, Some(TickControl::Arm));
            assert_eq!(effects.display, Some(format_clock(m * 60 + s)));
        }
    }

    #[test]
    fn test_start_without_configure_is_rejected() {
        let (mut c, _) = countdown();
        assert!(c.start().is_none());
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn test_double_start_is_noop() {
        let (mut c, _) = started(10);
        let _ = c.on_tick();
        let effects = c.start().unwrap();
        assert_eq!(effects, Effects::default());
        assert_eq!(c.remaining_seconds(), 9);
        assert_eq!(c.phase(), Phase::Running);
    }

    #[test]
    fn test_tick_decrements_and_displays() {
        let (mut c, _) = started(66);
        let effects = c.on_tick();
        assert_eq!(c.remaining_seconds(), 65);
        assert_eq!(effects.display.as_deref(), Some("01:05"));
        assert_eq!(effects.tick, None);
        assert!(!effects.finished);
    }

    #[test]
    fn test_ticks_to_finish_fire_one_alert() {
        let total = 5;
        let (mut c, sink) = started(total);
        let mut finished = 0;
        for _ in 0..total {
            if c.on_tick().finished {
                finished += 1;
            }
        }
        assert_eq!(c.phase(), Phase::Finished);
        assert_eq!(c.remaining_seconds(), 0);
        assert_eq!(finished, 1);
        assert_eq!(sink.count(), 1);
        assert_eq!(c.alerts_fired(), 1);
    }

    #[test]
    fn test_finishing_tick_disarms() {
        let (mut c, _) = started(1);
        let effects = c.on_tick();
        assert!(effects.finished);
        assert_eq!(effects.tick, Some(TickControl::Disarm));
        assert_eq!(effects.display.as_deref(), Some("00:00"));
    }

    #[test]
    fn test_tick_after_finish_is_ignored() {
        let (mut c, sink) = started(1);
        let _ = c.on_tick();
        let effects = c.on_tick();
        assert_eq!(effects, Effects::default());
        assert_eq!(sink.count(), 1);
        assert_eq!(c.phase(), Phase::Finished);
    }

    #[test]
    fn test_tick_while_idle_or_paused_is_ignored() {
        let (mut c, _) = countdown();
        assert_eq!(c.on_tick(), Effects::default());

        let (mut c, _) = started(10);
        let _ = c.pause().unwrap();
        assert_eq!(c.on_tick(), Effects::default());
        assert_eq!(c.remaining_seconds(), 10);
    }

    #[test]
    fn test_pause_then_start_resumes() {
        let (mut c, _) = started(30);
        let _ = c.on_tick();
        let _ = c.on_tick();
        let effects = c.pause().unwrap();
        assert_eq!(effects.tick, Some(TickControl::Disarm));
        assert_eq!(c.phase(), Phase::Paused);
        assert_eq!(c.remaining_seconds(), 28);

        let effects = c.start().unwrap();
        assert_eq!(c.phase(), Phase::Running);
        assert_eq!(c.remaining_seconds(), 28);
        assert_eq!(effects.tick, Some(TickControl::Arm));
    }

    #[test]
    fn test_resume_ignores_reconfigured_total() {
        let (mut c, _) = started(30);
        let _ = c.pause().unwrap();
        c.configure("5", "0").unwrap();
        let _ = c.start().unwrap();
        assert_eq!(c.remaining_seconds(), 30);
    }

    #[test]
    fn test_pause_rejected_outside_running() {
        let (mut c, _) = countdown();
        assert!(c.pause().is_none());
        assert_eq!(c.phase(), Phase::Idle);

        let (mut c, _) = started(10);
        let _ = c.pause().unwrap();
        assert!(c.pause().is_none());
        assert_eq!(c.phase(), Phase::Paused);

        let (mut c, _) = started(1);
        let _ = c.on_tick();
        assert!(c.pause().is_none());
        assert_eq!(c.phase(), Phase::Finished);
    }

    #[test]
    fn test_reset_from_every_phase() {
        let (mut idle, _) = countdown();
        let (mut running, _) = started(10);
        let (mut paused, _) = started(10);
        let _ = paused.pause().unwrap();
        let (mut finished, _) = started(1);
        let _ = finished.on_tick();

        for c in [&mut idle, &mut running, &mut paused, &mut finished] {
            let effects = c.reset();
            assert_eq!(c.remaining_seconds(), 0);
            assert_eq!(c.phase(), Phase::Idle);
            assert_eq!(c.display(), "00:00");
            assert_eq!(effects.display.as_deref(), Some("00:00"));
            assert_eq!(effects.tick, Some(TickControl::Disarm));
        }
    }

    #[test]
    fn test_finished_is_rearmable() {
        let (mut c, sink) = started(2);
        let _ = c.on_tick();
        let _ = c.on_tick();
        assert_eq!(c.phase(), Phase::Finished);

        let _ = c.start().unwrap();
        assert_eq!(c.phase(), Phase::Running);
        assert_eq!(c.remaining_seconds(), 2);
        let _ = c.on_tick();
        let _ = c.on_tick();
        assert_eq!(sink.count(), 2);
    }

    #[test]
    fn test_start_after_reset_uses_configured_total() {
        let (mut c, _) = started(40);
        let _ = c.reset();
        let _ = c.start().unwrap();
        assert_eq!(c.remaining_seconds(), 40);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(5), "00:05");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(600), "10:00");
        assert_eq!(format_clock(5999), "99:59");
        assert_eq!(format_clock(6000), "100:00");
    }

    #[test]
    fn test_phase_labels() {
        assert_eq!(Phase::Idle.label(), "Ready");
        assert_eq!(Phase::Finished.label(), "Time's up!");
    }
}
