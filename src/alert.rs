//! Alert sinks: the audible half of the "time's up" notification.
//!
//! The countdown engine only knows the [`AlertSink`] capability. Which
//! concrete sink is used is decided once at startup by [`from_settings`],
//! so platform differences never leak into the engine.

use crate::config::{Settings, Sound};
use crate::error::{Error, Result};
use std::io::Write;
use std::process::{Child, Command, Stdio};
use tracing::{debug, warn};

/// Something that can make the user notice the countdown has finished.
pub trait AlertSink: Send {
    /// Fires the alert once.
    fn alert(&mut self) -> Result<()>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

impl AlertSink for Box<dyn AlertSink> {
    fn alert(&mut self) -> Result<()> {
        (**self).alert()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Rings the terminal bell (BEL, `0x07`).
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl AlertSink for TerminalBell {
    fn alert(&mut self) -> Result<()> {
        let mut out = std::io::stdout();
        out.write_all(b"\x07").map_err(Error::Bell)?;
        out.flush().map_err(Error::Bell)
    }

    fn name(&self) -> &'static str {
        "bell"
    }
}

/// Plays a sound by spawning an external program, e.g. `afplay` or `paplay`.
///
/// The child is not waited on; a long sound never blocks the UI. Children
/// that have exited are reaped on the next alert, or by [`CommandAlert::reap`].
#[derive(Debug)]
pub struct CommandAlert {
    argv: Vec<String>,
    children: Vec<Child>,
}

impl CommandAlert {
    /// Creates a sink from a program and its arguments.
    pub fn new(argv: Vec<String>) -> Result<Self> {
        if argv.first().map_or(true, |p| p.trim().is_empty()) {
            return Err(Error::EmptyAlertCommand);
        }
        Ok(Self {
            argv,
            children: Vec::new(),
        })
    }

    /// The program that will be spawned.
    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// Children from earlier alerts not yet seen to exit.
    pub fn running(&self) -> usize {
        self.children.len()
    }

    /// Collects children that have exited.
    pub fn reap(&mut self) {
        self.children.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                debug!(pid = child.id(), %status, "alert command exited");
                false
            }
            Ok(None) => true,
            Err(err) => {
                warn!(pid = child.id(), error = %err, "lost track of alert command");
                false
            }
        });
    }
}

impl AlertSink for CommandAlert {
    fn alert(&mut self) -> Result<()> {
        self.reap();
        let program = self.program().to_string();
        debug!(%program, "spawning alert command");
        let child = Command::new(&program)
            .args(&self.argv[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| Error::AlertCommand { program, source })?;
        self.children.push(child);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "command"
    }
}

/// Does nothing. Used with `--no-sound`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AlertSink for Silent {
    fn alert(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "silent"
    }
}

/// Tries `primary`, and rings `secondary` when it fails.
pub struct Fallback<P, S> {
    primary: P,
    secondary: S,
}

impl<P: AlertSink, S: AlertSink> Fallback<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl<P: AlertSink, S: AlertSink> AlertSink for Fallback<P, S> {
    fn alert(&mut self) -> Result<()> {
        match self.primary.alert() {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(
                    sink = self.primary.name(),
                    error = %err,
                    "alert failed, falling back to {}",
                    self.secondary.name()
                );
                self.secondary.alert()
            }
        }
    }

    fn name(&self) -> &'static str {
        "fallback"
    }
}

/// The system sound for the current platform, with the bell as fallback.
#[cfg(target_os = "macos")]
fn system_sound() -> Box<dyn AlertSink> {
    let argv = vec![
        "afplay".to_string(),
        "/System/Library/Sounds/Glass.aiff".to_string(),
    ];
    match CommandAlert::new(argv) {
        Ok(cmd) => Box::new(Fallback::new(cmd, TerminalBell)),
        Err(_) => Box::new(TerminalBell),
    }
}

#[cfg(target_os = "windows")]
fn system_sound() -> Box<dyn AlertSink> {
    let argv = vec![
        "powershell".to_string(),
        "-NoProfile".to_string(),
        "-Command".to_string(),
        "[console]::beep(1000,500)".to_string(),
    ];
    match CommandAlert::new(argv) {
        Ok(cmd) => Box::new(Fallback::new(cmd, TerminalBell)),
        Err(_) => Box::new(TerminalBell),
    }
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn system_sound() -> Box<dyn AlertSink> {
    Box::new(TerminalBell)
}

/// Picks the alert sink described by `settings`.
pub fn from_settings(settings: &Settings) -> Box<dyn AlertSink> {
    match settings.sound {
        Sound::Silent => Box::new(Silent),
        Sound::Bell => Box::new(TerminalBell),
        Sound::System => system_sound(),
        Sound::Command => match CommandAlert::new(settings.sound_command.clone().unwrap_or_default())
        {
            Ok(cmd) => Box::new(Fallback::new(cmd, TerminalBell)),
            Err(err) => {
                warn!(error = %err, "sound = \"command\" without a usable sound_command, using bell");
                Box::new(TerminalBell)
            }
        },
    }
}

/// Counts alerts instead of making noise.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct Recording {
    pub(crate) fired: std::sync::Arc<std::sync::atomic::AtomicUsize>,
}

#[cfg(test)]
impl Recording {
    pub(crate) fn count(&self) -> usize {
        self.fired.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl AlertSink for Recording {
    fn alert(&mut self) -> Result<()> {
        self.fired.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
