//! Configuration: a `confy` settings file with command-line overrides.
//!
//! Settings live in the platform config directory under the app name
//! `countdown-timer`. A missing or unreadable file falls back to defaults;
//! flags given on the command line win over the file.

use crate::error::{Error, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Name used for the config directory.
pub const APP_NAME: &str = "countdown-timer";

/// Default preset durations, in minutes.
pub const DEFAULT_PRESETS: [u64; 3] = [1, 5, 10];

/// How the alert sounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sound {
    /// The platform's notification sound, falling back to the bell.
    #[default]
    System,
    /// Terminal bell only.
    Bell,
    /// Run `sound_command`.
    Command,
    /// No sound; only the on-screen notification.
    Silent,
}

/// Persistent settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Preset durations in minutes, bound to F1, F2, ...
    pub presets: Vec<u64>,
    /// Start in the dark theme.
    pub dark_mode: bool,
    pub sound: Sound,
    /// Program and arguments used when `sound = "command"`.
    pub sound_command: Option<Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            presets: DEFAULT_PRESETS.to_vec(),
            dark_mode: false,
            sound: Sound::default(),
            sound_command: None,
        }
    }
}

impl Settings {
    /// Reads the settings file.
    pub fn try_load() -> Result<Self> {
        confy::load(APP_NAME, "config").map_err(Error::ConfigLoad)
    }

    /// Reads the settings file, or returns defaults when it cannot be read.
    pub fn load() -> Self {
        Self::try_load().unwrap_or_else(|err| {
            warn!(error = %err, "using default settings");
            Self::default()
        })
    }

    pub fn store(&self) -> Result<()> {
        confy::store(APP_NAME, "config", self).map_err(Error::ConfigStore)
    }

    /// Where the settings file lives on this platform.
    pub fn path() -> Result<PathBuf> {
        confy::get_configuration_file_path(APP_NAME, "config").map_err(Error::ConfigLoad)
    }

    /// Drops zero-minute presets, which could never start.
    pub fn normalized(mut self) -> Self {
        self.presets.retain(|m| *m > 0);
        self
    }
}

/// Command-line arguments.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "countdown-timer")]
#[command(about = "A terminal countdown timer with presets and an alert at zero")]
#[command(version)]
pub struct Cli {
    /// Prefill the minutes field
    #[arg(short, long)]
    pub minutes: Option<u64>,

    /// Prefill the seconds field
    #[arg(short, long)]
    pub seconds: Option<u64>,

    /// Start in the dark theme
    #[arg(long, conflicts_with = "light")]
    pub dark: bool,

    /// Start in the light theme
    #[arg(long)]
    pub light: bool,

    /// Do not play a sound when the countdown finishes
    #[arg(long)]
    pub no_sound: bool,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Write the effective settings to the config file and exit
    #[arg(long)]
    pub save_config: bool,
}

impl Cli {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Log level directive for the verbose flag.
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Log file path, defaulting to the system temp directory.
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(format!("{}.log", APP_NAME)))
    }

    /// Applies the flags on top of file settings.
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if self.dark {
            settings.dark_mode = true;
        }
        if self.light {
            settings.dark_mode = false;
        }
        if self.no_sound {
            settings.sound = Sound::Silent;
        }
        settings.normalized()
    }
}

/// Everything the UI needs at startup.
#[derive(Debug, Clone, Default)]
pub struct Startup {
    pub settings: Settings,
    /// Prefilled minutes field text.
    pub minutes: Option<String>,
    /// Prefilled seconds field text.
    pub seconds: Option<String>,
}

impl Startup {
    pub fn new(cli: &Cli, settings: Settings) -> Self {
        Self {
            settings: cli.apply(settings),
            minutes: cli.minutes.map(|m| m.to_string()),
            seconds: cli.seconds.map(|s| s.to_string()),
        }
    }
}
