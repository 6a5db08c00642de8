//! countdown-timer - a terminal countdown timer
//!
//! Entry point: parses flags, sets up the log file, loads settings and runs
//! the UI until the user quits.

use bubbletea_rs::Program;
use tracing::info;

use countdown_timer::{
    app::{self, App},
    config::{Cli, Settings, Startup},
    logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_path();
    if let Err(e) = logging::init(&log_path, cli.log_level()) {
        eprintln!("warning: {}; continuing without a log file", e);
    }

    let startup = Startup::new(&cli, Settings::load());
    info!(
        presets = ?startup.settings.presets,
        dark_mode = startup.settings.dark_mode,
        sound = ?startup.settings.sound,
        "starting countdown-timer v{}",
        env!("CARGO_PKG_VERSION")
    );

    if cli.save_config {
        startup.settings.store()?;
        println!("Settings written to {}", Settings::path()?.display());
        return Ok(());
    }

    app::set_startup(startup);

    let program = Program::<App>::builder().alt_screen(true).build()?;
    program.run().await?;

    info!("countdown-timer exited");
    Ok(())
}
