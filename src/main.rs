use clap::{Parser, Subcommand};
use log::{error, info};
use std::{
    io,
    path::{Path, PathBuf},
};
use tui_logger::{
    TuiLoggerFile, TuiLoggerLevelOutput, init_logger, set_default_level, set_log_file,
};

use crate::{app::App, config::Settings, metrics::SystemMetrics};

pub mod app;
pub mod config;
pub mod metrics;
pub mod sensors;
pub mod ui;

#[derive(Parser, Debug)]
#[command(about)]
struct Cli {
    /// Settings file overriding the built-in defaults
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Write diagnostics to this file
    #[arg(short, long, value_name = "FILE")]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Refresh the dashboard until Ctrl+C
    Run,
    /// Print a single frame and exit
    Once,
    /// Print the effective settings as TOML
    Settings,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;
    let settings = Settings::load(cli.config)?;
    match &cli.command {
        Some(Commands::Settings) => {
            print!("{}", settings.to_toml()?);
            Ok(())
        }
        Some(Commands::Once) => {
            let mut app = App::new(settings, SystemMetrics::new())?;
            let result = app.once(&mut io::stdout()).await;
            tui_logger::move_events();
            result
        }
        Some(Commands::Run) | None => {
            let mut app = App::new(settings, SystemMetrics::new())?;
            let result = app.run(&mut io::stdout(), interrupted()).await;
            tui_logger::move_events();
            result
        }
    }
}

fn init_logging(log_file: Option<&Path>) -> color_eyre::Result<()> {
    init_logger(tui_logger::LevelFilter::Debug)?;
    if let Some(path) = log_file {
        let file_options = TuiLoggerFile::new(&path.to_string_lossy())
            .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
            .output_file(false)
            .output_separator(':');
        set_log_file(file_options);
    }
    set_default_level(tui_logger::LevelFilter::Debug);
    info!("Logging started");
    Ok(())
}

/// Resolves on Ctrl+C. Never resolves if the handler can't be installed.
async fn interrupted() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(target: "App", "Cannot listen for Ctrl+C: {}", err);
        std::future::pending::<()>().await;
    }
}
