//! Demo command - manage demo mode

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::{get_app_dir, get_logger};
use ummat_core::config::DEMO_MODE_ENV;
use ummat_core::DemoService;

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Enable demo mode
    #[command(name = "on")]
    On,
    /// Disable demo mode
    #[command(name = "off")]
    Off,
    /// Show demo mode status
    Status,
}

pub fn run(command: Option<DemoCommands>) -> Result<()> {
    let app_dir = get_app_dir()?;
    std::fs::create_dir_all(&app_dir)?;
    let demo_service = DemoService::new(&app_dir);

    match command {
        Some(DemoCommands::On) => {
            demo_service.enable()?;
            if let Some(logger) = get_logger() {
                let _ = logger.log_event("demo_enabled");
            }
            println!("{}", "Demo mode enabled".green());
            println!("Reports now use a generated ledger. Run 'ummat summary' to see it.");
        }
        Some(DemoCommands::Off) => {
            demo_service.disable()?;
            if let Some(logger) = get_logger() {
                let _ = logger.log_event("demo_disabled");
            }
            println!("{}", "Demo mode disabled".yellow());
        }
        Some(DemoCommands::Status) | None => {
            if demo_service.is_enabled()? {
                println!("Demo mode is {}", "ON".green());
            } else {
                println!("Demo mode is {}", "OFF".yellow());
            }
        }
    }

    if std::env::var(DEMO_MODE_ENV).is_ok() {
        println!(
            "{}",
            format!("Note: {} is set and overrides settings.json", DEMO_MODE_ENV).dimmed()
        );
    }

    Ok(())
}
