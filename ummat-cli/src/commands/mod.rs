//! CLI command implementations

pub mod check;
pub mod demo;
pub mod list;
pub mod logs;
pub mod summary;
pub mod transactions;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use ummat_core::services::logging::COMMAND_EXECUTED;
use ummat_core::{EntryPoint, LogEvent, LoggingService, UmmatContext};

/// Directory override for settings.json and logs.duckdb
pub const APP_DIR_ENV: &str = "UMMAT_DIR";

/// Get the ummat directory from environment or default (`~/.ummat`)
pub fn get_app_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(APP_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".ummat"))
        .ok_or_else(|| anyhow!("Could not find home directory; set {}", APP_DIR_ENV))
}

/// Event log for commands that run without a full context
///
/// Returns None if logging fails to initialize; it never blocks a command.
pub fn get_logger() -> Option<LoggingService> {
    let app_dir = get_app_dir().ok()?;
    std::fs::create_dir_all(&app_dir).ok()?;
    LoggingService::new(&app_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Get or create the ummat context
pub fn get_context() -> Result<UmmatContext> {
    let app_dir = get_app_dir()?;

    std::fs::create_dir_all(&app_dir)
        .with_context(|| format!("Failed to create ummat directory: {:?}", app_dir))?;

    UmmatContext::new(&app_dir, EntryPoint::Cli).context("Failed to initialize ummat context")
}

/// Record that a command ran, ignoring any errors
pub fn log_command(ctx: &UmmatContext, command: &str, period: Option<&str>) {
    let mut event = LogEvent::new(COMMAND_EXECUTED)
        .with_command(command)
        .with_source(ctx.finance_service.source_name());
    if let Some(period) = period {
        event = event.with_period(period);
    }
    ctx.log(event);
}
