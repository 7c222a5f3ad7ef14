//! Logs command - view and manage the event log

use anyhow::Result;
use chrono::{Duration, TimeZone, Utc};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;

use super::get_app_dir;
use crate::output;
use ummat_core::services::LogEntry;
use ummat_core::{EntryPoint, LoggingService};

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show recent log entries
    List {
        /// Number of entries to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Show only errors
        #[arg(long)]
        errors: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Clear old log entries
    Clear {
        /// Delete logs older than N days
        #[arg(long, default_value = "30")]
        older_than_days: u32,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show log statistics and database path
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn get_logging_service() -> Result<LoggingService> {
    let app_dir = get_app_dir()?;
    std::fs::create_dir_all(&app_dir)?;
    LoggingService::new(&app_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))
}

fn format_timestamp(timestamp_ms: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

/// Command, period, source and row count, whichever are present
fn entry_context(entry: &LogEntry) -> String {
    let rows = entry.row_count.map(|n| format!("{} rows", n));
    [
        entry.command.as_deref(),
        entry.period.as_deref(),
        entry.source.as_deref(),
        rows.as_deref(),
    ]
    .iter()
    .filter_map(|&s| s)
    .collect::<Vec<_>>()
    .join(", ")
}

pub fn run(command: LogsCommands) -> Result<()> {
    let service = get_logging_service()?;

    match command {
        LogsCommands::List { limit, errors, json } => {
            let entries = if errors {
                service.get_errors(limit)?
            } else {
                service.get_recent(limit)?
            };

            if json {
                return output::print_json(&entries);
            }

            if entries.is_empty() {
                println!("No log entries found.");
                return Ok(());
            }

            let mut table = output::create_table();
            table.set_header(vec!["Time", "Entry", "Event", "Context", "Error"]);

            for entry in &entries {
                let error_indicator = if entry.error_message.is_some() {
                    "!".red().to_string()
                } else {
                    String::new()
                };

                table.add_row(vec![
                    format_timestamp(entry.timestamp),
                    entry.entry_point.clone(),
                    entry.event.clone(),
                    entry_context(entry),
                    error_indicator,
                ]);
            }

            println!("{}", table);

            if !errors {
                let recent_errors = service.get_errors(3)?;
                if !recent_errors.is_empty() {
                    println!();
                    println!("{}", "Recent Errors:".red().bold());
                    for err in &recent_errors {
                        println!(
                            "  {} [{}]: {}",
                            format_timestamp(err.timestamp).dimmed(),
                            err.event,
                            err.error_message.as_deref().unwrap_or("Unknown error")
                        );
                    }
                }
            }
        }
        LogsCommands::Clear {
            older_than_days,
            force,
            json,
        } => {
            let cutoff_ms =
                (Utc::now() - Duration::days(i64::from(older_than_days))).timestamp_millis();

            if !force && !json {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete logs older than {} days?", older_than_days))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let deleted = service.delete_before(cutoff_ms)?;

            if json {
                return output::print_json(serde_json::json!({ "deleted": deleted }));
            }
            output::success(&format!("Deleted {} log entries", deleted));
        }
        LogsCommands::Stats { json } => {
            let total = service.count()?;
            let errors = service.error_count()?;
            let by_event = service.event_counts()?;
            let db_path = service.db_path().to_path_buf();
            let size_bytes = std::fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);

            if json {
                return output::print_json(serde_json::json!({
                    "totalEntries": total,
                    "errorCount": errors,
                    "events": by_event,
                    "databasePath": db_path.to_string_lossy(),
                    "databaseSizeBytes": size_bytes
                }));
            }

            println!("{}", "Log Statistics".bold());
            println!("  Total entries: {}", total);
            println!("  Errors: {}", errors);
            println!("  Database: {}", db_path.display());
            println!("  Size: {}", output::format_size(size_bytes));

            if !by_event.is_empty() {
                println!();
                let mut table = output::create_table();
                table.set_header(vec!["Event", "Count"]);
                for count in by_event {
                    table.add_row(vec![count.event, count.count.to_string()]);
                }
                println!("{}", table);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> LogEntry {
        LogEntry {
            id: 1,
            timestamp: 0,
            entry_point: "cli".to_string(),
            app_version: "0.1.0".to_string(),
            platform: "linux".to_string(),
            event: "rows_fetched".to_string(),
            source: Some("google_sheets".to_string()),
            command: Some("summary".to_string()),
            period: Some("month".to_string()),
            row_count: Some(42),
            error_message: None,
            error_details: None,
        }
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00");
        assert_eq!(format_timestamp(1_700_000_000_000), "2023-11-14 22:13:20");
    }

    #[test]
    fn test_entry_context_joins_present_fields() {
        assert_eq!(
            entry_context(&entry()),
            "summary, month, google_sheets, 42 rows"
        );

        let mut sparse = entry();
        sparse.command = None;
        sparse.period = None;
        sparse.row_count = None;
        assert_eq!(entry_context(&sparse), "google_sheets");
    }
}
