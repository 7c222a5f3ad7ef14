//! Logging service - structured event logging to DuckDB
//!
//! Stores events in logs.duckdb next to settings.json. Ledger content
//! (descriptions, amounts, dates) is never logged: only event names,
//! the source, the period, row counts and error text.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use chrono::Utc;
use duckdb::Connection;
use serde::{Deserialize, Serialize};

use crate::log_migrations::LOG_MIGRATIONS;

/// Event name used by [`LoggingService::log_command`]
pub const COMMAND_EXECUTED: &str = "command_executed";

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Millisecond timestamp in the high bits, a wrapping 16-bit counter below
fn generate_id() -> u64 {
    let counter = ID_COUNTER.fetch_add(1, Ordering::Relaxed) & 0xFFFF;
    ((now_ms() as u64) << 16) | counter
}

/// Current unix timestamp in milliseconds
fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn detect_platform() -> &'static str {
    match std::env::consts::OS {
        os @ ("linux" | "macos" | "windows") => os,
        _ => "unknown",
    }
}

/// Who is writing the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryPoint {
    Cli,
    /// Embedded in another program through the library API
    Library,
}

impl EntryPoint {
    fn as_str(&self) -> &'static str {
        match self {
            EntryPoint::Cli => "cli",
            EntryPoint::Library => "library",
        }
    }
}

/// A log event to be recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
}

impl LogEvent {
    /// Create a new log event with just an event name
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            source: None,
            command: None,
            period: None,
            row_count: None,
            error_message: None,
            error_details: None,
        }
    }

    /// Set the row source (google_sheets, csv, demo)
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the command context (for CLI events)
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Set the reporting period
    pub fn with_period(mut self, period: impl Into<String>) -> Self {
        self.period = Some(period.into());
        self
    }

    pub fn with_row_count(mut self, count: usize) -> Self {
        self.row_count = Some(count as u64);
        self
    }

    /// Set error information
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Set error details (additional context)
    pub fn with_error_details(mut self, details: impl Into<String>) -> Self {
        self.error_details = Some(details.into());
        self
    }
}

/// A log entry as stored in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: i64,
    pub entry_point: String,
    pub app_version: String,
    pub platform: String,
    pub event: String,
    pub source: Option<String>,
    pub command: Option<String>,
    pub period: Option<String>,
    pub row_count: Option<u64>,
    pub error_message: Option<String>,
    pub error_details: Option<String>,
}

/// Number of entries per event name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCount {
    pub event: String,
    pub count: u64,
}

const SELECT_ENTRY_COLUMNS: &str = r#"
    SELECT id, timestamp, entry_point, app_version, platform,
           event, source, command, period, row_count, error_message, error_details
    FROM sys_logs
"#;

fn entry_from_row(row: &duckdb::Row<'_>) -> duckdb::Result<LogEntry> {
    Ok(LogEntry {
        id: row.get(0)?,
        timestamp: row.get(1)?,
        entry_point: row.get(2)?,
        app_version: row.get(3)?,
        platform: row.get(4)?,
        event: row.get(5)?,
        source: row.get(6)?,
        command: row.get(7)?,
        period: row.get(8)?,
        row_count: row.get(9)?,
        error_message: row.get(10)?,
        error_details: row.get(11)?,
    })
}

/// Service for structured event logging
///
/// Manages logs.duckdb and provides methods for logging events and
/// querying the log history.
pub struct LoggingService {
    conn: Mutex<Connection>,
    db_path: PathBuf,
    entry_point: EntryPoint,
    app_version: String,
    platform: &'static str,
}

impl LoggingService {
    /// Create a new logging service
    ///
    /// Opens or creates logs.duckdb in the app directory and runs any
    /// pending migrations.
    pub fn new(
        app_dir: &Path,
        entry_point: EntryPoint,
        app_version: impl Into<String>,
    ) -> Result<Self> {
        let db_path = app_dir.join("logs.duckdb");
        let conn = Connection::open(&db_path)?;

        let service = Self {
            conn: Mutex::new(conn),
            db_path,
            entry_point,
            app_version: app_version.into(),
            platform: detect_platform(),
        };

        service.run_migrations()?;

        Ok(service)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| anyhow!("Log database lock poisoned: {}", e))
    }

    /// Apply embedded migrations not yet recorded in sys_migrations.
    ///
    /// `000_migrations.sql` creates the bookkeeping table itself, so it is
    /// only ever run on a fresh database.
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        let bootstrapped: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM information_schema.tables WHERE table_name = 'sys_migrations'",
                [],
                |row| row.get(0),
            )
            .unwrap_or(false);

        let applied: Vec<String> = if bootstrapped {
            let mut stmt = conn.prepare("SELECT migration_name FROM sys_migrations")?;
            let names = stmt
                .query_map([], |row| row.get(0))?
                .collect::<duckdb::Result<Vec<String>>>()?;
            names
        } else {
            Vec::new()
        };

        let pending = LOG_MIGRATIONS
            .iter()
            .filter(|(name, _)| !applied.iter().any(|a| a == name));

        for (name, sql) in pending {
            conn.execute_batch(sql)?;
            conn.execute(
                "INSERT INTO sys_migrations (migration_name) VALUES (?)",
                [name],
            )?;
        }

        Ok(())
    }

    /// Record an event, stamped with this service's entry point, app
    /// version and platform.
    pub fn log(&self, event: LogEvent) -> Result<()> {
        self.conn()?.execute(
            r#"
            INSERT INTO sys_logs (
                id, timestamp, entry_point, app_version, platform,
                event, source, command, period, row_count, error_message, error_details
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            duckdb::params![
                generate_id(),
                now_ms(),
                self.entry_point.as_str(),
                &self.app_version,
                self.platform,
                &event.event,
                &event.source,
                &event.command,
                &event.period,
                &event.row_count,
                &event.error_message,
                &event.error_details,
            ],
        )?;

        Ok(())
    }

    pub fn log_event(&self, event: &str) -> Result<()> {
        self.log(LogEvent::new(event))
    }

    /// Record that a CLI command ran
    pub fn log_command(&self, command: &str) -> Result<()> {
        self.log(LogEvent::new(COMMAND_EXECUTED).with_command(command))
    }

    pub fn log_error(&self, event: &str, message: &str, details: Option<&str>) -> Result<()> {
        let event = LogEvent::new(event).with_error(message);
        self.log(match details {
            Some(d) => event.with_error_details(d),
            None => event,
        })
    }

    /// Most recent entries, newest first
    pub fn get_recent(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.query_entries("", limit)
    }

    /// Most recent entries that carry an error message
    pub fn get_errors(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.query_entries("WHERE error_message IS NOT NULL", limit)
    }

    fn query_entries(&self, filter: &str, limit: usize) -> Result<Vec<LogEntry>> {
        let conn = self.conn()?;
        let sql = format!("{SELECT_ENTRY_COLUMNS} {filter} ORDER BY timestamp DESC, id DESC LIMIT ?");
        let mut stmt = conn.prepare(&sql)?;
        let entries = stmt
            .query_map([limit as i64], entry_from_row)?
            .collect::<duckdb::Result<Vec<_>>>()?;
        Ok(entries)
    }

    pub fn count(&self) -> Result<u64> {
        self.count_where("")
    }

    pub fn error_count(&self) -> Result<u64> {
        self.count_where("WHERE error_message IS NOT NULL")
    }

    fn count_where(&self, filter: &str) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM sys_logs {filter}");
        let count: u64 = self.conn()?.query_row(&sql, [], |row| row.get(0))?;
        Ok(count)
    }

    /// Entry counts per event name, most frequent first
    pub fn event_counts(&self) -> Result<Vec<EventCount>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT event, COUNT(*) AS n FROM sys_logs GROUP BY event ORDER BY n DESC, event",
        )?;
        let counts = stmt
            .query_map([], |row| {
                Ok(EventCount {
                    event: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
            .collect::<duckdb::Result<Vec<_>>>()?;
        Ok(counts)
    }

    /// Remove entries written before `timestamp_ms` (unix ms). Returns how
    /// many were removed.
    pub fn delete_before(&self, timestamp_ms: i64) -> Result<u64> {
        let deleted = self
            .conn()?
            .execute("DELETE FROM sys_logs WHERE timestamp < ?", [timestamp_ms])?;
        Ok(deleted as u64)
    }

    /// Get the path to the logs database
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}
