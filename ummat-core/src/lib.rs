//! Ummat Core - finance reporting for the Dana Ummat ledger
//!
//! This crate implements the reporting pipeline following hexagonal architecture:
//!
//! - **domain**: Codecs, transactions, filtering, sorting, pagination, totals
//! - **ports**: Trait definitions for external dependencies (RowSource)
//! - **services**: Report orchestration, demo mode and the event log
//! - **adapters**: Concrete row sources (Google Sheets, CSV, demo)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod ports;
pub mod services;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use adapters::csv_file::CsvFileSource;
use adapters::demo::DemoSource;
use adapters::google_sheets::GoogleSheetsSource;
use config::{Config, SourceKind};
use ports::RowSource;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use domain::{
    FinanceFilter, Fund, PaginatedResult, Period, SortDirection, SortField, Summary, Transaction,
};
pub use services::{
    CheckReport, DemoService, EntryPoint, FinanceService, LedgerSnapshot, LogEvent, LoggingService,
};

/// Main context for Ummat operations
///
/// Holds the configuration, the event log and the services, wired to the
/// row source the configuration selects.
pub struct UmmatContext {
    pub config: Config,
    pub app_dir: PathBuf,
    pub logger: Option<Arc<LoggingService>>,
    pub finance_service: FinanceService,
    pub demo_service: DemoService,
}

impl UmmatContext {
    /// Create a new context for the given app directory
    ///
    /// The event log is optional: if logs.duckdb cannot be opened the
    /// context is still created, just without logging.
    pub fn new(app_dir: &Path, entry_point: EntryPoint) -> Result<Self> {
        let config = Config::load(app_dir)?;

        let logger = LoggingService::new(app_dir, entry_point, env!("CARGO_PKG_VERSION"))
            .ok()
            .map(Arc::new);

        let source = build_row_source(&config)?;
        let mut finance_service =
            FinanceService::new(source).with_utc_offset(config.utc_offset());
        if let Some(l) = &logger {
            finance_service = finance_service.with_logger(Arc::clone(l));
        }

        Ok(Self {
            demo_service: DemoService::new(app_dir),
            app_dir: app_dir.to_path_buf(),
            config,
            logger,
            finance_service,
        })
    }

    /// Log an event, ignoring any errors
    pub fn log(&self, event: LogEvent) {
        if let Some(l) = &self.logger {
            let _ = l.log(event);
        }
    }
}

/// Build the row source selected by the configuration
pub fn build_row_source(config: &Config) -> Result<Arc<dyn RowSource>> {
    let source: Arc<dyn RowSource> = match config.source_kind() {
        SourceKind::Demo => Arc::new(DemoSource::new(config.today())),
        SourceKind::Csv(path) => Arc::new(CsvFileSource::new(path)),
        SourceKind::GoogleSheets => Arc::new(
            GoogleSheetsSource::new(
                &config.source.spreadsheet_id,
                &config.source.api_key,
                &config.source.sheet_name,
                &config.source.range,
            )
            .context(
                "Google Sheets is not set up. Set GOOGLE_SHEETS_FINANCE_SPREADSHEET_ID and \
                 GOOGLE_SHEETS_API_KEY, point source.csvPath at an export, or run `ummat demo on`",
            )?,
        ),
    };
    Ok(source)
}
