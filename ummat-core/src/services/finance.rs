//! Finance service - the report operations behind the finance page
//!
//! Every call fetches the sheet again and runs the pipeline:
//! rows -> normalize -> `Ummat` only -> date desc, then period filter,
//! sort and pagination, or totals.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{FixedOffset, NaiveDate, Utc};
use serde::Serialize;

use crate::config::{utc_offset_from_hours, DEFAULT_UTC_OFFSET_HOURS};
use crate::domain::{
    filter_by_period, normalize_rows, paginate, sort_transactions, FinanceFilter, Fund,
    PaginatedResult, Period, SortDirection, SortField, Summary, Transaction,
};
use crate::ports::RowSource;
use crate::services::logging::{LogEvent, LoggingService};

/// One fetch of the public ledger
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    /// `Ummat` rows in sheet order
    pub transactions: Vec<Transaction>,
    /// Cells that fell back to a default, plus a fetch failure if any
    pub warnings: Vec<String>,
}

impl LedgerSnapshot {
    /// All transactions, newest first. Same-day rows keep sheet order.
    pub fn data(&self) -> Vec<Transaction> {
        sort_transactions(&self.transactions, SortField::Date, SortDirection::Desc)
    }

    pub fn summary(&self, today: NaiveDate) -> Summary {
        Summary::from_transactions(&self.transactions, today)
    }

    pub fn summary_for(&self, period: Period, today: NaiveDate) -> Summary {
        let filtered = filter_by_period(&self.transactions, period, today);
        Summary::for_period(&filtered, period, today)
    }

    /// Filter by period, sort, then cut out the requested page.
    pub fn page(&self, filter: &FinanceFilter, today: NaiveDate) -> PaginatedResult<Transaction> {
        let filtered = filter_by_period(&self.data(), filter.period, today);
        let sorted = sort_transactions(&filtered, filter.sort_field, filter.sort_direction);
        paginate(&sorted, filter.page, filter.items_per_page)
    }
}

/// What `check` found in the sheet
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub source: String,
    pub row_count: usize,
    pub ummat_count: usize,
    pub kas_count: usize,
    pub warnings: Vec<String>,
}

/// Finance report service
///
/// Stateless apart from its collaborators, so one instance can be shared
/// across threads behind an `Arc`.
pub struct FinanceService {
    source: Arc<dyn RowSource>,
    logger: Option<Arc<LoggingService>>,
    utc_offset: FixedOffset,
}

impl FinanceService {
    pub fn new(source: Arc<dyn RowSource>) -> Self {
        Self {
            source,
            logger: None,
            utc_offset: utc_offset_from_hours(DEFAULT_UTC_OFFSET_HOURS),
        }
    }

    /// Record fetch outcomes in the event log
    pub fn with_logger(mut self, logger: Arc<LoggingService>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Time zone used to decide what "today" is
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Today in the configured time zone
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.utc_offset).date_naive()
    }

    /// Fetch and normalize the ledger, keeping `Ummat` rows only.
    ///
    /// A failed fetch is logged and reported as a warning; the snapshot is
    /// then empty rather than an error.
    pub fn load(&self, today: NaiveDate) -> LedgerSnapshot {
        let rows = match self.source.fetch_rows() {
            Ok(rows) => {
                self.log(
                    LogEvent::new("rows_fetched")
                        .with_source(self.source.name())
                        .with_row_count(rows.len()),
                );
                rows
            }
            Err(e) => {
                self.log(
                    LogEvent::new("row_fetch_failed")
                        .with_source(self.source.name())
                        .with_error(e.to_string()),
                );
                return LedgerSnapshot {
                    transactions: Vec::new(),
                    warnings: vec![format!(
                        "Could not fetch rows from {}: {}",
                        self.source.name(),
                        e
                    )],
                };
            }
        };

        let normalized = normalize_rows(&rows, today);
        if !normalized.warnings.is_empty() {
            self.log(
                LogEvent::new("rows_normalized_with_warnings")
                    .with_source(self.source.name())
                    .with_row_count(normalized.warnings.len()),
            );
        }

        LedgerSnapshot {
            transactions: normalized
                .transactions
                .into_iter()
                .filter(|tx| tx.fund == Fund::Ummat)
                .collect(),
            warnings: normalized.warnings,
        }
    }

    /// Public ledger, newest first
    pub fn get_finance_data(&self) -> Vec<Transaction> {
        self.get_finance_data_at(self.today())
    }

    pub fn get_finance_data_at(&self, today: NaiveDate) -> Vec<Transaction> {
        self.load(today).data()
    }

    /// Totals over the whole public ledger
    pub fn get_finance_summary(&self) -> Summary {
        self.get_finance_summary_at(self.today())
    }

    pub fn get_finance_summary_at(&self, today: NaiveDate) -> Summary {
        self.load(today).summary(today)
    }

    /// One page of the public ledger for the given view
    pub fn get_finance_data_paginated(&self, filter: &FinanceFilter) -> PaginatedResult<Transaction> {
        self.get_finance_data_paginated_at(filter, self.today())
    }

    pub fn get_finance_data_paginated_at(
        &self,
        filter: &FinanceFilter,
        today: NaiveDate,
    ) -> PaginatedResult<Transaction> {
        self.load(today).page(filter, today)
    }

    /// Totals over the period window, labelled with the period
    pub fn get_finance_summary_by_period(&self, period: Period) -> Summary {
        self.get_finance_summary_by_period_at(period, self.today())
    }

    pub fn get_finance_summary_by_period_at(&self, period: Period, today: NaiveDate) -> Summary {
        self.load(today).summary_for(period, today)
    }

    /// Fetch and normalize every row, `Kas` included, and report what
    /// needed a default. Unlike the report operations a fetch failure is
    /// returned as an error here.
    pub fn check(&self, today: NaiveDate) -> Result<CheckReport> {
        let rows = self
            .source
            .fetch_rows()
            .with_context(|| format!("Failed to fetch rows from {}", self.source.name()))?;
        let normalized = normalize_rows(&rows, today);

        let kas_count = normalized
            .transactions
            .iter()
            .filter(|tx| tx.fund == Fund::Kas)
            .count();

        Ok(CheckReport {
            source: self.source.name().to_string(),
            row_count: normalized.transactions.len(),
            ummat_count: normalized.transactions.len() - kas_count,
            kas_count,
            warnings: normalized.warnings,
        })
    }

    /// Log an event, ignoring any errors (logging never breaks a report)
    fn log(&self, event: LogEvent) {
        if let Some(logger) = &self.logger {
            let _ = logger.log(event);
        }
    }
}
