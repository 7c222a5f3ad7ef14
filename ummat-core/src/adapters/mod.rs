//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - Google Sheets HTTP client for RowSource (the live ledger)
//! - CSV reader for RowSource (exported copies of the sheet)
//! - Demo ledger generator for RowSource (trying things out, tests)

pub mod csv_file;
pub mod demo;
pub mod google_sheets;

#[cfg(test)]
pub mod sheets_mock;
