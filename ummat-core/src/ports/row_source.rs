//! Ledger row source port
//!
//! Defines the interface for fetching raw ledger rows from wherever the
//! sheet lives (Google Sheets, a CSV export, the built-in demo ledger).

use crate::domain::result::Result;

/// Raw ledger rows, one `Vec<String>` per sheet row
pub type Rows = Vec<Vec<String>>;

/// Source of raw ledger rows
///
/// Rows come back with the header row already removed and cells as plain
/// strings. Interpreting them is the normalizer's job, not the source's.
pub trait RowSource: Send + Sync {
    /// Source name used in logs (e.g., "google_sheets", "demo")
    fn name(&self) -> &str;

    /// Fetch every data row
    fn fetch_rows(&self) -> Result<Rows>;
}
