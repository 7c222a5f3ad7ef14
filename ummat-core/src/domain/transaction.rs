//! Transaction domain model and the row normalizer

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::currency::{format_currency, parse_currency, try_parse_currency};
use super::date::{format_date_to_indonesian, parse_date, try_parse_date};

/// Ledger column positions in the finance sheet
pub mod column {
    pub const DATE: usize = 0;
    pub const DESCRIPTION: usize = 1;
    pub const INCOME: usize = 2;
    pub const EXPENSE: usize = 3;
    pub const FUND: usize = 4;
}

/// Which ledger a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Fund {
    /// Public charitable fund, the only one reported
    #[default]
    Ummat,
    /// Operational petty cash
    Kas,
}

impl Fund {
    /// Read the fund cell. Only the exact tags are recognised; anything
    /// else, including `"kas"`, counts as `Ummat`.
    pub fn from_cell(cell: &str) -> Self {
        match cell {
            "Kas" => Fund::Kas,
            _ => Fund::Ummat,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Fund::Ummat => "Ummat",
            Fund::Kas => "Kas",
        }
    }
}

impl fmt::Display for Fund {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single ledger line, normalized from one sheet row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Row position + 1; only stable within one fetch
    pub id: String,
    /// Canonical `DD/MM/YYYY`
    pub date: String,
    pub description: String,
    /// Whole Rupiah, never negative
    pub income: i64,
    /// Whole Rupiah, never negative
    pub expense: i64,
    pub fund: Fund,
    pub formatted_income: String,
    pub formatted_expense: String,
}

impl Transaction {
    /// Build a transaction from already-typed values.
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
        income: i64,
        expense: i64,
        fund: Fund,
    ) -> Self {
        let income = income.max(0);
        let expense = expense.max(0);
        Self {
            id: id.into(),
            date: format_date_to_indonesian(date),
            description: description.into(),
            income,
            expense,
            fund,
            formatted_income: format_currency(income),
            formatted_expense: format_currency(expense),
        }
    }

    /// Normalize one raw sheet row.
    ///
    /// Columns: date, description, income, expense, fund. Missing cells are
    /// read as empty strings. Unreadable dates become `today` and unreadable
    /// amounts become zero; the row is never rejected.
    pub fn from_row(row: &[String], row_index: usize, today: NaiveDate) -> Self {
        let date = parse_date(cell(row, column::DATE), today);
        Self::new(
            (row_index + 1).to_string(),
            date,
            cell(row, column::DESCRIPTION),
            parse_currency(cell(row, column::INCOME)),
            parse_currency(cell(row, column::EXPENSE)),
            Fund::from_cell(cell(row, column::FUND)),
        )
    }

    /// The canonical date as a calendar date.
    ///
    /// `date` is always written by [`Transaction::new`], so this only falls
    /// back to `today` for hand-built values with a malformed date.
    pub fn parsed_date(&self, today: NaiveDate) -> NaiveDate {
        parse_date(&self.date, today)
    }

    /// Content-derived key that survives re-fetches and row reordering.
    ///
    /// Two identical ledger lines share a fingerprint.
    pub fn fingerprint(&self) -> String {
        let key = format!(
            "{}|{}|{}|{}|{}",
            self.date,
            self.description.trim().to_lowercase(),
            self.income,
            self.expense,
            self.fund
        );
        let digest = Sha256::digest(key.as_bytes());
        hex::encode(&digest[..8])
    }
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// Result of normalizing a whole row set
#[derive(Debug, Default, Clone)]
pub struct NormalizedRows {
    pub transactions: Vec<Transaction>,
    /// One entry per cell that fell back to a default value
    pub warnings: Vec<String>,
}

/// Normalize every row, numbering them by position.
pub fn normalize_rows(rows: &[Vec<String>], today: NaiveDate) -> NormalizedRows {
    let mut result = NormalizedRows::default();

    for (index, row) in rows.iter().enumerate() {
        let tx = Transaction::from_row(row, index, today);
        collect_warnings(row, &tx.id, &mut result.warnings);
        result.transactions.push(tx);
    }

    result
}

fn collect_warnings(row: &[String], id: &str, warnings: &mut Vec<String>) {
    let date = cell(row, column::DATE);
    if try_parse_date(date).is_none() {
        if date.trim().is_empty() {
            warnings.push(format!("Row {id}: missing date, using today"));
        } else {
            warnings.push(format!("Row {id}: unrecognized date '{date}', using today"));
        }
    }

    for (index, name) in [(column::INCOME, "income"), (column::EXPENSE, "expense")] {
        let raw = cell(row, index);
        if try_parse_currency(raw).is_none() {
            warnings.push(format!("Row {id}: unreadable {name} '{raw}', using 0"));
        }
    }
}
