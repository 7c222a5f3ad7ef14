//! Report view state: period window, sort order and page
//!
//! `filter_by_period` and `sort_transactions` never mutate their input.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::date::{parse_date, try_parse_date};
use super::transaction::Transaction;

/// Rows per page on the public finance page
pub const DEFAULT_ITEMS_PER_PAGE: usize = 7;

/// Reporting window, measured back from today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    Month,
    Year,
    #[default]
    All,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Week, Period::Month, Period::Year, Period::All];

    /// First day still inside the window, or `None` for [`Period::All`].
    ///
    /// Month and year subtract calendar units and clamp to the end of the
    /// month: the month window of 31 March starts on 28 (or 29) February.
    pub fn cutoff(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Period::Week => today.checked_sub_days(Days::new(7)),
            Period::Month => today.checked_sub_months(Months::new(1)),
            Period::Year => today.checked_sub_months(Months::new(12)),
            Period::All => None,
        }
    }

    /// Display label shown next to the period selector
    pub fn label(&self) -> &'static str {
        match self {
            Period::Week => "Seminggu Terakhir",
            Period::Month => "Sebulan Terakhir",
            Period::Year => "Setahun Terakhir",
            Period::All => "Semua Periode",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
            Period::All => "all",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            "all" => Ok(Period::All),
            other => Err(format!(
                "Unknown period '{}' (expected week, month, year or all)",
                other
            )),
        }
    }
}

/// Column a report is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Date,
    Description,
    Income,
    Expense,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Date => "date",
            SortField::Description => "description",
            SortField::Income => "income",
            SortField::Expense => "expense",
        }
    }

    fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            SortField::Date => try_parse_date(&a.date).cmp(&try_parse_date(&b.date)),
            SortField::Description => a
                .description
                .to_lowercase()
                .cmp(&b.description.to_lowercase()),
            SortField::Income => a.income.cmp(&b.income),
            SortField::Expense => a.expense.cmp(&b.expense),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(SortField::Date),
            "description" => Ok(SortField::Description),
            "income" => Ok(SortField::Income),
            "expense" => Ok(SortField::Expense),
            other => Err(format!(
                "Unknown sort field '{}' (expected date, description, income or expense)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("Unknown sort direction '{}' (expected asc or desc)", other)),
        }
    }
}

/// Everything a front-end needs to request one page of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceFilter {
    pub period: Period,
    /// 1-based
    pub page: usize,
    pub items_per_page: usize,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
}

impl Default for FinanceFilter {
    fn default() -> Self {
        Self {
            period: Period::All,
            page: 1,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            sort_field: SortField::Date,
            sort_direction: SortDirection::Desc,
        }
    }
}

impl FinanceFilter {
    /// Switch period; the page goes back to 1.
    pub fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self.page = 1;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page;
        self
    }

    /// Column-header click: the same column flips desc to asc, anything
    /// else sorts that column descending. The page goes back to 1.
    pub fn toggle_sort(mut self, field: SortField) -> Self {
        if self.sort_field == field && self.sort_direction == SortDirection::Desc {
            self.sort_direction = SortDirection::Asc;
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Desc;
        }
        self.page = 1;
        self
    }
}

/// Keep the transactions dated on or after the period's cutoff.
///
/// Dates in the future are kept. [`Period::All`] returns the input as is.
pub fn filter_by_period(
    transactions: &[Transaction],
    period: Period,
    today: NaiveDate,
) -> Vec<Transaction> {
    let Some(cutoff) = period.cutoff(today) else {
        return transactions.to_vec();
    };

    transactions
        .iter()
        .filter(|tx| parse_date(&tx.date, today) >= cutoff)
        .cloned()
        .collect()
}

/// Stable sort into a new list. Descending flips the comparator, so equal
/// keys keep their input order in both directions.
pub fn sort_transactions(
    transactions: &[Transaction],
    field: SortField,
    direction: SortDirection,
) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| {
        let ord = field.compare(a, b);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    sorted
}
