//! Ledger totals

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::currency::format_currency;
use super::date::format_long_indonesian;
use super::filter::Period;
use super::transaction::Transaction;

/// Totals over a set of transactions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_income: i64,
    pub total_expense: i64,
    /// Income minus expense; negative when the fund is in deficit
    pub balance: i64,
    pub formatted_total_income: String,
    pub formatted_total_expense: String,
    pub formatted_balance: String,
    pub transaction_count: usize,
    pub last_updated: String,
}

impl Summary {
    /// Sum the given transactions. No filtering is applied here.
    pub fn from_transactions(transactions: &[Transaction], today: NaiveDate) -> Self {
        Self::build(transactions, format_long_indonesian(today))
    }

    /// Like [`Summary::from_transactions`] but labelled with the period,
    /// e.g. `"Sebulan Terakhir - 18 Oktober 2026"`. The caller filters.
    pub fn for_period(transactions: &[Transaction], period: Period, today: NaiveDate) -> Self {
        let label = format!("{} - {}", period.label(), format_long_indonesian(today));
        Self::build(transactions, label)
    }

    /// Totals saturate at `i64::MAX`; a sheet cell can hold any digit run.
    fn build(transactions: &[Transaction], last_updated: String) -> Self {
        let (total_income, total_expense) =
            transactions.iter().fold((0i64, 0i64), |(income, expense), t| {
                (income.saturating_add(t.income), expense.saturating_add(t.expense))
            });
        let balance = total_income.saturating_sub(total_expense);

        Self {
            total_income,
            total_expense,
            balance,
            formatted_total_income: format_currency(total_income),
            formatted_total_expense: format_currency(total_expense),
            formatted_balance: format_currency(balance),
            transaction_count: transactions.len(),
            last_updated,
        }
    }
}
