//! Demo ledger source
//!
//! Generates a realistic mosque ledger without a spreadsheet:
//! - 120 days of Friday infaq, monthly imam honorarium and utility bills
//! - petty cash (`Kas`) rows that the report must leave out
//! - one row with an unreadable date and one with an unreadable amount
//!
//! Every date is relative to the `today` the source is built with, so the
//! week/month/year filters always have something to show.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::domain::format_currency;
use crate::domain::result::Result;
use crate::ports::{RowSource, Rows};

/// Days of history generated
const DEMO_DAYS: i64 = 120;

/// Build the demo ledger rows (header excluded), oldest first.
pub fn generate_demo_rows(today: NaiveDate) -> Vec<Vec<String>> {
    let mut rng = SimpleRng::new(42);
    let mut rows = Vec::new();

    for days_ago in (0..DEMO_DAYS).rev() {
        let date = today - Duration::days(days_ago);
        let day_of_month = date.day();

        // Friday collection box after Jumat prayer
        if date.weekday() == Weekday::Fri {
            let amount = 1_000_000 + (rng.next() * 1_500_000.0) as i64 / 1_000 * 1_000;
            rows.push(row(date, "Infaq Kotak Jumat", &format_currency(amount), "", "Ummat"));
        }

        if day_of_month == 1 {
            rows.push(row(date, "Bisyaroh Imam dan Muadzin", "", "Rp 2.500.000", "Ummat"));
        }

        if day_of_month == 5 {
            let bill = 350_000 + (rng.next() * 200_000.0) as i64 / 1_000 * 1_000;
            rows.push(row(date, "Tagihan Listrik PLN", "", &format_currency(bill), "Ummat"));
            rows.push(row(date, "Tagihan Air PDAM", "", "Rp 85.000", "Ummat"));
        }

        if day_of_month == 12 {
            // Transfers are often typed without the Rp prefix
            rows.push(vec![
                date.format("%d/%m/%Y").to_string(),
                "Donasi Transfer Hamba Allah".to_string(),
                "500000".to_string(),
                String::new(),
                "Ummat".to_string(),
            ]);
        }

        if day_of_month == 20 {
            rows.push(row(date, "Santunan Anak Yatim", "", "Rp 1.500.000", "Ummat"));
        }

        if date.weekday() == Weekday::Mon {
            rows.push(row(date, "Beli Perlengkapan Kebersihan", "", "Rp 45.000", "Kas"));
        }

        if day_of_month == 15 {
            rows.push(row(date, "Setoran Kas Harian", "Rp 300.000", "", "Kas"));
        }
    }

    // Hand-typed mistakes the normalizer has to absorb
    rows.push(vec![
        "kemarin".to_string(),
        "Infaq Hamba Allah (tanggal salah ketik)".to_string(),
        "Rp 100.000".to_string(),
        String::new(),
        "Ummat".to_string(),
    ]);
    rows.push(vec![
        (today - Duration::days(2)).format("%Y-%m-%d").to_string(),
        "Sumbangan Karpet (nominal belum dicatat)".to_string(),
        "menyusul".to_string(),
    ]);

    rows
}

fn row(date: NaiveDate, description: &str, income: &str, expense: &str, fund: &str) -> Vec<String> {
    vec![
        format!("{}/{}/{}", date.day(), date.month(), date.year()),
        description.to_string(),
        income.to_string(),
        expense.to_string(),
        fund.to_string(),
    ]
}

/// Simple deterministic random number generator (LCG)
/// Uses fixed seed for reproducibility
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.state >> 32) as f64 / u32::MAX as f64
    }
}

/// Demo row source
///
/// Serves [`generate_demo_rows`] for a fixed day.
pub struct DemoSource {
    today: NaiveDate,
}

impl DemoSource {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl RowSource for DemoSource {
    fn name(&self) -> &str {
        "demo"
    }

    fn fetch_rows(&self) -> Result<Rows> {
        Ok(generate_demo_rows(self.today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{normalize_rows, Fund};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_demo_rows_are_deterministic() {
        assert_eq!(generate_demo_rows(today()), generate_demo_rows(today()));
    }

    #[test]
    fn test_demo_rows_cover_both_funds() {
        let result = normalize_rows(&generate_demo_rows(today()), today());
        assert!(result.transactions.iter().any(|t| t.fund == Fund::Kas));
        assert!(result.transactions.iter().any(|t| t.fund == Fund::Ummat));
        // About 17 Fridays in 120 days
        let infaq = result
            .transactions
            .iter()
            .filter(|t| t.description == "Infaq Kotak Jumat")
            .count();
        assert!((17..=18).contains(&infaq));
    }

    #[test]
    fn test_demo_rows_include_malformed_cells() {
        let result = normalize_rows(&generate_demo_rows(today()), today());
        assert_eq!(result.warnings.len(), 2);
        assert!(result.warnings[0].contains("kemarin"));
        assert!(result.warnings[1].contains("menyusul"));
    }

    #[test]
    fn test_demo_dates_within_window() {
        let earliest = today() - Duration::days(DEMO_DAYS - 1);
        let result = normalize_rows(&generate_demo_rows(today()), today());
        for tx in &result.transactions {
            let date = tx.parsed_date(today());
            assert!(date >= earliest && date <= today(), "{} out of range", tx.date);
        }
    }

    #[test]
    fn test_demo_source() {
        let source = DemoSource::new(today());
        assert_eq!(source.name(), "demo");
        assert!(!source.fetch_rows().unwrap().is_empty());
    }
}
