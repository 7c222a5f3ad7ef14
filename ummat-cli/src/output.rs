//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;
use ummat_core::{OperationResult, PaginatedResult, Transaction};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Print `data` wrapped in the `{ success, data, error }` envelope
pub fn print_json<T: Serialize>(data: T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&OperationResult::ok(data))?);
    Ok(())
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Ledger table with amounts right-aligned; a zero amount shows as "-"
pub fn transaction_table<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Table {
    let mut table = create_table();
    table.set_header(vec!["Tanggal", "Keterangan", "Pemasukan", "Pengeluaran"]);

    for tx in transactions {
        table.add_row(vec![
            Cell::new(&tx.date),
            Cell::new(&tx.description),
            amount_cell(tx.income, &tx.formatted_income),
            amount_cell(tx.expense, &tx.formatted_expense),
        ]);
    }

    table
}

fn amount_cell(amount: i64, formatted: &str) -> Cell {
    let text = if amount == 0 { "-" } else { formatted };
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// "Halaman 2 dari 8 (50 transaksi)"
pub fn page_footer<T>(page: &PaginatedResult<T>) -> String {
    format!(
        "Halaman {} dari {} ({} transaksi)",
        page.current_page, page.total_pages, page.total_items
    )
}

/// Shown after a report; longer lists point at `ummat check`
const MAX_REPORT_WARNINGS: usize = 5;

/// Lines describing what went wrong while reading the ledger
pub fn warning_lines(warnings: &[String]) -> Vec<String> {
    let mut lines: Vec<String> = warnings
        .iter()
        .take(MAX_REPORT_WARNINGS)
        .map(|w| format!("  - {}", w))
        .collect();
    if warnings.len() > MAX_REPORT_WARNINGS {
        lines.push(format!(
            "  ... and {} more (run 'ummat check' for the full list)",
            warnings.len() - MAX_REPORT_WARNINGS
        ));
    }
    lines
}

/// Print snapshot warnings under a report, if there are any
pub fn report_warnings(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    println!();
    warning(&format!("{} warning(s) while reading the ledger:", warnings.len()));
    for line in warning_lines(warnings) {
        println!("{}", line);
    }
}

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
