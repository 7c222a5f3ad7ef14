//! Summary command - totals for a period

use anyhow::Result;
use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Color};

use super::{get_context, log_command};
use crate::output;
use ummat_core::{Period, Summary};

pub fn run(period: Period, json: bool) -> Result<()> {
    let ctx = get_context()?;
    log_command(&ctx, "summary", Some(period.as_str()));

    let today = ctx.finance_service.today();
    let snapshot = ctx.finance_service.load(today);
    let summary = snapshot.summary_for(period, today);

    if json {
        return output::print_json(&summary);
    }

    println!("{}", "Laporan Dana Ummat".bold());
    println!("{}", summary.last_updated.dimmed());
    println!();
    println!("{}", summary_table(&summary));
    output::report_warnings(&snapshot.warnings);

    Ok(())
}

fn summary_table(summary: &Summary) -> comfy_table::Table {
    let balance_color = if summary.balance < 0 {
        Color::Red
    } else {
        Color::Green
    };

    let mut table = output::create_table();
    table.add_row(vec![
        Cell::new("Pemasukan"),
        Cell::new(&summary.formatted_total_income).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Pengeluaran"),
        Cell::new(&summary.formatted_total_expense).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Saldo"),
        Cell::new(&summary.formatted_balance)
            .fg(balance_color)
            .set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Transaksi"),
        Cell::new(summary.transaction_count).set_alignment(CellAlignment::Right),
    ]);
    table
}
