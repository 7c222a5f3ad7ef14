//! Transactions command - the whole public ledger

use anyhow::Result;
use colored::Colorize;

use super::{get_context, log_command};
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    log_command(&ctx, "transactions", None);

    let snapshot = ctx.finance_service.load(ctx.finance_service.today());
    let data = snapshot.data();

    if json {
        return output::print_json(&data);
    }

    if data.is_empty() {
        output::info("Belum ada transaksi.");
        output::report_warnings(&snapshot.warnings);
        return Ok(());
    }

    println!("{}", output::transaction_table(&data));
    println!("{}", format!("{} transaksi", data.len()).dimmed());
    output::report_warnings(&snapshot.warnings);

    Ok(())
}
