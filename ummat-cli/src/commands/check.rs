//! Check command - fetch the ledger and report rows that needed defaults

use anyhow::Result;
use colored::Colorize;
use comfy_table::{Cell, Color};

use super::{get_context, log_command};
use crate::output;
use ummat_core::CheckReport;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    log_command(&ctx, "check", None);

    let today = ctx.config.today();
    let report = match ctx.finance_service.check(today) {
        Ok(report) => report,
        Err(e) => {
            ctx.log(
                ummat_core::LogEvent::new("check_failed")
                    .with_source(ctx.finance_service.source_name())
                    .with_error(format!("{:#}", e)),
            );
            return Err(e);
        }
    };

    if json {
        return output::print_json(&report);
    }

    println!("{}", "Ledger Check".bold());
    println!();
    println!("{}", report_table(&report));
    println!();

    if report.warnings.is_empty() {
        output::success("All rows read cleanly.");
    } else {
        output::warning(&format!("{} cell(s) fell back to a default:", report.warnings.len()));
        for warning in &report.warnings {
            println!("  - {}", warning);
        }
    }

    Ok(())
}

fn report_table(report: &CheckReport) -> comfy_table::Table {
    let status = if report.warnings.is_empty() {
        Cell::new("PASS").fg(Color::Green)
    } else {
        Cell::new("WARN").fg(Color::Yellow)
    };

    let mut table = output::create_table();
    table.set_header(vec!["Source", "Rows", "Ummat", "Kas", "Status"]);
    table.add_row(vec![
        Cell::new(&report.source),
        Cell::new(report.row_count),
        Cell::new(report.ummat_count),
        Cell::new(report.kas_count),
        status,
    ]);
    table
}
