//! List command - one page of the ledger

use anyhow::Result;
use colored::Colorize;

use super::{get_context, log_command};
use crate::output;
use ummat_core::{FinanceFilter, Period, SortDirection, SortField};

pub struct ListArgs {
    pub period: Period,
    pub page: usize,
    pub per_page: Option<usize>,
    pub sort: SortField,
    pub asc: bool,
    pub json: bool,
}

impl ListArgs {
    fn filter(&self, default_per_page: usize) -> FinanceFilter {
        FinanceFilter {
            period: self.period,
            page: self.page,
            items_per_page: self.per_page.unwrap_or(default_per_page),
            sort_field: self.sort,
            sort_direction: if self.asc {
                SortDirection::Asc
            } else {
                SortDirection::Desc
            },
        }
    }
}

pub fn run(args: ListArgs) -> Result<()> {
    let ctx = get_context()?;
    log_command(&ctx, "list", Some(args.period.as_str()));

    let filter = args.filter(ctx.config.items_per_page);
    let today = ctx.finance_service.today();
    let snapshot = ctx.finance_service.load(today);
    let page = snapshot.page(&filter, today);

    if args.json {
        return output::print_json(&page);
    }

    println!(
        "{} {}",
        "Transaksi Dana Ummat".bold(),
        format!("({})", filter.period.label()).dimmed()
    );

    if page.data.is_empty() {
        if page.total_items == 0 {
            output::info("Belum ada transaksi untuk periode ini.");
        } else {
            output::warning(&format!(
                "Halaman {} kosong; hanya ada {} halaman.",
                page.current_page, page.total_pages
            ));
        }
        output::report_warnings(&snapshot.warnings);
        return Ok(());
    }

    println!("{}", output::transaction_table(&page.data));
    println!("{}", output::page_footer(&page).dimmed());
    output::report_warnings(&snapshot.warnings);

    Ok(())
}
