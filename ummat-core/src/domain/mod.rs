//! Core domain entities
//!
//! The whole reporting pipeline lives here: codecs, the row normalizer,
//! filtering, sorting, pagination and totals. Pure functions over owned
//! data; nothing in this module performs I/O or reads the clock.

pub mod currency;
pub mod date;
pub mod filter;
pub mod page;
pub mod result;
pub mod summary;
pub mod transaction;

pub use currency::{format_currency, parse_currency, try_parse_currency};
pub use date::{format_date_to_indonesian, format_long_indonesian, parse_date, try_parse_date};
pub use filter::{
    filter_by_period, sort_transactions, FinanceFilter, Period, SortDirection, SortField,
    DEFAULT_ITEMS_PER_PAGE,
};
pub use page::{paginate, PaginatedResult};
pub use summary::Summary;
pub use transaction::{normalize_rows, Fund, NormalizedRows, Transaction};
