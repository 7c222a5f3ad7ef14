//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod demo;
mod finance;
pub mod logging;

pub use demo::DemoService;
pub use finance::{CheckReport, FinanceService, LedgerSnapshot};
pub use logging::{EntryPoint, EventCount, LogEntry, LogEvent, LoggingService};
