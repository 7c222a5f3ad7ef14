//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The reporting
//! pipeline depends only on these traits, not on concrete sources.

mod row_source;

pub use row_source::{RowSource, Rows};
