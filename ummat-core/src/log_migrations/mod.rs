//! Log database migrations - embedded SQL files
//!
//! Compiled into the binary with include_str! and applied in order by
//! `LoggingService`. Each entry is (file name, SQL).

/// All log migrations, embedded at compile time.
///
/// When adding a migration, create `NNN_description.sql` next to this file
/// and append it here.
pub const LOG_MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("000_migrations.sql")),
    (
        "001_initial_schema.sql",
        include_str!("001_initial_schema.sql"),
    ),
];
