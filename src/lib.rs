//! # sample-loader - persist rows into a freshly recreated SQLite table
//!
//! Every load drops `sample_table1`, recreates it with a fixed four-column
//! schema and bulk-inserts the given records. The insert batch is
//! all-or-nothing; the previous contents are gone either way.
//!
//! ```no_run
//! use sample_loader::{Loader, Record};
//!
//! let report = Loader::new("./sample.sqlite.db")
//!     .load(Record::samples())
//!     .run()?;
//! assert_eq!(report.rows, 2);
//! # Ok::<(), sample_loader::Error>(())
//! ```

pub mod record;
pub mod storage;
pub mod input;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use record::{FieldMap, IntoRow, Record, Value};
pub use storage::{LoadJob, LoadReport, Loader};

/// Result type alias for loader operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for loader operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Malformed record #{index}: missing field `{field}`")]
    MalformedRecord { index: usize, field: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input error: {0}")]
    Input(String),
}

impl Error {
    /// True when SQLite rejected a row (primary key, NOT NULL, ...)
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Error::Storage(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}
