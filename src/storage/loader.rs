//! Replace-on-load workflow
//!
//! `Loader::new(path)` binds a destination without touching the disk.
//! `Loader::load(rows)` returns a [`LoadJob`]; nothing happens until
//! [`LoadJob::run`] is called. A run opens its own connection, drops and
//! recreates the table (committed immediately), then inserts every row
//! inside one transaction:
//!
//! - success: the transaction commits and the connection is closed
//! - failure: the transaction rolls back on drop, the connection is
//!   released, and the error is returned unchanged
//!
//! Prior contents are gone as soon as the reset runs, so a failed insert
//! batch leaves the table present and empty.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use rusqlite::Connection;
use serde::Serialize;
use crate::Result;
use crate::record::IntoRow;
use super::sqlite;

/// A destination database bound to a path
#[derive(Debug, Clone)]
pub struct Loader {
    path: PathBuf,
}

impl Loader {
    /// Bind a loader to `path`. No I/O is performed.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Prepare a load of `rows`; call [`LoadJob::run`] to execute it
    pub fn load<I>(&self, rows: I) -> LoadJob<I::IntoIter>
    where
        I: IntoIterator,
        I::Item: IntoRow,
    {
        LoadJob {
            path: self.path.clone(),
            rows: rows.into_iter(),
        }
    }
}

/// A configured, not yet executed load
#[must_use = "a LoadJob does nothing until `run` is called"]
pub struct LoadJob<I> {
    path: PathBuf,
    rows: I,
}

impl<I> LoadJob<I>
where
    I: Iterator,
    I::Item: IntoRow,
{
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Execute the load: drop, create, insert-many, commit.
    pub fn run(self) -> Result<LoadReport> {
        let started = Instant::now();
        tracing::debug!("Opening {}", self.path.display());

        let mut conn = Connection::open(&self.path)?;
        sqlite::reset_table(&conn)?;

        let tx = conn.transaction()?;
        let rows = sqlite::insert_rows(&tx, self.rows)?;
        tx.commit()?;

        conn.close().map_err(|(_, e)| e)?;

        let report = LoadReport {
            path: self.path,
            rows,
            elapsed: started.elapsed(),
        };
        tracing::info!("Loaded {} rows into {}", report.rows, report.path.display());
        Ok(report)
    }
}

/// Outcome of a successful load
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub path: PathBuf,
    pub rows: usize,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl std::fmt::Display for LoadReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} rows -> {}", self.rows, self.path.display())
    }
}
