//! Storage Layer - SQLite-backed persistence
//!
//! A single table is managed:
//! - sample_table1(pid, price, name, data)
//!
//! `loader` owns the replace-on-load workflow, `sqlite` holds the
//! statements it is built from plus the read-back helpers.

pub mod schema;
pub mod sqlite;
pub mod loader;

pub use loader::{LoadJob, LoadReport, Loader};
pub use sqlite::{count_rows, insert_rows, read_records, read_table, reset_table, table_exists};
