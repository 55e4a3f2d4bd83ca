//! SQLite operations on `sample_table1`

use std::path::Path;
use rusqlite::{params_from_iter, Connection, OpenFlags};
use crate::Result;
use crate::record::{IntoRow, Record};
use super::schema;

/// Drop the table if present and create it empty
pub fn reset_table(conn: &Connection) -> Result<()> {
    for stmt in schema::reset_statements() {
        conn.execute(stmt, [])?;
    }
    tracing::debug!("Recreated table {}", schema::TABLE_NAME);
    Ok(())
}

/// Insert every row in sequence order, returning how many were written.
///
/// Stops at the first failing row; the caller's transaction decides
/// what happens to the rows already written.
pub fn insert_rows<I>(conn: &Connection, rows: I) -> Result<usize>
where
    I: IntoIterator,
    I::Item: IntoRow,
{
    let mut stmt = conn.prepare_cached(schema::INSERT_ROW)?;
    let mut inserted = 0;

    for (index, item) in rows.into_iter().enumerate() {
        let values = item.into_row(index)?;
        stmt.execute(params_from_iter(values.iter())).map_err(|e| {
            tracing::debug!("Insert of row #{} failed: {}", index, e);
            e
        })?;
        inserted += 1;
    }

    Ok(inserted)
}

/// Check whether the table exists
pub fn table_exists(conn: &Connection) -> Result<bool> {
    let exists: bool = conn.query_row(schema::TABLE_EXISTS, [schema::TABLE_NAME], |row| row.get(0))?;
    Ok(exists)
}

/// Count all rows
pub fn count_rows(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row(schema::COUNT_ROWS, [], |row| row.get(0))?;
    Ok(count as usize)
}

/// Read every row ordered by `pid`
pub fn read_records(conn: &Connection) -> Result<Vec<Record>> {
    let mut stmt = conn.prepare(schema::SELECT_ALL)?;

    let records = stmt
        .query_map([], row_to_record)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(records)
}

/// Open `path` read-only and read the whole table.
///
/// Unlike loading, this never creates the database file.
pub fn read_table(path: &Path) -> Result<Vec<Record>> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    read_records(&conn)
}

/// Helper to convert a row to a Record
fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<Record> {
    Ok(Record {
        pid: row.get(0)?,
        price: row.get(1)?,
        name: row.get(2)?,
        data: row.get(3)?,
    })
}
