//! Database schema definitions

/// The table every load replaces
pub const TABLE_NAME: &str = "sample_table1";

/// SQL to drop the table before a load
pub const DROP_TABLE: &str = "DROP TABLE IF EXISTS sample_table1";

/// SQL to create the table
pub const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS sample_table1(
    pid   INTEGER PRIMARY KEY,
    price REAL    NOT NULL,
    name  TEXT    NOT NULL,
    data  BLOB    NOT NULL
)
"#;

/// SQL to insert one row, columns in declaration order
pub const INSERT_ROW: &str = "INSERT INTO sample_table1 VALUES (?, ?, ?, ?)";

pub const SELECT_ALL: &str = "SELECT * FROM sample_table1 ORDER BY pid";

pub const COUNT_ROWS: &str = "SELECT COUNT(*) FROM sample_table1";

pub const TABLE_EXISTS: &str =
    "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)";

/// Statements that reset the table, in execution order
pub fn reset_statements() -> [&'static str; 2] {
    [DROP_TABLE, CREATE_TABLE]
}
