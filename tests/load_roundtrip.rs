use rusqlite::Connection;
use sample_loader::input::{self, InputFormat};
use sample_loader::storage::read_table;
use sample_loader::{Error, Loader, Record};
use tempfile::tempdir;

// Helper function to read the table back with plain SQL
fn select_all(conn: &Connection) -> rusqlite::Result<Vec<(i64, f64, String, Vec<u8>)>> {
    let mut stmt = conn.prepare("SELECT * FROM sample_table1 ORDER BY pid")?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)))?
        .collect();
    rows
}

#[test]
fn test_samples_end_to_end() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sample.sqlite.db");

    Loader::new(&path).load(Record::samples()).run().unwrap();

    let conn = Connection::open(&path).unwrap();
    assert_eq!(
        select_all(&conn).unwrap(),
        vec![
            (42, 42.195, "run".to_string(), b"helo".to_vec()),
            (634, 3.776, "fuji".to_string(), b"mount".to_vec()),
        ]
    );
}

#[test]
fn test_schema_is_exact() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("schema.db");
    Loader::new(&path).load(Record::samples()).run().unwrap();

    let conn = Connection::open(&path).unwrap();
    let mut stmt = conn.prepare("PRAGMA table_info(sample_table1)").unwrap();
    let columns: Vec<(String, String, bool, bool)> = stmt
        .query_map([], |row| Ok((row.get(1)?, row.get(2)?, row.get(3)?, row.get::<_, i64>(5)? == 1)))
        .unwrap()
        .collect::<rusqlite::Result<_>>()
        .unwrap();

    assert_eq!(
        columns,
        vec![
            ("pid".to_string(), "INTEGER".to_string(), false, true),
            ("price".to_string(), "REAL".to_string(), true, false),
            ("name".to_string(), "TEXT".to_string(), true, false),
            ("data".to_string(), "BLOB".to_string(), true, false),
        ]
    );
}

#[test]
fn test_second_run_reflects_only_second_batch() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("twice.db");
    let loader = Loader::new(&path);

    loader.load(Record::samples()).run().unwrap();
    let second = vec![
        Record::new(1, 10.0, "alpha", vec![1u8, 2, 3]),
        Record::new(2, 20.0, "beta", vec![0u8; 64]),
        Record::new(3, 30.0, "gamma", (0u8..=255).collect::<Vec<u8>>()),
    ];
    let report = loader.load(&second).run().unwrap();

    assert_eq!(report.rows, 3);
    assert_eq!(read_table(&path).unwrap(), second);
}

#[test]
fn test_load_from_json_lines_file() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("rows.jsonl");
    std::fs::write(
        &input_path,
        "{\"pid\": 634, \"price\": 3.776, \"name\": \"fuji\", \"data\": [109, 111, 117, 110, 116]}\n\
         {\"pid\": 42, \"price\": 42.195, \"name\": \"run\", \"data\": [104, 101, 108, 111], \"note\": \"extra\"}\n",
    )
    .unwrap();

    let rows = input::read_file(&input_path, None).unwrap();
    let db = dir.path().join("rows.db");
    Loader::new(&db).load(rows).run().unwrap();

    assert_eq!(read_table(&db).unwrap(), Record::samples());
}

#[test]
fn test_missing_name_in_file_fails_whole_load() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("rows.json");
    std::fs::write(
        &input_path,
        r#"[{"pid": 1, "price": 1.0, "name": "ok", "data": []}, {"pid": 2, "price": 2.0, "data": []}]"#,
    )
    .unwrap();

    let rows = input::read_file(&input_path, Some(InputFormat::Json)).unwrap();
    let db = dir.path().join("rows.db");
    let loader = Loader::new(&db);
    loader.load(Record::samples()).run().unwrap();

    let err = loader.load(rows).run().unwrap_err();
    assert!(matches!(err, Error::MalformedRecord { index: 1, field: "name" }));

    // The table was replaced before the batch failed: it exists and is empty
    assert!(read_table(&db).unwrap().is_empty());
    let conn = Connection::open(&db).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM sample_table1", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn test_null_name_in_file_is_constraint_violation() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("rows.json");
    std::fs::write(&input_path, r#"[{"pid": 1, "price": 1.0, "name": null, "data": [1]}]"#).unwrap();

    let rows = input::read_file(&input_path, None).unwrap();
    let err = Loader::new(dir.path().join("rows.db")).load(rows).run().unwrap_err();

    assert!(matches!(err, Error::Storage(_)));
    assert!(err.is_constraint_violation());
}

#[test]
fn test_mistyped_column_is_rejected_before_commit() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("rows.json");
    std::fs::write(
        &input_path,
        r#"[{"pid": 1, "price": 1.0, "name": "a", "data": "helo"}]"#,
    )
    .unwrap();

    let rows = input::read_file(&input_path, None).unwrap();
    let db = dir.path().join("rows.db");
    let err = Loader::new(&db).load(rows).run().unwrap_err();

    assert!(matches!(err, Error::Input(_)));
    // Nothing unreadable was written, so the table still reads back
    assert!(read_table(&db).unwrap().is_empty());
}

#[test]
fn test_string_price_is_rejected() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("rows.jsonl");
    std::fs::write(&input_path, "{\"pid\": 1, \"price\": \"cheap\", \"name\": \"a\", \"data\": [1]}\n").unwrap();

    let rows = input::read_file(&input_path, None).unwrap();
    let err = Loader::new(dir.path().join("rows.db")).load(rows).run().unwrap_err();
    assert!(matches!(err, Error::Input(_)));
}
