use rusqlite::Connection;
use timetable_core::db::migrations::latest_version;
use timetable_core::db::{open_db, open_db_in_memory, DbError};

#[test]
fn open_db_in_memory_creates_timetable_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(
        column_names(&conn, "timetable"),
        vec!["class", "day", "period", "subject", "teacher"]
    );
}

#[test]
fn reopening_a_file_database_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timetable.db");

    let first = open_db(&path).unwrap();
    first
        .execute(
            "INSERT INTO timetable VALUES ('Class 12', 'Monday', 1, 'Math', 'Mr. Smith');",
            [],
        )
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), latest_version());
    assert_eq!(row_count(&second), 1);
}

#[test]
fn unversioned_legacy_table_is_adopted_with_its_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");

    let legacy = Connection::open(&path).unwrap();
    legacy
        .execute_batch(
            "CREATE TABLE timetable (
                class TEXT,
                day TEXT,
                period INTEGER,
                subject TEXT,
                teacher TEXT
            );
            INSERT INTO timetable VALUES ('Class 10', 'Friday', 8, 'English', 'Ms. Miller');",
        )
        .unwrap();
    drop(legacy);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(row_count(&conn), 1);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 42;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion { found, supported } => {
            assert_eq!(found, 42);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn row_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM timetable;", [], |row| row.get(0))
        .unwrap()
}

fn column_names(conn: &Connection, table: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table});"))
        .unwrap();
    stmt.query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}
