use lingnote_core::db::migrations::latest_version;
use lingnote_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for table in ["languages", "notes", "tags", "examples", "note_tags"] {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn fresh_store_is_seeded_with_course_languages() {
    let conn = open_db_in_memory().unwrap();

    let names = language_names(&conn);
    assert_eq!(
        names,
        vec![
            "Coast Miwok",
            "English",
            "French",
            "Hawai'ian",
            "Southern Sierra Miwok",
        ]
    );
}

#[test]
fn reopening_the_same_database_does_not_reseed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lingnote.sqlite");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(language_names(&conn_first).len(), 5);
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_eq!(language_names(&conn_second).len(), 5);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn duplicate_language_names_are_rejected_by_schema() {
    let conn = open_db_in_memory().unwrap();

    let result = conn.execute("INSERT INTO languages (name) VALUES ('English');", []);
    assert!(result.is_err());

    let result = conn.execute("INSERT INTO languages (name) VALUES ('');", []);
    assert!(result.is_err(), "empty names must violate the CHECK");
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn language_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM languages ORDER BY name ASC;")
        .unwrap();
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    names
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
