/// Key-value table holding the app's JSON blobs, stamped with the last write
pub const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT 0
);

PRAGMA user_version = 1;
"#;

pub const CURRENT_VERSION: i32 = 1;

/// Get current schema version from database
pub fn get_schema_version(conn: &rusqlite::Connection) -> Result<i32, rusqlite::Error> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
}

/// Run migrations to bring database to current schema version
pub fn migrate(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    let mut version = get_schema_version(conn)?;

    if version == 0 {
        conn.execute_batch(SCHEMA_V1)?;
        version = 1;
    }

    if version == CURRENT_VERSION {
        Ok(())
    } else {
        Err(rusqlite::Error::InvalidQuery)
    }
}
