use crate::schema;
use rusqlite::{params, Connection, Result};
use std::path::Path;

/// Open or create a key-value database at the specified path
pub fn open_db(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    schema::migrate(&conn)?;
    Ok(conn)
}

/// Get a stored value
pub fn get_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare("SELECT value FROM kv_store WHERE key = ?1")?;

    let value = stmt.query_row(params![key], |row| row.get(0));

    match value {
        Ok(v) => Ok(Some(v)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Insert or replace a stored value
pub fn set_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    let now = chrono::Utc::now().timestamp_millis();

    conn.execute(
        "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value, now],
    )?;
    Ok(())
}

/// List all keys with their last write time, oldest first
pub fn list_keys(conn: &Connection) -> Result<Vec<(String, i64)>> {
    let mut stmt = conn.prepare("SELECT key, updated_at FROM kv_store ORDER BY updated_at ASC")?;

    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut keys = Vec::new();
    for key in rows {
        keys.push(key?);
    }

    Ok(keys)
}
