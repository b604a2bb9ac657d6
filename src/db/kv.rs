//! Single-table key/value storage backing the record store.

use crate::errors::AppResult;
use rusqlite::{Connection, OptionalExtension, params};

pub fn kv_get(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            [key],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(value)
}

pub fn kv_set(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;

    #[test]
    fn set_overwrites_the_previous_value() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();

        assert_eq!(kv_get(&conn, "k").unwrap(), None);

        kv_set(&conn, "k", "[1]").unwrap();
        kv_set(&conn, "k", "[1,2]").unwrap();

        assert_eq!(kv_get(&conn, "k").unwrap().as_deref(), Some("[1,2]"));
    }
}
