// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record read and replace operations.

use rusqlite::{Connection, OptionalExtension, params};

/// Get the first record stored under `key`.
pub fn first_record(conn: &Connection, key: &str) -> Result<Option<Vec<u8>>, rusqlite::Error> {
    conn.query_row(
        "SELECT payload FROM records WHERE key = ?1 ORDER BY position ASC LIMIT 1",
        params![key],
        |row| row.get(0),
    )
    .optional()
}

/// Replace all records under `key` in a single transaction.
pub fn replace_records(
    conn: &mut Connection,
    key: &str,
    records: &[Vec<u8>],
) -> Result<(), rusqlite::Error> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM records WHERE key = ?1", params![key])?;
    {
        let mut stmt =
            tx.prepare("INSERT INTO records (key, position, payload) VALUES (?1, ?2, ?3)")?;
        for (position, payload) in records.iter().enumerate() {
            stmt.execute(params![key, position as i64, payload])?;
        }
    }
    tx.commit()
}

/// Count the records stored under `key`.
pub fn count_records(conn: &Connection, key: &str) -> Result<i64, rusqlite::Error> {
    conn.query_row(
        "SELECT COUNT(*) FROM records WHERE key = ?1",
        params![key],
        |row| row.get(0),
    )
}
