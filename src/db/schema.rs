use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

use crate::error::ContactsResult;

/// Initialize the database schema. Creates all tables if they don't exist.
///
/// `contacts` holds one row per aggregate contact, including the device
/// owner's profile (`is_profile = 1`). `data` holds the typed rows that
/// belong to them, one field kind per row.
pub fn initialize(conn: &Connection) -> ContactsResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS contacts (
            contact_id INTEGER PRIMARY KEY NOT NULL,
            display_name TEXT,
            is_profile INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS data (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            contact_id INTEGER NOT NULL REFERENCES contacts(contact_id) ON DELETE CASCADE,
            source_id TEXT,
            mimetype TEXT NOT NULL,
            given_name TEXT,
            middle_name TEXT,
            family_name TEXT,
            street TEXT,
            city TEXT,
            region TEXT,
            postcode TEXT,
            country TEXT,
            postal_type INTEGER,
            formatted_address TEXT,
            number TEXT,
            phone_type INTEGER,
            phone_label TEXT,
            email_address TEXT,
            email_type INTEGER,
            email_label TEXT
        );

        CREATE INDEX IF NOT EXISTS data_contact_id ON data(contact_id);

        PRAGMA foreign_keys = ON;
        ",
    )?;
    Ok(())
}

/// Name of the Unicode-aware lower-casing SQL function; SQLite's own
/// `LOWER()` only folds ASCII.
pub const UNICODE_LOWER: &str = "unicode_lower";

/// Register the scalar functions queries rely on. Must run on every
/// connection a source reads from.
pub fn register_functions(conn: &Connection) -> ContactsResult<()> {
    conn.create_scalar_function(
        UNICODE_LOWER,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|s| s.to_lowercase()))
        },
    )?;
    Ok(())
}

/// Create an initialized in-memory connection, e.g. for tests.
pub fn test_connection() -> ContactsResult<Connection> {
    let conn = Connection::open_in_memory()?;
    initialize(&conn)?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unicode_lower_folds_non_ascii_capitals() {
        let conn = test_connection().unwrap();
        register_functions(&conn).unwrap();
        let lowered: String = conn
            .query_row("SELECT unicode_lower('Émile ÅSA')", [], |row| row.get(0))
            .unwrap();
        assert_eq!(lowered, "émile åsa");
    }

    #[test]
    fn unicode_lower_passes_null_through() {
        let conn = test_connection().unwrap();
        register_functions(&conn).unwrap();
        let lowered: Option<String> = conn
            .query_row("SELECT unicode_lower(NULL)", [], |row| row.get(0))
            .unwrap();
        assert_eq!(lowered, None);
    }
}
