use std::path::Path;

use rusqlite::types::{Value, ValueRef};
use rusqlite::{params_from_iter, Connection};
use tracing::debug;

use crate::db::schema;
use crate::error::{ContactsError, ContactsResult};
use crate::source::{columns, Cell, ContactsSource, DataQuery, DataRow, Selection, Table};

/// A contacts store backed by SQLite.
pub struct SqliteSource {
    conn: Connection,
}

impl SqliteSource {
    /// Open (or create) the store at `path` and make sure the schema exists.
    pub fn open(path: &Path) -> ContactsResult<Self> {
        debug!("Opening contacts database at: {}", path.display());
        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        Self::from_connection(conn)
    }

    /// Create an empty in-memory store (useful for testing)
    pub fn in_memory() -> ContactsResult<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Self::from_connection(conn)
    }

    /// Wrap an existing connection. The schema is not created here.
    pub fn from_connection(conn: Connection) -> ContactsResult<Self> {
        schema::register_functions(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl ContactsSource for SqliteSource {
    fn scan(&self, query: &DataQuery, visit: &mut dyn FnMut(&DataRow)) -> ContactsResult<()> {
        let (sql, args) = build_sql(query)?;
        debug!(table = ?query.table, selection = ?query.selection, "querying contacts store");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(args))?;
        let mut scanned = 0usize;

        while let Some(row) = rows.next()? {
            let mut data_row = DataRow::new();
            for (i, column) in query.projection.iter().enumerate() {
                data_row.insert(column, to_cell(row.get_ref(i)?));
            }
            visit(&data_row);
            scanned += 1;
        }

        debug!(rows = scanned, "scan complete");
        Ok(())
    }
}

fn column_expr(column: &str) -> ContactsResult<String> {
    if !columns::ALL_COLUMNS.contains(&column) {
        return Err(ContactsError::Other(format!("Unknown column: {}", column)));
    }
    Ok(match column {
        columns::DISPLAY_NAME => "c.display_name".to_string(),
        other => format!("d.{}", other),
    })
}

fn build_sql(query: &DataQuery) -> ContactsResult<(String, Vec<Value>)> {
    let select = query
        .projection
        .iter()
        .map(|c| column_expr(c))
        .collect::<ContactsResult<Vec<_>>>()?
        .join(", ");

    let mut clauses = vec![match query.table {
        Table::Profile => "c.is_profile = 1".to_string(),
        Table::Data => "c.is_profile = 0".to_string(),
    }];
    let mut args = Vec::new();

    match &query.selection {
        Selection::All => {}
        Selection::Kinds(kinds) => {
            if kinds.is_empty() {
                clauses.push("0".to_string());
            } else {
                let placeholders = vec!["?"; kinds.len()].join(", ");
                clauses.push(format!("d.mimetype IN ({})", placeholders));
                args.extend(kinds.iter().map(|k| Value::Text(k.mimetype().to_string())));
            }
        }
        Selection::DisplayNameLike(text) => {
            clauses.push(format!("{}(c.display_name) LIKE ?", schema::UNICODE_LOWER));
            args.push(Value::Text(format!("%{}%", text.to_lowercase())));
        }
    }

    let sql = format!(
        "SELECT {} FROM data d JOIN contacts c ON c.contact_id = d.contact_id WHERE {} ORDER BY d.id",
        select,
        clauses.join(" AND ")
    );
    Ok((sql, args))
}

fn to_cell(value: ValueRef<'_>) -> Cell {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => Cell::Null,
        ValueRef::Integer(n) => Cell::Integer(n),
        ValueRef::Real(f) => Cell::Real(f),
        ValueRef::Text(bytes) => Cell::Text(String::from_utf8_lossy(bytes).into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::data_repo::{self, DataEntry};
    use crate::model::kind;

    fn seeded() -> SqliteSource {
        let source = SqliteSource::in_memory().unwrap();
        let conn = source.connection();
        data_repo::insert_profile(conn, 1, Some("Me")).unwrap();
        data_repo::insert_data(conn, 1, &DataEntry::phone("000", kind::PHONE_TYPE_MOBILE)).unwrap();
        data_repo::insert_contact(conn, 100, Some("Ann Lee")).unwrap();
        data_repo::insert_data(conn, 100, &DataEntry::phone("555", kind::PHONE_TYPE_HOME)).unwrap();
        data_repo::insert_data(conn, 100, &DataEntry::postal("1 Main", "Town", "1 Main, Town", kind::POSTAL_TYPE_HOME)).unwrap();
        source
    }

    fn collect(source: &SqliteSource, query: &DataQuery) -> Vec<DataRow> {
        let mut rows = Vec::new();
        source.scan(query, &mut |row| rows.push(row.clone())).unwrap();
        rows
    }

    #[test]
    fn profile_rows_have_no_id_columns() {
        let rows = collect(&seeded(), &DataQuery::profile());
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].has_column(columns::CONTACT_ID));
        assert!(!rows[0].has_column(columns::SOURCE_ID));
        assert_eq!(rows[0].text(columns::DISPLAY_NAME).as_deref(), Some("Me"));
    }

    #[test]
    fn everyone_else_skips_postal_rows() {
        let rows = collect(&seeded(), &DataQuery::everyone_else());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text(columns::MIMETYPE).as_deref(), Some(kind::PHONE_MIMETYPE));
        assert_eq!(rows[0].int(columns::CONTACT_ID), 100);
    }

    #[test]
    fn matching_is_case_insensitive_and_includes_postal() {
        let rows = collect(&seeded(), &DataQuery::matching("ANN"));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn matching_folds_unicode_case() {
        let source = seeded();
        let conn = source.connection();
        data_repo::insert_contact(conn, 200, Some("Ærø Öberg")).unwrap();
        data_repo::insert_data(conn, 200, &DataEntry::phone("777", kind::PHONE_TYPE_WORK)).unwrap();
        assert_eq!(collect(&source, &DataQuery::matching("ærø")).len(), 1);
        assert_eq!(collect(&source, &DataQuery::matching("ÖBERG")).len(), 1);
    }

    #[test]
    fn wrapped_connection_gets_search_functions() {
        let conn = schema::test_connection().unwrap();
        data_repo::insert_contact(&conn, 5, Some("Élodie")).unwrap();
        data_repo::insert_data(&conn, 5, &DataEntry::phone("1", kind::PHONE_TYPE_HOME)).unwrap();
        let source = SqliteSource::from_connection(conn).unwrap();
        assert_eq!(collect(&source, &DataQuery::matching("élodie")).len(), 1);
    }

    #[test]
    fn matching_excludes_profile() {
        let rows = collect(&seeded(), &DataQuery::matching("me"));
        assert!(rows.is_empty());
    }

    #[test]
    fn unknown_projection_column_is_rejected() {
        let query = DataQuery {
            table: Table::Data,
            projection: &["nope"],
            selection: Selection::All,
        };
        let err = seeded().scan(&query, &mut |_| {}).unwrap_err();
        assert!(matches!(err, ContactsError::Other(_)));
    }
}
