use std::path::Path;

use rusqlite::Connection;
use serde::Deserialize;
use tracing::info;

use crate::db::data_repo::{self, DataEntry};
use crate::db::schema;
use crate::error::{ContactsError, ContactsResult};

/// A contact and its data rows, as written in a seed file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedContact {
    pub contact_id: i64,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub profile: bool,
    #[serde(default)]
    pub rows: Vec<DataEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedFile {
    pub contacts: Vec<SeedContact>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub contacts: usize,
    pub profile_rows: usize,
    pub data_rows: usize,
}

/// Imports a JSON seed file into a SQLite contacts store.
pub fn import_json(json_path: &Path, db_path: &Path) -> ContactsResult<ImportStats> {
    let json_str = std::fs::read_to_string(json_path)?;
    let seed: SeedFile = serde_json::from_str(&json_str)?;

    let mut conn = Connection::open(db_path)?;
    schema::initialize(&conn)?;

    let stats = import_seed(&mut conn, &seed)?;
    info!(
        contacts = stats.contacts,
        profile_rows = stats.profile_rows,
        data_rows = stats.data_rows,
        "seed imported"
    );
    Ok(stats)
}

/// Writes every contact of `seed` in one transaction.
pub fn import_seed(conn: &mut Connection, seed: &SeedFile) -> ContactsResult<ImportStats> {
    if seed.contacts.iter().filter(|c| c.profile).count() > 1 {
        return Err(ContactsError::Other(
            "Seed file has more than one profile contact".into(),
        ));
    }

    let tx = conn.transaction()?;
    let mut stats = ImportStats::default();

    for contact in &seed.contacts {
        if contact.profile {
            data_repo::insert_profile(&tx, contact.contact_id, contact.display_name.as_deref())?;
        } else {
            data_repo::insert_contact(&tx, contact.contact_id, contact.display_name.as_deref())?;
        }

        for row in &contact.rows {
            if row.mimetype.trim().is_empty() {
                return Err(ContactsError::MissingField {
                    field: format!("mimetype (contact {})", contact.contact_id),
                });
            }
            data_repo::insert_data(&tx, contact.contact_id, row)?;
            if contact.profile {
                stats.profile_rows += 1;
            } else {
                stats.data_rows += 1;
            }
        }
        stats.contacts += 1;
    }

    tx.commit()?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> SeedFile {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn imports_profile_and_contacts() {
        let mut conn = schema::test_connection().unwrap();
        let seed = parse(
            r#"{"contacts": [
                {"contact_id": 1, "display_name": "Me", "profile": true,
                 "rows": [{"mimetype": "vnd.android.cursor.item/phone_v2", "number": "1"}]},
                {"contact_id": 2, "display_name": "Ann",
                 "rows": [
                    {"mimetype": "vnd.android.cursor.item/name", "given_name": "Ann"},
                    {"mimetype": "vnd.android.cursor.item/email_v2", "email_address": "a@b.c", "email_type": 2}
                 ]}
            ]}"#,
        );
        let stats = import_seed(&mut conn, &seed).unwrap();
        assert_eq!(
            stats,
            ImportStats {
                contacts: 2,
                profile_rows: 1,
                data_rows: 2
            }
        );
        assert_eq!(data_repo::count_data(&conn, false).unwrap(), 2);
    }

    #[test]
    fn rejects_blank_mimetype() {
        let mut conn = schema::test_connection().unwrap();
        let seed = parse(r#"{"contacts": [{"contact_id": 2, "rows": [{"mimetype": " "}]}]}"#);
        let err = import_seed(&mut conn, &seed).unwrap_err();
        assert!(matches!(err, ContactsError::MissingField { .. }));
        assert_eq!(data_repo::count_data(&conn, false).unwrap(), 0);
    }

    #[test]
    fn rejects_two_profiles() {
        let mut conn = schema::test_connection().unwrap();
        let seed = parse(
            r#"{"contacts": [
                {"contact_id": 1, "profile": true},
                {"contact_id": 2, "profile": true}
            ]}"#,
        );
        assert!(import_seed(&mut conn, &seed).is_err());
    }

    #[test]
    fn unknown_row_field_fails_to_parse() {
        let result: Result<SeedFile, _> = serde_json::from_str(
            r#"{"contacts": [{"contact_id": 2, "rows": [{"mimetype": "x", "photo": "p"}]}]}"#,
        );
        assert!(result.is_err());
    }
}
