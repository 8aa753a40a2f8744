use rusqlite::{params, Connection};
use serde::Deserialize;

use crate::error::ContactsResult;
use crate::model::FieldKind;

/// A typed data row as written to the store. Fields that do not apply to
/// the row's kind stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataEntry {
    pub mimetype: String,
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub postal_type: Option<i64>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub phone_type: Option<i64>,
    #[serde(default)]
    pub phone_label: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub email_type: Option<i64>,
    #[serde(default)]
    pub email_label: Option<String>,
}

impl DataEntry {
    fn of_kind(kind: FieldKind) -> Self {
        Self {
            mimetype: kind.mimetype().to_string(),
            ..Self::default()
        }
    }

    pub fn name(given: &str, middle: Option<&str>, family: &str) -> Self {
        Self {
            given_name: Some(given.to_string()),
            middle_name: middle.map(str::to_string),
            family_name: Some(family.to_string()),
            ..Self::of_kind(FieldKind::StructuredName)
        }
    }

    pub fn phone(number: &str, phone_type: i64) -> Self {
        Self {
            number: Some(number.to_string()),
            phone_type: Some(phone_type),
            ..Self::of_kind(FieldKind::Phone)
        }
    }

    pub fn email(address: &str, email_type: i64, label: Option<&str>) -> Self {
        Self {
            email_address: Some(address.to_string()),
            email_type: Some(email_type),
            email_label: label.map(str::to_string),
            ..Self::of_kind(FieldKind::Email)
        }
    }

    pub fn postal(street: &str, city: &str, formatted_address: &str, postal_type: i64) -> Self {
        Self {
            street: Some(street.to_string()),
            city: Some(city.to_string()),
            formatted_address: Some(formatted_address.to_string()),
            postal_type: Some(postal_type),
            ..Self::of_kind(FieldKind::Postal)
        }
    }

    /// A row with an arbitrary mimetype, e.g. one the aggregator does not read.
    pub fn other(mimetype: &str) -> Self {
        Self {
            mimetype: mimetype.to_string(),
            ..Self::default()
        }
    }

    pub fn with_source_id(mut self, source_id: &str) -> Self {
        self.source_id = Some(source_id.to_string());
        self
    }
}

pub fn insert_contact(
    conn: &Connection,
    contact_id: i64,
    display_name: Option<&str>,
) -> ContactsResult<()> {
    conn.execute(
        "INSERT INTO contacts (contact_id, display_name, is_profile) VALUES (?1, ?2, 0)",
        params![contact_id, display_name],
    )?;
    Ok(())
}

/// Insert the device owner's profile contact. Its id never reaches the
/// aggregator, since the profile projection has no id columns.
pub fn insert_profile(
    conn: &Connection,
    contact_id: i64,
    display_name: Option<&str>,
) -> ContactsResult<()> {
    conn.execute(
        "INSERT INTO contacts (contact_id, display_name, is_profile) VALUES (?1, ?2, 1)",
        params![contact_id, display_name],
    )?;
    Ok(())
}

pub fn insert_data(conn: &Connection, contact_id: i64, entry: &DataEntry) -> ContactsResult<i64> {
    conn.execute(
        "INSERT INTO data (contact_id, source_id, mimetype, given_name, middle_name, family_name,
         street, city, region, postcode, country, postal_type, formatted_address,
         number, phone_type, phone_label, email_address, email_type, email_label)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)",
        params![
            contact_id,
            entry.source_id,
            entry.mimetype,
            entry.given_name,
            entry.middle_name,
            entry.family_name,
            entry.street,
            entry.city,
            entry.region,
            entry.postcode,
            entry.country,
            entry.postal_type,
            entry.formatted_address,
            entry.number,
            entry.phone_type,
            entry.phone_label,
            entry.email_address,
            entry.email_type,
            entry.email_label,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn count_data(conn: &Connection, profile: bool) -> ContactsResult<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM data d JOIN contacts c ON c.contact_id = d.contact_id
         WHERE c.is_profile = ?1",
        params![profile as i32],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}
