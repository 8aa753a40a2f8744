use std::fs;

use clap::Parser;
use contacts_provider::cli::{self, Cli};
use contacts_provider::ContactsError;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;

const SEED: &str = r#"{
  "contacts": [
    {"contact_id": 1, "display_name": "Me", "profile": true, "rows": [
      {"mimetype": "vnd.android.cursor.item/name", "given_name": "Me", "family_name": "Owner"}
    ]},
    {"contact_id": 10, "display_name": "Ann Lee", "rows": [
      {"mimetype": "vnd.android.cursor.item/phone_v2", "number": "555-1234", "phone_type": 1},
      {"mimetype": "vnd.android.cursor.item/postal-address_v2", "street": "1 Main St",
       "city": "Springfield", "formatted_address": "1 Main St, Springfield", "postal_type": 3}
    ]},
    {"contact_id": 20, "display_name": "Bob", "rows": [
      {"mimetype": "vnd.android.cursor.item/email_v2", "email_address": "bob@example.com",
       "email_type": 0, "email_label": "Gym"}
    ]}
  ]
}"#;

fn run(args: &[&str]) -> Result<String, ContactsError> {
    let cli = Cli::parse_from(args);
    let mut out = Vec::new();
    cli::run(&cli, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn imported() -> (TempDir, String) {
    let dir = TempDir::new().unwrap();
    let seed_path = dir.path().join("seed.json");
    fs::write(&seed_path, SEED).unwrap();
    let db = dir.path().join("store").join("contacts.db");
    let db = db.to_str().unwrap().to_string();

    let output = run(&["contacts", "--file", &db, "import", seed_path.to_str().unwrap()]).unwrap();
    assert!(output.contains("Contacts: 3"));
    assert!(output.contains("Profile rows: 1"));
    assert!(output.contains("Data rows: 3"));
    (dir, db)
}

#[test]
fn all_prints_profile_then_contacts() {
    let (_dir, db) = imported();
    let output = run(&["contacts", "--file", &db, "all"]).unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();
    let ids: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["recordID"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["-1", "10", "20"]);
    assert_eq!(value[1]["postalAddresses"], json!([]));
    assert_eq!(value[2]["emailAddresses"], json!([{"email": "bob@example.com", "label": "gym"}]));
}

#[test]
fn me_prints_only_profile() {
    let (_dir, db) = imported();
    let output = run(&["contacts", "--file", &db, "me"]).unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 1);
    assert_eq!(value[0]["givenName"], "Me");
    assert_eq!(value[0]["familyName"], "Owner");
}

#[test]
fn search_prints_postal_addresses() {
    let (_dir, db) = imported();
    let output = run(&["contacts", "--file", &db, "--pretty", "search", "ann"]).unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(
        value,
        json!([{
            "recordID": "10",
            "givenName": "Ann Lee",
            "middleName": "",
            "familyName": "",
            "phoneNumbers": [{"number": "555-1234", "label": "home"}],
            "emailAddresses": [],
            "postalAddresses": [{
                "address": {
                    "street": "1 Main St",
                    "city": "Springfield",
                    "region": null,
                    "postcode": null,
                    "country": null
                },
                "formattedAddress": "1 Main St, Springfield",
                "label": "other"
            }]
        }])
    );
}

#[test]
fn import_refuses_existing_database() {
    let (dir, db) = imported();
    let seed_path = dir.path().join("seed.json");
    let err = run(&["contacts", "--file", &db, "import", seed_path.to_str().unwrap()]).unwrap_err();
    assert!(matches!(err, ContactsError::Other(_)));
}

#[test]
fn import_of_malformed_seed_is_json_error() {
    let dir = TempDir::new().unwrap();
    let seed_path = dir.path().join("seed.json");
    fs::write(&seed_path, r#"{"contacts": [{"rows": []}]}"#).unwrap();
    let db = dir.path().join("contacts.db");

    let err = run(&[
        "contacts",
        "--file",
        db.to_str().unwrap(),
        "import",
        seed_path.to_str().unwrap(),
    ])
    .unwrap_err();
    assert!(matches!(err, ContactsError::Json(_)));
}

#[test]
fn empty_store_prints_empty_array() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("empty.db");
    let output = run(&["contacts", "--file", db.to_str().unwrap(), "all"]).unwrap();
    assert_eq!(output.trim(), "[]");
}
