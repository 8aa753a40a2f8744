use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::contact::{Contact, PostalAddress};
use crate::error::ContactsResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    pub number: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub email: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalRecord {
    pub address: PostalAddress,
    pub formatted_address: String,
    pub label: String,
}

/// The record handed across the bridge. Field names are the wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    #[serde(rename = "recordID")]
    pub record_id: String,
    pub given_name: String,
    pub middle_name: String,
    pub family_name: String,
    pub phone_numbers: Vec<PhoneNumber>,
    pub email_addresses: Vec<EmailAddress>,
    pub postal_addresses: Vec<PostalRecord>,
}

impl ContactRecord {
    pub fn to_value(&self) -> ContactsResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl From<&Contact> for ContactRecord {
    fn from(contact: &Contact) -> Self {
        // A contact with only a display name still gets a usable given name.
        let given_name = if contact.given_name.is_empty() {
            contact.display_name.clone().unwrap_or_default()
        } else {
            contact.given_name.clone()
        };

        Self {
            record_id: contact.id.clone(),
            given_name,
            middle_name: contact.middle_name.clone(),
            family_name: contact.family_name.clone(),
            phone_numbers: contact
                .phones
                .iter()
                .map(|item| PhoneNumber {
                    number: item.value.clone(),
                    label: item.label.clone(),
                })
                .collect(),
            email_addresses: contact
                .emails
                .iter()
                .map(|item| EmailAddress {
                    email: item.value.clone(),
                    label: item.label.clone(),
                })
                .collect(),
            postal_addresses: contact
                .postals
                .iter()
                .map(|item| PostalRecord {
                    address: item.extra.clone().unwrap_or_default(),
                    formatted_address: item.value.clone(),
                    label: item.label.clone(),
                })
                .collect(),
        }
    }
}

impl From<Contact> for ContactRecord {
    fn from(contact: Contact) -> Self {
        Self::from(&contact)
    }
}
