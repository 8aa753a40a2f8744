use serde::{Deserialize, Serialize};

/// Structured sub-fields of a postal address, as read from the row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
}

/// A single labelled phone number, email or postal address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub label: String,
    pub value: String,
    pub extra: Option<PostalAddress>,
}

impl Item {
    pub fn new(label: String, value: String) -> Self {
        Self {
            label,
            value,
            extra: None,
        }
    }

    pub fn postal(label: String, formatted_address: String, address: PostalAddress) -> Self {
        Self {
            label,
            value: formatted_address,
            extra: Some(address),
        }
    }
}

/// One logical contact, folded from every data row that shares its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: String,
    pub display_name: Option<String>,
    pub given_name: String,
    pub middle_name: String,
    pub family_name: String,
    pub phones: Vec<Item>,
    pub emails: Vec<Item>,
    pub postals: Vec<Item>,
}

impl Contact {
    pub fn new(id: String) -> Self {
        Self {
            id,
            display_name: None,
            given_name: String::new(),
            middle_name: String::new(),
            family_name: String::new(),
            phones: Vec::new(),
            emails: Vec::new(),
            postals: Vec::new(),
        }
    }

    /// Keeps the first non-empty display name and ignores the rest.
    pub fn offer_display_name(&mut self, name: Option<&str>) {
        if self.display_name.is_some() {
            return;
        }
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            self.display_name = Some(name.to_string());
        }
    }

    pub fn set_structured_name(
        &mut self,
        given: Option<&str>,
        middle: Option<&str>,
        family: Option<&str>,
    ) {
        self.given_name = given.unwrap_or_default().to_string();
        self.middle_name = middle.unwrap_or_default().to_string();
        self.family_name = family.unwrap_or_default().to_string();
    }

    /// Takes over everything folded into `other`, which was seen after this
    /// contact. Names already set here are kept; items are appended.
    pub fn absorb(&mut self, other: Contact) {
        self.offer_display_name(other.display_name.as_deref());
        if self.given_name.is_empty() && self.middle_name.is_empty() && self.family_name.is_empty() {
            self.given_name = other.given_name;
            self.middle_name = other.middle_name;
            self.family_name = other.family_name;
        }
        self.phones.extend(other.phones);
        self.emails.extend(other.emails);
        self.postals.extend(other.postals);
    }
}
