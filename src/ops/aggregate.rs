use std::collections::HashMap;

use tracing::{debug, trace};

use crate::model::kind::{self, FieldKind};
use crate::model::{Contact, Item, PostalAddress};
use crate::source::{columns, DataRow};

/// Aggregation key used for the device owner's profile, whose rows carry no
/// contact id of their own.
pub const PROFILE_CONTACT_ID: &str = "-1";

/// Folds flat data rows into one `Contact` per aggregation key, keeping
/// contacts in first-seen order.
///
/// A native contact id seen next to an external id becomes an alias for it,
/// so rows exposing only the native id land on the same contact. A contact
/// already folded under that native id is merged into the external one.
#[derive(Debug, Default)]
pub struct ContactFolder {
    /// Slots emptied by a merge stay `None` so indices remain stable.
    contacts: Vec<Option<Contact>>,
    index: HashMap<String, usize>,
    aliases: HashMap<String, usize>,
}

impl ContactFolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fold(&mut self, row: &DataRow) {
        let idx = self.resolve(row);
        let Some(contact) = self.contacts[idx].as_mut() else {
            return;
        };

        contact.offer_display_name(row.text(columns::DISPLAY_NAME).as_deref());

        let mimetype = row.text(columns::MIMETYPE);
        match mimetype.as_deref().and_then(FieldKind::from_mimetype) {
            Some(FieldKind::StructuredName) => contact.set_structured_name(
                row.text(columns::GIVEN_NAME).as_deref(),
                row.text(columns::MIDDLE_NAME).as_deref(),
                row.text(columns::FAMILY_NAME).as_deref(),
            ),
            Some(FieldKind::Phone) => {
                if let Some(number) = non_empty(row.text(columns::NUMBER)) {
                    let label = kind::phone_label(row.int(columns::PHONE_TYPE));
                    contact.phones.push(Item::new(label, number));
                }
            }
            Some(FieldKind::Email) => {
                if let Some(address) = non_empty(row.text(columns::EMAIL_ADDRESS)) {
                    let label = kind::email_label(
                        row.int(columns::EMAIL_TYPE),
                        row.text(columns::EMAIL_LABEL).as_deref(),
                    );
                    contact.emails.push(Item::new(label, address));
                }
            }
            Some(FieldKind::Postal) => {
                let street = row.text(columns::STREET);
                if street.as_deref().is_some_and(|s| !s.is_empty()) {
                    let label = kind::postal_label(row.int(columns::POSTAL_TYPE));
                    let address = PostalAddress {
                        street,
                        city: row.text(columns::CITY),
                        region: row.text(columns::REGION),
                        postcode: row.text(columns::POSTCODE),
                        country: row.text(columns::COUNTRY),
                    };
                    let formatted = row.text(columns::FORMATTED_ADDRESS).unwrap_or_default();
                    contact.postals.push(Item::postal(label, formatted, address));
                }
            }
            None => trace!(mimetype = ?mimetype, "ignoring row of unrecognised kind"),
        }
    }

    pub fn finish(self) -> Vec<Contact> {
        let contacts: Vec<Contact> = self.contacts.into_iter().flatten().collect();
        debug!(contacts = contacts.len(), "fold complete");
        contacts
    }

    fn resolve(&mut self, row: &DataRow) -> usize {
        let native = native_id(row);
        let Some(external) = row.text(columns::SOURCE_ID) else {
            let key = native.unwrap_or_else(|| PROFILE_CONTACT_ID.to_string());
            if let Some(&idx) = self.aliases.get(&key) {
                return idx;
            }
            return self.find_or_create(key);
        };

        let folded_native = native.as_ref().and_then(|n| self.index.get(n).copied());
        let idx = match (self.index.get(&external).copied(), folded_native) {
            (Some(idx), Some(other)) if idx != other => self.merge(idx, other),
            (Some(idx), _) => idx,
            // Rows folded earlier under the native id move to the external key.
            (None, Some(idx)) => {
                if let Some(contact) = self.contacts[idx].as_mut() {
                    let old = std::mem::replace(&mut contact.id, external.clone());
                    self.index.remove(&old);
                }
                self.index.insert(external, idx);
                idx
            }
            (None, None) => self.find_or_create(external),
        };

        if let Some(native) = native {
            self.aliases.insert(native, idx);
        }
        idx
    }

    /// Merges the contacts at `into` (keyed by an external id) and `from`
    /// (keyed by a native id) into whichever was created first. The result
    /// keeps `into`'s key.
    fn merge(&mut self, into: usize, from: usize) -> usize {
        let (first, second) = (into.min(from), into.max(from));
        let [Some(kept), .., slot] = &mut self.contacts[first..=second] else {
            return into;
        };
        let Some(later) = slot.take() else {
            return into;
        };

        let native_key = if first == into {
            later.id.clone()
        } else {
            std::mem::replace(&mut kept.id, later.id.clone())
        };
        kept.absorb(later);
        debug!(native = %native_key, external = %kept.id, "merging contact into external id");

        self.index.remove(&native_key);
        for idx in self.index.values_mut().chain(self.aliases.values_mut()) {
            if *idx == second {
                *idx = first;
            }
        }
        first
    }

    fn find_or_create(&mut self, key: String) -> usize {
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.contacts.len();
        self.contacts.push(Some(Contact::new(key.clone())));
        self.index.insert(key, idx);
        idx
    }
}

/// Folds a whole sequence of rows.
pub fn fold_rows<'a, I>(rows: I) -> Vec<Contact>
where
    I: IntoIterator<Item = &'a DataRow>,
{
    let mut folder = ContactFolder::new();
    for row in rows {
        folder.fold(row);
    }
    folder.finish()
}

/// The key a row asks for on its own: the external source id when present and
/// non-null, else the native contact id, else the profile sentinel for rows
/// without an id column.
pub fn aggregation_key(row: &DataRow) -> String {
    row.text(columns::SOURCE_ID)
        .or_else(|| native_id(row))
        .unwrap_or_else(|| PROFILE_CONTACT_ID.to_string())
}

fn native_id(row: &DataRow) -> Option<String> {
    row.has_column(columns::CONTACT_ID)
        .then(|| row.int(columns::CONTACT_ID).to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
