use serde_json::Value;
use tracing::debug;

use crate::error::ContactsResult;
use crate::model::{Contact, ContactRecord};
use crate::ops::aggregate::ContactFolder;
use crate::source::{ContactsSource, DataQuery};

/// Reads contacts out of a `ContactsSource` and reshapes them into bridge records.
pub struct ContactsProvider<S> {
    source: S,
}

impl<S: ContactsSource> ContactsProvider<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The device owner's own profile.
    pub fn fetch_self(&self) -> ContactsResult<Vec<ContactRecord>> {
        Ok(to_records(self.load(&DataQuery::profile())?))
    }

    /// The profile first, then everyone else's names, phones and emails.
    pub fn fetch_all(&self) -> ContactsResult<Vec<ContactRecord>> {
        let mut records = self.fetch_self()?;
        records.extend(to_records(self.load(&DataQuery::everyone_else())?));
        debug!(records = records.len(), "fetched all contacts");
        Ok(records)
    }

    /// Contacts whose display name contains `text`, ignoring case.
    pub fn search(&self, text: &str) -> ContactsResult<Vec<ContactRecord>> {
        let records = to_records(self.load(&DataQuery::matching(text))?);
        debug!(query = text, records = records.len(), "searched contacts");
        Ok(records)
    }

    pub fn fetch_self_values(&self) -> ContactsResult<Value> {
        to_value(&self.fetch_self()?)
    }

    pub fn fetch_all_values(&self) -> ContactsResult<Value> {
        to_value(&self.fetch_all()?)
    }

    pub fn search_values(&self, text: &str) -> ContactsResult<Value> {
        to_value(&self.search(text)?)
    }

    fn load(&self, query: &DataQuery) -> ContactsResult<Vec<Contact>> {
        let mut folder = ContactFolder::new();
        self.source.scan(query, &mut |row| folder.fold(row))?;
        Ok(folder.finish())
    }
}

fn to_records(contacts: Vec<Contact>) -> Vec<ContactRecord> {
    contacts.into_iter().map(ContactRecord::from).collect()
}

fn to_value(records: &[ContactRecord]) -> ContactsResult<Value> {
    Ok(serde_json::to_value(records)?)
}
