pub mod columns;
pub mod row;

pub use row::{Cell, DataRow};

use crate::error::ContactsResult;
use crate::model::FieldKind;

/// Which table of the contacts store a query reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    /// The device owner's own profile rows.
    Profile,
    /// Data rows of every other contact.
    Data,
}

/// Row filter applied by the data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    /// Rows whose mimetype is one of the given kinds.
    Kinds(Vec<FieldKind>),
    /// Rows whose parent contact's display name contains the text, ignoring case.
    DisplayNameLike(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataQuery {
    pub table: Table,
    pub projection: &'static [&'static str],
    pub selection: Selection,
}

impl DataQuery {
    pub fn profile() -> Self {
        Self {
            table: Table::Profile,
            projection: columns::PROFILE_PROJECTION,
            selection: Selection::All,
        }
    }

    /// Everyone else: names, phones and emails. Postal rows are left out.
    pub fn everyone_else() -> Self {
        Self {
            table: Table::Data,
            projection: columns::FULL_PROJECTION,
            selection: Selection::Kinds(vec![
                FieldKind::Email,
                FieldKind::Phone,
                FieldKind::StructuredName,
            ]),
        }
    }

    pub fn matching(text: &str) -> Self {
        Self {
            table: Table::Data,
            projection: columns::FULL_PROJECTION,
            selection: Selection::DisplayNameLike(text.to_string()),
        }
    }
}

/// A tabular contacts store that can be scanned row by row.
///
/// Implementations own the result cursor for the duration of `scan` and must
/// release it before returning, whether the scan finished or failed.
pub trait ContactsSource {
    fn scan(&self, query: &DataQuery, visit: &mut dyn FnMut(&DataRow)) -> ContactsResult<()>;
}

impl<S: ContactsSource + ?Sized> ContactsSource for &S {
    fn scan(&self, query: &DataQuery, visit: &mut dyn FnMut(&DataRow)) -> ContactsResult<()> {
        (**self).scan(query, visit)
    }
}
