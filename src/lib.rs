pub mod error;
pub mod model;
pub mod source;
pub mod db;
pub mod ops;
pub mod seed;
pub mod cli;

pub use error::{ContactsError, ContactsResult};
pub use model::{Contact, ContactRecord, Item, PostalAddress};
pub use ops::provider::ContactsProvider;
pub use source::ContactsSource;
