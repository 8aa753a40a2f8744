pub mod contact;
pub mod kind;
pub mod record;

// Re-exports for convenience
pub use contact::{Contact, Item, PostalAddress};
pub use kind::FieldKind;
pub use record::{ContactRecord, EmailAddress, PhoneNumber, PostalRecord};
