pub mod aggregate;
pub mod provider;
