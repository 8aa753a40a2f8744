use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContactsError {
    #[error("Data source error: {0}")]
    DataSource(#[from] rusqlite::Error),

    #[error("{field} is required")]
    MissingField { field: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type ContactsResult<T> = Result<T, ContactsError>;
