use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoiraError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A write to the key-value store failed. In-memory state already holds
    /// the new value, so memory and storage have diverged until the next flush.
    #[error("Persistence error for key {key}: {message}")]
    Persistence { key: String, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MemoiraError {
    pub fn persistence(key: impl Into<String>, message: impl ToString) -> Self {
        Self::Persistence {
            key: key.into(),
            message: message.to_string(),
        }
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence { .. })
    }
}

impl From<serde_json::Error> for MemoiraError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
