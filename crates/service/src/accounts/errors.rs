use thiserror::Error;

/// Persistence failures for account workflows.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("username already exists")]
    UsernameTaken,
    #[error("repository error: {0}")]
    Repository(String),
}

impl AccountError {
    /// Stable numeric code for logs
    pub fn code(&self) -> u16 {
        match self {
            AccountError::UsernameTaken => 1002,
            AccountError::Repository(_) => 1200,
        }
    }
}
