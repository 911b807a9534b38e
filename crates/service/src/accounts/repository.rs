use async_trait::async_trait;

use super::domain::Account;
use super::errors::AccountError;

/// Persistence for the `login` table.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert in one statement. A taken username must come back as `AccountError::UsernameTaken`.
    async fn insert(&self, name: &str, username: &str, password: &str) -> Result<(), AccountError>;
    async fn find_by_credentials(&self, username: &str, password: &str) -> Result<Option<Account>, AccountError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAccountRepository {
        rows: Mutex<HashMap<String, (String, String)>>, // username -> (name, password)
        lookups: AtomicUsize,
        fail: bool,
    }

    impl MockAccountRepository {
        pub fn failing() -> Self {
            Self { fail: true, ..Self::default() }
        }

        /// Number of credential lookups that reached the repository.
        pub fn lookups(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }

        pub fn len(&self) -> usize {
            self.rows.lock().unwrap_or_else(|e| e.into_inner()).len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    #[async_trait]
    impl AccountRepository for MockAccountRepository {
        async fn insert(&self, name: &str, username: &str, password: &str) -> Result<(), AccountError> {
            if self.fail {
                return Err(AccountError::Repository("connection refused".into()));
            }
            let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
            if rows.contains_key(username) {
                return Err(AccountError::UsernameTaken);
            }
            rows.insert(username.to_string(), (name.to_string(), password.to_string()));
            Ok(())
        }

        async fn find_by_credentials(&self, username: &str, password: &str) -> Result<Option<Account>, AccountError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AccountError::Repository("connection refused".into()));
            }
            let rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
            Ok(rows
                .get(username)
                .filter(|(_, stored)| stored == password)
                .map(|(name, _)| Account { name: name.clone(), username: username.to_string() }))
        }
    }
}
