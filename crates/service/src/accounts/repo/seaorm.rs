use sea_orm::DatabaseConnection;

use crate::accounts::domain::Account;
use crate::accounts::errors::AccountError;
use crate::accounts::repository::AccountRepository;
use models::errors::ModelError;

pub struct SeaOrmAccountRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn insert(&self, name: &str, username: &str, password: &str) -> Result<(), AccountError> {
        models::account::insert(&self.db, name, username, password)
            .await
            .map_err(|e| match e {
                ModelError::Conflict(_) => AccountError::UsernameTaken,
                other => AccountError::Repository(other.to_string()),
            })
    }

    async fn find_by_credentials(&self, username: &str, password: &str) -> Result<Option<Account>, AccountError> {
        let res = models::account::find_by_credentials(&self.db, username, password)
            .await
            .map_err(|e| AccountError::Repository(e.to_string()))?;
        Ok(res.map(|a| Account { name: a.name, username: a.username }))
    }
}
