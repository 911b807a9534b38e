

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

/// Rows in `login` holding `username`.
pub async fn count_accounts(db: &DatabaseConnection, username: &str) -> anyhow::Result<u64> {
    Ok(crate::account::Entity::find()
        .filter(crate::account::Column::Username.eq(username))
        .count(db)
        .await?)
}
