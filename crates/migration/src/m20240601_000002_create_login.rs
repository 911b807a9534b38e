//! Create `login` table storing registered accounts.
//!
//! `username` carries a unique constraint; signup relies on it to reject duplicates.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Login::Table)
                    .if_not_exists()
                    .col(pk_auto(Login::Id))
                    .col(string_len(Login::Name, 255).not_null())
                    .col(string_len(Login::Username, 255).unique_key().not_null())
                    // Stored as submitted, see DESIGN.md.
                    .col(string_len(Login::Password, 255).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Login::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Login { Table, Id, Name, Username, Password }
