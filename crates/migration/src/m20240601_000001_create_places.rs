//! Create `places` table holding map markers.
//!
//! Coordinates are plain doubles; no range constraint is applied.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Places::Table)
                    .if_not_exists()
                    .col(pk_auto(Places::Id))
                    .col(string_len(Places::Name, 255).not_null())
                    .col(text(Places::Description).not_null())
                    .col(double(Places::Lat).not_null())
                    .col(double(Places::Lng).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Places::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Places { Table, Id, Name, Description, Lat, Lng }
