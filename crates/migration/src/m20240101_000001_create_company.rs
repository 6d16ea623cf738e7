//! Create `company` table.
//!
//! `tax_id` carries the unique constraint that backs the duplicate check in
//! the service layer.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Company::Table)
                    .if_not_exists()
                    .col(pk_auto(Company::Id))
                    .col(string_len(Company::Name, 255).not_null())
                    .col(string_len(Company::TaxId, 14).unique_key().not_null())
                    .col(string_len(Company::TradeName, 255).not_null())
                    .col(
                        ColumnDef::new(Company::Address)
                            .string_len(512)
                            .null(),
                    )
                    .col(timestamp_with_time_zone(Company::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Company::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Company::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Company { Table, Id, Name, TaxId, TradeName, Address, CreatedAt, UpdatedAt }
