use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Company: listing is ordered by (created_at DESC, id DESC)
        manager
            .create_index(
                Index::create()
                    .name("idx_company_created_at")
                    .table(Company::Table)
                    .col(Company::CreatedAt)
                    .col(Company::Id)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_company_created_at").table(Company::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Company { Table, Id, CreatedAt }
