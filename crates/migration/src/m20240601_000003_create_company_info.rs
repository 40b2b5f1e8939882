//! Create `company_info` table.
//!
//! Intended to hold a single row; readers take the lowest id.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CompanyInfo::Table)
                    .if_not_exists()
                    .col(pk_auto(CompanyInfo::Id))
                    .col(text(CompanyInfo::Mission).not_null())
                    .col(json(CompanyInfo::Values).not_null())
                    .col(text(CompanyInfo::TeamDescription).not_null())
                    .col(integer(CompanyInfo::FoundedYear).not_null())
                    .col(text(CompanyInfo::ContactEmail).not_null())
                    .col(text_null(CompanyInfo::ContactPhone))
                    .col(text_null(CompanyInfo::Address))
                    .col(timestamp_with_time_zone(CompanyInfo::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(CompanyInfo::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CompanyInfo::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CompanyInfo {
    Table,
    Id,
    Mission,
    Values,
    TeamDescription,
    FoundedYear,
    ContactEmail,
    ContactPhone,
    Address,
    CreatedAt,
    UpdatedAt,
}
