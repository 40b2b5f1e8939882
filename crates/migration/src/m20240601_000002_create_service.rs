//! Create `service` table.
//! Compliance offerings shown on the site; `slug` is the unique external key.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Service::Table)
                    .if_not_exists()
                    .col(pk_auto(Service::Id))
                    .col(string_len(Service::Slug, 128).unique_key().not_null())
                    .col(text(Service::Name).not_null())
                    .col(text(Service::Title).not_null())
                    .col(text(Service::Description).not_null())
                    .col(json(Service::Benefits).not_null())
                    .col(json(Service::ProcessSteps).not_null())
                    .col(text(Service::Timeline).not_null())
                    .col(text_null(Service::PricingInfo))
                    .col(timestamp_with_time_zone(Service::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Service::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Service::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Service {
    Table,
    Id,
    Slug,
    Name,
    Title,
    Description,
    Benefits,
    ProcessSteps,
    Timeline,
    PricingInfo,
    CreatedAt,
    UpdatedAt,
}
