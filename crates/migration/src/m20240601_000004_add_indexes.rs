//! Secondary indexes for lead triage.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_contact_form_status")
                    .table(ContactForm::Table)
                    .col(ContactForm::Status)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_contact_form_created_at")
                    .table(ContactForm::Table)
                    .col(ContactForm::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_contact_form_created_at").table(ContactForm::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_contact_form_status").table(ContactForm::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ContactForm { Table, Status, CreatedAt }
