//! Create `contact_form` table.
//!
//! Leads captured from the public contact form. `service` and `status`
//! hold the string values of closed enums.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContactForm::Table)
                    .if_not_exists()
                    .col(pk_auto(ContactForm::Id))
                    .col(text(ContactForm::Name).not_null())
                    .col(text(ContactForm::Email).not_null())
                    .col(text_null(ContactForm::Company))
                    .col(text_null(ContactForm::Phone))
                    .col(string_len(ContactForm::Service, 16).not_null())
                    .col(text(ContactForm::Message).not_null())
                    .col(string_len(ContactForm::Status, 16).not_null().default("new"))
                    .col(timestamp_with_time_zone(ContactForm::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ContactForm::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ContactForm { Table, Id, Name, Email, Company, Phone, Service, Message, Status, CreatedAt }
