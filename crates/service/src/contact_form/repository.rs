use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::contact_form::{self, NewContactForm};
use crate::errors::ServiceError;

#[async_trait]
pub trait ContactFormRepository: Send + Sync {
    async fn insert(&self, new: NewContactForm) -> Result<contact_form::Model, ServiceError>;
    async fn list(&self) -> Result<Vec<contact_form::Model>, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmContactFormRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmContactFormRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ContactFormRepository for SeaOrmContactFormRepository {
    async fn insert(&self, new: NewContactForm) -> Result<contact_form::Model, ServiceError> {
        Ok(contact_form::insert(&self.db, new).await?)
    }

    async fn list(&self) -> Result<Vec<contact_form::Model>, ServiceError> {
        Ok(contact_form::list(&self.db).await?)
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    use models::contact_form::ContactStatus;
    use models::types::now;

    #[derive(Default)]
    pub struct MockContactFormRepository {
        rows: Mutex<Vec<contact_form::Model>>,
    }

    impl MockContactFormRepository {
        pub fn len(&self) -> usize { self.rows.lock().map(|r| r.len()).unwrap_or_default() }
        pub fn is_empty(&self) -> bool { self.len() == 0 }
    }

    #[async_trait]
    impl ContactFormRepository for MockContactFormRepository {
        async fn insert(&self, new: NewContactForm) -> Result<contact_form::Model, ServiceError> {
            let mut rows = self.rows.lock().map_err(|e| ServiceError::Db(e.to_string()))?;
            let row = contact_form::Model {
                id: rows.len() as i32 + 1,
                name: new.name,
                email: new.email,
                company: new.company,
                phone: new.phone,
                service: new.service,
                message: new.message,
                status: ContactStatus::New,
                created_at: now(),
            };
            rows.push(row.clone());
            Ok(row)
        }

        async fn list(&self) -> Result<Vec<contact_form::Model>, ServiceError> {
            let rows = self.rows.lock().map_err(|e| ServiceError::Db(e.to_string()))?;
            Ok(rows.clone())
        }
    }
}
