use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::service::{self as offering, NewService, ServicePatch};
use crate::errors::ServiceError;

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Fails with `Conflict` when the slug is taken.
    async fn insert(&self, new: NewService) -> Result<offering::Model, ServiceError>;
    async fn list(&self) -> Result<Vec<offering::Model>, ServiceError>;
    async fn get_by_slug(&self, slug: &str) -> Result<Option<offering::Model>, ServiceError>;
    /// Fails with `NotFound` for an unknown id.
    async fn update(&self, id: i32, patch: ServicePatch) -> Result<offering::Model, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmServiceRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmServiceRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ServiceRepository for SeaOrmServiceRepository {
    async fn insert(&self, new: NewService) -> Result<offering::Model, ServiceError> {
        Ok(offering::insert(&self.db, new).await?)
    }

    async fn list(&self) -> Result<Vec<offering::Model>, ServiceError> {
        Ok(offering::list(&self.db).await?)
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<offering::Model>, ServiceError> {
        Ok(offering::find_by_slug(&self.db, slug).await?)
    }

    async fn update(&self, id: i32, patch: ServicePatch) -> Result<offering::Model, ServiceError> {
        Ok(offering::update(&self.db, id, patch).await?)
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    use models::types::now;

    #[derive(Default)]
    pub struct MockServiceRepository {
        rows: Mutex<Vec<offering::Model>>,
    }

    #[async_trait]
    impl ServiceRepository for MockServiceRepository {
        async fn insert(&self, new: NewService) -> Result<offering::Model, ServiceError> {
            let mut rows = self.rows.lock().map_err(|e| ServiceError::Db(e.to_string()))?;
            if rows.iter().any(|r| r.slug == new.slug) {
                return Err(ServiceError::Conflict(format!("service with slug '{}' already exists", new.slug)));
            }
            let ts = now();
            let row = offering::Model {
                id: rows.len() as i32 + 1,
                slug: new.slug,
                name: new.name,
                title: new.title,
                description: new.description,
                benefits: new.benefits.into(),
                process_steps: new.process_steps.into(),
                timeline: new.timeline,
                pricing_info: new.pricing_info,
                created_at: ts,
                updated_at: ts,
            };
            rows.push(row.clone());
            Ok(row)
        }

        async fn list(&self) -> Result<Vec<offering::Model>, ServiceError> {
            let rows = self.rows.lock().map_err(|e| ServiceError::Db(e.to_string()))?;
            Ok(rows.clone())
        }

        async fn get_by_slug(&self, slug: &str) -> Result<Option<offering::Model>, ServiceError> {
            let rows = self.rows.lock().map_err(|e| ServiceError::Db(e.to_string()))?;
            Ok(rows.iter().find(|r| r.slug == slug).cloned())
        }

        async fn update(&self, id: i32, patch: ServicePatch) -> Result<offering::Model, ServiceError> {
            let mut rows = self.rows.lock().map_err(|e| ServiceError::Db(e.to_string()))?;
            if let Some(slug) = &patch.slug {
                if rows.iter().any(|r| r.id != id && &r.slug == slug) {
                    return Err(ServiceError::Conflict(format!("service with slug '{slug}' already exists")));
                }
            }
            let row = rows.iter_mut().find(|r| r.id == id).ok_or_else(|| ServiceError::NotFound(format!("service {id} not found")))?;
            if let Some(v) = patch.slug { row.slug = v; }
            if let Some(v) = patch.name { row.name = v; }
            if let Some(v) = patch.title { row.title = v; }
            if let Some(v) = patch.description { row.description = v; }
            if let Some(v) = patch.benefits { row.benefits = v.into(); }
            if let Some(v) = patch.process_steps { row.process_steps = v.into(); }
            if let Some(v) = patch.timeline { row.timeline = v; }
            if let Some(v) = patch.pricing_info.into_change() { row.pricing_info = v; }
            row.updated_at = now();
            Ok(row.clone())
        }
    }
}
