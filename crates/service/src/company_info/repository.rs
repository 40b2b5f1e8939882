use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::company_info::{self, CompanyInfoPatch, NewCompanyInfo};
use crate::errors::ServiceError;

#[async_trait]
pub trait CompanyInfoRepository: Send + Sync {
    async fn insert(&self, new: NewCompanyInfo) -> Result<company_info::Model, ServiceError>;
    /// Earliest-created record, if any.
    async fn first(&self) -> Result<Option<company_info::Model>, ServiceError>;
    /// Fails with `NotFound` for an unknown id.
    async fn update(&self, id: i32, patch: CompanyInfoPatch) -> Result<company_info::Model, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmCompanyInfoRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCompanyInfoRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl CompanyInfoRepository for SeaOrmCompanyInfoRepository {
    async fn insert(&self, new: NewCompanyInfo) -> Result<company_info::Model, ServiceError> {
        Ok(company_info::insert(&self.db, new).await?)
    }

    async fn first(&self) -> Result<Option<company_info::Model>, ServiceError> {
        Ok(company_info::first(&self.db).await?)
    }

    async fn update(&self, id: i32, patch: CompanyInfoPatch) -> Result<company_info::Model, ServiceError> {
        Ok(company_info::update(&self.db, id, patch).await?)
    }
}
