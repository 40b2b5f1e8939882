use std::sync::Arc;
use tracing::{info, instrument};

use models::company_info::{self, CompanyInfoInput, CompanyInfoUpdate};
use crate::company_info::repository::CompanyInfoRepository;
use crate::errors::ServiceError;

pub struct CompanyInfoService<R: CompanyInfoRepository> {
    repo: Arc<R>,
}

impl<R: CompanyInfoRepository> CompanyInfoService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// `Ok(None)` until a record has been seeded.
    pub async fn get(&self) -> Result<Option<company_info::Model>, ServiceError> {
        self.repo.first().await
    }

    /// Partial update of the current record. Validation runs first; an
    /// empty store is then reported as `NotFound`.
    #[instrument(skip(self, input))]
    pub async fn update(&self, input: CompanyInfoUpdate) -> Result<company_info::Model, ServiceError> {
        let patch = input.validate()?;
        let current = self.repo.first().await?.ok_or_else(|| {
            ServiceError::NotFound("company information record not found; seed it first".into())
        })?;
        let updated = self.repo.update(current.id, patch).await?;
        info!(id = updated.id, "company_info_updated");
        Ok(updated)
    }

    /// Insert the first record. Rejects with `Conflict` once one exists.
    #[instrument(skip(self, input))]
    pub async fn seed(&self, input: CompanyInfoInput) -> Result<company_info::Model, ServiceError> {
        let new = input.validate()?;
        if let Some(existing) = self.repo.first().await? {
            return Err(ServiceError::Conflict(format!("company information already exists (id {})", existing.id)));
        }
        let created = self.repo.insert(new).await?;
        info!(id = created.id, "company_info_seeded");
        Ok(created)
    }
}
