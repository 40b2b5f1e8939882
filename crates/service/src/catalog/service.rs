use std::sync::Arc;
use tracing::{info, instrument, warn};

use models::service::{self as offering, ServiceInput, ServiceUpdateInput};
use crate::catalog::repository::ServiceRepository;
use crate::errors::ServiceError;

/// Catalog of compliance services, keyed externally by slug.
pub struct CatalogService<R: ServiceRepository> {
    repo: Arc<R>,
}

impl<R: ServiceRepository> CatalogService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, input), fields(slug = %input.slug))]
    pub async fn create(&self, input: ServiceInput) -> Result<offering::Model, ServiceError> {
        let new = input.validate()?;
        match self.repo.insert(new).await {
            Ok(created) => {
                info!(id = created.id, slug = %created.slug, "service_created");
                Ok(created)
            }
            Err(e) => {
                warn!(error = %e, "service_create_failed");
                Err(e)
            }
        }
    }

    /// Every service; empty when none exist.
    pub async fn list(&self) -> Result<Vec<offering::Model>, ServiceError> {
        self.repo.list().await
    }

    /// Case-sensitive lookup; an unknown slug is `Ok(None)`.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<offering::Model>, ServiceError> {
        self.repo.get_by_slug(slug).await
    }

    #[instrument(skip(self, input), fields(id = input.id))]
    pub async fn update(&self, input: ServiceUpdateInput) -> Result<offering::Model, ServiceError> {
        let (id, patch) = input.validate()?;
        let updated = self.repo.update(id, patch).await?;
        info!(id = updated.id, slug = %updated.slug, "service_updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::patch::Patch;

    use crate::catalog::repository::{mock::MockServiceRepository, SeaOrmServiceRepository};
    use crate::test_support::get_db;

    fn input(slug: &str) -> ServiceInput {
        ServiceInput {
            slug: slug.into(),
            name: "GDPR".into(),
            title: "GDPR Compliance Program".into(),
            description: "Data mapping, DPIAs and policies that keep your EU processing lawful.".into(),
            benefits: vec!["Avoid fines".into(), "Customer trust".into()],
            process_steps: vec!["Discovery".into(), "Data mapping".into(), "Policy rollout".into()],
            timeline: "2-4 months".into(),
            pricing_info: Some("Contact us".into()),
        }
    }

    async fn seaorm_service() -> Result<CatalogService<SeaOrmServiceRepository>, anyhow::Error> {
        let db = get_db().await?;
        Ok(CatalogService::new(Arc::new(SeaOrmServiceRepository::new(db))))
    }

    #[tokio::test]
    async fn list_on_empty_store_is_empty() -> Result<(), anyhow::Error> {
        let svc = seaorm_service().await?;
        assert!(svc.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn create_then_fetch_by_slug_round_trips() -> Result<(), anyhow::Error> {
        let svc = seaorm_service().await?;
        let sent = input("gdpr");
        let created = svc.create(sent.clone()).await?;
        assert_eq!(created.created_at, created.updated_at);

        let fetched = svc.get_by_slug("gdpr").await?.expect("service stored");
        assert_eq!(fetched, created);
        assert_eq!(fetched.slug, sent.slug);
        assert_eq!(fetched.name, sent.name);
        assert_eq!(fetched.title, sent.title);
        assert_eq!(fetched.description, sent.description);
        assert_eq!(fetched.benefits.as_slice(), sent.benefits.as_slice());
        assert_eq!(fetched.process_steps.as_slice(), sent.process_steps.as_slice());
        assert_eq!(fetched.timeline, sent.timeline);
        assert_eq!(fetched.pricing_info, sent.pricing_info);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_slug_conflicts_and_leaves_storage_unchanged() -> Result<(), anyhow::Error> {
        let svc = seaorm_service().await?;
        svc.create(input("gdpr")).await?;

        let err = svc.create(ServiceInput { name: "Other".into(), ..input("gdpr") }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)), "got {err:?}");

        let all = svc.list().await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "GDPR");
        Ok(())
    }

    #[tokio::test]
    async fn slug_lookup_is_case_sensitive() -> Result<(), anyhow::Error> {
        let svc = seaorm_service().await?;
        svc.create(input("soc2")).await?;
        assert!(svc.get_by_slug("soc2").await?.is_some());
        assert!(svc.get_by_slug("SOC2").await?.is_none());
        assert!(svc.get_by_slug("missing").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn list_preserves_creation_order() -> Result<(), anyhow::Error> {
        let svc = seaorm_service().await?;
        for slug in ["soc2", "iso27001", "gdpr"] {
            svc.create(input(slug)).await?;
        }
        let slugs: Vec<String> = svc.list().await?.into_iter().map(|s| s.slug).collect();
        assert_eq!(slugs, vec!["soc2", "iso27001", "gdpr"]);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_service_is_rejected_before_storage() -> Result<(), anyhow::Error> {
        let repo = Arc::new(MockServiceRepository::default());
        let svc = CatalogService::new(Arc::clone(&repo));
        let err = svc
            .create(ServiceInput { slug: "Not A Slug".into(), description: "short".into(), ..input("x") })
            .await
            .unwrap_err();
        let ServiceError::Validation(v) = err else { panic!("expected validation error") };
        assert!(v.has_field("slug"));
        assert!(v.has_field("description"));
        assert!(svc.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn partial_update_changes_only_given_fields() -> Result<(), anyhow::Error> {
        let svc = seaorm_service().await?;
        let created = svc.create(input("gdpr")).await?;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let updated = svc
            .update(ServiceUpdateInput {
                id: created.id,
                timeline: Patch::Value("8 weeks".into()),
                pricing_info: Patch::Null,
                ..Default::default()
            })
            .await?;
        assert_eq!(updated.timeline, "8 weeks");
        assert_eq!(updated.pricing_info, None);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.benefits, created.benefits);
        assert!(updated.updated_at > created.updated_at);
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() -> Result<(), anyhow::Error> {
        let svc = seaorm_service().await?;
        let err = svc
            .update(ServiceUpdateInput { id: 42, name: Patch::Value("X".into()), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn update_to_taken_slug_conflicts() -> Result<(), anyhow::Error> {
        let svc = seaorm_service().await?;
        let a = svc.create(input("alpha")).await?;
        svc.create(input("beta")).await?;
        let err = svc
            .update(ServiceUpdateInput { id: a.id, slug: Patch::Value("beta".into()), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(svc.get_by_slug("alpha").await?.map(|s| s.id), Some(a.id));
        Ok(())
    }
}
