use std::sync::Arc;
use tracing::{info, instrument, warn};

use models::contact_form::{self, ContactFormInput};
use crate::contact_form::repository::ContactFormRepository;
use crate::errors::ServiceError;

/// Captures leads from the public contact form.
pub struct ContactFormService<R: ContactFormRepository> {
    repo: Arc<R>,
}

impl<R: ContactFormRepository> ContactFormService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Validate and store a submission. Duplicates are stored as separate rows.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use models::contact_form::{ContactFormInput, ContactStatus};
    /// use service::contact_form::{repository::mock::MockContactFormRepository, ContactFormService};
    ///
    /// let svc = ContactFormService::new(Arc::new(MockContactFormRepository::default()));
    /// let input = ContactFormInput {
    ///     name: "Ada".into(),
    ///     email: "ada@example.com".into(),
    ///     service: "ISO27001".into(),
    ///     message: "Looking for an ISO audit partner".into(),
    ///     ..Default::default()
    /// };
    /// let lead = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(lead.status, ContactStatus::New);
    /// ```
    #[instrument(skip(self, input), fields(service = %input.service))]
    pub async fn create(&self, input: ContactFormInput) -> Result<contact_form::Model, ServiceError> {
        let new = input.validate().map_err(|e| {
            warn!(error = %e, "contact_form_rejected");
            e
        })?;
        let created = self.repo.insert(new).await?;
        info!(id = created.id, service = created.service.as_str(), "contact_form_created");
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<contact_form::Model>, ServiceError> {
        self.repo.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{SubsecRound, Utc};
    use models::contact_form::{ContactStatus, ServiceType};

    use crate::contact_form::repository::{mock::MockContactFormRepository, SeaOrmContactFormRepository};
    use crate::test_support::get_db;

    fn input() -> ContactFormInput {
        ContactFormInput {
            name: "Jane Doe".into(),
            email: "jane@acme.io".into(),
            company: Some("Acme".into()),
            phone: Some("+1 555 0101".into()),
            service: "SOC2".into(),
            message: "We are preparing for our first SOC2 audit.".into(),
        }
    }

    #[tokio::test]
    async fn creates_new_lead_with_timestamp() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = ContactFormService::new(Arc::new(SeaOrmContactFormRepository::new(db)));

        let start = Utc::now().trunc_subsecs(6);
        let lead = svc.create(input()).await?;
        let end = Utc::now();

        assert_eq!(lead.status, ContactStatus::New);
        assert_eq!(lead.service, ServiceType::Soc2);
        assert_eq!(lead.company.as_deref(), Some("Acme"));
        assert!(lead.created_at >= start && lead.created_at <= end);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_submissions_are_kept() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = ContactFormService::new(Arc::new(SeaOrmContactFormRepository::new(db)));

        let a = svc.create(input()).await?;
        let b = svc.create(input()).await?;
        assert_ne!(a.id, b.id);
        assert_eq!(svc.list().await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_storage() {
        let repo = Arc::new(MockContactFormRepository::default());
        let svc = ContactFormService::new(Arc::clone(&repo));

        let bad = ContactFormInput { email: "jane-at-acme".into(), message: "hi".into(), ..input() };
        let err = svc.create(bad).await.unwrap_err();
        match err {
            ServiceError::Validation(v) => {
                assert!(v.has_field("email"));
                assert!(v.has_field("message"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn null_optionals_are_stored_as_no_value() -> Result<(), anyhow::Error> {
        let repo = Arc::new(MockContactFormRepository::default());
        let svc = ContactFormService::new(repo);
        let lead = svc.create(ContactFormInput { company: None, phone: Some(String::new()), ..input() }).await?;
        assert_eq!(lead.company, None);
        assert_eq!(lead.phone, None);
        Ok(())
    }
}
