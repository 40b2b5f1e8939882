use anyhow::Result;
use chrono::{SubsecRound, Utc};

use super::setup_test_db;
use crate::contact_form::{self, ContactStatus, NewContactForm, ServiceType};
use crate::company_info::{self, CompanyInfoPatch, NewCompanyInfo};
use crate::errors::ModelError;
use crate::patch::Patch;
use crate::service::{self, NewService, ServicePatch};

fn new_service(slug: &str) -> NewService {
    NewService {
        slug: slug.to_string(),
        name: "ISO 27001".into(),
        title: "ISO 27001 Certification".into(),
        description: "Build and certify an information security management system that lasts.".into(),
        benefits: vec!["Global recognition".into()],
        process_steps: vec!["Scope".into(), "Risk assessment".into()],
        timeline: "6-9 months".into(),
        pricing_info: Some("From $15,000".into()),
    }
}

fn new_company(year: i32) -> NewCompanyInfo {
    NewCompanyInfo {
        mission: "Make compliance approachable for growing companies".into(),
        values: vec!["Integrity".into(), "Pragmatism".into()],
        team_description: "Former auditors and security engineers working side by side with clients.".into(),
        founded_year: year,
        contact_email: "hello@example.com".into(),
        contact_phone: Some("+1 555 0100".into()),
        address: None,
    }
}

#[tokio::test]
async fn contact_form_insert_sets_defaults() -> Result<()> {
    let db = setup_test_db().await?;
    let before = Utc::now().trunc_subsecs(6);
    let created = contact_form::insert(
        &db,
        NewContactForm {
            name: "Sam".into(),
            email: "sam@example.com".into(),
            company: None,
            phone: None,
            service: ServiceType::Gdpr,
            message: "Need a GDPR gap assessment".into(),
        },
    )
    .await?;
    let after = Utc::now();

    assert!(created.id > 0);
    assert_eq!(created.status, ContactStatus::New);
    assert_eq!(created.service, ServiceType::Gdpr);
    assert!(created.created_at >= before && created.created_at <= after);

    let all = contact_form::list(&db).await?;
    assert_eq!(all, vec![created]);
    Ok(())
}

#[tokio::test]
async fn service_slug_is_unique() -> Result<()> {
    let db = setup_test_db().await?;
    let first = service::insert(&db, new_service("iso27001")).await?;
    assert_eq!(first.created_at, first.updated_at);

    let dup = service::insert(&db, new_service("iso27001")).await;
    assert!(matches!(dup, Err(ModelError::Conflict(ref msg)) if msg.contains("iso27001")));
    assert_eq!(service::list(&db).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn service_lookup_is_exact() -> Result<()> {
    let db = setup_test_db().await?;
    let created = service::insert(&db, new_service("soc2")).await?;

    let found = service::find_by_slug(&db, "soc2").await?;
    assert_eq!(found.as_ref(), Some(&created));
    assert_eq!(found.map(|s| s.benefits.as_slice().to_vec()), Some(vec!["Global recognition".to_string()]));
    assert!(service::find_by_slug(&db, "SOC2").await?.is_none());
    assert!(service::find_by_slug(&db, "soc").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn service_update_applies_patch_and_detects_conflicts() -> Result<()> {
    let db = setup_test_db().await?;
    let a = service::insert(&db, new_service("alpha")).await?;
    let _b = service::insert(&db, new_service("beta")).await?;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let updated = service::update(
        &db,
        a.id,
        ServicePatch { name: Some("Alpha".into()), pricing_info: Patch::Null, ..Default::default() },
    )
    .await?;
    assert_eq!(updated.name, "Alpha");
    assert_eq!(updated.pricing_info, None);
    assert_eq!(updated.slug, "alpha");
    assert_eq!(updated.created_at, a.created_at);
    assert!(updated.updated_at > a.updated_at);

    let clash = service::update(&db, a.id, ServicePatch { slug: Some("beta".into()), ..Default::default() }).await;
    assert!(matches!(clash, Err(ModelError::Conflict(_))));

    let missing = service::update(&db, 9999, ServicePatch::default()).await;
    assert!(matches!(missing, Err(ModelError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn company_info_first_row_wins() -> Result<()> {
    let db = setup_test_db().await?;
    assert!(company_info::first(&db).await?.is_none());

    let first = company_info::insert(&db, new_company(2020)).await?;
    let _second = company_info::insert(&db, new_company(2022)).await?;
    assert_eq!(company_info::first(&db).await?.map(|c| c.id), Some(first.id));

    let updated = company_info::update(
        &db,
        first.id,
        CompanyInfoPatch { founded_year: Some(2021), contact_phone: Patch::Null, ..Default::default() },
    )
    .await?;
    assert_eq!(updated.founded_year, 2021);
    assert_eq!(updated.contact_phone, None);
    assert_eq!(updated.mission, first.mission);

    let rows = company_info::list(&db).await?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].founded_year, 2022);
    Ok(())
}

#[tokio::test]
async fn company_info_update_requires_existing_row() -> Result<()> {
    let db = setup_test_db().await?;
    let res = company_info::update(&db, 1, CompanyInfoPatch::default()).await;
    assert!(matches!(res, Err(ModelError::NotFound(_))));
    Ok(())
}
