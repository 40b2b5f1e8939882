use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::catalog::repository::SeaOrmServiceRepository;
use service::company_info::repository::SeaOrmCompanyInfoRepository;
use service::contact_form::repository::SeaOrmContactFormRepository;
use service::{CatalogService, CompanyInfoService, ContactFormService};

/// Handlers shared by every request. Holds no cached records; each call
/// goes back to storage.
#[derive(Clone)]
pub struct AppState {
    pub contacts: Arc<ContactFormService<SeaOrmContactFormRepository>>,
    pub catalog: Arc<CatalogService<SeaOrmServiceRepository>>,
    pub company: Arc<CompanyInfoService<SeaOrmCompanyInfoRepository>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            contacts: Arc::new(ContactFormService::new(Arc::new(SeaOrmContactFormRepository::new(db.clone())))),
            catalog: Arc::new(CatalogService::new(Arc::new(SeaOrmServiceRepository::new(db.clone())))),
            company: Arc::new(CompanyInfoService::new(Arc::new(SeaOrmCompanyInfoRepository::new(db)))),
        }
    }
}
