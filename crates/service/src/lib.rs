//! Service layer: entity operations composed from validation and persistence.
//! - Repository traits abstract storage; SeaORM and in-memory implementations.
//! - Services validate input before any repository call.
//! - Reads report absence as `None`; writes report rule violations as errors.

pub mod errors;
pub mod contact_form;
pub mod catalog;
pub mod company_info;
#[cfg(test)]
pub mod test_support;

pub use catalog::CatalogService;
pub use company_info::CompanyInfoService;
pub use contact_form::ContactFormService;
