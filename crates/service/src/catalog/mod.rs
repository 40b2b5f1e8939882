//! Service catalog: the compliance offerings listed on the site.

pub mod repository;
pub mod service;

pub use service::CatalogService;
