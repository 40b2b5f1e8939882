//! Company information singleton.
//!
//! Storage tolerates several rows and treats the lowest id as current.
//! `seed` refuses to add a second record; `update` never creates one.

pub mod repository;
pub mod service;

pub use service::CompanyInfoService;
