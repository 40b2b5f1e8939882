//! Contact form leads: create and (internally) list.

pub mod repository;
pub mod service;

pub use service::ContactFormService;
