//! Entities, validation rules and raw persistence for the site's three
//! record kinds: contact submissions, services and company info.

pub mod errors;
pub mod db;
pub mod validation;
pub mod patch;
pub mod types;
pub mod contact_form;
pub mod service;
pub mod company_info;

#[cfg(test)]
mod tests;
