pub mod errors;
pub mod rpc;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::run;
