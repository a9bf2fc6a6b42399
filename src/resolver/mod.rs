mod client;
pub mod diagnostics;
pub mod models;
mod resolver;
mod resolver_error;
pub mod static_data;
pub mod strategy;

pub use diagnostics::DiagnosticLog;
pub use resolver::{ListingResolver, Resolution};
pub use resolver_error::FetchError;
