pub mod errors;
pub mod hurricane_alerts;
pub mod main;
pub mod products;
pub mod stocks;

pub use errors::{ServiceError, ServiceResult};
