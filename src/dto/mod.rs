//! Request and response bodies of the JSON API.

pub mod hurricane_alerts;
pub mod problem;
pub mod products;
pub mod status;
pub mod stocks;
