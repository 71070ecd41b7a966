//! Reverse proxy that fronts the internal services.
//!
//! A static route table maps incoming paths to named clusters; each cluster
//! has one destination base URL. Requests that match no route get a 404
//! problem response, and upstream failures a 502.

use thiserror::Error;

pub mod config;
pub mod proxy;
pub mod routing;

pub use config::GatewayConfig;
pub use routing::RouteTable;

/// Name reported by the gateway's status endpoint.
pub const SERVICE_NAME: &str = "stormdesk-gateway";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to load gateway configuration: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("route '{route}' references unknown cluster '{cluster}'")]
    UnknownCluster { route: String, cluster: String },
    #[error("route '{route}' has invalid path pattern '{path}'")]
    InvalidPattern { route: String, path: String },
    #[error("cluster '{cluster}' has invalid destination '{destination}'")]
    InvalidDestination {
        cluster: String,
        destination: String,
    },
}
