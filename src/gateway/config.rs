use std::collections::BTreeMap;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::gateway::GatewayError;

/// Default location of the route table file, relative to the working
/// directory.
pub const CONFIG_PATH: &str = "config/gateway.toml";
/// Cluster whose destination is taken from `API_URL` when that is set.
pub const API_CLUSTER: &str = "api";

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8081
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteConfig {
    /// Cluster that receives matching requests.
    pub cluster: String,
    /// `/exact` or `/prefix/{**catch-all}`.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClusterConfig {
    /// Base URL requests are forwarded to.
    pub destination: String,
}

/// Gateway settings: listen endpoint, routes keyed by id and clusters keyed
/// by name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub routes: BTreeMap<String, RouteConfig>,
    #[serde(default)]
    pub clusters: BTreeMap<String, ClusterConfig>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
            routes: BTreeMap::new(),
            clusters: BTreeMap::new(),
        }
    }
}

impl GatewayConfig {
    /// Load from [`CONFIG_PATH`] (optional) overlaid by `GATEWAY__*`
    /// variables, then apply endpoint and discovery variables.
    pub fn load() -> Result<Self, GatewayError> {
        let settings = Config::builder()
            .add_source(File::with_name(CONFIG_PATH).required(false))
            .add_source(Environment::with_prefix("GATEWAY").separator("__"))
            .build()?;

        let mut config: GatewayConfig = settings.try_deserialize()?;
        config.apply_discovery(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Parse a TOML document without touching the environment.
    pub fn from_toml(source: &str) -> Result<Self, GatewayError> {
        let settings = Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Applies `ADDRESS`, `PORT` and `API_URL` as injected by the
    /// orchestrator.
    pub fn apply_discovery<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(address) = lookup("ADDRESS") {
            self.address = address;
        }
        if let Some(port) = lookup("PORT").and_then(|value| value.parse().ok()) {
            self.port = port;
        }
        if let Some(url) = lookup("API_URL") {
            log::info!("Using discovered destination {url} for cluster '{API_CLUSTER}'");
            self.clusters
                .insert(API_CLUSTER.to_string(), ClusterConfig { destination: url });
        }
    }
}
