use crate::gateway::GatewayError;
use crate::gateway::config::GatewayConfig;

/// Marker that opens a catch-all segment, e.g. `{**catch-all}`.
const CATCH_ALL_OPEN: &str = "{**";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// Matches the path exactly.
    Exact(String),
    /// Matches the prefix itself and everything below it.
    Prefix(String),
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Option<Self> {
        if !pattern.starts_with('/') {
            return None;
        }

        match pattern.find(CATCH_ALL_OPEN) {
            Some(index) => {
                let (literal, placeholder) = pattern.split_at(index);
                let name = placeholder
                    .strip_prefix(CATCH_ALL_OPEN)
                    .and_then(|rest| rest.strip_suffix('}'))?;
                if !literal.ends_with('/')
                    || name.is_empty()
                    || name.contains(['{', '}', '/'].as_slice())
                {
                    return None;
                }
                let prefix = literal.trim_end_matches('/');
                if prefix.contains(['{', '}'].as_slice()) {
                    return None;
                }
                Some(Self::Prefix(prefix.to_string()))
            }
            None if pattern.contains(['{', '}'].as_slice()) => None,
            None => Some(Self::Exact(pattern.to_string())),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(exact) => path == exact,
            Self::Prefix(prefix) => {
                prefix.is_empty()
                    || path == prefix
                    || path
                        .strip_prefix(prefix.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }

    /// Ordering key: longer literals first, exact before prefix on ties.
    fn specificity(&self) -> (usize, bool) {
        match self {
            Self::Exact(exact) => (exact.len(), true),
            Self::Prefix(prefix) => (prefix.len(), false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub id: String,
    pub pattern: PathPattern,
    pub cluster: String,
    pub destination: String,
}

impl Route {
    /// Upstream URL for `path` and an optional raw query string.
    pub fn upstream_url(&self, path: &str, query: &str) -> String {
        let base = self.destination.trim_end_matches('/');
        if query.is_empty() {
            format!("{base}{path}")
        } else {
            format!("{base}{path}?{query}")
        }
    }
}

/// Routes resolved against their clusters, most specific first.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let mut routes = Vec::with_capacity(config.routes.len());

        for (id, route) in &config.routes {
            let pattern =
                PathPattern::parse(&route.path).ok_or_else(|| GatewayError::InvalidPattern {
                    route: id.clone(),
                    path: route.path.clone(),
                })?;

            let cluster = config.clusters.get(&route.cluster).ok_or_else(|| {
                GatewayError::UnknownCluster {
                    route: id.clone(),
                    cluster: route.cluster.clone(),
                }
            })?;

            if !(cluster.destination.starts_with("http://")
                || cluster.destination.starts_with("https://"))
            {
                return Err(GatewayError::InvalidDestination {
                    cluster: route.cluster.clone(),
                    destination: cluster.destination.clone(),
                });
            }

            routes.push(Route {
                id: id.clone(),
                pattern,
                cluster: route.cluster.clone(),
                destination: cluster.destination.clone(),
            });
        }

        routes.sort_by(|a, b| b.pattern.specificity().cmp(&a.pattern.specificity()));

        Ok(Self { routes })
    }

    /// Most specific route matching `path`.
    pub fn find(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.pattern.matches(path))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
