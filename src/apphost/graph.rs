use std::collections::{BTreeMap, HashMap, HashSet};

use crate::apphost::AppHostError;

/// Listen address of a project unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub address: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.address, self.port)
    }
}

/// A process started by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectResource {
    pub program: String,
    pub args: Vec<String>,
    pub endpoint: Endpoint,
}

impl ProjectResource {
    pub fn new(program: impl Into<String>, endpoint: Endpoint) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            endpoint,
        }
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKind {
    /// Connection string handed to dependants as `DATABASE_URL`.
    Database { url: String },
    Project(ProjectResource),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub name: String,
    pub kind: ResourceKind,
    pub references: Vec<String>,
}

/// Name of the variable carrying a project's URL, e.g. `api-gateway` gives
/// `API_GATEWAY_URL`.
pub fn url_variable(name: &str) -> String {
    format!("{}_URL", name.to_uppercase().replace('-', "_"))
}

#[derive(Debug, Default)]
pub struct AppHostBuilder {
    resources: Vec<Resource>,
}

impl AppHostBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_database(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.resources.push(Resource {
            name: name.into(),
            kind: ResourceKind::Database { url: url.into() },
            references: Vec::new(),
        });
        self
    }

    pub fn add_project(
        mut self,
        name: impl Into<String>,
        project: ProjectResource,
        references: &[&str],
    ) -> Self {
        self.resources.push(Resource {
            name: name.into(),
            kind: ResourceKind::Project(project),
            references: references.iter().map(|r| (*r).to_string()).collect(),
        });
        self
    }

    /// Validates names and references and orders resources so that each one
    /// comes after everything it references.
    pub fn build(self) -> Result<AppGraph, AppHostError> {
        let mut index = HashMap::with_capacity(self.resources.len());
        for (position, resource) in self.resources.iter().enumerate() {
            if index.insert(resource.name.as_str(), position).is_some() {
                return Err(AppHostError::DuplicateName(resource.name.clone()));
            }
        }

        for resource in &self.resources {
            for reference in &resource.references {
                if reference == &resource.name {
                    return Err(AppHostError::SelfReference {
                        from: resource.name.clone(),
                    });
                }
                if !index.contains_key(reference.as_str()) {
                    return Err(AppHostError::UnknownReference {
                        from: resource.name.clone(),
                        to: reference.clone(),
                    });
                }
            }
        }

        // Kahn's algorithm; ties keep declaration order.
        let mut pending: Vec<usize> = self
            .resources
            .iter()
            .map(|resource| resource.references.iter().collect::<HashSet<_>>().len())
            .collect();
        let mut order = Vec::with_capacity(self.resources.len());
        let mut placed = vec![false; self.resources.len()];

        while order.len() < self.resources.len() {
            let next = (0..self.resources.len()).find(|&i| !placed[i] && pending[i] == 0);
            let Some(next) = next else {
                let cycle = self
                    .resources
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| !placed[*i])
                    .map(|(_, resource)| resource.name.clone())
                    .collect();
                return Err(AppHostError::Cycle(cycle));
            };

            placed[next] = true;
            order.push(next);
            let name = &self.resources[next].name;
            for (i, resource) in self.resources.iter().enumerate() {
                if !placed[i] && resource.references.iter().any(|r| r == name) {
                    pending[i] -= 1;
                }
            }
        }

        let mut slots: Vec<Option<Resource>> = self.resources.into_iter().map(Some).collect();
        let resources = order
            .into_iter()
            .filter_map(|position| slots[position].take())
            .collect();

        Ok(AppGraph { resources })
    }
}

/// Validated resource graph in start order.
#[derive(Debug, Clone)]
pub struct AppGraph {
    resources: Vec<Resource>,
}

impl AppGraph {
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn get(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|resource| resource.name == name)
    }

    pub fn start_order(&self) -> Vec<&str> {
        self.resources
            .iter()
            .map(|resource| resource.name.as_str())
            .collect()
    }

    /// Project units with their resolved environment, in start order.
    pub fn projects(&self) -> impl Iterator<Item = (&Resource, &ProjectResource)> {
        self.resources
            .iter()
            .filter_map(|resource| match &resource.kind {
                ResourceKind::Project(project) => Some((resource, project)),
                ResourceKind::Database { .. } => None,
            })
    }

    /// Variables injected into `resource`'s process.
    pub fn environment_for(&self, resource: &Resource) -> BTreeMap<String, String> {
        let mut env = BTreeMap::new();

        if let ResourceKind::Project(project) = &resource.kind {
            env.insert("ADDRESS".to_string(), project.endpoint.address.clone());
            env.insert("PORT".to_string(), project.endpoint.port.to_string());
        }

        for reference in &resource.references {
            let Some(target) = self.get(reference) else {
                continue;
            };
            match &target.kind {
                ResourceKind::Database { url } => {
                    env.insert("DATABASE_URL".to_string(), url.clone());
                }
                ResourceKind::Project(project) => {
                    env.insert(url_variable(&target.name), project.endpoint.url());
                }
            }
        }

        env
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(port: u16) -> ProjectResource {
        ProjectResource::new("bin", Endpoint::new("127.0.0.1", port))
    }

    fn sample() -> AppGraph {
        AppHostBuilder::new()
            .add_project("web", project(8082), &["gateway"])
            .add_project("gateway", project(8081), &["api"])
            .add_database("productdb", "sqlite://app.db")
            .add_project("api", project(8080), &["productdb"])
            .build()
            .expect("valid graph")
    }

    #[test]
    fn references_start_first() {
        let graph = sample();
        assert_eq!(graph.start_order(), vec!["productdb", "api", "gateway", "web"]);
    }

    #[test]
    fn environment_carries_endpoint_and_references() {
        let graph = sample();

        let api = graph.get("api").expect("api");
        let env = graph.environment_for(api);
        assert_eq!(env.get("PORT").map(String::as_str), Some("8080"));
        assert_eq!(env.get("ADDRESS").map(String::as_str), Some("127.0.0.1"));
        assert_eq!(env.get("DATABASE_URL").map(String::as_str), Some("sqlite://app.db"));

        let gateway = graph.get("gateway").expect("gateway");
        let env = graph.environment_for(gateway);
        assert_eq!(env.get("API_URL").map(String::as_str), Some("http://127.0.0.1:8080"));
        assert!(!env.contains_key("DATABASE_URL"));

        let web = graph.get("web").expect("web");
        let env = graph.environment_for(web);
        assert_eq!(
            env.get("GATEWAY_URL").map(String::as_str),
            Some("http://127.0.0.1:8081")
        );
    }

    #[test]
    fn url_variable_normalizes_names() {
        assert_eq!(url_variable("api"), "API_URL");
        assert_eq!(url_variable("api-gateway"), "API_GATEWAY_URL");
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = AppHostBuilder::new()
            .add_database("db", "a.db")
            .add_database("db", "b.db")
            .build()
            .expect_err("expected error");
        assert!(matches!(err, AppHostError::DuplicateName(name) if name == "db"));
    }

    #[test]
    fn unknown_references_are_rejected() {
        let err = AppHostBuilder::new()
            .add_project("api", project(1), &["missing"])
            .build()
            .expect_err("expected error");
        assert!(matches!(err, AppHostError::UnknownReference { to, .. } if to == "missing"));
    }

    #[test]
    fn cycles_are_rejected() {
        let err = AppHostBuilder::new()
            .add_database("db", "a.db")
            .add_project("a", project(1), &["b", "db"])
            .add_project("b", project(2), &["a"])
            .build()
            .expect_err("expected error");
        match err {
            AppHostError::Cycle(names) => assert_eq!(names, vec!["a".to_string(), "b".to_string()]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn self_reference_is_rejected() {
        let err = AppHostBuilder::new()
            .add_project("a", project(1), &["a"])
            .build()
            .expect_err("expected error");
        assert!(matches!(err, AppHostError::SelfReference { .. }));
    }

    #[test]
    fn repeated_reference_counts_once() {
        let graph = AppHostBuilder::new()
            .add_project("web", project(2), &["api", "api"])
            .add_project("api", project(1), &[])
            .build()
            .expect("valid graph");
        assert_eq!(graph.start_order(), vec!["api", "web"]);
    }
}
