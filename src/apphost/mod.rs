//! Declarative launcher for the whole application.
//!
//! A graph names every unit (databases and service processes) and the
//! references between them; the runner starts processes in dependency order
//! with their connection settings injected as environment variables.

use std::io;
use std::process::ExitStatus;

use thiserror::Error;

pub mod graph;
pub mod runner;

pub use graph::{AppGraph, AppHostBuilder, Endpoint, ProjectResource};

#[derive(Debug, Error)]
pub enum AppHostError {
    #[error("resource '{0}' is declared more than once")]
    DuplicateName(String),
    #[error("resource '{from}' references unknown resource '{to}'")]
    UnknownReference { from: String, to: String },
    #[error("resource '{from}' cannot reference itself")]
    SelfReference { from: String },
    #[error("reference cycle between: {}", .0.join(", "))]
    Cycle(Vec<String>),
    #[error("failed to start '{name}': {source}")]
    Spawn {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("'{name}' exited with {status}")]
    UnitExited { name: String, status: ExitStatus },
    #[error("failed to wait for '{name}': {source}")]
    Wait {
        name: String,
        #[source]
        source: io::Error,
    },
}
