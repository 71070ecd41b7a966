use tokio::process::Command;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::apphost::AppHostError;
use crate::apphost::graph::AppGraph;

/// How a unit's supervision task finished.
#[derive(Debug)]
enum UnitOutcome {
    /// The process exited on its own.
    Exited(String, std::process::ExitStatus),
    /// The process was stopped by the host.
    Stopped(String),
    WaitFailed(String, std::io::Error),
}

/// Log level for a unit that exited on its own: a clean exit still stops the
/// host but is not a failure.
fn exit_level(status: std::process::ExitStatus) -> log::Level {
    if status.success() {
        log::Level::Warn
    } else {
        log::Level::Error
    }
}

/// Starts every project unit in order and supervises them until Ctrl+C or
/// until any unit exits, then stops the rest.
pub async fn run(graph: &AppGraph) -> Result<(), AppHostError> {
    let shutdown = CancellationToken::new();
    let mut units = JoinSet::new();

    for (resource, project) in graph.projects() {
        let env = graph.environment_for(resource);
        log::info!(
            "Starting '{}' ({}) on {}",
            resource.name,
            project.program,
            project.endpoint.url()
        );

        let spawned = Command::new(&project.program)
            .args(&project.args)
            .envs(&env)
            .kill_on_drop(true)
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(source) => {
                shutdown.cancel();
                while units.join_next().await.is_some() {}
                return Err(AppHostError::Spawn {
                    name: resource.name.clone(),
                    source,
                });
            }
        };

        let name = resource.name.clone();
        let token = shutdown.clone();
        units.spawn(async move {
            tokio::select! {
                status = child.wait() => match status {
                    Ok(status) => UnitOutcome::Exited(name, status),
                    Err(err) => UnitOutcome::WaitFailed(name, err),
                },
                _ = token.cancelled() => {
                    if let Err(err) = child.kill().await {
                        log::warn!("Failed to stop '{name}': {err}");
                    }
                    UnitOutcome::Stopped(name)
                }
            }
        });
    }

    let mut failure = None;
    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            if let Err(err) = signal {
                log::error!("Failed to listen for Ctrl+C: {err}");
            }
            log::info!("Shutdown requested, stopping all units");
        }
        Some(joined) = units.join_next() => {
            match joined {
                Ok(UnitOutcome::Exited(name, status)) => {
                    log::log!(
                        exit_level(status),
                        "'{name}' exited with {status}, stopping all units"
                    );
                    if !status.success() {
                        failure = Some(AppHostError::UnitExited { name, status });
                    }
                }
                Ok(UnitOutcome::WaitFailed(name, source)) => {
                    failure = Some(AppHostError::Wait { name, source });
                }
                Ok(UnitOutcome::Stopped(name)) => log::info!("'{name}' stopped"),
                Err(err) => log::error!("Unit supervisor failed: {err}"),
            }
        }
    }

    shutdown.cancel();
    while let Some(joined) = units.join_next().await {
        match joined {
            Ok(UnitOutcome::Stopped(name)) => log::info!("'{name}' stopped"),
            Ok(UnitOutcome::Exited(name, status)) => log::info!("'{name}' exited with {status}"),
            Ok(UnitOutcome::WaitFailed(name, err)) => log::warn!("Lost track of '{name}': {err}"),
            Err(err) => log::error!("Unit supervisor failed: {err}"),
        }
    }

    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
