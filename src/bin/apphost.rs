use std::path::{Path, PathBuf};

use dotenvy::dotenv;

use stormdesk::apphost::{AppHostBuilder, Endpoint, ProjectResource, runner};

/// Sibling binary built from this package.
fn sibling(dir: &Path, name: &str) -> String {
    let file = format!("{name}{}", std::env::consts::EXE_SUFFIX);
    dir.join(file).to_string_lossy().into_owned()
}

fn binary_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[tokio::main]
async fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok();

    let dir = binary_dir();
    let address = std::env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());
    let database_url = std::env::var("DATABASE_URL").unwrap_or("app.db".to_string());

    let graph = AppHostBuilder::new()
        .add_database("productdb", database_url)
        .add_project(
            "api",
            ProjectResource::new(sibling(&dir, "stormdesk"), Endpoint::new(&address, 8080)),
            &["productdb"],
        )
        .add_project(
            "gateway",
            ProjectResource::new(sibling(&dir, "gateway"), Endpoint::new(&address, 8081)),
            &["api"],
        )
        .add_project(
            "web",
            ProjectResource::new(sibling(&dir, "web"), Endpoint::new(&address, 8082)),
            &["gateway"],
        )
        .build();

    let graph = match graph {
        Ok(graph) => graph,
        Err(e) => {
            log::error!("Invalid application graph: {e}");
            std::process::exit(1);
        }
    };

    log::info!("Start order: {}", graph.start_order().join(" -> "));

    if let Err(e) = runner::run(&graph).await {
        log::error!("{e}");
        std::process::exit(1);
    }
}
