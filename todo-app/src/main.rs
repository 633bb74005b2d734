//! To-do server.
//!
//! Binds to `0.0.0.0:8080` unless `TODO_HOST` / `TODO_PORT` say otherwise.
//! Log output is controlled with `RUST_LOG`.

use std::error::Error;

use todo_app::Config;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "todo_app=info,axum_live=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .init();

    let config = Config::from_env()?;
    let addr = config.addr();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server running on http://{addr}");

    axum::serve(listener, todo_app::router()).await?;
    Ok(())
}
