#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
// easier to use when using the functions as callback of foreign functions
#![allow(clippy::needless_pass_by_value)]

use std::net::SocketAddr;

use anyhow::Result;
use axum::Extension;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::prelude::*;

use crate::api::router;
use crate::storage::Storage;
use crate::utils::env_var_or_else;
use crate::utils::parse_address;

mod api;
mod graceful_shutdown;
mod notes;
mod storage;
#[cfg(test)]
mod tests;
mod utils;

const DEFAULT_RUST_LOG: &str = "notes_service=debug,tower_http=debug";
const DEFAULT_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_DATABASE_URL: &str = "postgres://127.0.0.1:5432/notesdb";

#[tokio::main]
async fn main() -> Result<()> {
    setup_environment();
    setup_tracing();

    let address = setup_address()?;

    let database_url = env_var_or_else("DATABASE_URL", || String::from(DEFAULT_DATABASE_URL));
    let app = setup_app(storage::setup(database_url));

    let listener = TcpListener::bind(&address).await?;
    tracing::info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(graceful_shutdown::handler())
        .await?;

    Ok(())
}

/// Create the router for the notes service
///
/// The storage does not have to be connected yet
pub fn setup_app<S: Storage>(storage: S) -> Router {
    Router::new()
        .nest("/notes", router::<S>())
        .layer(TraceLayer::new_for_http())
        .layer(Extension(storage))
}

fn setup_environment() {
    dotenvy::dotenv().ok();
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::registry;

    registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.into()),
        ))
        .with(fmt::layer())
        .init();
}

fn setup_address() -> Result<SocketAddr> {
    let address = env_var_or_else("ADDRESS", || String::from(DEFAULT_ADDRESS));
    let port = env_var_or_else("PORT", String::new);

    parse_address(&address, &port)
}
