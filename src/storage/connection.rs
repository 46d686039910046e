//! Connection with the document store
//!
//! The connection is made once in the background and retried until it
//! succeeds, storage operations fail with [`Error::Unavailable`] until then

use std::future::Future;
use std::sync::Arc;
use std::sync::OnceLock;
use std::time::Duration;

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use tokio::task::JoinHandle;

use super::Error;
use super::Result;

/// Migrator to setup the notes collection once connected
static MIGRATOR: Migrator = sqlx::migrate!();

/// Time to wait between two connection attempts
pub const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Shared handle to the connection pool
///
/// Filled once by [`connect_with_retry`], read by every request
#[derive(Clone, Debug, Default)]
pub struct ConnectionHandle {
    pool: Arc<OnceLock<PgPool>>,
}

impl ConnectionHandle {
    /// Create a handle without a connection
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the connection pool, if connected
    pub fn pool(&self) -> Result<&PgPool> {
        self.pool.get().ok_or(Error::Unavailable)
    }

    fn set(&self, pool: PgPool) {
        if self.pool.set(pool).is_err() {
            tracing::warn!("Connection is already established, ignoring new one");
        }
    }
}

/// Connect to the document store in the background
///
/// Every failure is logged and retried after [`RETRY_DELAY`], forever
pub fn connect_with_retry(handle: ConnectionHandle, database_url: String) -> JoinHandle<()> {
    retry_until_connected(handle, move || {
        let database_url = database_url.clone();

        async move { connect(&database_url).await }
    })
}

/// Run `attempt` until it gives a pool, [`RETRY_DELAY`] apart
fn retry_until_connected<A, F>(handle: ConnectionHandle, mut attempt: A) -> JoinHandle<()>
where
    A: FnMut() -> F + Send + 'static,
    F: Future<Output = Result<PgPool>> + Send,
{
    tokio::spawn(async move {
        loop {
            match attempt().await {
                Ok(pool) => {
                    handle.set(pool);
                    tracing::info!("Database connected successfully");
                    break;
                }
                Err(err) => {
                    tracing::error!("Database connection error: {err}");
                    tracing::info!(
                        "Retrying database connection in {} seconds...",
                        RETRY_DELAY.as_secs()
                    );
                    tokio::time::sleep(RETRY_DELAY).await;
                }
            }
        }
    })
}

/// Single connection attempt, migrations included
async fn connect(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await
        .map_err(|err| Error::Connection(err.to_string()))?;

    MIGRATOR
        .run(&pool)
        .await
        .map_err(|err| Error::Connection(err.to_string()))?;

    Ok(pool)
}
