//! HTTP server bootstrap.

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::app::App;
use crate::error::{Error, Result};

/// Bind `host:port` and serve `app` until Ctrl-C is received.
///
/// # Errors
///
/// Returns an error if the app has no database, the address cannot be
/// bound, or the server fails while running.
pub async fn serve(app: &App, host: &str, port: u16) -> Result<()> {
    let router = app.router()?;

    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(addr.as_str())
        .await
        .map_err(|source| Error::server_bind(&addr, source))?;

    run(listener, router, shutdown_signal()).await
}

/// Serve `router` on an already bound listener until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the server fails while running.
pub async fn run(
    listener: TcpListener,
    router: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("cannot listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
