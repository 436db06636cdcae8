//! Process lifecycle: wiring at startup, ordered teardown at shutdown.

use std::{
  future::Future,
  net::SocketAddr,
  sync::Arc,
  time::{Duration, Instant},
};

use anyhow::Context as _;
use axum::Router;
use calls_core::store::CallStore;
use calls_store_sqlite::SqliteStore;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{config::ServerConfig, server::HttpServer};

/// Budget shared by listener drain and store release.
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// How long to let the database come up before the first connect.
pub const STARTUP_GRACE: Duration = Duration::from_secs(1);

/// A running service: the store and the listener serving it.
pub struct App<S> {
  store:  Arc<S>,
  server: HttpServer,
}

/// The full HTTP surface: API routes plus request logging and panic
/// recovery.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: CallStore + 'static,
{
  calls_api::api_router(store)
    .layer(CatchPanicLayer::new())
    .layer(TraceLayer::new_for_http())
}

impl App<SqliteStore> {
  /// Connect the store named in `config` and start listening on its port.
  pub async fn new(config: &ServerConfig) -> anyhow::Result<Self> {
    let store = SqliteStore::connect(&config.connection_string, STARTUP_GRACE)
      .await
      .context("failed to connect to the database")?;
    Self::with_store(store, config.port).await
  }
}

impl<S> App<S>
where
  S: CallStore + 'static,
{
  /// Start serving `store` on `port` in the background.
  pub async fn with_store(store: S, port: u16) -> anyhow::Result<Self> {
    let store = Arc::new(store);
    Self::start(store.clone(), router(store), port).await
  }

  async fn start(store: Arc<S>, app: Router, port: u16) -> anyhow::Result<Self> {
    let server = HttpServer::start(app, port)
      .await
      .with_context(|| format!("failed to bind port {port}"))?;
    Ok(Self { store, server })
  }

  pub fn local_addr(&self) -> SocketAddr { self.server.local_addr() }

  /// Serve until SIGINT or SIGTERM, then shut down.
  pub async fn run(self) -> anyhow::Result<()> { self.run_until(shutdown_signal()).await }

  /// Serve until `signal` resolves, then shut down within
  /// [`SHUTDOWN_TIMEOUT`].
  ///
  /// If the listener dies first its error is returned and nothing else is
  /// torn down.
  pub async fn run_until(mut self, signal: impl Future<Output = ()>) -> anyhow::Result<()> {
    tokio::select! {
      () = signal => {}
      err = self.server.stopped() => {
        return Err(err).context("HTTP listener stopped unexpectedly");
      }
    }

    self.shutdown(Instant::now() + SHUTDOWN_TIMEOUT).await
  }

  /// Stop the listener, then release the store, both against `deadline`.
  ///
  /// The store is left alone if the listener does not stop in time.
  pub async fn shutdown(self, deadline: Instant) -> anyhow::Result<()> {
    tracing::info!("shutting down");

    self
      .server
      .shutdown(deadline)
      .await
      .context("failed to stop HTTP listener")?;

    self
      .store
      .close(deadline)
      .await
      .context("failed to close the store")?;

    tracing::info!("shutdown complete");
    Ok(())
  }
}

/// Resolve on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!(error = %e, "failed to install Ctrl+C handler");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
      Ok(mut sig) => {
        sig.recv().await;
      }
      Err(e) => {
        tracing::error!(error = %e, "failed to install SIGTERM handler");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
    () = terminate => tracing::info!("received terminate signal, shutting down"),
  }
}
