//! The background HTTP listener.

use std::{io, net::SocketAddr, time::Instant};

use axum::Router;
use thiserror::Error;
use tokio::{
  net::TcpListener,
  sync::oneshot,
  task::{JoinError, JoinHandle},
};

#[derive(Debug, Error)]
pub enum ShutdownError {
  #[error("listener did not drain before the shutdown deadline")]
  Timeout,

  #[error("listener failed: {0}")]
  Serve(#[from] io::Error),

  #[error("listener task panicked or was cancelled: {0}")]
  Join(#[from] JoinError),

  #[error("listener stopped without being asked to")]
  Unexpected,
}

/// An axum server running on its own task.
///
/// Dropping the handle detaches the task; call [`HttpServer::shutdown`] to
/// stop it.
pub struct HttpServer {
  local_addr: SocketAddr,
  stop:       Option<oneshot::Sender<()>>,
  task:       JoinHandle<io::Result<()>>,
}

impl HttpServer {
  /// Bind `0.0.0.0:<port>` and start serving `app` in the background.
  ///
  /// Bind errors are returned here, before anything is spawned. Port 0 picks
  /// an ephemeral port; see [`HttpServer::local_addr`].
  pub async fn start(app: Router, port: u16) -> io::Result<Self> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    let local_addr = listener.local_addr()?;
    let (stop, stopped) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
      axum::serve(listener, app)
        .with_graceful_shutdown(async {
          // A dropped sender also means stop.
          let _ = stopped.await;
        })
        .await
    });

    tracing::info!("Listening on http://{local_addr}");
    Ok(Self { local_addr, stop: Some(stop), task })
  }

  pub fn local_addr(&self) -> SocketAddr { self.local_addr }

  /// Resolve when the serve loop exits on its own.
  ///
  /// Cancel-safe: dropping this future leaves the server running.
  pub async fn stopped(&mut self) -> ShutdownError {
    match (&mut self.task).await {
      Ok(Ok(())) => ShutdownError::Unexpected,
      Ok(Err(e)) => ShutdownError::Serve(e),
      Err(e) => ShutdownError::Join(e),
    }
  }

  /// Stop accepting connections and wait for in-flight requests to finish,
  /// up to `deadline`.
  pub async fn shutdown(mut self, deadline: Instant) -> Result<(), ShutdownError> {
    if let Some(stop) = self.stop.take() {
      let _ = stop.send(());
    }

    match tokio::time::timeout_at(deadline.into(), self.task).await {
      Ok(joined) => Ok(joined??),
      Err(_) => Err(ShutdownError::Timeout),
    }
  }
}
