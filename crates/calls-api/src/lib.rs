//! JSON REST API for the call manager.
//!
//! Exposes an axum [`Router`] backed by any [`calls_core::store::CallStore`].
//! Transport concerns (listener, middleware) are the caller's responsibility.

pub mod calls;
pub mod error;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, patch},
};
use calls_core::store::CallStore;

pub use error::ApiError;

/// Build the `/calls` router for `store`.
///
/// The collection routes answer on both `/calls` and `/calls/`.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CallStore + 'static,
{
  Router::new()
    .route("/calls", get(calls::list::<S>).post(calls::create::<S>))
    .route("/calls/", get(calls::list::<S>).post(calls::create::<S>))
    .route(
      "/calls/{id}",
      get(calls::get_one::<S>).delete(calls::delete_one::<S>),
    )
    .route("/calls/{id}/status", patch(calls::close_status::<S>))
    .with_state(store)
}
