//! The `CallStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `calls-store-sqlite`).
//! The API layer depends on this abstraction, not on any concrete backend.

use std::{future::Future, time::Instant};

use crate::call::CallInfo;

/// Classifies backend errors for the layers above the store.
///
/// Anything that is not a missing record is an infrastructure failure.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn is_not_found(&self) -> bool;
}

/// Abstraction over a call store backend.
///
/// Every operation is a single round trip; nothing is cached.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait CallStore: Send + Sync {
  type Error: StoreError;

  /// Persist a new call with status `open`.
  ///
  /// Only `client_name`, `phone_number` and `description` are read from
  /// `call`. The generated `id`, `status` and `created_at` are written back
  /// into it, and the id is returned.
  fn create_call<'a>(
    &'a self,
    call: &'a mut CallInfo,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + 'a;

  /// Return every call. An empty store yields an empty vector.
  fn list_calls(
    &self,
  ) -> impl Future<Output = Result<Vec<CallInfo>, Self::Error>> + Send + '_;

  /// Retrieve a call by id. Fails with a not-found error if absent.
  fn get_call(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<CallInfo, Self::Error>> + Send + '_;

  /// Set the status of a call to `closed`.
  ///
  /// The current status is not inspected: closing a closed call succeeds.
  /// Fails with a not-found error if no call has this id.
  fn close_call(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Remove a call. Fails with a not-found error if no call has this id.
  fn delete_call(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Release the backend's resources, giving up at `deadline`.
  fn close(
    &self,
    deadline: Instant,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
