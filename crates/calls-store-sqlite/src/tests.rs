//! Integration tests for `SqliteStore` against an in-memory database.

use std::{
  path::PathBuf,
  time::{Duration, Instant},
};

use calls_core::{
  call::{CallInfo, CallStatus},
  store::{CallStore, StoreError},
};

use crate::{Error, SqliteStore, Target};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_call() -> CallInfo { CallInfo::new("A", "+15555550100", "issue") }

// ─── Connection strings ──────────────────────────────────────────────────────

#[test]
fn parses_connection_strings() {
  assert_eq!(Target::parse(":memory:").unwrap(), Target::Memory);
  assert_eq!(Target::parse("sqlite://:memory:").unwrap(), Target::Memory);
  assert_eq!(
    Target::parse("sqlite:///var/lib/calls.db").unwrap(),
    Target::File(PathBuf::from("/var/lib/calls.db"))
  );
  assert_eq!(
    Target::parse("sqlite:calls.db").unwrap(),
    Target::File(PathBuf::from("calls.db"))
  );
  assert_eq!(
    Target::parse("calls.db").unwrap(),
    Target::File(PathBuf::from("calls.db"))
  );
}

#[test]
fn rejects_empty_connection_string() {
  assert!(matches!(
    Target::parse("  "),
    Err(Error::InvalidConnectionString(_))
  ));
}

#[tokio::test]
async fn connect_in_memory_pings() {
  let s = SqliteStore::connect(":memory:", Duration::ZERO).await.unwrap();
  s.ping().await.unwrap();
  assert!(s.list_calls().await.unwrap().is_empty());
}

#[tokio::test]
async fn connect_to_unreachable_path_fails() {
  let result =
    SqliteStore::connect("/nonexistent-dir/calls/calls.db", Duration::ZERO).await;
  assert!(matches!(result, Err(Error::Database(_))));
}

// ─── Create / read ───────────────────────────────────────────────────────────

#[tokio::test]
async fn create_assigns_id_status_and_timestamp() {
  let s = store().await;

  let mut call = new_call();
  let id = s.create_call(&mut call).await.unwrap();

  assert!(id > 0);
  assert_eq!(call.id, id);
  assert_eq!(call.status, CallStatus::Open);
  assert!(call.created_at.timestamp() > 0);

  let fetched = s.get_call(id).await.unwrap();
  assert_eq!(fetched, call);
}

#[tokio::test]
async fn create_ignores_caller_supplied_store_fields() {
  let s = store().await;

  let mut call = new_call();
  call.id = 99;
  call.status = CallStatus::Closed;

  let id = s.create_call(&mut call).await.unwrap();
  assert_eq!(id, 1);

  let fetched = s.get_call(id).await.unwrap();
  assert_eq!(fetched.status, CallStatus::Open);
}

#[tokio::test]
async fn list_empty_store_returns_empty_vec() {
  let s = store().await;
  assert!(s.list_calls().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_returns_every_call() {
  let s = store().await;
  for name in ["A", "B", "C"] {
    let mut call = CallInfo::new(name, "+15555550100", "issue");
    s.create_call(&mut call).await.unwrap();
  }

  let all = s.list_calls().await.unwrap();
  assert_eq!(all.len(), 3);
  let mut names: Vec<_> = all.iter().map(|c| c.client_name.as_str()).collect();
  names.sort();
  assert_eq!(names, ["A", "B", "C"]);
}

// ─── Not found ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_id_is_not_found_everywhere() {
  let s = store().await;

  let get = s.get_call(7).await.unwrap_err();
  let close = s.close_call(7).await.unwrap_err();
  let delete = s.delete_call(7).await.unwrap_err();

  for err in [get, close, delete] {
    assert!(matches!(err, Error::NotFound(7)));
    assert!(err.is_not_found());
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn close_status_twice_succeeds() {
  let s = store().await;
  let mut call = new_call();
  let id = s.create_call(&mut call).await.unwrap();

  s.close_call(id).await.unwrap();
  s.close_call(id).await.unwrap();

  let fetched = s.get_call(id).await.unwrap();
  assert!(fetched.is_closed());
  assert_eq!(fetched.created_at, call.created_at);
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_then_get_is_not_found() {
  let s = store().await;
  let mut call = new_call();
  let id = s.create_call(&mut call).await.unwrap();

  s.delete_call(id).await.unwrap();

  assert!(s.get_call(id).await.unwrap_err().is_not_found());
  assert!(s.delete_call(id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
  let s = store().await;

  let mut first = new_call();
  let first_id = s.create_call(&mut first).await.unwrap();
  s.delete_call(first_id).await.unwrap();

  let mut second = new_call();
  let second_id = s.create_call(&mut second).await.unwrap();
  assert!(second_id > first_id);
}

// ─── Close ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn operations_after_close_are_infrastructure_errors() {
  let s = store().await;
  s.close(Instant::now() + Duration::from_secs(5))
    .await
    .unwrap();

  let err = s.list_calls().await.unwrap_err();
  assert!(matches!(err, Error::Database(_)));
  assert!(!err.is_not_found());
}
