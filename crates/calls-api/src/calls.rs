//! Handlers for `/calls` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/calls/` | Body: [`CreateBody`]; returns 201 + `{"id"}` |
//! | `GET`    | `/calls/` | `{"calls": [...]}` |
//! | `GET`    | `/calls/:id` | `{"callInfo": {...}}`; 404 if not found |
//! | `PATCH`  | `/calls/:id/status` | Closes the call |
//! | `DELETE` | `/calls/:id` | 404 if not found |
//!
//! Unparseable bodies and non-numeric ids are answered with 500, not 400.

use std::sync::Arc;

use axum::{
  Json,
  body::Bytes,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use calls_core::{call::CallInfo, store::CallStore, validate::validate_new_call};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ─── Response bodies ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Created {
  pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct CallList {
  pub calls: Vec<CallInfo>,
}

#[derive(Debug, Serialize)]
pub struct CallEnvelope {
  #[serde(rename = "callInfo")]
  pub call_info: CallInfo,
}

#[derive(Debug, Serialize)]
pub struct Message {
  pub message: &'static str,
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
  raw
    .parse()
    .map_err(|e| ApiError::Internal(format!("invalid call id {raw:?}: {e}")))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /calls/`.
///
/// Absent and `null` fields read as empty so they fail validation with 400.
/// Any other field (`id`, `status`, ...) is ignored.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  #[serde(default)]
  pub client_name:  Option<String>,
  #[serde(default)]
  pub phone_number: Option<String>,
  #[serde(default)]
  pub description:  Option<String>,
}

impl From<CreateBody> for CallInfo {
  fn from(b: CreateBody) -> Self {
    CallInfo::new(
      b.client_name.unwrap_or_default(),
      b.phone_number.unwrap_or_default(),
      b.description.unwrap_or_default(),
    )
  }
}

/// `POST /calls/` — returns 201 + `{"id": <id>}`.
///
/// The body is decoded as JSON whatever `Content-Type` says.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  S: CallStore,
{
  let Json(body) = Json::<CreateBody>::from_bytes(&body)
    .map_err(|e| ApiError::Internal(e.body_text()))?;

  let mut call = CallInfo::from(body);
  validate_new_call(&call)?;

  let id = store
    .create_call(&mut call)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(Created { id })))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /calls/`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<CallList>, ApiError>
where
  S: CallStore,
{
  let calls = store.list_calls().await.map_err(ApiError::from_store)?;
  Ok(Json(CallList { calls }))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /calls/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<CallEnvelope>, ApiError>
where
  S: CallStore,
{
  let id = parse_id(&raw_id)?;
  let call_info = store.get_call(id).await.map_err(ApiError::from_store)?;
  Ok(Json(CallEnvelope { call_info }))
}

// ─── Close status ─────────────────────────────────────────────────────────────

/// `PATCH /calls/:id/status` — closing an already-closed call also succeeds.
pub async fn close_status<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Message>, ApiError>
where
  S: CallStore,
{
  let id = parse_id(&raw_id)?;
  store.close_call(id).await.map_err(ApiError::from_store)?;
  Ok(Json(Message { message: "Call updated" }))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /calls/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Message>, ApiError>
where
  S: CallStore,
{
  let id = parse_id(&raw_id)?;
  store.delete_call(id).await.map_err(ApiError::from_store)?;
  Ok(Json(Message { message: "Call deleted" }))
}
