//! The call record — the only entity the service manages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{Error, Result};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Lifecycle flag of a call. A call starts `Open` and can only move to
/// `Closed`; there is no way back.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CallStatus {
  #[default]
  Open,
  Closed,
}

impl CallStatus {
  /// Parse the value stored in the `status` column.
  pub fn parse(s: &str) -> Result<Self> {
    s.parse().map_err(|_| Error::UnknownStatus(s.to_owned()))
  }
}

// ─── CallInfo ────────────────────────────────────────────────────────────────

/// A single call entry.
///
/// `id`, `status` and `created_at` are owned by the store: whatever a caller
/// puts there before [`create_call`](crate::store::CallStore::create_call) is
/// overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallInfo {
  pub id:           i64,
  /// Name of the client who placed the call.
  pub client_name:  String,
  /// Client phone number in E.164 form, e.g. `+15555550100`.
  pub phone_number: String,
  pub description:  String,
  pub status:       CallStatus,
  /// Server-assigned; never changes after creation.
  pub created_at:   DateTime<Utc>,
}

impl CallInfo {
  /// Build an unsaved call from the three client-supplied fields.
  pub fn new(
    client_name: impl Into<String>,
    phone_number: impl Into<String>,
    description: impl Into<String>,
  ) -> Self {
    Self {
      client_name: client_name.into(),
      phone_number: phone_number.into(),
      description: description.into(),
      ..Self::default()
    }
  }

  pub fn is_closed(&self) -> bool { self.status == CallStatus::Closed }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_round_trips_through_column_text() {
    assert_eq!(CallStatus::Open.as_ref(), "open");
    assert_eq!(CallStatus::Closed.to_string(), "closed");
    assert_eq!(CallStatus::parse("closed").unwrap(), CallStatus::Closed);
  }

  #[test]
  fn unknown_status_is_rejected() {
    let err = CallStatus::parse("pending").unwrap_err();
    assert!(matches!(err, Error::UnknownStatus(s) if s == "pending"));
  }

  #[test]
  fn new_call_starts_open_and_unsaved() {
    let call = CallInfo::new("A", "+15555550100", "issue");
    assert_eq!(call.id, 0);
    assert_eq!(call.status, CallStatus::Open);
    assert!(!call.is_closed());
  }

  #[test]
  fn serialises_with_lowercase_status() {
    let mut call = CallInfo::new("A", "+15555550100", "issue");
    call.status = CallStatus::Closed;
    let json = serde_json::to_value(&call).unwrap();
    assert_eq!(json["status"], "closed");
    assert_eq!(json["client_name"], "A");
    assert!(json["created_at"].is_string());
  }
}
