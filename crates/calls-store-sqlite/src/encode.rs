//! Decoding helpers between the text stored in SQLite columns and the
//! domain types.
//!
//! Timestamps are RFC 3339 strings generated by SQLite itself. Status is
//! stored as its lowercase name.

use calls_core::call::{CallInfo, CallStatus};
use chrono::{DateTime, Utc};

use crate::{Error, Result};

/// Column list shared by every `SELECT` and `RETURNING` on `calls`.
pub const CALL_COLUMNS: &str =
  "id, client_name, phone_number, description, status, created_at";

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

pub fn decode_status(s: &str) -> Result<CallStatus> {
  Ok(CallStatus::parse(s)?)
}

/// Raw values read directly from a `calls` row.
pub struct RawCall {
  pub id:           i64,
  pub client_name:  String,
  pub phone_number: String,
  pub description:  String,
  pub status:       String,
  pub created_at:   String,
}

impl RawCall {
  /// Read a row selected with [`CALL_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawCall {
      id:           row.get(0)?,
      client_name:  row.get(1)?,
      phone_number: row.get(2)?,
      description:  row.get(3)?,
      status:       row.get(4)?,
      created_at:   row.get(5)?,
    })
  }

  pub fn into_call(self) -> Result<CallInfo> {
    Ok(CallInfo {
      id:           self.id,
      client_name:  self.client_name,
      phone_number: self.phone_number,
      description:  self.description,
      status:       decode_status(&self.status)?,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}
