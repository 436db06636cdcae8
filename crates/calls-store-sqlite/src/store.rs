//! [`SqliteStore`] — the SQLite implementation of [`CallStore`].

use std::{
  path::PathBuf,
  time::{Duration, Instant},
};

use calls_core::{call::CallInfo, store::CallStore};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{CALL_COLUMNS, RawCall, decode_dt, decode_status},
  schema::SCHEMA,
};

// ─── Connection target ───────────────────────────────────────────────────────

/// Where a connection string points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
  Memory,
  File(PathBuf),
}

impl Target {
  /// Accepts a plain path, `sqlite://<path>`, `sqlite:<path>` or `:memory:`.
  pub fn parse(connection_string: &str) -> Result<Self> {
    let s = connection_string.trim();
    let path = s
      .strip_prefix("sqlite://")
      .or_else(|| s.strip_prefix("sqlite:"))
      .unwrap_or(s);

    match path {
      "" => Err(Error::InvalidConnectionString(connection_string.to_owned())),
      ":memory:" => Ok(Target::Memory),
      p => Ok(Target::File(PathBuf::from(p))),
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A call store backed by a single SQLite database.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Connect to the database named by `connection_string`.
  ///
  /// Sleeps for `grace` first so a database that is still starting up gets a
  /// chance to come up, then opens the connection, applies the schema and
  /// pings once. Any failure is returned to the caller.
  pub async fn connect(connection_string: &str, grace: Duration) -> Result<Self> {
    let target = Target::parse(connection_string)?;

    tokio::time::sleep(grace).await;

    let conn = match &target {
      Target::Memory => tokio_rusqlite::Connection::open_in_memory().await?,
      Target::File(path) => tokio_rusqlite::Connection::open(path).await?,
    };
    let store = Self { conn };
    store.init_schema().await?;
    store.ping().await?;

    tracing::info!(?target, "opened call store");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Round-trip a trivial query to prove the connection is usable.
  pub async fn ping(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── CallStore impl ──────────────────────────────────────────────────────────

impl CallStore for SqliteStore {
  type Error = Error;

  async fn create_call(&self, call: &mut CallInfo) -> Result<i64> {
    let client_name  = call.client_name.clone();
    let phone_number = call.phone_number.clone();
    let description  = call.description.clone();

    let (id, status, created_at): (i64, String, String) = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "INSERT INTO calls (client_name, phone_number, description)
           VALUES (?1, ?2, ?3)
           RETURNING id, status, created_at",
          rusqlite::params![client_name, phone_number, description],
          |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?)
      })
      .await?;

    call.id         = id;
    call.status     = decode_status(&status)?;
    call.created_at = decode_dt(&created_at)?;

    tracing::debug!(id, "created call");
    Ok(id)
  }

  async fn list_calls(&self) -> Result<Vec<CallInfo>> {
    let raws: Vec<RawCall> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!("SELECT {CALL_COLUMNS} FROM calls"))?;
        let rows = stmt
          .query_map([], RawCall::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCall::into_call).collect()
  }

  async fn get_call(&self, id: i64) -> Result<CallInfo> {
    let raw: Option<RawCall> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CALL_COLUMNS} FROM calls WHERE id = ?1"),
              rusqlite::params![id],
              RawCall::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.ok_or(Error::NotFound(id))?.into_call()
  }

  async fn close_call(&self, id: i64) -> Result<()> {
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE calls SET status = 'closed' WHERE id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;

    if affected == 0 {
      return Err(Error::NotFound(id));
    }
    Ok(())
  }

  async fn delete_call(&self, id: i64) -> Result<()> {
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM calls WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    if affected == 0 {
      return Err(Error::NotFound(id));
    }
    tracing::debug!(id, "deleted call");
    Ok(())
  }

  async fn close(&self, deadline: Instant) -> Result<()> {
    let conn = self.conn.clone();
    match tokio::time::timeout_at(deadline.into(), conn.close()).await {
      Ok(res) => {
        res?;
        tracing::info!("closed call store");
        Ok(())
      }
      Err(_) => Err(Error::CloseTimeout),
    }
  }
}
