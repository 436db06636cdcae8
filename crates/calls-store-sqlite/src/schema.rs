//! SQL schema for the call store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `AUTOINCREMENT` keeps SQLite from handing out the id of a deleted row
/// again.
pub const SCHEMA: &str = "
-- No effect on `:memory:` databases.
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS calls (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    client_name  TEXT NOT NULL,
    phone_number TEXT NOT NULL,
    description  TEXT NOT NULL,
    status       TEXT NOT NULL DEFAULT 'open'
                 CHECK (status IN ('open', 'closed')),
    created_at   TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
                 DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);
";
