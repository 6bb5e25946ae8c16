//! Key-value store database schema.

/// SQL to create the entries table. Safe to run on every start.
pub const CREATE_ENTRIES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS kv_entries (
    key   TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);
";

/// Upsert a single entry.
pub const UPSERT_ENTRY: &str = r"
INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
ON CONFLICT (key) DO UPDATE SET value = excluded.value
";

/// Read a single entry.
pub const SELECT_ENTRY: &str = "SELECT value FROM kv_entries WHERE key = ?1";

/// Delete a single entry.
pub const DELETE_ENTRY: &str = "DELETE FROM kv_entries WHERE key = ?1";
