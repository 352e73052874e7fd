//! The `kv_entries` table and its version stamp.

use super::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Schema stamp written by this build.
pub const SCHEMA_VERSION: u32 = 1;

// `updated_at` is epoch milliseconds.
const KV_ENTRIES_DDL: &str = "
CREATE TABLE IF NOT EXISTS kv_entries (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);";

/// Reads the stamp from `PRAGMA user_version`; 0 means never initialized.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

/// Fails unless the connection already carries [`SCHEMA_VERSION`].
pub fn require_current_schema(conn: &Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    if found != SCHEMA_VERSION {
        return Err(DbError::SchemaMismatch {
            found,
            expected: SCHEMA_VERSION,
        });
    }
    Ok(())
}

/// Creates the table on a blank database and stamps it in one transaction.
///
/// Current databases are left untouched; newer ones are rejected before any
/// statement runs against them.
pub(crate) fn ensure_kv_schema(conn: &mut Connection) -> DbResult<()> {
    match schema_version(conn)? {
        SCHEMA_VERSION => return Ok(()),
        0 => {}
        found => {
            return Err(DbError::SchemaMismatch {
                found,
                expected: SCHEMA_VERSION,
            })
        }
    }

    let tx = conn.transaction()?;
    tx.execute_batch(KV_ENTRIES_DDL)?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;
    info!("event=db_schema module=db status=created version={SCHEMA_VERSION}");
    Ok(())
}
