//! Key-value schema installer.
//!
//! # Invariants
//! - `PRAGMA user_version` is `0` on a fresh file and [`SCHEMA_VERSION`]
//!   once `kv_entries` exists.
//! - A database stamped with a newer version is left untouched.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// Version stamped into `PRAGMA user_version` by this binary.
pub const SCHEMA_VERSION: u32 = 1;

const KV_SCHEMA: &str = include_str!("schema.sql");

/// Creates `kv_entries` on a fresh database and stamps the version.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if found > SCHEMA_VERSION {
        return Err(DbError::SchemaTooNew {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    if found == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(KV_SCHEMA)?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;
    Ok(())
}
