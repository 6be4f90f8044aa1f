// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Opening and preparing `SQLite` connections.
//!
//! Diesel has no PRAGMA DSL and no `last_insert_rowid()` helper, so the
//! raw SQL the adapter needs is kept here.

use std::sync::atomic::{AtomicU64, Ordering};

use diesel::connection::SimpleConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Embedded schema migrations.
///
/// Every statement uses `IF NOT EXISTS`, so applying them to a database that
/// already holds the tables is harmless.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Pragmas applied to every connection.
const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON;";

/// Extra pragmas for databases backed by a file. A writer waits briefly for
/// a competing lock instead of failing immediately.
const FILE_PRAGMAS: &str = "PRAGMA journal_mode = WAL; PRAGMA busy_timeout = 5000;";

static MEMORY_DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Where the inventory database lives.
#[derive(Debug, Clone, Copy)]
pub enum Storage<'a> {
    /// A fresh, uniquely named shared-cache database that disappears with
    /// its last connection.
    Memory,
    /// A database file, created if missing.
    File(&'a str),
}

impl Storage<'_> {
    fn url(self) -> String {
        match self {
            Self::Memory => {
                let id: u64 = MEMORY_DB_COUNTER.fetch_add(1, Ordering::SeqCst);
                format!("file:memdb_inventory_{id}?mode=memory&cache=shared")
            }
            Self::File(path) => path.to_string(),
        }
    }
}

/// Opens a connection, applies pragmas and migrations, and checks that
/// foreign keys are enforced.
///
/// # Errors
///
/// Fails if the database cannot be opened, a pragma or migration fails, or
/// `SQLite` refuses to enforce foreign keys.
pub fn open(storage: Storage<'_>) -> Result<SqliteConnection, PersistenceError> {
    let url: String = storage.url();
    info!(database = %url, "Opening SQLite database");

    let mut conn: SqliteConnection = SqliteConnection::establish(&url)?;

    conn.batch_execute(CONNECTION_PRAGMAS)?;
    if matches!(storage, Storage::File(_)) {
        conn.batch_execute(FILE_PRAGMAS)?;
    }

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    debug!(applied = applied.len(), "Migrations applied");

    ensure_foreign_keys(&mut conn)?;
    Ok(conn)
}

#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Fails unless `PRAGMA foreign_keys` is on for this connection.
///
/// Sessions reference users by username; without enforcement a session could
/// outlive its account.
///
/// # Errors
///
/// Returns `ForeignKeyEnforcementNotEnabled` if the pragma reads as off.
pub fn ensure_foreign_keys(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let pragma: ForeignKeysPragma = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;
    if pragma.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }
    Ok(())
}

/// Id of the row inserted last on this connection.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}
