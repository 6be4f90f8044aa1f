// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use crate::backend::sqlite::last_insert_rowid;
use crate::data_models::FlashData;
use crate::diesel_schema::sessions;
use crate::error::PersistenceError;

/// Creates a new session.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `token` - The unique session token
/// * `username` - The authenticated user, or `None` for an anonymous session
/// * `created_at` - Creation timestamp (RFC 3339)
/// * `expires_at` - Expiration timestamp (RFC 3339)
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn create_session(
    conn: &mut SqliteConnection,
    token: &str,
    username: Option<&str>,
    created_at: &str,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    debug!(
        authenticated = username.is_some(),
        "Creating session with expiration: {}", expires_at
    );

    diesel::insert_into(sessions::table)
        .values((
            sessions::token.eq(token),
            sessions::username.eq(username),
            sessions::created_at.eq(created_at),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    let session_id: i64 = last_insert_rowid(conn)?;

    debug!(session_id, "Session created");
    Ok(session_id)
}

/// Deletes a session by token.
///
/// This is used for logout and for discarding a session on login.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(conn: &mut SqliteConnection, token: &str) -> Result<usize, PersistenceError> {
    debug!("Deleting session by token");

    Ok(diesel::delete(sessions::table.filter(sessions::token.eq(token))).execute(conn)?)
}

/// Deletes all sessions that expired before `now` (RFC 3339).
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(
    conn: &mut SqliteConnection,
    now: &str,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize =
        diesel::delete(sessions::table.filter(sessions::expires_at.lt(now))).execute(conn)?;

    info!("Deleted {} expired sessions", rows_affected);
    Ok(rows_affected)
}

/// Attaches a flash message to a session, replacing any pending one.
///
/// Returns the number of rows affected (0 if the token is unknown).
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn set_flash(
    conn: &mut SqliteConnection,
    token: &str,
    level: &str,
    message: &str,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(sessions::table.filter(sessions::token.eq(token)))
        .set((
            sessions::flash_level.eq(Some(level)),
            sessions::flash_message.eq(Some(message)),
        ))
        .execute(conn)?)
}

/// Reads and clears the pending flash message of a session.
///
/// Both steps run in one transaction so a message is shown at most once.
///
/// # Errors
///
/// Returns an error if the transaction fails.
pub fn take_flash(
    conn: &mut SqliteConnection,
    token: &str,
) -> Result<Option<FlashData>, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let pending: Option<(Option<String>, Option<String>)> = sessions::table
            .filter(sessions::token.eq(token))
            .select((sessions::flash_level, sessions::flash_message))
            .first(conn)
            .optional()?;

        let Some((Some(level), Some(message))) = pending else {
            return Ok(None);
        };

        diesel::update(sessions::table.filter(sessions::token.eq(token)))
            .set((
                sessions::flash_level.eq(None::<String>),
                sessions::flash_message.eq(None::<String>),
            ))
            .execute(conn)?;

        Ok(Some(FlashData { level, message }))
    })
}
