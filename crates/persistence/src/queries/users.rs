// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Credential store queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::UserData;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
}

impl From<UserRow> for UserData {
    fn from(row: UserRow) -> Self {
        Self {
            user_id: row.id,
            username: row.username,
            password_hash: row.password_hash,
        }
    }
}

/// Retrieves a user by exact username.
///
/// Matching is case-sensitive; `alice` and `Alice` are distinct accounts.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<UserData>, PersistenceError> {
    debug!("Looking up user by username: {}", username);

    let row: Option<UserRow> = users::table
        .filter(users::username.eq(username))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(UserData::from))
}

/// Looks up a user and checks the password against the stored hash.
///
/// # Errors
///
/// Returns an error if the query fails or the stored hash is malformed.
/// Returns `Ok(None)` if the user does not exist or the password is wrong.
pub fn authenticate_user(
    conn: &mut SqliteConnection,
    username: &str,
    password: &str,
) -> Result<Option<UserData>, PersistenceError> {
    let Some(user) = get_user_by_username(conn, username)? else {
        return Ok(None);
    };

    if bcrypt::verify(password, &user.password_hash)? {
        Ok(Some(user))
    } else {
        debug!("Password mismatch for user: {}", username);
        Ok(None)
    }
}

/// Counts all user accounts.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_users(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(users::table.count().get_result(conn)?)
}
