// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Credential store mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::info;

use crate::backend::sqlite::last_insert_rowid;
use crate::diesel_schema::users;
use crate::error::PersistenceError;
use crate::queries::users::get_user_by_username;

/// Creates a new user account.
///
/// The password is stored as a bcrypt hash at the given cost.
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateUsername` if the username is taken,
/// or another error if hashing or the insert fails.
pub fn create_user(
    conn: &mut SqliteConnection,
    username: &str,
    password: &str,
    password_cost: u32,
) -> Result<i64, PersistenceError> {
    info!("Creating user with username: {}", username);

    let password_hash: String = bcrypt::hash(password, password_cost)?;

    let inserted: Result<usize, DieselError> = diesel::insert_into(users::table)
        .values((
            users::username.eq(username),
            users::password_hash.eq(&password_hash),
        ))
        .execute(conn);

    match inserted {
        Ok(_) => {}
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            return Err(PersistenceError::DuplicateUsername(username.to_string()));
        }
        Err(e) => return Err(e.into()),
    }

    let user_id: i64 = last_insert_rowid(conn)?;

    info!(user_id, "User created successfully");
    Ok(user_id)
}

/// Creates the account unless a user with this username already exists.
///
/// Returns `true` if the account was created.
///
/// # Errors
///
/// Returns an error if the lookup or insert fails.
pub fn ensure_user(
    conn: &mut SqliteConnection,
    username: &str,
    password: &str,
    password_cost: u32,
) -> Result<bool, PersistenceError> {
    if get_user_by_username(conn, username)?.is_some() {
        return Ok(false);
    }

    create_user(conn, username, password, password_cost)?;
    Ok(true)
}
