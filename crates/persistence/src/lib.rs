// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the bike inventory.
//!
//! This crate stores three things in a single `SQLite` database:
//!
//! - the bike catalog
//! - user accounts (passwords are kept as bcrypt hashes)
//! - browser sessions, each of which may carry one pending flash message
//!
//! ## Backend
//!
//! `SQLite` is the only backend. File databases run in WAL mode; tests use
//! a uniquely named shared in-memory database per adapter so they never
//! interfere with each other.
//!
//! Schema creation is idempotent: every migration statement uses
//! `IF NOT EXISTS`, so pointing the server at an existing database file
//! leaves its data untouched.
//!
//! ## Testing Philosophy
//!
//! - Every test builds its own `Persistence::new_in_memory()` instance
//! - File-backed behavior is exercised through `tempfile` directories
//! - Password hashing in tests uses the minimum bcrypt cost

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use bike_inventory_domain::{Bike, BikeDraft};
use diesel::SqliteConnection;
use std::path::Path;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

use backend::sqlite::Storage;
pub use backend::sqlite::MIGRATIONS;
pub use data_models::{FlashData, SessionData, UserData};
pub use error::PersistenceError;

/// Persistence adapter for the inventory, credential, and session stores.
pub struct Persistence {
    conn: SqliteConnection,
    password_cost: u32,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("password_cost", &self.password_cost)
            .finish_non_exhaustive()
    }
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-cache database, so adapters never
    /// see each other's data.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        Ok(Self::from_connection(backend::sqlite::open(Storage::Memory)?))
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// The file is created if missing. Existing tables and rows are kept.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        Ok(Self::from_connection(backend::sqlite::open(Storage::File(
            path_str,
        ))?))
    }

    const fn from_connection(conn: SqliteConnection) -> Self {
        Self {
            conn,
            password_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Sets the bcrypt cost used when hashing new passwords.
    #[must_use]
    pub const fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::ensure_foreign_keys(&mut self.conn)
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Creates a user account and returns its id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateUsername` if the username is taken.
    pub fn create_user(&mut self, username: &str, password: &str) -> Result<i64, PersistenceError> {
        mutations::users::create_user(&mut self.conn, username, password, self.password_cost)
    }

    /// Retrieves a user by exact, case-sensitive username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_username(&mut self.conn, username)
    }

    /// Checks a username/password pair.
    ///
    /// Returns `Ok(None)` when the user is unknown or the password is wrong.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn authenticate_user(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserData>, PersistenceError> {
        queries::users::authenticate_user(&mut self.conn, username, password)
    }

    /// Counts user accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_users(&mut self) -> Result<i64, PersistenceError> {
        queries::users::count_users(&mut self.conn)
    }

    /// Creates the default account unless that username already exists.
    ///
    /// Returns `true` if the account was created.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup or insert fails.
    pub fn ensure_default_user(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<bool, PersistenceError> {
        mutations::users::ensure_user(&mut self.conn, username, password, self.password_cost)
    }

    // ========================================================================
    // Bikes
    // ========================================================================

    /// Lists every bike ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_bikes(&mut self) -> Result<Vec<Bike>, PersistenceError> {
        queries::bikes::list_bikes(&mut self.conn)
    }

    /// Retrieves a bike by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_bike(&mut self, bike_id: i64) -> Result<Option<Bike>, PersistenceError> {
        queries::bikes::get_bike(&mut self.conn, bike_id)
    }

    /// Inserts a bike and returns its new id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_bike(&mut self, draft: &BikeDraft) -> Result<i64, PersistenceError> {
        mutations::bikes::insert_bike(&mut self.conn, draft)
    }

    /// Overwrites a bike. Returns the number of rows affected.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_bike(&mut self, bike_id: i64, draft: &BikeDraft) -> Result<usize, PersistenceError> {
        mutations::bikes::update_bike(&mut self.conn, bike_id, draft)
    }

    /// Deletes a bike. Returns the number of rows affected.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_bike(&mut self, bike_id: i64) -> Result<usize, PersistenceError> {
        mutations::bikes::delete_bike(&mut self.conn, bike_id)
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Creates a session and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created, including when
    /// `username` does not name an existing account.
    pub fn create_session(
        &mut self,
        token: &str,
        username: Option<&str>,
        created_at: &str,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::sessions::create_session(&mut self.conn, token, username, created_at, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::sessions::get_session_by_token(&mut self.conn, token)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, token: &str) -> Result<usize, PersistenceError> {
        mutations::sessions::delete_session(&mut self.conn, token)
    }

    /// Deletes all sessions whose expiry is before `now` (RFC 3339).
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_sessions(&mut self, now: &str) -> Result<usize, PersistenceError> {
        mutations::sessions::delete_expired_sessions(&mut self.conn, now)
    }

    /// Stores a flash message on a session, replacing any pending one.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_flash(
        &mut self,
        token: &str,
        level: &str,
        message: &str,
    ) -> Result<usize, PersistenceError> {
        mutations::sessions::set_flash(&mut self.conn, token, level, message)
    }

    /// Reads and clears the pending flash message of a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub fn take_flash(&mut self, token: &str) -> Result<Option<FlashData>, PersistenceError> {
        mutations::sessions::take_flash(&mut self.conn, token)
    }
}
