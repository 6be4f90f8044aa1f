// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and session services.

use bike_inventory_domain::Credentials;
use bike_inventory_persistence::{Persistence, SessionData, UserData};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};

/// A user whose session has been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The account's username.
    pub username: String,
}

/// Authentication service for session-based authentication.
///
/// Every browser gets a session row. Anonymous sessions carry no username
/// and exist only so a flash message can follow a redirect; logging in
/// replaces the anonymous session with an authenticated one.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Anonymous sessions only carry a flash across one redirect.
    const ANONYMOUS_SESSION_EXPIRATION: Duration = Duration::hours(1);

    /// Returns how long a new session stays valid.
    #[must_use]
    pub const fn session_lifetime() -> Duration {
        Self::DEFAULT_SESSION_EXPIRATION
    }

    /// Checks credentials and creates a fresh authenticated session.
    ///
    /// The caller is responsible for discarding the session the browser
    /// held before, so that a pre-login token never becomes authenticated.
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_user`)
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` (wrapped in `ApiError::Auth`)
    /// if the username is unknown or the password is wrong, or
    /// `ApiError::Internal` if the database fails.
    pub fn login(
        persistence: &mut Persistence,
        credentials: &Credentials,
    ) -> Result<(String, AuthenticatedUser), ApiError> {
        let user: UserData = persistence
            .authenticate_user(credentials.username(), credentials.password())
            .map_err(translate_persistence_error)?
            .ok_or(AuthError::InvalidCredentials)?;

        let session_token: String = Self::create_session(
            persistence,
            Some(&user.username),
            Self::DEFAULT_SESSION_EXPIRATION,
        )?;

        info!(user_id = user.user_id, username = %user.username, "User logged in");

        Ok((
            session_token,
            AuthenticatedUser {
                username: user.username,
            },
        ))
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if the username or password is empty,
    /// `ApiError::DuplicateUsername` if the username is taken, or
    /// `ApiError::Internal` if the database fails.
    pub fn signup(
        persistence: &mut Persistence,
        username: &str,
        password: &str,
    ) -> Result<i64, ApiError> {
        let credentials: Credentials =
            Credentials::new(username, password).map_err(translate_domain_error)?;

        let user_id: i64 = persistence
            .create_user(credentials.username(), credentials.password())
            .map_err(translate_persistence_error)?;

        info!(user_id, username = credentials.username(), "User signed up");
        Ok(user_id)
    }

    /// Resolves a session token to the logged-in user.
    ///
    /// Returns `Ok(None)` for unknown, expired, and anonymous sessions.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if the database fails.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<Option<AuthenticatedUser>, ApiError> {
        let Some(session) = persistence
            .get_session_by_token(session_token)
            .map_err(translate_persistence_error)?
        else {
            debug!("Unknown session token");
            return Ok(None);
        };

        if Self::is_expired(&session) {
            debug!(session_id = session.session_id, "Session expired");
            return Ok(None);
        }

        Ok(session
            .username
            .map(|username| AuthenticatedUser { username }))
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if the delete fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
        let rows: usize = persistence
            .delete_session(session_token)
            .map_err(translate_persistence_error)?;

        debug!(rows, "Session deleted");
        Ok(())
    }

    /// Returns a token naming a live session, creating an anonymous one if
    /// the given token is missing, unknown, or expired.
    ///
    /// Anonymous sessions expire after an hour, and expired rows are purged
    /// before a new one is inserted, so cookieless form posts cannot grow
    /// the session table without bound.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if the database fails.
    pub fn ensure_session(
        persistence: &mut Persistence,
        session_token: Option<&str>,
    ) -> Result<String, ApiError> {
        if let Some(token) = session_token {
            let existing: Option<SessionData> = persistence
                .get_session_by_token(token)
                .map_err(translate_persistence_error)?;

            if let Some(session) = existing
                && !Self::is_expired(&session)
            {
                return Ok(session.token);
            }
        }

        let purged: usize = Self::purge_expired_sessions(persistence)?;
        if purged > 0 {
            debug!(purged, "Purged expired sessions");
        }

        Self::create_session(persistence, None, Self::ANONYMOUS_SESSION_EXPIRATION)
    }

    /// Creates the default account on first run.
    ///
    /// Returns `true` if the account was created, `false` if it already
    /// existed (its password is left as is).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` for empty credentials or
    /// `ApiError::Internal` if the database fails.
    pub fn seed_default_account(
        persistence: &mut Persistence,
        username: &str,
        password: &str,
    ) -> Result<bool, ApiError> {
        let credentials: Credentials =
            Credentials::new(username, password).map_err(translate_domain_error)?;

        let created: bool = persistence
            .ensure_default_user(credentials.username(), credentials.password())
            .map_err(translate_persistence_error)?;

        if created {
            info!(username = credentials.username(), "Seeded default account");
        } else {
            debug!(username = credentials.username(), "Default account already present");
        }
        Ok(created)
    }

    /// Deletes every session whose expiry has passed.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if the delete fails.
    pub fn purge_expired_sessions(persistence: &mut Persistence) -> Result<usize, ApiError> {
        let now: String = Self::format_timestamp(OffsetDateTime::now_utc())?;

        persistence
            .delete_expired_sessions(&now)
            .map_err(translate_persistence_error)
    }

    fn create_session(
        persistence: &mut Persistence,
        username: Option<&str>,
        lifetime: Duration,
    ) -> Result<String, ApiError> {
        let session_token: String = Self::generate_session_token();

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let created_at: String = Self::format_timestamp(now)?;
        let expires_at: String = Self::format_timestamp(now + lifetime)?;

        persistence
            .create_session(&session_token, username, &created_at, &expires_at)
            .map_err(translate_persistence_error)?;

        Ok(session_token)
    }

    fn is_expired(session: &SessionData) -> bool {
        match OffsetDateTime::parse(&session.expires_at, &Rfc3339) {
            Ok(expires_at) => OffsetDateTime::now_utc() > expires_at,
            Err(e) => {
                warn!(
                    session_id = session.session_id,
                    error = %e,
                    "Unreadable session expiry, treating session as expired"
                );
                true
            }
        }
    }

    /// Formats a timestamp as whole-second RFC 3339 in UTC.
    ///
    /// Stored timestamps are compared as strings, so they must share one
    /// fixed-width layout.
    fn format_timestamp(at: OffsetDateTime) -> Result<String, ApiError> {
        at.replace_nanosecond(0)
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to truncate timestamp: {e}"),
            })?
            .format(&Rfc3339)
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to format timestamp: {e}"),
            })
    }

    /// Generates a random 128-bit session token as lowercase hex.
    fn generate_session_token() -> String {
        format!("{:032x}", rand::random::<u128>())
    }
}
