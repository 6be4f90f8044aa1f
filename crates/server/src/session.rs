// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session cookies and authentication extractors for the server.
//!
//! The browser only ever holds an opaque token in the `bike_session`
//! cookie. Everything else about the session lives in the database and is
//! resolved through `AuthenticationService`.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::COOKIE, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use bike_inventory_api::{ApiError, AuthenticatedUser, AuthenticationService};
use tracing::debug;

use crate::{AppState, HttpError};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "bike_session";

/// Attributes applied to every session cookie the server sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookieConfig {
    /// Add the `Secure` attribute (HTTPS deployments only).
    pub secure: bool,
}

impl CookieConfig {
    /// Builds the `Set-Cookie` value that stores `token`.
    #[must_use]
    pub fn session_cookie(self, token: &str) -> String {
        let max_age: i64 = AuthenticationService::session_lifetime().whole_seconds();
        self.with_attributes(format!("{SESSION_COOKIE_NAME}={token}; Max-Age={max_age}"))
    }

    /// Builds the `Set-Cookie` value that removes the session cookie.
    #[must_use]
    pub fn expired_cookie(self) -> String {
        self.with_attributes(format!("{SESSION_COOKIE_NAME}=; Max-Age=0"))
    }

    fn with_attributes(self, mut cookie: String) -> String {
        cookie.push_str("; Path=/; HttpOnly; SameSite=Lax");
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

/// Reads the session token from the request's `Cookie` headers.
fn read_session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| name.trim() == SESSION_COOKIE_NAME && !value.is_empty())
        .map(|(_, value)| value.trim().to_string())
}

/// Extractor for the raw session token, if the browser sent one.
///
/// Never rejects. Used by the public pages, which only need the token to
/// pick up or attach a flash message.
pub struct SessionToken(pub Option<String>);

impl<S: Send + Sync> FromRequestParts<S> for SessionToken {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(read_session_token(&parts.headers)))
    }
}

/// Extractor for logged-in users.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(session: AuthenticatedSession) -> Response {
///     // session.user.username, session.token
/// }
/// ```
///
/// # Errors
///
/// Redirects to `/login` if the cookie is missing or names an unknown,
/// expired, or anonymous session.
pub struct AuthenticatedSession {
    pub user: AuthenticatedUser,
    pub token: String,
}

impl FromRequestParts<AppState> for AuthenticatedSession {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token: String = read_session_token(&parts.headers).ok_or_else(|| {
            debug!(path = %parts.uri.path(), "No session cookie");
            SessionError::NotLoggedIn
        })?;

        let mut persistence = state.persistence.lock().await;
        let user: AuthenticatedUser =
            AuthenticationService::validate_session(&mut persistence, &token)
                .map_err(SessionError::Internal)?
                .ok_or_else(|| {
                    debug!(path = %parts.uri.path(), "Session is not authenticated");
                    SessionError::NotLoggedIn
                })?;

        debug!(username = %user.username, "Session validated successfully");

        Ok(Self { user, token })
    }
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// No authenticated session; the user must log in.
    NotLoggedIn,
    /// The session store failed.
    Internal(ApiError),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        match self {
            Self::NotLoggedIn => Redirect::to("/login").into_response(),
            Self::Internal(err) => HttpError::from(err).into_response(),
        }
    }
}
