// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use bike_inventory_domain::DomainError;
use bike_inventory_persistence::PersistenceError;
use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The username/password pair did not match a stored account.
    #[error("Invalid username or password")]
    InvalidCredentials,
}

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// contract handlers program against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Authentication failed.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The requested username is already registered.
    #[error("Username '{username}' already exists")]
    DuplicateUsername {
        /// The rejected username.
        username: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

/// Translates a domain error into an API error.
///
/// The message carried by `InvalidInput` is the domain error's own display
/// text, which is safe to show to users.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let field: &str = match &err {
        DomainError::MissingField { field } => field,
        DomainError::InvalidQuantity { .. } => "quantity",
        DomainError::InvalidPrice { .. } => "price",
        DomainError::EmptyUsername => "username",
        DomainError::EmptyPassword => "password",
    };

    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a persistence error into an API error.
///
/// Only a duplicate username carries meaning for the caller; every other
/// failure becomes `Internal`.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::DuplicateUsername(username) => ApiError::DuplicateUsername { username },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
