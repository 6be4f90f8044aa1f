// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A required form field was empty or missing.
    #[error("Field '{field}' is required")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },
    /// The quantity could not be parsed as an integer.
    #[error("Quantity must be a whole number, got '{value}'")]
    InvalidQuantity {
        /// The submitted value.
        value: String,
    },
    /// The price could not be parsed as a finite decimal number.
    #[error("Price must be a number, got '{value}'")]
    InvalidPrice {
        /// The submitted value.
        value: String,
    },
    /// The username is empty.
    #[error("Username cannot be empty")]
    EmptyUsername,
    /// The password is empty.
    #[error("Password cannot be empty")]
    EmptyPassword,
}
