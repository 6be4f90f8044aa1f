// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Returns the value of a required field exactly as submitted.
///
/// Only the empty string counts as missing; whitespace is kept.
///
/// # Errors
///
/// Returns `DomainError::MissingField` if the value is empty.
pub fn require_field<'a>(field: &'static str, value: &'a str) -> Result<&'a str, DomainError> {
    if value.is_empty() {
        return Err(DomainError::MissingField { field });
    }
    Ok(value)
}

/// Parses a stock quantity.
///
/// Surrounding whitespace is ignored. Negative values are accepted; the
/// inventory does not constrain the sign of a quantity.
///
/// # Errors
///
/// Returns `DomainError::InvalidQuantity` if the value is not an integer.
pub fn parse_quantity(value: &str) -> Result<i64, DomainError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| DomainError::InvalidQuantity {
            value: value.to_string(),
        })
}

/// Parses a unit price.
///
/// # Errors
///
/// Returns `DomainError::InvalidPrice` if the value is not a number, or is
/// `NaN` or infinite (both parse successfully but cannot be stored).
pub fn parse_price(value: &str) -> Result<f64, DomainError> {
    let price: f64 = value
        .trim()
        .parse::<f64>()
        .map_err(|_| DomainError::InvalidPrice {
            value: value.to_string(),
        })?;

    if !price.is_finite() {
        return Err(DomainError::InvalidPrice {
            value: value.to_string(),
        });
    }

    Ok(price)
}
