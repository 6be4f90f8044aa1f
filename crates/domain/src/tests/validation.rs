// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, parse_price, parse_quantity, require_field};

#[test]
fn test_require_field_keeps_value_verbatim() {
    assert_eq!(require_field("brand", "  Trek ").unwrap(), "  Trek ");
}

#[test]
fn test_require_field_accepts_whitespace_only() {
    assert_eq!(require_field("model", "   ").unwrap(), "   ");
}

#[test]
fn test_require_field_rejects_empty() {
    let result: Result<&str, DomainError> = require_field("model", "");
    assert_eq!(result, Err(DomainError::MissingField { field: "model" }));
}

#[test]
fn test_parse_quantity_accepts_integer() {
    assert_eq!(parse_quantity("5").unwrap(), 5);
    assert_eq!(parse_quantity(" 12 ").unwrap(), 12);
}

#[test]
fn test_parse_quantity_does_not_constrain_sign() {
    assert_eq!(parse_quantity("-3").unwrap(), -3);
}

#[test]
fn test_parse_quantity_rejects_decimal() {
    assert!(matches!(
        parse_quantity("2.5"),
        Err(DomainError::InvalidQuantity { .. })
    ));
}

#[test]
fn test_parse_quantity_rejects_text() {
    assert!(matches!(
        parse_quantity("lots"),
        Err(DomainError::InvalidQuantity { .. })
    ));
}

#[test]
fn test_parse_price_accepts_decimal() {
    let price: f64 = parse_price("899.99").unwrap();
    assert!((price - 899.99).abs() < f64::EPSILON);
}

#[test]
fn test_parse_price_accepts_integer() {
    let price: f64 = parse_price("1").unwrap();
    assert!((price - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_parse_price_rejects_text() {
    assert!(matches!(
        parse_price("free"),
        Err(DomainError::InvalidPrice { .. })
    ));
}

#[test]
fn test_parse_price_rejects_non_finite() {
    assert!(matches!(
        parse_price("NaN"),
        Err(DomainError::InvalidPrice { .. })
    ));
    assert!(matches!(
        parse_price("inf"),
        Err(DomainError::InvalidPrice { .. })
    ));
}
