// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;

#[test]
fn test_missing_field_message_names_the_field() {
    let err: DomainError = DomainError::MissingField { field: "brand" };
    assert_eq!(err.to_string(), "Field 'brand' is required");
}

#[test]
fn test_invalid_quantity_message_includes_value() {
    let err: DomainError = DomainError::InvalidQuantity {
        value: String::from("five"),
    };
    assert!(err.to_string().contains("'five'"));
}

#[test]
fn test_invalid_price_message_includes_value() {
    let err: DomainError = DomainError::InvalidPrice {
        value: String::from("cheap"),
    };
    assert!(err.to_string().contains("'cheap'"));
}
