// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bike_inventory_domain::DomainError;
use bike_inventory_persistence::PersistenceError;

use crate::{ApiError, translate_domain_error, translate_persistence_error};

#[test]
fn test_missing_field_maps_to_invalid_input() {
    let err = translate_domain_error(DomainError::MissingField { field: "brand" });

    assert_eq!(
        err,
        ApiError::InvalidInput {
            field: String::from("brand"),
            message: String::from("Field 'brand' is required"),
        }
    );
}

#[test]
fn test_invalid_price_names_price_field() {
    let err = translate_domain_error(DomainError::InvalidPrice {
        value: String::from("abc"),
    });

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "price"));
}

#[test]
fn test_duplicate_username_is_preserved() {
    let err = translate_persistence_error(PersistenceError::DuplicateUsername(String::from(
        "alice",
    )));

    assert_eq!(
        err,
        ApiError::DuplicateUsername {
            username: String::from("alice")
        }
    );
}

#[test]
fn test_database_errors_become_internal() {
    let err = translate_persistence_error(PersistenceError::DatabaseError(String::from("boom")));

    assert!(matches!(err, ApiError::Internal { .. }));
}
