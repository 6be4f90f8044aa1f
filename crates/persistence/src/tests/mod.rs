// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod bike_tests;
mod initialization_tests;
mod session_tests;

use bike_inventory_domain::BikeDraft;

use crate::Persistence;

/// Creates an isolated in-memory store that hashes at the minimum bcrypt cost.
pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory()
        .expect("in-memory database should initialize")
        .with_password_cost(4 /* bcrypt minimum cost */)
}

pub fn create_test_draft(brand: &str, model: &str) -> BikeDraft {
    BikeDraft {
        brand: brand.to_string(),
        model: model.to_string(),
        category: String::from("Road"),
        quantity: 3,
        price: 1299.99,
    }
}
