// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use bike_inventory_domain::BikeForm;
use bike_inventory_persistence::Persistence;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory()
        .expect("in-memory database should initialize")
        .with_password_cost(4 /* bcrypt minimum cost */)
}

pub fn create_bike_form(
    brand: &str,
    model: &str,
    category: &str,
    quantity: &str,
    price: &str,
) -> BikeForm {
    BikeForm {
        brand: brand.to_string(),
        model: model.to_string(),
        category: category.to_string(),
        quantity: quantity.to_string(),
        price: price.to_string(),
    }
}

pub fn create_valid_bike_form() -> BikeForm {
    create_bike_form("Trek", "Marlin 7", "MTB", "5", "899.99")
}
