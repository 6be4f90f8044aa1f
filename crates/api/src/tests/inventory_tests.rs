// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for inventory actions.

use super::helpers::{create_bike_form, create_test_persistence, create_valid_bike_form};
use crate::{Flash, FlashLevel, InventoryService};

#[test]
fn test_add_valid_bike_appends_one_record() {
    let mut persistence = create_test_persistence();

    let flash = InventoryService::add(&mut persistence, &create_valid_bike_form()).unwrap();
    let bikes = InventoryService::list(&mut persistence).unwrap();

    assert_eq!(flash, Flash::success("Bike added successfully!"));
    assert_eq!(bikes.len(), 1);
    assert_eq!(bikes[0].brand, "Trek");
    assert_eq!(bikes[0].model, "Marlin 7");
    assert_eq!(bikes[0].category, "MTB");
    assert_eq!(bikes[0].quantity, 5);
    assert!((bikes[0].price - 899.99).abs() < f64::EPSILON);
}

#[test]
fn test_add_with_empty_field_leaves_listing_unchanged() {
    let mut persistence = create_test_persistence();

    let flash = InventoryService::add(
        &mut persistence,
        &create_bike_form("", "X", "Y", "1", "1"),
    )
    .unwrap();

    assert_eq!(flash, Flash::error("All fields are required!"));
    assert!(InventoryService::list(&mut persistence).unwrap().is_empty());
}

#[test]
fn test_add_with_non_numeric_quantity_is_rejected() {
    let mut persistence = create_test_persistence();

    let flash = InventoryService::add(
        &mut persistence,
        &create_bike_form("Trek", "FX", "Hybrid", "many", "500"),
    )
    .unwrap();

    assert_eq!(flash.level, FlashLevel::Error);
    assert!(flash.message.contains("many"));
    assert!(InventoryService::list(&mut persistence).unwrap().is_empty());
}

#[test]
fn test_add_with_non_numeric_price_is_rejected() {
    let mut persistence = create_test_persistence();

    let flash = InventoryService::add(
        &mut persistence,
        &create_bike_form("Trek", "FX", "Hybrid", "2", "cheap"),
    )
    .unwrap();

    assert_eq!(flash.level, FlashLevel::Error);
    assert!(InventoryService::list(&mut persistence).unwrap().is_empty());
}

#[test]
fn test_update_replaces_all_fields() {
    let mut persistence = create_test_persistence();
    InventoryService::add(&mut persistence, &create_valid_bike_form()).unwrap();
    let id = InventoryService::list(&mut persistence).unwrap()[0].id;

    let flash = InventoryService::update(
        &mut persistence,
        id,
        &create_bike_form("Giant", "Talon", "Trail", "2", "749.5"),
    )
    .unwrap();
    let bikes = InventoryService::list(&mut persistence).unwrap();

    assert_eq!(flash, Flash::success("Bike updated successfully!"));
    assert_eq!(bikes.len(), 1);
    assert_eq!(bikes[0].brand, "Giant");
    assert_eq!(bikes[0].model, "Talon");
    assert_eq!(bikes[0].category, "Trail");
    assert_eq!(bikes[0].quantity, 2);
    assert!((bikes[0].price - 749.5).abs() < f64::EPSILON);
}

#[test]
fn test_update_accepts_empty_text_fields() {
    let mut persistence = create_test_persistence();
    InventoryService::add(&mut persistence, &create_valid_bike_form()).unwrap();
    let id = InventoryService::list(&mut persistence).unwrap()[0].id;

    let flash = InventoryService::update(
        &mut persistence,
        id,
        &create_bike_form("", "", "", "0", "0"),
    )
    .unwrap();
    let bike = persistence.get_bike(id).unwrap().unwrap();

    assert_eq!(flash.level, FlashLevel::Success);
    assert_eq!(bike.brand, "");
    assert_eq!(bike.model, "");
    assert_eq!(bike.quantity, 0);
}

#[test]
fn test_update_with_bad_number_keeps_record() {
    let mut persistence = create_test_persistence();
    InventoryService::add(&mut persistence, &create_valid_bike_form()).unwrap();
    let id = InventoryService::list(&mut persistence).unwrap()[0].id;

    let flash = InventoryService::update(
        &mut persistence,
        id,
        &create_bike_form("Giant", "Talon", "Trail", "", "749.5"),
    )
    .unwrap();
    let bike = persistence.get_bike(id).unwrap().unwrap();

    assert_eq!(flash.level, FlashLevel::Error);
    assert_eq!(bike.brand, "Trek");
    assert_eq!(bike.quantity, 5);
}

#[test]
fn test_update_missing_bike_reports_not_found() {
    let mut persistence = create_test_persistence();

    let flash =
        InventoryService::update(&mut persistence, 77, &create_valid_bike_form()).unwrap();

    assert_eq!(flash, Flash::error("Bike 77 not found"));
    assert!(InventoryService::list(&mut persistence).unwrap().is_empty());
}

#[test]
fn test_delete_removes_exactly_one_record() {
    let mut persistence = create_test_persistence();
    InventoryService::add(&mut persistence, &create_valid_bike_form()).unwrap();
    InventoryService::add(
        &mut persistence,
        &create_bike_form("Giant", "Talon", "Trail", "2", "749.5"),
    )
    .unwrap();
    let bikes = InventoryService::list(&mut persistence).unwrap();

    let flash = InventoryService::delete(&mut persistence, bikes[0].id).unwrap();
    let remaining = InventoryService::list(&mut persistence).unwrap();

    assert_eq!(flash, Flash::success("Bike deleted successfully!"));
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, bikes[1].id);
}

#[test]
fn test_delete_unknown_id_succeeds_silently() {
    let mut persistence = create_test_persistence();
    InventoryService::add(&mut persistence, &create_valid_bike_form()).unwrap();

    let flash = InventoryService::delete(&mut persistence, 12345).unwrap();

    assert_eq!(flash.level, FlashLevel::Success);
    assert_eq!(InventoryService::list(&mut persistence).unwrap().len(), 1);
}
