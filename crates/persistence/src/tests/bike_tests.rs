// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for inventory persistence.

use bike_inventory_domain::BikeDraft;

use super::{create_test_draft, create_test_persistence};

#[test]
fn test_insert_bike_assigns_increasing_ids() {
    let mut persistence = create_test_persistence();

    let first = persistence
        .insert_bike(&create_test_draft("Trek", "Domane"))
        .unwrap();
    let second = persistence
        .insert_bike(&create_test_draft("Giant", "Defy"))
        .unwrap();

    assert!(second > first);
}

#[test]
fn test_list_bikes_orders_by_id() {
    let mut persistence = create_test_persistence();

    persistence
        .insert_bike(&create_test_draft("Trek", "Domane"))
        .unwrap();
    persistence
        .insert_bike(&create_test_draft("Cannondale", "Synapse"))
        .unwrap();
    persistence
        .insert_bike(&create_test_draft("Bianchi", "Oltre"))
        .unwrap();

    let brands: Vec<String> = persistence
        .list_bikes()
        .unwrap()
        .into_iter()
        .map(|bike| bike.brand)
        .collect();

    assert_eq!(brands, vec!["Trek", "Cannondale", "Bianchi"]);
}

#[test]
fn test_inserted_bike_round_trips_fields() {
    let mut persistence = create_test_persistence();
    let draft = BikeDraft {
        brand: String::from("Specialized"),
        model: String::from("Rockhopper"),
        category: String::from("Mountain"),
        quantity: 0,
        price: 649.5,
    };

    let id = persistence.insert_bike(&draft).unwrap();
    let bike = persistence.get_bike(id).unwrap().unwrap();

    assert_eq!(bike.id, id);
    assert_eq!(bike.brand, "Specialized");
    assert_eq!(bike.model, "Rockhopper");
    assert_eq!(bike.category, "Mountain");
    assert_eq!(bike.quantity, 0);
    assert!((bike.price - 649.5).abs() < f64::EPSILON);
}

#[test]
fn test_update_bike_overwrites_all_fields() {
    let mut persistence = create_test_persistence();
    let id = persistence
        .insert_bike(&create_test_draft("Trek", "Domane"))
        .unwrap();

    let replacement = BikeDraft {
        brand: String::new(),
        model: String::from("Domane SL"),
        category: String::from("Endurance"),
        quantity: 7,
        price: 2499.0,
    };
    let rows = persistence.update_bike(id, &replacement).unwrap();
    let bike = persistence.get_bike(id).unwrap().unwrap();

    assert_eq!(rows, 1);
    assert_eq!(bike.brand, "");
    assert_eq!(bike.model, "Domane SL");
    assert_eq!(bike.category, "Endurance");
    assert_eq!(bike.quantity, 7);
}

#[test]
fn test_update_unknown_bike_affects_nothing() {
    let mut persistence = create_test_persistence();

    let rows = persistence
        .update_bike(42, &create_test_draft("Trek", "Domane"))
        .unwrap();

    assert_eq!(rows, 0);
    assert!(persistence.list_bikes().unwrap().is_empty());
}

#[test]
fn test_delete_bike_removes_only_that_bike() {
    let mut persistence = create_test_persistence();
    let keep = persistence
        .insert_bike(&create_test_draft("Trek", "Domane"))
        .unwrap();
    let remove = persistence
        .insert_bike(&create_test_draft("Giant", "Defy"))
        .unwrap();

    assert_eq!(persistence.delete_bike(remove).unwrap(), 1);

    let bikes = persistence.list_bikes().unwrap();
    assert_eq!(bikes.len(), 1);
    assert_eq!(bikes[0].id, keep);
    assert!(persistence.get_bike(remove).unwrap().is_none());
}

#[test]
fn test_delete_unknown_bike_is_noop() {
    let mut persistence = create_test_persistence();
    persistence
        .insert_bike(&create_test_draft("Trek", "Domane"))
        .unwrap();

    assert_eq!(persistence.delete_bike(999).unwrap(), 0);
    assert_eq!(persistence.list_bikes().unwrap().len(), 1);
}
