// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inventory queries.

use bike_inventory_domain::Bike;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::diesel_schema::bikes;
use crate::error::PersistenceError;

/// Diesel Queryable struct for bike rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = bikes)]
struct BikeRow {
    id: i64,
    brand: String,
    model: String,
    category: String,
    quantity: i64,
    price: f64,
}

impl From<BikeRow> for Bike {
    fn from(row: BikeRow) -> Self {
        Self {
            id: row.id,
            brand: row.brand,
            model: row.model,
            category: row.category,
            quantity: row.quantity,
            price: row.price,
        }
    }
}

/// Lists every bike, ordered by id ascending.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_bikes(conn: &mut SqliteConnection) -> Result<Vec<Bike>, PersistenceError> {
    let rows: Vec<BikeRow> = bikes::table
        .order(bikes::id.asc())
        .select(BikeRow::as_select())
        .load(conn)?;

    debug!(count = rows.len(), "Listed bikes");
    Ok(rows.into_iter().map(Bike::from).collect())
}

/// Retrieves a single bike by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no bike has this id.
pub fn get_bike(conn: &mut SqliteConnection, bike_id: i64) -> Result<Option<Bike>, PersistenceError> {
    let row: Option<BikeRow> = bikes::table
        .filter(bikes::id.eq(bike_id))
        .select(BikeRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Bike::from))
}
