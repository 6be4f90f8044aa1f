// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inventory mutations.
//!
//! Each function issues exactly one statement, so a failure never leaves a
//! partially written record.

use bike_inventory_domain::BikeDraft;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use crate::backend::sqlite::last_insert_rowid;
use crate::diesel_schema::bikes;
use crate::error::PersistenceError;

/// Inserts a new bike and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_bike(conn: &mut SqliteConnection, draft: &BikeDraft) -> Result<i64, PersistenceError> {
    diesel::insert_into(bikes::table)
        .values((
            bikes::brand.eq(&draft.brand),
            bikes::model.eq(&draft.model),
            bikes::category.eq(&draft.category),
            bikes::quantity.eq(draft.quantity),
            bikes::price.eq(draft.price),
        ))
        .execute(conn)?;

    let bike_id: i64 = last_insert_rowid(conn)?;

    info!(bike_id, brand = %draft.brand, model = %draft.model, "Inserted bike");
    Ok(bike_id)
}

/// Overwrites every field of the bike with the given id.
///
/// Returns the number of rows affected (0 if the id does not exist).
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_bike(
    conn: &mut SqliteConnection,
    bike_id: i64,
    draft: &BikeDraft,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::update(bikes::table.filter(bikes::id.eq(bike_id)))
        .set((
            bikes::brand.eq(&draft.brand),
            bikes::model.eq(&draft.model),
            bikes::category.eq(&draft.category),
            bikes::quantity.eq(draft.quantity),
            bikes::price.eq(draft.price),
        ))
        .execute(conn)?;

    debug!(bike_id, rows_affected, "Updated bike");
    Ok(rows_affected)
}

/// Deletes the bike with the given id.
///
/// Returns the number of rows affected; deleting an unknown id is a no-op.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_bike(conn: &mut SqliteConnection, bike_id: i64) -> Result<usize, PersistenceError> {
    let rows_affected: usize =
        diesel::delete(bikes::table.filter(bikes::id.eq(bike_id))).execute(conn)?;

    debug!(bike_id, rows_affected, "Deleted bike");
    Ok(rows_affected)
}
