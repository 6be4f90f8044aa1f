// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inventory actions.
//!
//! Every mutation reports its outcome as a [`Flash`] for the next page
//! rather than as an error, because the browser is always redirected back
//! to the listing. Only failures the user cannot act on become
//! `ApiError::Internal`.

use bike_inventory_domain::{Bike, BikeDraft, BikeForm, DomainError};
use bike_inventory_persistence::Persistence;
use tracing::{debug, error, info};

use crate::error::{ApiError, translate_persistence_error};
use crate::flash::Flash;

pub struct InventoryService;

impl InventoryService {
    /// Lists every bike ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if the query fails.
    pub fn list(persistence: &mut Persistence) -> Result<Vec<Bike>, ApiError> {
        persistence.list_bikes().map_err(translate_persistence_error)
    }

    /// Adds a bike from a submitted form.
    ///
    /// All five fields are required. Validation and write failures both
    /// leave the table untouched and come back as an error flash.
    ///
    /// # Errors
    ///
    /// Write failures are logged and reported through the returned flash,
    /// so no error is currently returned.
    pub fn add(persistence: &mut Persistence, form: &BikeForm) -> Result<Flash, ApiError> {
        let draft: BikeDraft = match BikeDraft::from_form(form) {
            Ok(draft) => draft,
            Err(DomainError::MissingField { field }) => {
                debug!(field, "Rejected bike with missing field");
                return Ok(Flash::error("All fields are required!"));
            }
            Err(e) => {
                debug!(error = %e, "Rejected bike with invalid number");
                return Ok(Flash::error(format!("Error: {e}")));
            }
        };

        match persistence.insert_bike(&draft) {
            Ok(bike_id) => {
                info!(bike_id, "Bike added");
                Ok(Flash::success("Bike added successfully!"))
            }
            Err(e) => {
                error!(error = %e, "Failed to insert bike");
                Ok(Flash::error("Error: the bike could not be saved"))
            }
        }
    }

    /// Overwrites every field of an existing bike.
    ///
    /// Text fields may be empty. Quantity and price must still parse. An
    /// unknown id is reported as an error flash.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if the lookup or update statement fails.
    pub fn update(
        persistence: &mut Persistence,
        bike_id: i64,
        form: &BikeForm,
    ) -> Result<Flash, ApiError> {
        let draft: BikeDraft = match BikeDraft::from_form_unchecked(form) {
            Ok(draft) => draft,
            Err(e) => {
                debug!(bike_id, error = %e, "Rejected bike update");
                return Ok(Flash::error(format!("Error: {e}")));
            }
        };

        let existing: Option<Bike> = persistence
            .get_bike(bike_id)
            .map_err(translate_persistence_error)?;
        let Some(previous) = existing else {
            debug!(bike_id, "Update targeted a missing bike");
            return Ok(Flash::error(format!("Bike {bike_id} not found")));
        };

        persistence
            .update_bike(bike_id, &draft)
            .map_err(translate_persistence_error)?;

        info!(
            bike_id,
            previous_quantity = previous.quantity,
            quantity = draft.quantity,
            "Bike updated"
        );
        Ok(Flash::success("Bike updated successfully!"))
    }

    /// Deletes a bike. Deleting an unknown id still reports success.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if the delete statement fails.
    pub fn delete(persistence: &mut Persistence, bike_id: i64) -> Result<Flash, ApiError> {
        let rows: usize = persistence
            .delete_bike(bike_id)
            .map_err(translate_persistence_error)?;

        info!(bike_id, rows, "Bike deleted");
        Ok(Flash::success("Bike deleted successfully!"))
    }
}
