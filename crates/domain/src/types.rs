// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::validation::{parse_price, parse_quantity, require_field};

/// A stored bike record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bike {
    /// Database-assigned identifier.
    pub id: i64,
    /// Manufacturer, e.g. "Trek".
    pub brand: String,
    /// Model name, e.g. "Marlin 7".
    pub model: String,
    /// Free-form category, e.g. "MTB".
    pub category: String,
    /// Units in stock.
    pub quantity: i64,
    /// Unit price.
    pub price: f64,
}

/// Raw bike form fields exactly as submitted by the browser.
///
/// Missing fields deserialize to empty strings so that validation, not the
/// extractor, decides how to report them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BikeForm {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub price: String,
}

/// Validated bike field values, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct BikeDraft {
    pub brand: String,
    pub model: String,
    pub category: String,
    pub quantity: i64,
    pub price: f64,
}

impl BikeDraft {
    /// Builds a draft for a new bike.
    ///
    /// All five fields must be non-empty, and quantity and price must parse.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure, checking fields in form order.
    pub fn from_form(form: &BikeForm) -> Result<Self, DomainError> {
        let brand: &str = require_field("brand", &form.brand)?;
        let model: &str = require_field("model", &form.model)?;
        let category: &str = require_field("category", &form.category)?;
        let quantity: &str = require_field("quantity", &form.quantity)?;
        let price: &str = require_field("price", &form.price)?;

        Ok(Self {
            brand: brand.to_string(),
            model: model.to_string(),
            category: category.to_string(),
            quantity: parse_quantity(quantity)?,
            price: parse_price(price)?,
        })
    }

    /// Builds a draft for overwriting an existing bike.
    ///
    /// Text fields are taken as submitted, empty or not. Only quantity and
    /// price are checked, since their columns are numeric.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuantity` or `InvalidPrice` if either does not parse.
    pub fn from_form_unchecked(form: &BikeForm) -> Result<Self, DomainError> {
        Ok(Self {
            brand: form.brand.clone(),
            model: form.model.clone(),
            category: form.category.clone(),
            quantity: parse_quantity(&form.quantity)?,
            price: parse_price(&form.price)?,
        })
    }
}

/// A username and password pair submitted to the login or signup forms.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates a credential pair.
    ///
    /// The username is trimmed; the password is kept verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if either value is empty.
    pub fn new(username: &str, password: &str) -> Result<Self, DomainError> {
        let username: &str = username.trim();
        if username.is_empty() {
            return Err(DomainError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(DomainError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
