// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service layer for the bike inventory.
//!
//! Handlers in the server crate call into this crate and never touch the
//! persistence layer directly. Each service translates domain and
//! persistence failures into [`ApiError`] so that only genuinely unexpected
//! failures reach the HTTP layer as internal errors.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod flash;
mod inventory;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedUser, AuthenticationService};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use flash::{Flash, FlashLevel, FlashService};
pub use inventory::InventoryService;
