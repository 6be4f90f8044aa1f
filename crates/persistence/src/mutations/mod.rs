// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules.
//!
//! This module contains all state-changing operations for the persistence layer.
//!
//! ## Module Organization
//!
//! - `users`: Account creation and first-run seeding
//! - `bikes`: Inventory insert, overwrite, and delete
//! - `sessions`: Session lifecycle and flash messages

pub mod bikes;
pub mod sessions;
pub mod users;
