// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `users`: Credential store lookups and password verification
//! - `bikes`: Inventory listing and lookup
//! - `sessions`: Session lookup by token

pub mod bikes;
pub mod sessions;
pub mod users;
