// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// A stored user account.
///
/// Only the bcrypt hash of the password is ever loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    pub user_id: i64,
    pub username: String,
    pub password_hash: String,
}

/// A stored browser session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub token: String,
    /// The authenticated username, or `None` for an anonymous session.
    pub username: Option<String>,
    pub created_at: String,
    pub expires_at: String,
}

/// A one-shot status message attached to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashData {
    pub level: String,
    pub message: String,
}
