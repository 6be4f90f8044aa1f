// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One-shot status messages.

use bike_inventory_persistence::{FlashData, Persistence};
use tracing::{debug, warn};

use crate::error::{ApiError, translate_persistence_error};

/// Severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    /// Returns the stored and rendered name of this level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A status message shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }
}

impl From<FlashData> for Flash {
    fn from(data: FlashData) -> Self {
        let level: FlashLevel = match data.level.as_str() {
            "success" => FlashLevel::Success,
            "error" => FlashLevel::Error,
            other => {
                warn!(level = other, "Unknown stored flash level, showing as error");
                FlashLevel::Error
            }
        };
        Self {
            level,
            message: data.message,
        }
    }
}

/// Stores and consumes flash messages on sessions.
pub struct FlashService;

impl FlashService {
    /// Attaches a flash to the session, replacing any pending one.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if the update fails.
    pub fn push(
        persistence: &mut Persistence,
        session_token: &str,
        flash: &Flash,
    ) -> Result<(), ApiError> {
        let rows: usize = persistence
            .set_flash(session_token, flash.level.as_str(), &flash.message)
            .map_err(translate_persistence_error)?;

        if rows == 0 {
            debug!("Flash dropped: session no longer exists");
        }
        Ok(())
    }

    /// Reads and clears the pending flash of the session, if any.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if the transaction fails.
    pub fn take(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<Option<Flash>, ApiError> {
        Ok(persistence
            .take_flash(session_token)
            .map_err(translate_persistence_error)?
            .map(Flash::from))
    }
}
