//! Structured move response.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

use crate::game::MoveError;

/// Code carried by an accepted move.
pub const SUCCESS_CODE: i32 = 100;

/// Code carried by a rejected move.
pub const FAILURE_CODE: i32 = 200;

/// Result of a move submission as seen by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Message {
    /// Whether the move was applied.
    #[serde(rename = "moveValidity")]
    move_validity: bool,
    /// [`SUCCESS_CODE`] or [`FAILURE_CODE`].
    code: i32,
    /// Reason for rejection; empty on success.
    message: String,
}

impl Message {
    /// Message for an applied move.
    pub fn accepted() -> Self {
        Self {
            move_validity: true,
            code: SUCCESS_CODE,
            message: String::new(),
        }
    }

    /// Message for a rejected move.
    pub fn rejected(error: MoveError) -> Self {
        Self {
            move_validity: false,
            code: FAILURE_CODE,
            message: error.to_string(),
        }
    }

    /// Shorthand for `*self.move_validity()`.
    pub fn is_valid(&self) -> bool {
        self.move_validity
    }
}

impl From<Result<(), MoveError>> for Message {
    fn from(result: Result<(), MoveError>) -> Self {
        match result {
            Ok(()) => Self::accepted(),
            Err(error) => Self::rejected(error),
        }
    }
}
