//! Error codes for the frames backend.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the frames backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Previous screen is not one of the known screens
    InvalidScreen,
    /// Button index does not map onto a move
    InvalidButtonIndex,
    /// Verified action is missing required fields
    InvalidAction,
    /// Frame post does not come from a supported client protocol
    UnsupportedProtocol,
    /// Frame declares more buttons than the protocol allows
    TooManyButtons,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // System Errors
    /// Key-value store error
    StoreError,
    /// Key-value store unavailable
    StoreUnavailable,
    /// Key-value store timeout
    StoreTimeout,
    /// Per-conversation lock could not be acquired in time
    LockContention,
    /// Stored record could not be decoded
    DataCorruption,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidScreen => "INVALID_SCREEN",
            Self::InvalidButtonIndex => "INVALID_BUTTON_INDEX",
            Self::InvalidAction => "INVALID_ACTION",
            Self::UnsupportedProtocol => "UNSUPPORTED_PROTOCOL",
            Self::TooManyButtons => "TOO_MANY_BUTTONS",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::StoreError => "STORE_ERROR",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::StoreTimeout => "STORE_TIMEOUT",
            Self::LockContention => "LOCK_CONTENTION",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
