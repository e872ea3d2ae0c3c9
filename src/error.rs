//! Error types shared across the crate.
//!
//! Failures are split along the boundaries the rest of the system cares
//! about: client-side form validation (never leaves the process), transport
//! failures, rejected requests, and expired credentials.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyncError>;

/// Per-field validation messages for the edit form.
///
/// A `None` entry means the field passed. Validation is resolved entirely on
/// the client; a form that fails validation is never sent to the gateway.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl FieldErrors {
    /// True when every field passed validation.
    pub fn is_clean(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for msg in [&self.first_name, &self.last_name, &self.email].into_iter().flatten() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}", msg)?;
            first = false;
        }
        Ok(())
    }
}

/// Failure taxonomy for store and gateway operations.
///
/// Every variant renders as a displayable, human-readable message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Client-side form validation failed. Field-scoped; does not touch the
    /// store's request state.
    #[error("{0}")]
    Validation(FieldErrors),

    /// The gateway could not be reached at all.
    #[error("{0}")]
    Network(String),

    /// The gateway answered with a non-success status.
    #[error("{message}")]
    Request { status: u16, message: String },

    /// Credentials were rejected (401-class). Also fires the gateway's
    /// logout hook; the failing operation itself resolves like any other.
    #[error("{0}")]
    Auth(String),
}

impl SyncError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn request(status: u16, message: impl Into<String>) -> Self {
        Self::Request {
            status,
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// True for 401-class failures.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// True for client-side validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
