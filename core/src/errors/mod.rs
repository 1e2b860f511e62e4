//! Error types for the verification flow.
//!
//! `VerifyError` separates the three failure families callers care about:
//! malformed input, business outcomes (unknown/expired code, email mismatch)
//! and collaborator failures. Only the HTTP boundary turns them into status
//! codes.

use thiserror::Error;

/// Failure talking to the identity provider or the list store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Token acquisition failed: {message}")]
    Authentication { message: String },

    #[error("Store request failed: {message}")]
    Request { message: String },

    #[error("Store returned unexpected status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("Store response could not be decoded: {message}")]
    Decode { message: String },

    #[error("Store configuration error: {message}")]
    Configuration { message: String },
}

impl StoreError {
    pub fn authentication(message: impl Into<String>) -> Self {
        StoreError::Authentication { message: message.into() }
    }

    pub fn request(message: impl Into<String>) -> Self {
        StoreError::Request { message: message.into() }
    }

    pub fn unexpected_status(status: u16, message: impl Into<String>) -> Self {
        StoreError::UnexpectedStatus {
            status,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        StoreError::Decode { message: message.into() }
    }
}

/// Broad category of a verification failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any collaborator call
    Validation,
    /// Business outcome after consulting the store
    Domain,
    /// Identity provider or store failure
    Infrastructure,
}

/// Outcome of a verification attempt that did not succeed
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Invalid input")]
    InvalidInput,

    #[error("Invalid or expired code")]
    CodeNotFound,

    #[error("Email does not match")]
    EmailMismatch,

    #[error(transparent)]
    Infrastructure(#[from] StoreError),
}

impl VerifyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VerifyError::InvalidInput => ErrorKind::Validation,
            VerifyError::CodeNotFound | VerifyError::EmailMismatch => ErrorKind::Domain,
            VerifyError::Infrastructure(_) => ErrorKind::Infrastructure,
        }
    }

    /// Message safe to return to the caller. Infrastructure detail is never exposed.
    pub fn public_message(&self) -> &'static str {
        match self {
            VerifyError::InvalidInput => "Invalid input",
            VerifyError::CodeNotFound => "Invalid or expired code",
            VerifyError::EmailMismatch => "Email does not match",
            VerifyError::Infrastructure(_) => "Server error",
        }
    }
}

pub type VerifyResult<T> = Result<T, VerifyError>;
