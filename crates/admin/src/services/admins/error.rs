//! Admin service error types.

use serde::Serialize;
use thiserror::Error;

use crate::db::{RepositoryError, UniqueField};
use crate::services::password::PasswordError;
use crate::services::token::TokenError;

/// Category of a failed admin operation, stable across transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Request body failed field-level validation.
    ValidationFailed,
    DuplicateEmail,
    DuplicateNumber,
    BranchNotFound,
    /// Admin (or other addressed resource) does not exist.
    NotFound,
    /// Admin is deactivated.
    Inactive,
    InvalidCredential,
    /// Any unexpected store, hashing or signing fault.
    PersistenceError,
}

/// Errors that can occur during admin service operations.
#[derive(Debug, Error)]
pub enum AdminServiceError {
    #[error("email already exists")]
    DuplicateEmail,

    #[error("number already exists")]
    DuplicateNumber,

    #[error("branch not found")]
    BranchNotFound,

    #[error("admin not found")]
    NotFound,

    #[error("admin not activated; contact a super admin")]
    Inactive,

    #[error("invalid password")]
    InvalidCredential,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(RepositoryError),

    /// Password hashing failure or unreadable stored hash.
    #[error("password error: {0}")]
    Password(PasswordError),

    /// Token signing failure.
    #[error("token error: {0}")]
    Token(#[from] TokenError),
}

impl AdminServiceError {
    /// The transport-independent kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateEmail => ErrorKind::DuplicateEmail,
            Self::DuplicateNumber => ErrorKind::DuplicateNumber,
            Self::BranchNotFound => ErrorKind::BranchNotFound,
            Self::NotFound => ErrorKind::NotFound,
            Self::Inactive => ErrorKind::Inactive,
            Self::InvalidCredential => ErrorKind::InvalidCredential,
            Self::Repository(_) | Self::Password(_) | Self::Token(_) => ErrorKind::PersistenceError,
        }
    }
}

impl From<RepositoryError> for AdminServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(UniqueField::Email) => Self::DuplicateEmail,
            RepositoryError::Conflict(UniqueField::Number) => Self::DuplicateNumber,
            RepositoryError::ForeignKey(_) => Self::BranchNotFound,
            other => Self::Repository(other),
        }
    }
}

impl From<PasswordError> for AdminServiceError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Mismatch => Self::InvalidCredential,
            other => Self::Password(other),
        }
    }
}
