//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (storage, latency, CLI).

use thiserror::Error;

use crate::perfil::PlataformaRedSocial;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Validation failed for a field or input
    #[error("{0}")]
    Validation(String),

    /// A value did not match its required format (email, username, url)
    #[error("{0}")]
    InvalidFormat(String),

    /// Entity with the same unique key already exists
    #[error("{0} ya existe")]
    Conflict(String),

    /// Emprendedor already has an account on this platform
    #[error("Ya existe una cuenta de {0}")]
    DuplicatePlatform(PlataformaRedSocial),

    /// Internal domain error
    #[error("Error interno: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create an invalid format error
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        DomainError::InvalidFormat(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(entity: impl Into<String>) -> Self {
        DomainError::Conflict(entity.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
