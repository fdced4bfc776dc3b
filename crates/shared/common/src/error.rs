//! Unified application error handling.
//!
//! Domain failures are converted into a single error type that services
//! propagate with `?` and callers can turn into a user-facing message.

use domain::DomainError;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Parámetro inválido: {0}")]
    BadRequest(String),

    // Resource errors
    #[error("{0} ya existe")]
    Conflict(String),

    // Internal
    #[error("Error interno del servidor")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Conflict(msg) => {
                // Avoid duplicating "ya existe" when the message is already complete
                if msg.ends_with("ya existe") {
                    msg.clone()
                } else {
                    format!("{} ya existe", msg)
                }
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Ocurrió un error interno".to_string()
            }
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::InvalidFormat(msg) => AppError::Validation(msg),
            DomainError::Conflict(msg) => AppError::Conflict(msg),
            err @ DomainError::DuplicatePlatform(_) => AppError::Validation(err.to_string()),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::PlataformaRedSocial;

    #[test]
    fn test_conflict_message_not_duplicated() {
        let err = AppError::conflict("Username 'admin'");
        assert_eq!(err.to_string(), "Username 'admin' ya existe");
        assert_eq!(err.user_message(), "Username 'admin' ya existe");
        assert_eq!(err.code(), "CONFLICT");
    }

    #[test]
    fn test_internal_message_is_hidden() {
        let err = AppError::internal("lock poisoned");
        assert_eq!(err.user_message(), "Ocurrió un error interno");
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_from_domain_error() {
        let err: AppError = DomainError::invalid_format("Formato de email inválido").into();
        assert_eq!(err, AppError::Validation("Formato de email inválido".to_string()));

        let err: AppError = DomainError::DuplicatePlatform(PlataformaRedSocial::Instagram).into();
        assert_eq!(err.user_message(), "Ya existe una cuenta de INSTAGRAM");

        let err: AppError = DomainError::conflict("Email 'a@b.co'").into();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
