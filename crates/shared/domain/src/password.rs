//! Password value object.
//!
//! The value is kept as entered and `verify` is a direct comparison. Callers
//! must never serialize it; entity views leave it out entirely.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{MIN_PASSWORD_LENGTH, PASSWORD_CHARSET_PATTERN};
use crate::error::{DomainError, DomainResult};

static PASSWORD_CHARSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(PASSWORD_CHARSET_PATTERN).expect("password charset pattern is valid"));

/// Password value object.
///
/// Requires at least 8 characters with one lowercase letter, one uppercase
/// letter and one digit, drawn from letters, digits and `@$!%*?&`.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    value: String,
}

// Don't expose the value in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Validate and wrap a plain text password.
    ///
    /// # Errors
    /// Returns a validation error if any of the strength rules fail.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        if !Self::is_valid(plain_text) {
            return Err(DomainError::validation(
                "Contraseña debe tener al menos 8 caracteres, una mayúscula, una minúscula y un número",
            ));
        }

        Ok(Self {
            value: plain_text.to_string(),
        })
    }

    /// Check a candidate against the stored value.
    pub fn verify(&self, candidate: &str) -> bool {
        self.value == candidate
    }

    fn is_valid(plain_text: &str) -> bool {
        plain_text.chars().count() >= MIN_PASSWORD_LENGTH
            && PASSWORD_CHARSET.is_match(plain_text)
            && plain_text.chars().any(|c| c.is_ascii_lowercase())
            && plain_text.chars().any(|c| c.is_ascii_uppercase())
            && plain_text.chars().any(|c| c.is_ascii_digit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_verify() {
        let password = Password::new("Secreta123").unwrap();

        assert!(password.verify("Secreta123"));
        assert!(!password.verify("secreta123"));
    }

    #[test]
    fn test_password_requires_mixed_case_and_digit() {
        assert!(Password::new("todominuscula1").is_err());
        assert!(Password::new("TODOMAYUSCULA1").is_err());
        assert!(Password::new("SinNumerosAqui").is_err());
    }

    #[test]
    fn test_password_too_short() {
        assert!(Password::new("Ab1").is_err());
    }

    #[test]
    fn test_password_minimum_length() {
        // Exactly 8 characters should work
        assert!(Password::new("Abcdef12").is_ok());
    }

    #[test]
    fn test_password_rejects_unsupported_characters() {
        assert!(Password::new("Abcdef12 #").is_err());
        assert!(Password::new("Admin123$").is_ok());
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("Secreta123").unwrap();
        let debug = format!("{:?}", password);

        assert!(!debug.contains("Secreta123"));
        assert!(debug.contains("REDACTED"));
    }
}
