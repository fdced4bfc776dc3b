//! Email and username value objects.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::constants::{EMAIL_PATTERN, USERNAME_PATTERN};
use crate::error::{DomainError, DomainResult};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"));

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(USERNAME_PATTERN).expect("username pattern is valid"));

/// Email address, lower-cased on construction.
///
/// The raw input must match the pattern as given: surrounding whitespace is
/// rejected rather than trimmed. Lookups still go through [`Email::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn new(raw: &str) -> DomainResult<Self> {
        if !EMAIL_RE.is_match(raw) {
            return Err(DomainError::invalid_format(format!("Email inválido: '{}'", raw)));
        }
        Ok(Self(Self::normalize(raw)))
    }

    /// Normal form used for storage and for lookups.
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    /// Compare against a raw (not yet normalized) address.
    pub fn matches(&self, raw: &str) -> bool {
        self.0 == Self::normalize(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

/// Login handle: 3 to 20 characters from `[a-zA-Z0-9_]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn new(raw: &str) -> DomainResult<Self> {
        if !USERNAME_RE.is_match(raw) {
            return Err(DomainError::invalid_format(
                "Username debe tener entre 3 y 20 caracteres alfanuméricos",
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
