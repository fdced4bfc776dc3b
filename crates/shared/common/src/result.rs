//! Success/failure envelope returned by mutating operations.

use serde::{Deserialize, Serialize};

/// Outcome of an operation that can fail without being exceptional
/// (missing entity, invalid transition).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> OperationResult<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: Some(message.into()),
        }
    }

    pub fn failure(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Transform the payload, keeping the outcome and messages.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> OperationResult<U> {
        OperationResult {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
            message: self.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_serialization() {
        let result = OperationResult::success(7, "Listo");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 7);
        assert_eq!(json["message"], "Listo");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_has_no_data() {
        let result: OperationResult<String> =
            OperationResult::failure("Usuario con ID 'x' no encontrado", "Usuario no existe");

        assert!(!result.is_success());
        assert!(result.data().is_none());
        assert_eq!(result.error(), Some("Usuario con ID 'x' no encontrado"));
        assert_eq!(result.message(), Some("Usuario no existe"));
    }

    #[test]
    fn test_map_keeps_outcome() {
        let result = OperationResult::success(2, "ok").map(|n| n * 10);
        assert_eq!(result.into_data(), Some(20));
    }
}
