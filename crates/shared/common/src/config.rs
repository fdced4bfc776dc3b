//! Shared configuration structures.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Base service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Log level
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "service".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Simulated storage latency per repository, in milliseconds.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct LatencyConfig {
    pub usuario_ms: u64,
    pub cliente_ms: u64,
    pub emprendedor_ms: u64,
}

impl LatencyConfig {
    /// No delay at all (tests).
    pub fn none() -> Self {
        Self {
            usuario_ms: 0,
            cliente_ms: 0,
            emprendedor_ms: 0,
        }
    }

    pub fn usuario(&self) -> Duration {
        Duration::from_millis(self.usuario_ms)
    }

    pub fn cliente(&self) -> Duration {
        Duration::from_millis(self.cliente_ms)
    }

    pub fn emprendedor(&self) -> Duration {
        Duration::from_millis(self.emprendedor_ms)
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            usuario_ms: 100,
            cliente_ms: 120,
            emprendedor_ms: 150,
        }
    }
}
