//! Directory service configuration.

use std::env;

use common::{LatencyConfig, ServiceConfig};

/// Directory service configuration.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Service name and log level
    pub service: ServiceConfig,
    /// Simulated storage delay per repository
    pub latency: LatencyConfig,
    /// Load fixture records into the fresh stores
    pub seed_data: bool,
}

fn env_millis(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_flag(key: &str, default: bool) -> bool {
    match env::var(key).map(|v| v.trim().to_ascii_lowercase()) {
        Ok(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Ok(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        _ => default,
    }
}

impl DirectoryConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service: ServiceConfig {
                service_name: env::var("DIRECTORY_SERVICE_NAME")
                    .unwrap_or(defaults.service.service_name),
                log_level: env::var("DIRECTORY_LOG_LEVEL")
                    .or_else(|_| env::var("RUST_LOG"))
                    .unwrap_or(defaults.service.log_level),
            },
            latency: LatencyConfig {
                usuario_ms: env_millis("DIRECTORY_USUARIO_LATENCY_MS", defaults.latency.usuario_ms),
                cliente_ms: env_millis("DIRECTORY_CLIENTE_LATENCY_MS", defaults.latency.cliente_ms),
                emprendedor_ms: env_millis(
                    "DIRECTORY_EMPRENDEDOR_LATENCY_MS",
                    defaults.latency.emprendedor_ms,
                ),
            },
            seed_data: env_flag("DIRECTORY_SEED_DATA", defaults.seed_data),
        }
    }

    /// Empty stores and no delay.
    pub fn for_tests() -> Self {
        Self {
            latency: LatencyConfig::none(),
            seed_data: false,
            ..Self::default()
        }
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "directory-service".to_string(),
                log_level: "info".to_string(),
            },
            latency: LatencyConfig::default(),
            seed_data: true,
        }
    }
}
