//! Common utilities shared across the directory crates.
//!
//! This crate provides:
//! - Unified application error handling
//! - The `OperationResult` success/failure envelope
//! - DTO validation helpers
//! - Configuration structures

pub mod config;
pub mod error;
pub mod result;
pub mod validation;

pub use config::*;
pub use error::{AppError, AppResult};
pub use result::OperationResult;
pub use validation::validate_dto;
