//! Shared identifiers, errors, and configuration for acctime.
//!
//! This crate provides common pieces used by the core crate and by any
//! application embedding it:
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
