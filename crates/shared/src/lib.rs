//! Shared types, errors, and configuration for Ceiba.
//!
//! This crate provides common types used across all other crates:
//! - Money types with decimal precision
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management
//! - SMTP delivery of receipt emails

pub mod config;
pub mod email;
pub mod error;
pub mod types;

pub use config::{AppConfig, CondominiumConfig, EmailConfig, SettlementConfig};
pub use email::{EmailError, EmailService, OutgoingAttachment};
pub use error::{AppError, AppResult};
