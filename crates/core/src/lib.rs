//! Core types and shared functionality for snippety.
//!
//! This crate provides:
//! - Snippet store with SQLite backend
//! - Template cache built once at startup
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod store;
pub mod templates;

pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use store::{Snippet, SnippetStore};
pub use templates::{FormState, TemplateCache, TemplateData, TemplateSet};
