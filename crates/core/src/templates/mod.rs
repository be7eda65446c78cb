//! Page template cache.
//!
//! Templates are discovered and parsed once at startup. The resulting
//! [`TemplateCache`] is read-only and can be shared across request handlers
//! behind an `Arc` without locking.

pub mod cache;
pub mod data;
pub mod helpers;

pub use cache::{TemplateCache, TemplateSet};
pub use data::{FormState, TemplateData};
