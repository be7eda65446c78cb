//! SQLite-backed snippet store.
//!
//! This module is the only place that talks to persisted snippet data. It
//! supports:
//!
//! - Async access via tokio-rusqlite (one background connection thread)
//! - Automatic schema migrations
//! - Expiry-aware reads: expired rows are never returned

pub mod connection;
pub mod migrations;
pub mod snippets;

pub use crate::Error;

pub use connection::SnippetStore;
pub use snippets::{LATEST_LIMIT, Snippet};
