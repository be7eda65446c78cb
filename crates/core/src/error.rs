//! Unified error types for snippety.
//!
//! Callers branch on [`Error::NotFound`] to tell a missing snippet apart
//! from a broken store; every other store variant is a store failure.

use tokio_rusqlite::rusqlite;

/// Unified error types for the snippety core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No live (non-expired) snippet with the given id.
    #[error("NOT_FOUND: no live snippet with id {0}")]
    NotFound(i64),

    /// Database operation failed.
    #[error("STORE_FAILURE: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("STORE_FAILURE: migration failed: {0}")]
    MigrationFailed(String),

    /// Invalid input parameters (e.g., empty title).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// A template could not be read or parsed, or failed to render.
    #[error("TEMPLATE_ERROR: {0}")]
    Template(#[from] tera::Error),

    /// The template directory pattern could not be expanded.
    #[error("TEMPLATE_ERROR: {0}")]
    TemplatePattern(String),

    /// No template set exists for the requested page.
    #[error("UNKNOWN_PAGE: {0}")]
    UnknownPage(String),
}

impl Error {
    /// Whether this error means "no such live record" rather than a broken store.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<glob::PatternError> for Error {
    fn from(err: glob::PatternError) -> Self {
        Error::TemplatePattern(err.to_string())
    }
}

impl From<glob::GlobError> for Error {
    fn from(err: glob::GlobError) -> Self {
        Error::TemplatePattern(err.to_string())
    }
}
