//! Snippet CRUD operations.
//!
//! Every read filters on `expires > now`, so an expired snippet is invisible
//! even though its row is still on disk.

use super::connection::SnippetStore;
use crate::Error;
use chrono::{DateTime, Datelike, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// Maximum number of snippets returned by [`SnippetStore::latest`].
pub const LATEST_LIMIT: usize = 10;

/// A stored snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

/// Last year that still encodes as a four-digit RFC 3339 year.
const MAX_EXPIRY_YEAR: i32 = 9999;

/// Expiry for a snippet created at `now`.
///
/// Rejects lifetimes that overflow or land past [`MAX_EXPIRY_YEAR`], since
/// those would no longer compare correctly as text.
fn expiry_for(now: DateTime<Utc>, lifetime_days: u32) -> Result<DateTime<Utc>, Error> {
    Duration::try_days(i64::from(lifetime_days))
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .filter(|expires| expires.year() <= MAX_EXPIRY_YEAR)
        .ok_or_else(|| {
            Error::InvalidInput(format!("lifetime_days {lifetime_days} expires after year {MAX_EXPIRY_YEAR}"))
        })
}

/// Fixed-width UTC text so that string order in SQL matches time order.
fn to_db_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_db_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e)))
}

fn snippet_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Snippet> {
    let created: String = row.get(3)?;
    let expires: String = row.get(4)?;
    Ok(Snippet {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        created: parse_db_timestamp(3, &created)?,
        expires: parse_db_timestamp(4, &expires)?,
    })
}

impl SnippetStore {
    /// Insert a new snippet that expires `lifetime_days` days from now.
    ///
    /// Returns the id assigned by the database.
    pub async fn insert(&self, title: &str, content: &str, lifetime_days: u32) -> Result<i64, Error> {
        self.insert_at(title, content, lifetime_days, Utc::now()).await
    }

    /// Get a live snippet by id.
    ///
    /// Returns [`Error::NotFound`] if the id doesn't exist or the snippet has expired.
    pub async fn get(&self, id: i64) -> Result<Snippet, Error> {
        self.get_at(id, Utc::now()).await
    }

    /// Return up to [`LATEST_LIMIT`] live snippets, newest first.
    pub async fn latest(&self) -> Result<Vec<Snippet>, Error> {
        self.latest_at(Utc::now()).await
    }

    pub(crate) async fn insert_at(
        &self, title: &str, content: &str, lifetime_days: u32, now: DateTime<Utc>,
    ) -> Result<i64, Error> {
        if lifetime_days == 0 {
            return Err(Error::InvalidInput("lifetime_days must be at least 1".into()));
        }

        let expires = to_db_timestamp(expiry_for(now, lifetime_days)?);
        let created = to_db_timestamp(now);
        let title = title.to_string();
        let content = content.to_string();

        let id = self
            .conn
            .call(move |conn| -> Result<i64, Error> {
                conn.execute(
                    "INSERT INTO snippets (title, content, created, expires) VALUES (?1, ?2, ?3, ?4)",
                    params![title, content, created, expires],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(Error::from)?;

        tracing::debug!(id, lifetime_days, "inserted snippet");
        Ok(id)
    }

    pub(crate) async fn get_at(&self, id: i64, now: DateTime<Utc>) -> Result<Snippet, Error> {
        let now = to_db_timestamp(now);
        self.conn
            .call(move |conn| -> Result<Snippet, Error> {
                let mut stmt = conn.prepare(
                    "SELECT id, title, content, created, expires FROM snippets
                    WHERE expires > ?1 AND id = ?2",
                )?;

                match stmt.query_row(params![now, id], snippet_from_row) {
                    Ok(snippet) => Ok(snippet),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Err(Error::NotFound(id)),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    pub(crate) async fn latest_at(&self, now: DateTime<Utc>) -> Result<Vec<Snippet>, Error> {
        let now = to_db_timestamp(now);
        self.conn
            .call(move |conn| -> Result<Vec<Snippet>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT id, title, content, created, expires FROM snippets
                    WHERE expires > ?1 ORDER BY id DESC LIMIT ?2",
                )?;

                let rows = stmt.query_map(params![now, LATEST_LIMIT as i64], snippet_from_row)?;
                let snippets = rows.collect::<Result<Vec<_>, _>>()?;
                Ok(snippets)
            })
            .await
            .map_err(Error::from)
    }
}
