//! [`SqliteStore`], the SQLite implementation of the hospital store traits.

use std::{path::Path, time::Duration};

use crate::{Error, Result, schema::SCHEMA};

mod catalog;
mod doctor;
mod patient;
mod record;

/// Upper bound on a single store call when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

// ─── Store ───────────────────────────────────────────────────────────────────

/// A hospital record store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn:            tokio_rusqlite::Connection,
  request_timeout: Duration,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "opening sqlite store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn).await
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn).await
  }

  /// Bound every subsequent call by `timeout` instead of
  /// [`DEFAULT_REQUEST_TIMEOUT`].
  pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
    self.request_timeout = timeout;
    self
  }

  async fn init(conn: tokio_rusqlite::Connection) -> Result<Self> {
    let store = Self { conn, request_timeout: DEFAULT_REQUEST_TIMEOUT };
    store
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(store)
  }

  /// Run `f` on the connection thread, bounded by the request timeout.
  ///
  /// A timed-out call is reported as [`Error::Timeout`]; the statement
  /// itself may still complete in the background.
  pub(crate) async fn call<F, R>(&self, f: F) -> Result<R>
  where
    F: FnOnce(&mut rusqlite::Connection) -> tokio_rusqlite::Result<R>
      + Send
      + 'static,
    R: Send + 'static,
  {
    match tokio::time::timeout(self.request_timeout, self.conn.call(f)).await {
      Ok(result) => result.map_err(Error::classify),
      Err(_) => {
        tracing::warn!(timeout = ?self.request_timeout, "store call timed out");
        Err(Error::Timeout(self.request_timeout))
      }
    }
  }
}
