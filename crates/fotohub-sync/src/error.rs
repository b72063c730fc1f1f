//! Error type for `fotohub-sync`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A store read failed. Write failures are not surfaced here — the
  /// engine logs them and continues with its in-memory state.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// A roster page could not be fetched; aborts that organization's load.
  #[error("fetch failed for {url}: {reason}")]
  Fetch { url: String, reason: String },

  /// The organization list feed could not be fetched. Fatal at the
  /// caller's discretion — the feed is seed configuration.
  #[error("organization feed unavailable at {url}: {reason}")]
  FeedUnavailable { url: String, reason: String },

  #[error("malformed organization feed: {0}")]
  FeedFormat(#[from] serde_json::Error),

  #[error("load queue closed")]
  QueueClosed,
}

impl Error {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
