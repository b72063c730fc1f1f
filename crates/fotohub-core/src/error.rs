//! Error types for `fotohub-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown organization kind: {0:?}")]
  UnknownOrganizationKind(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
