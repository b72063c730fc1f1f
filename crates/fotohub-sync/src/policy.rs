//! How integrity warnings and write failures are handled.
//!
//! The same conditions are a hard stop while developing and a logged
//! warning in the field: losing one commit must never crash the app for
//! an end user. The choice is an explicit runtime value so tests can
//! force either mode.

/// Reaction to integrity warnings (duplicate identity matches) and
/// store write/commit failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
  /// Log and continue with the first match / the in-memory state.
  Warn,
  /// Panic — these conditions indicate a bug worth stopping for.
  Fatal,
}

impl FailurePolicy {
  /// `Fatal` in debug builds, `Warn` in release builds.
  pub fn default_for_build() -> Self {
    if cfg!(debug_assertions) { Self::Fatal } else { Self::Warn }
  }

  pub fn report(&self, message: &str) {
    match self {
      Self::Warn => tracing::warn!("{message}"),
      Self::Fatal => panic!("{message}"),
    }
  }
}
