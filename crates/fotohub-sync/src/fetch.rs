//! Shared HTTP fetch helper for the loaders.

use crate::{Error, Result};

/// GET `url` and return the body as text. Any network error or non-2xx
/// status becomes [`Error::Fetch`]; the caller decides how far the
/// failure propagates.
pub(crate) async fn fetch_text(url: &str) -> Result<String> {
  let fetch_err = |reason: String| Error::Fetch {
    url: url.to_string(),
    reason,
  };

  let response = reqwest::get(url).await.map_err(|e| fetch_err(e.to_string()))?;
  let response =
    response.error_for_status().map_err(|e| fetch_err(e.to_string()))?;
  response.text().await.map_err(|e| fetch_err(e.to_string()))
}
