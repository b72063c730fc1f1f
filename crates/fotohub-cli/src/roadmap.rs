//! Roadmap vote API client — the external voting boundary.
//!
//! Feature items live in a JSON document; vote counts live behind a
//! namespace-keyed counter API. Nothing in the core depends on this
//! module; it exists so the boundary is concrete and testable from the
//! CLI.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

// ─── Settings ────────────────────────────────────────────────────────────────

fn default_feature_list_url() -> String {
  "https://simplejsoncms.com/api/vnlg2fq62s".to_string()
}

fn default_vote_api_url() -> String {
  "https://api.counterapi.dev/v1".to_string()
}

fn default_namespace() -> String {
  "com.fotohub.vote_on_features".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoadmapSettings {
  /// JSON document listing the feature items.
  #[serde(default = "default_feature_list_url")]
  pub feature_list_url: String,
  /// Base URL of the counter API.
  #[serde(default = "default_vote_api_url")]
  pub vote_api_url:     String,
  /// Keys all counters for this app; changing it resets every tally.
  #[serde(default = "default_namespace")]
  pub namespace:        String,
}

impl Default for RoadmapSettings {
  fn default() -> Self {
    Self {
      feature_list_url: default_feature_list_url(),
      vote_api_url:     default_vote_api_url(),
      namespace:        default_namespace(),
    }
  }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

/// One entry of the feature list document.
#[derive(Debug, Clone, Deserialize)]
pub struct RoadmapItem {
  pub id:     String,
  pub title:  String,
  #[serde(default)]
  pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CountResponse {
  count: u64,
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Async HTTP client for the roadmap feature list and vote counters.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct RoadmapClient {
  client:   Client,
  settings: RoadmapSettings,
}

impl RoadmapClient {
  pub fn new(settings: RoadmapSettings) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, settings })
  }

  fn counter_url(&self, item: &RoadmapItem, suffix: &str) -> String {
    format!(
      "{}/{}/{}{}",
      self.settings.vote_api_url.trim_end_matches('/'),
      self.settings.namespace,
      item.id,
      suffix
    )
  }

  /// Fetch the feature list.
  pub async fn feature_items(&self) -> Result<Vec<RoadmapItem>> {
    let items = self
      .client
      .get(&self.settings.feature_list_url)
      .send()
      .await
      .context("fetching roadmap feature list")?
      .error_for_status()
      .context("roadmap feature list request rejected")?
      .json::<Vec<RoadmapItem>>()
      .await
      .context("decoding roadmap feature list")?;
    Ok(items)
  }

  /// Current vote tally for one item.
  pub async fn vote_count(&self, item: &RoadmapItem) -> Result<u64> {
    let response = self
      .client
      .get(self.counter_url(item, ""))
      .send()
      .await
      .context("fetching vote count")?
      .error_for_status()
      .context("vote count request rejected")?
      .json::<CountResponse>()
      .await
      .context("decoding vote count")?;
    Ok(response.count)
  }

  /// Cast one vote for an item; returns the new tally. Votes cannot be
  /// undone — the counter only goes up.
  pub async fn cast_vote(&self, item: &RoadmapItem) -> Result<u64> {
    let response = self
      .client
      .get(self.counter_url(item, "/up"))
      .send()
      .await
      .context("casting vote")?
      .error_for_status()
      .context("vote request rejected")?
      .json::<CountResponse>()
      .await
      .context("decoding vote response")?;
    Ok(response.count)
  }
}
