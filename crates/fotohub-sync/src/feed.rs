//! Organization list ingestion.
//!
//! The feed is a JSON document with two top-level categories, `clubs` and
//! `museums`. Each entry drives one organization find-create-update;
//! each category ends with one commit. The feed URL is seed
//! configuration — when the document cannot be fetched there is nothing
//! sensible to fall back to, so the error propagates to the caller.

/* Example of basic feed content:
{
    "clubs": [
        {
            "idPlus": {
                "town": "Eindhoven",
                "fullName": "Fotogroep de Gender",
                "nickName": "FG deGender"
            },
            "coordinates": { "latitude": 51.42398, "longitude": 5.45010 },
            "website": "https://www.fcdegender.nl",
            "description": [
                { "language": "NL", "value": "Fotoclub in Eindhoven-Gestel." }
            ],
            "nlSpecific": { "fotobondNumber": 1620, "kvkNumber": 17099029 }
        }
    ],
    "museums": [
        {
            "idPlus": {
                "town": "New York",
                "fullName": "Fotografiska New York",
                "nickName": "Fotografiska NYC"
            },
            "coordinates": { "latitude": 40.739278, "longitude": -73.986722 },
            "website": "https://www.fotografiska.com/nyc/",
            "wikipedia": "https://en.wikipedia.org/wiki/Fotografiska_New_York"
        }
    ]
}
*/

use fotohub_core::{
  entity::{
    Coordinates, LocalizedDescription, OrganizationIdPlus, OrganizationKind,
    OrganizationPatch,
  },
  patch::Patch,
  store::HubStore,
};
use serde::Deserialize;

use crate::{
  Error, Result,
  engine::{FcuOutcome, SyncEngine},
  fetch::fetch_text,
};

// ─── Feed schema ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct OrganizationListFeed {
  #[serde(default)]
  pub clubs:   Vec<FeedEntry>,
  #[serde(default)]
  pub museums: Vec<FeedEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEntry {
  pub id_plus:     FeedIdPlus,
  pub coordinates: Option<Coordinates>,
  pub website:     Option<String>,
  pub wikipedia:   Option<String>,
  #[serde(default)]
  pub description: Vec<LocalizedDescription>,
  pub nl_specific: Option<FeedNlSpecific>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedIdPlus {
  pub full_name: String,
  pub town:      String,
  pub nick_name: String,
}

/// Jurisdiction-specific registration numbers for Dutch organizations.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedNlSpecific {
  pub fotobond_number: Option<i16>,
  pub kvk_number:      Option<i32>,
}

impl FeedEntry {
  fn id_plus(&self) -> OrganizationIdPlus {
    OrganizationIdPlus::new(
      &self.id_plus.full_name,
      &self.id_plus.town,
      &self.id_plus.nick_name,
    )
  }

  /// Missing feed fields become `Unchanged` — they never erase what an
  /// earlier ingest (or a seed loader) stored.
  fn patch(&self) -> OrganizationPatch {
    OrganizationPatch {
      coordinates: Patch::from_option(self.coordinates),
      website: Patch::from_option(self.website.clone()),
      wikipedia: Patch::from_option(self.wikipedia.clone()),
      fotobond_number: Patch::from_option(
        self.nl_specific.as_ref().and_then(|nl| nl.fotobond_number),
      ),
      kvk_number: Patch::from_option(
        self.nl_specific.as_ref().and_then(|nl| nl.kvk_number),
      ),
      descriptions: if self.description.is_empty() {
        Patch::Unchanged
      } else {
        Patch::Set(self.description.clone())
      },
      ..Default::default()
    }
  }
}

// ─── Ingestion ───────────────────────────────────────────────────────────────

/// Per-run tallies, for the log line at the end of a sync.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
  pub created:   usize,
  pub updated:   usize,
  pub unchanged: usize,
}

impl IngestSummary {
  fn tally(&mut self, outcome: FcuOutcome) {
    match outcome {
      FcuOutcome::Created => self.created += 1,
      FcuOutcome::Updated => self.updated += 1,
      FcuOutcome::Unchanged => self.unchanged += 1,
    }
  }
}

pub fn parse_organization_list(json: &str) -> Result<OrganizationListFeed> {
  Ok(serde_json::from_str(json)?)
}

/// Reconcile every entry of an already-parsed feed.
pub async fn ingest_parsed<S: HubStore>(
  engine: &SyncEngine<S>,
  feed: &OrganizationListFeed,
) -> Result<IngestSummary> {
  let mut summary = IngestSummary::default();

  let categories = [
    (OrganizationKind::Club, &feed.clubs),
    (OrganizationKind::Museum, &feed.museums),
  ];

  for (kind, entries) in categories {
    tracing::info!(
      count = entries.len(),
      kind = kind.plural(),
      "ingesting organizations from feed"
    );

    for entry in entries {
      let reconciled =
        engine.organization(kind, &entry.id_plus(), entry.patch()).await?;
      summary.tally(reconciled.outcome);
    }

    // One commit per category, after all its items.
    engine.commit().await;
  }

  Ok(summary)
}

/// Fetch the feed from `url` and ingest it. An unreachable feed is
/// reported as [`Error::FeedUnavailable`] — callers treat that as fatal.
pub async fn ingest_organization_list<S: HubStore>(
  engine: &SyncEngine<S>,
  url: &str,
) -> Result<IngestSummary> {
  let body = fetch_text(url).await.map_err(|e| match e {
    Error::Fetch { url, reason } => Error::FeedUnavailable { url, reason },
    other => other,
  })?;

  let feed = parse_organization_list(&body)?;
  ingest_parsed(engine, &feed).await
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use fotohub_store_sqlite::SqliteStore;

  use super::*;
  use crate::{FailurePolicy, TypeRegistry};

  const FEED: &str = r#"{
    "clubs": [
      {
        "idPlus": {
          "town": "Eindhoven",
          "fullName": "Fotogroep de Gender",
          "nickName": "FG deGender"
        },
        "coordinates": { "latitude": 51.42398, "longitude": 5.45010 },
        "website": "https://www.fcdegender.nl",
        "description": [
          { "language": "NL", "value": "Fotoclub in Eindhoven-Gestel." }
        ],
        "nlSpecific": { "fotobondNumber": 1620, "kvkNumber": 17099029 }
      }
    ],
    "museums": [
      {
        "idPlus": {
          "town": "New York",
          "fullName": "Fotografiska New York",
          "nickName": "Fotografiska NYC"
        },
        "coordinates": { "latitude": 40.739278, "longitude": -73.986722 },
        "website": "https://www.fotografiska.com/nyc/",
        "wikipedia": "https://en.wikipedia.org/wiki/Fotografiska_New_York"
      }
    ]
  }"#;

  async fn engine() -> SyncEngine<SqliteStore> {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let registry =
      TypeRegistry::initialize(store.as_ref(), FailurePolicy::Fatal)
        .await
        .unwrap();
    SyncEngine::new(store, registry)
  }

  #[test]
  fn parses_both_categories() {
    let feed = parse_organization_list(FEED).unwrap();
    assert_eq!(feed.clubs.len(), 1);
    assert_eq!(feed.museums.len(), 1);

    let club = &feed.clubs[0];
    assert_eq!(club.id_plus.full_name, "Fotogroep de Gender");
    assert_eq!(club.nl_specific.as_ref().unwrap().fotobond_number, Some(1620));
    assert!(club.wikipedia.is_none());
  }

  #[test]
  fn missing_categories_default_to_empty() {
    let feed = parse_organization_list("{}").unwrap();
    assert!(feed.clubs.is_empty());
    assert!(feed.museums.is_empty());
  }

  #[tokio::test]
  async fn ingest_creates_organizations_with_their_kind() {
    let e = engine().await;
    let feed = parse_organization_list(FEED).unwrap();

    let summary = ingest_parsed(&e, &feed).await.unwrap();
    assert_eq!(summary.created, 2);
    assert_eq!(summary.updated, 0);

    let museum = &e
      .store()
      .organizations_by_identity("Fotografiska New York", "New York")
      .await
      .unwrap()[0];
    assert_eq!(
      museum.type_id,
      e.registry().type_id(OrganizationKind::Museum)
    );
    assert_eq!(
      museum.wikipedia.as_deref(),
      Some("https://en.wikipedia.org/wiki/Fotografiska_New_York")
    );

    // The club entry had no wikipedia link: created with the field absent.
    let club = &e
      .store()
      .organizations_by_identity("Fotogroep de Gender", "Eindhoven")
      .await
      .unwrap()[0];
    assert!(club.wikipedia.is_none());
    assert_eq!(club.fotobond_number, Some(1620));
    assert_eq!(club.descriptions.len(), 1);
  }

  #[tokio::test]
  async fn reingesting_identical_feed_changes_nothing() {
    let e = engine().await;
    let feed = parse_organization_list(FEED).unwrap();

    ingest_parsed(&e, &feed).await.unwrap();
    let second = ingest_parsed(&e, &feed).await.unwrap();

    assert_eq!(second.created, 0);
    assert_eq!(second.updated, 0, "zero changed-field commits on re-ingest");
    assert_eq!(second.unchanged, 2);
  }
}
