//! Hardcoded per-organization seed data.
//!
//! The simplest instantiation of the reconciliation contract: each club
//! ships a static member list that is routed through
//! [`SyncEngine::add_member`]. Running a seed twice changes nothing —
//! the engine sees identical attribute values the second time.

pub mod anders;
pub mod bellus_imago;
pub mod de_gender;
pub mod waalre;

use fotohub_core::store::HubStore;

use crate::{Result, engine::SyncEngine};

/// Run every bundled seed loader.
pub async fn insert_all<S: HubStore>(engine: &SyncEngine<S>) -> Result<()> {
  waalre::insert_hardcoded_members(engine).await?;
  bellus_imago::insert_hardcoded_members(engine).await?;
  de_gender::insert_hardcoded_members(engine).await?;
  anders::insert_hardcoded_members(engine).await?;
  Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use fotohub_store_sqlite::SqliteStore;

  use super::*;
  use crate::{FailurePolicy, TypeRegistry};

  async fn engine() -> SyncEngine<SqliteStore> {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let registry =
      TypeRegistry::initialize(store.as_ref(), FailurePolicy::Fatal)
        .await
        .unwrap();
    SyncEngine::new(store, registry)
  }

  #[tokio::test]
  async fn seeds_create_four_organizations() {
    let e = engine().await;
    insert_all(&e).await.unwrap();

    let organizations = e.store().list_organizations().await.unwrap();
    assert_eq!(organizations.len(), 4);
    assert!(organizations.iter().all(|o| o.has_hardcoded_members));
  }

  #[tokio::test]
  async fn waalre_roster_is_complete() {
    let e = engine().await;
    waalre::insert_hardcoded_members(&e).await.unwrap();

    let org = &e
      .store()
      .organizations_by_identity("Fotogroep Waalre", "Waalre")
      .await
      .unwrap()[0];
    let members = e.store().portfolios_of_organization(org.id).await.unwrap();
    assert_eq!(members.len(), 7);
  }

  #[tokio::test]
  async fn seeding_twice_creates_no_duplicates() {
    let e = engine().await;
    insert_all(&e).await.unwrap();
    let photographers_after_first =
      e.store().list_photographers().await.unwrap().len();

    insert_all(&e).await.unwrap();
    let photographers_after_second =
      e.store().list_photographers().await.unwrap().len();
    assert_eq!(photographers_after_first, photographers_after_second);
  }

  #[tokio::test]
  async fn honorary_member_gets_honorary_phrase() {
    let e = engine().await;
    waalre::insert_hardcoded_members(&e).await.unwrap();

    let marijke =
      &e.store().photographers_by_name("Marijke", "Gallas").await.unwrap()[0];
    let portfolio =
      &e.store().portfolios_of_photographer(marijke.id).await.unwrap()[0];
    assert_eq!(portfolio.role_description(marijke), "Honorary");
  }

  #[tokio::test]
  async fn chairman_phrase_includes_default_status() {
    let e = engine().await;
    waalre::insert_hardcoded_members(&e).await.unwrap();

    let miek =
      &e.store().photographers_by_name("Miek", "Kerkhoven").await.unwrap()[0];
    let portfolio =
      &e.store().portfolios_of_photographer(miek.id).await.unwrap()[0];
    assert_eq!(portfolio.role_description(miek), "Chairman and current");
  }
}
