//! Roster page loading: fetch, parse, reconcile.
//!
//! The scraper itself lives in `fotohub-roster`; this module drives the
//! two reconciliation calls per extracted record and the best-effort
//! image-refresh pass afterwards. A fetch failure aborts the whole load
//! for that organization — nothing is written beyond what earlier runs
//! already committed.

use fotohub_core::{
  entity::{
    Organization, OrganizationIdPlus, OrganizationKind, OrganizationPatch,
    PhotographerPatch, PortfolioPatch,
  },
  name::strip_parenthesized_role,
  patch::Patch,
  roles::{MemberStatus, RolesAndStatus},
  store::HubStore,
};
use fotohub_roster::{MemberRecord, derive_profile_url, parse_roster};

use crate::{Error, Result, engine::SyncEngine, fetch::fetch_text};

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Where a club's roster lives.
#[derive(Debug, Clone)]
pub struct RosterSource {
  /// The member-table page to scrape.
  pub page_url:         String,
  /// Base for derived per-member profile URLs.
  pub profile_base_url: String,
}

/// Externally-maintained name lists that classify scraped members. The
/// lists match against the raw display name as it appears on the page
/// (including any parenthesized role).
#[derive(Debug, Clone, Default)]
pub struct MemberNameLists {
  pub current:     Vec<String>,
  pub prospective: Vec<String>,
  pub coaches:     Vec<String>,
}

impl MemberNameLists {
  pub fn is_current(&self, raw_name: &str, include_prospective: bool) -> bool {
    self.current.iter().any(|n| n == raw_name)
      || (include_prospective && self.is_prospective(raw_name))
  }

  pub fn is_prospective(&self, raw_name: &str) -> bool {
    self.prospective.iter().any(|n| n == raw_name)
  }

  pub fn is_coach(&self, raw_name: &str) -> bool {
    self.coaches.iter().any(|n| n == raw_name)
  }
}

/// What one roster load did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RosterSummary {
  pub records:          usize,
  pub images_refreshed: usize,
}

// ─── Loading ─────────────────────────────────────────────────────────────────

/// Fetch and reconcile one club's roster page.
pub async fn load_roster<S: HubStore>(
  engine: &SyncEngine<S>,
  id_plus: &OrganizationIdPlus,
  source: &RosterSource,
  lists: &MemberNameLists,
) -> Result<RosterSummary> {
  let organization = engine
    .organization(OrganizationKind::Club, id_plus, OrganizationPatch::default())
    .await?
    .record;

  let html = match fetch_text(&source.page_url).await {
    Ok(html) => html,
    Err(e) => {
      tracing::error!(
        organization = %organization.full_name_town(),
        url = %source.page_url,
        "roster fetch failed, aborting this organization's load: {e}"
      );
      return Err(e);
    }
  };

  apply_roster_html(engine, &organization, &html, source, lists).await
}

/// Reconcile an already-fetched roster page. Split out so the whole
/// pipeline below the fetch is testable without a network.
pub async fn apply_roster_html<S: HubStore>(
  engine: &SyncEngine<S>,
  organization: &Organization,
  html: &str,
  source: &RosterSource,
  lists: &MemberNameLists,
) -> Result<RosterSummary> {
  let records = parse_roster(html);
  tracing::info!(
    organization = %organization.full_name_town(),
    records = records.len(),
    "parsed roster page"
  );

  for record in &records {
    reconcile_record(engine, organization, record, source, lists).await?;
  }

  let images_refreshed = refresh_first_images(engine, organization).await?;

  // One final commit for the whole page.
  engine.commit().await;

  Ok(RosterSummary { records: records.len(), images_refreshed })
}

async fn reconcile_record<S: HubStore>(
  engine: &SyncEngine<S>,
  organization: &Organization,
  record: &MemberRecord,
  source: &RosterSource,
  lists: &MemberNameLists,
) -> Result<()> {
  // The roster drops the phone number once a member has died.
  let is_deceased = record.phone_number.is_none();

  let infix = (!record.name.infix_name.is_empty())
    .then(|| record.name.infix_name.clone());

  let photographer = engine
    .photographer(&record.name, PhotographerPatch {
      infix_name:       Patch::from_option(infix),
      roles_and_status: RolesAndStatus::new()
        .with_status(MemberStatus::Deceased, is_deceased),
      born_on:          Patch::from_option(record.born_on),
      phone_number:     Patch::from_option(record.phone_number.clone()),
      e_mail:           Patch::from_option(record.e_mail.clone()),
      website:          Patch::from_option(record.website.clone()),
    })
    .await?
    .record;

  let status = RolesAndStatus::new()
    .with_status(
      MemberStatus::Former,
      !lists.is_current(&record.raw_name, true),
    )
    .with_status(MemberStatus::Coach, lists.is_coach(&record.raw_name))
    .with_status(
      MemberStatus::Prospective,
      lists.is_prospective(&record.raw_name),
    );

  let member_website = derive_profile_url(
    &source.profile_base_url,
    &strip_parenthesized_role(&record.raw_name),
  );

  engine
    .portfolio(organization, &photographer, PortfolioPatch {
      roles_and_status: status,
      member_website: Patch::Set(member_website),
      ..Default::default()
    })
    .await?;

  Ok(())
}

/// Best-effort secondary pass: every portfolio in the organization gets
/// its "first image" data refreshed — a missing image borrows the
/// thumbnail and vice versa. Returns how many portfolios changed.
async fn refresh_first_images<S: HubStore>(
  engine: &SyncEngine<S>,
  organization: &Organization,
) -> Result<usize> {
  let portfolios = engine
    .store()
    .portfolios_of_organization(organization.id)
    .await
    .map_err(Error::store)?;

  let mut refreshed = 0;
  for mut portfolio in portfolios {
    let image = portfolio
      .featured_image
      .clone()
      .or_else(|| portfolio.featured_thumbnail.clone());
    let thumbnail = portfolio
      .featured_thumbnail
      .clone()
      .or_else(|| portfolio.featured_image.clone());

    let changed = portfolio.apply_patch(&PortfolioPatch {
      featured_image: Patch::from_option(image),
      featured_thumbnail: Patch::from_option(thumbnail),
      ..Default::default()
    });

    if changed {
      if let Err(e) = engine.store().update_portfolio(&portfolio).await {
        // Best-effort: a failed refresh is logged, never fatal.
        tracing::warn!(
          organization = %organization.full_name_town(),
          "first-image refresh write failed: {e}"
        );
        continue;
      }
      refreshed += 1;
    }
  }

  Ok(refreshed)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use fotohub_store_sqlite::SqliteStore;

  use super::*;
  use crate::{FailurePolicy, TypeRegistry};

  const PAGE: &str = r#"<table class="members">
<thead>
<tr>
<th>Naam</th><th>Telefoon</th><th>E-mail</th><th>Website</th><th>Geboortedatum</th>
</tr>
</thead>
<tbody>
<tr>
<td class="name">Miek Kerkhoven (voorzitter)</td>
<td class="phone">040-1234567</td>
<td class="email"><a href="mailto:miek@example.nl">miek@example.nl</a></td>
<td class="website"><a href="https://miek.example.nl">site</a></td>
<td class="birthdate">12/03/1961</td>
</tr>
<tr>
<td class="name">Henriëtte van Ekert</td>
<td class="phone"></td>
<td class="email">henriette@example.nl</td>
<td class="website"></td>
<td class="birthdate">1/1/1940</td>
</tr>
</tbody>
</table>"#;

  async fn engine() -> SyncEngine<SqliteStore> {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let registry =
      TypeRegistry::initialize(store.as_ref(), FailurePolicy::Fatal)
        .await
        .unwrap();
    SyncEngine::new(store, registry)
  }

  fn waalre_id() -> OrganizationIdPlus {
    OrganizationIdPlus::new("Fotogroep Waalre", "Waalre", "FG Waalre")
  }

  fn source() -> RosterSource {
    RosterSource {
      page_url:         "https://club.example/leden".to_string(),
      profile_base_url: "https://club.example/leden".to_string(),
    }
  }

  fn lists() -> MemberNameLists {
    MemberNameLists {
      current: vec!["Miek Kerkhoven (voorzitter)".to_string()],
      ..Default::default()
    }
  }

  async fn apply(engine: &SyncEngine<SqliteStore>) -> RosterSummary {
    let organization = engine
      .organization(
        OrganizationKind::Club,
        &waalre_id(),
        OrganizationPatch::default(),
      )
      .await
      .unwrap()
      .record;
    apply_roster_html(engine, &organization, PAGE, &source(), &lists())
      .await
      .unwrap()
  }

  #[tokio::test]
  async fn missing_phone_marks_photographer_deceased() {
    let e = engine().await;
    apply(&e).await;

    let henriette =
      &e.store().photographers_by_name("Henriëtte", "Ekert").await.unwrap()[0];
    assert!(henriette.is_deceased);

    let miek =
      &e.store().photographers_by_name("Miek", "Kerkhoven").await.unwrap()[0];
    assert!(!miek.is_deceased);
    assert_eq!(miek.phone_number.as_deref(), Some("040-1234567"));
  }

  #[tokio::test]
  async fn name_list_absence_marks_former() {
    let e = engine().await;
    apply(&e).await;

    let org = &e
      .store()
      .organizations_by_identity("Fotogroep Waalre", "Waalre")
      .await
      .unwrap()[0];
    let portfolios =
      e.store().portfolios_of_organization(org.id).await.unwrap();
    assert_eq!(portfolios.len(), 2);

    let miek =
      &e.store().photographers_by_name("Miek", "Kerkhoven").await.unwrap()[0];
    for p in &portfolios {
      if p.photographer_id == miek.id {
        assert!(!p.is_former_member, "listed member stays current");
      } else {
        assert!(p.is_former_member, "unlisted member becomes former");
      }
    }
  }

  #[tokio::test]
  async fn member_website_uses_profile_derivation() {
    let e = engine().await;
    apply(&e).await;

    let henriette =
      &e.store().photographers_by_name("Henriëtte", "Ekert").await.unwrap()[0];
    let portfolios =
      e.store().portfolios_of_photographer(henriette.id).await.unwrap();
    assert_eq!(
      portfolios[0].member_website.as_deref(),
      Some("https://club.example/leden/Henriette_van_Ekert/")
    );
  }

  #[tokio::test]
  async fn reapplying_same_page_is_stable() {
    let e = engine().await;
    let first = apply(&e).await;
    assert_eq!(first.records, 2);

    let second = apply(&e).await;
    assert_eq!(second.records, 2);
    assert_eq!(second.images_refreshed, 0);

    let photographers = e.store().list_photographers().await.unwrap();
    assert_eq!(photographers.len(), 2, "no duplicates on repeat runs");
  }
}
