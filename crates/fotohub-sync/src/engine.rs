//! [`SyncEngine`] — find-create-update for the three entity kinds.
//!
//! One operation per kind. Each follows the same contract:
//!
//! 1. query the store for the exact identity;
//! 2. more than one match is an integrity warning — the first match in
//!    store default order wins (the schema's UNIQUE constraints should
//!    make this unreachable);
//! 3. no match: construct with identity assigned, apply the patch,
//!    insert;
//! 4. one match: apply the patch, write back only when a field changed.
//!
//! Store write failures are logged and swallowed under
//! [`FailurePolicy::Warn`]: the in-memory record is already correct,
//! only durability is at risk, and that must never take the app down in
//! the field.

use std::sync::Arc;

use chrono::NaiveDate;
use fotohub_core::{
  entity::{
    MemberPortfolio, Organization, OrganizationIdPlus, OrganizationKind,
    OrganizationPatch, Photographer, PhotographerPatch, PortfolioPatch,
  },
  name::PersonName,
  patch::Patch,
  roles::RolesAndStatus,
  store::HubStore,
};

use crate::{Error, FailurePolicy, Result, registry::TypeRegistry};

// ─── Results ─────────────────────────────────────────────────────────────────

/// What a find-create-update call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FcuOutcome {
  Created,
  Updated,
  Unchanged,
}

/// A reconciled record plus what happened to it.
#[derive(Debug, Clone)]
pub struct Reconciled<T> {
  pub record:  T,
  pub outcome: FcuOutcome,
}

// ─── Engine ──────────────────────────────────────────────────────────────────

pub struct SyncEngine<S> {
  store:         Arc<S>,
  registry:      TypeRegistry,
  policy:        FailurePolicy,
  /// Commit after every changed write, not just at batch boundaries.
  eager_commits: bool,
}

impl<S: HubStore> SyncEngine<S> {
  pub fn new(store: Arc<S>, registry: TypeRegistry) -> Self {
    Self {
      store,
      registry,
      policy: FailurePolicy::default_for_build(),
      eager_commits: false,
    }
  }

  pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
    self.policy = policy;
    self
  }

  pub fn with_eager_commits(mut self, eager: bool) -> Self {
    self.eager_commits = eager;
    self
  }

  pub fn store(&self) -> &Arc<S> { &self.store }

  pub fn registry(&self) -> &TypeRegistry { &self.registry }

  // ── Photographer ──────────────────────────────────────────────────────

  /// Find-create-update a photographer by the (given, family) name pair.
  pub async fn photographer(
    &self,
    name: &PersonName,
    patch: PhotographerPatch,
  ) -> Result<Reconciled<Photographer>> {
    let matches = self
      .store
      .photographers_by_name(&name.given_name, &name.family_name)
      .await
      .map_err(Error::store)?;

    if matches.len() > 1 {
      self.policy.report(&format!(
        "query returned {} photographers named {}",
        matches.len(),
        name.full_name()
      ));
    }

    match matches.into_iter().next() {
      Some(mut existing) => {
        if existing.apply_patch(&patch) {
          if let Err(e) = self.store.update_photographer(&existing).await {
            self.policy.report(&format!(
              "update failed for photographer <{}>: {e}",
              existing.full_name()
            ));
          }
          tracing::info!(
            photographer = %existing.full_name(),
            "updated info for photographer"
          );
          self.commit_if_eager().await;
          Ok(Reconciled { record: existing, outcome: FcuOutcome::Updated })
        } else {
          tracing::debug!(
            photographer = %existing.full_name(),
            "no changes for photographer"
          );
          Ok(Reconciled { record: existing, outcome: FcuOutcome::Unchanged })
        }
      }
      None => {
        let mut created = Photographer::new(name);
        created.apply_patch(&patch);
        if let Err(e) = self.store.insert_photographer(&created).await {
          self.policy.report(&format!(
            "insert failed for photographer <{}>: {e}",
            created.full_name()
          ));
        }
        tracing::info!(
          photographer = %created.full_name(),
          "created new photographer"
        );
        self.commit_if_eager().await;
        Ok(Reconciled { record: created, outcome: FcuOutcome::Created })
      }
    }
  }

  // ── Organization ──────────────────────────────────────────────────────

  /// Find-create-update an organization by the (full_name, town) pair.
  /// The type id from the registry and the nickname from `id_plus` ride
  /// along on the patch.
  pub async fn organization(
    &self,
    kind: OrganizationKind,
    id_plus: &OrganizationIdPlus,
    mut patch: OrganizationPatch,
  ) -> Result<Reconciled<Organization>> {
    patch.type_id = Patch::Set(self.registry.type_id(kind));
    if !id_plus.nickname.is_empty() {
      patch.nickname = Patch::Set(id_plus.nickname.clone());
    }

    let matches = self
      .store
      .organizations_by_identity(&id_plus.full_name, &id_plus.town)
      .await
      .map_err(Error::store)?;

    if matches.len() > 1 {
      self.policy.report(&format!(
        "query returned {} organizations named {} ({})",
        matches.len(),
        id_plus.full_name,
        id_plus.town
      ));
    }

    match matches.into_iter().next() {
      Some(mut existing) => {
        if existing.apply_patch(&patch) {
          if let Err(e) = self.store.update_organization(&existing).await {
            self.policy.report(&format!(
              "update failed for organization {}: {e}",
              existing.full_name_town()
            ));
          }
          tracing::info!(
            organization = %existing.full_name_town(),
            "updated info for organization"
          );
          self.commit_if_eager().await;
          Ok(Reconciled { record: existing, outcome: FcuOutcome::Updated })
        } else {
          tracing::debug!(
            organization = %existing.full_name_town(),
            "no changes for organization"
          );
          Ok(Reconciled { record: existing, outcome: FcuOutcome::Unchanged })
        }
      }
      None => {
        let mut created =
          Organization::new(id_plus, self.registry.type_id(kind));
        created.apply_patch(&patch);
        if let Err(e) = self.store.insert_organization(&created).await {
          self.policy.report(&format!(
            "insert failed for organization {}: {e}",
            created.full_name_town()
          ));
        }
        tracing::info!(
          organization = %created.full_name_town(),
          "created new organization"
        );
        self.commit_if_eager().await;
        Ok(Reconciled { record: created, outcome: FcuOutcome::Created })
      }
    }
  }

  // ── Member portfolio ──────────────────────────────────────────────────

  /// Find-create-update the membership linking `photographer` to
  /// `organization`.
  pub async fn portfolio(
    &self,
    organization: &Organization,
    photographer: &Photographer,
    patch: PortfolioPatch,
  ) -> Result<Reconciled<MemberPortfolio>> {
    let matches = self
      .store
      .portfolios_by_pair(organization.id, photographer.id)
      .await
      .map_err(Error::store)?;

    if matches.len() > 1 {
      self.policy.report(&format!(
        "query returned multiple ({}) portfolios for {} in {}",
        matches.len(),
        photographer.full_name(),
        organization.full_name_town()
      ));
    }

    match matches.into_iter().next() {
      Some(mut existing) => {
        if existing.apply_patch(&patch) {
          if let Err(e) = self.store.update_portfolio(&existing).await {
            self.policy.report(&format!(
              "update failed for member {} in {}: {e}",
              photographer.full_name(),
              organization.full_name_town()
            ));
          }
          tracing::info!(
            organization = %organization.full_name,
            member = %photographer.full_name(),
            "updated info for member"
          );
          self.commit_if_eager().await;
          Ok(Reconciled { record: existing, outcome: FcuOutcome::Updated })
        } else {
          Ok(Reconciled { record: existing, outcome: FcuOutcome::Unchanged })
        }
      }
      None => {
        let mut created =
          MemberPortfolio::new(organization.id, photographer.id);
        created.apply_patch(&patch);
        if let Err(e) = self.store.insert_portfolio(&created).await {
          self.policy.report(&format!(
            "insert failed for membership of {} in {}: {e}",
            photographer.full_name(),
            organization.full_name_town()
          ));
        }
        tracing::info!(
          organization = %organization.full_name_town(),
          member = %photographer.full_name(),
          "created new membership"
        );
        self.commit_if_eager().await;
        Ok(Reconciled { record: created, outcome: FcuOutcome::Created })
      }
    }
  }

  // ── Composition ───────────────────────────────────────────────────────

  /// Photographer FCU followed by portfolio FCU — the shared helper every
  /// seed loader routes through. When only one of image/thumbnail is
  /// known, the other borrows it.
  pub async fn add_member(
    &self,
    organization: &Organization,
    name: &PersonName,
    member: NewMember,
  ) -> Result<Reconciled<MemberPortfolio>> {
    let infix = (!name.infix_name.is_empty())
      .then(|| name.infix_name.clone());

    let photographer = self
      .photographer(name, PhotographerPatch {
        infix_name:       Patch::from_option(infix),
        roles_and_status: member.roles_and_status.clone(),
        born_on:          Patch::from_option(member.born_on),
        phone_number:     Patch::from_option(member.phone_number),
        e_mail:           Patch::from_option(member.e_mail),
        website:          Patch::from_option(member.website),
      })
      .await?
      .record;

    let image = member
      .latest_image
      .clone()
      .or_else(|| member.latest_thumbnail.clone());
    let thumbnail = member.latest_thumbnail.or(member.latest_image);

    self
      .portfolio(organization, &photographer, PortfolioPatch {
        roles_and_status:   member.roles_and_status,
        member_website:     Patch::from_option(member.member_website),
        featured_image:     Patch::from_option(image),
        featured_thumbnail: Patch::from_option(thumbnail),
        ..Default::default()
      })
      .await
  }

  // ── Durability ────────────────────────────────────────────────────────

  /// Batch-boundary commit. Failure is reported per policy, never
  /// returned: the in-memory state is already applied.
  pub async fn commit(&self) {
    if let Err(e) = self.store.commit().await {
      self.policy.report(&format!("commit failed: {e}"));
    }
  }

  async fn commit_if_eager(&self) {
    if self.eager_commits {
      self.commit().await;
    }
  }
}

// ─── NewMember ───────────────────────────────────────────────────────────────

/// Everything a loader knows about one member, bundled for
/// [`SyncEngine::add_member`]. Absent fields stay absent — they never
/// erase stored values.
#[derive(Debug, Clone, Default)]
pub struct NewMember {
  pub roles_and_status: RolesAndStatus,
  /// The photographer's own site (club-independent).
  pub website:          Option<String>,
  pub born_on:          Option<NaiveDate>,
  pub phone_number:     Option<String>,
  pub e_mail:           Option<String>,
  /// The member's page on the club site.
  pub member_website:   Option<String>,
  pub latest_image:     Option<String>,
  pub latest_thumbnail: Option<String>,
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use fotohub_core::roles::{MemberRole, MemberStatus};
  use fotohub_store_sqlite::SqliteStore;

  use super::*;

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

  #[tokio::test]
  async fn photographer_fcu_is_idempotent() {
    let e = engine().await;
    let name = PersonName::new("Jos", "", "Jansen");
    let patch = || PhotographerPatch {
      e_mail: Patch::Set("jos@example.nl".to_string()),
      ..Default::default()
    };

    let first = e.photographer(&name, patch()).await.unwrap();
    assert_eq!(first.outcome, FcuOutcome::Created);

    let second = e.photographer(&name, patch()).await.unwrap();
    assert_eq!(second.outcome, FcuOutcome::Unchanged);
    assert_eq!(second.record.id, first.record.id);

    let stored =
      e.store().photographers_by_name("Jos", "Jansen").await.unwrap();
    assert_eq!(stored.len(), 1, "exactly one entity per identity tuple");
  }

  #[tokio::test]
  async fn photographer_absent_field_is_not_erased() {
    let e = engine().await;
    let name = PersonName::new("Jos", "", "Jansen");

    e.photographer(&name, PhotographerPatch {
      e_mail: Patch::Set("jos@example.nl".to_string()),
      ..Default::default()
    })
    .await
    .unwrap();

    // Second source knows only the phone number.
    let r = e
      .photographer(&name, PhotographerPatch {
        phone_number: Patch::Set("040-1234567".to_string()),
        ..Default::default()
      })
      .await
      .unwrap();
    assert_eq!(r.outcome, FcuOutcome::Updated);
    assert_eq!(r.record.e_mail.as_deref(), Some("jos@example.nl"));
    assert_eq!(r.record.phone_number.as_deref(), Some("040-1234567"));
  }

  #[tokio::test]
  async fn organization_fcu_assigns_type_and_nickname() {
    let e = engine().await;

    let r = e
      .organization(
        OrganizationKind::Club,
        &waalre_id(),
        OrganizationPatch::default(),
      )
      .await
      .unwrap();
    assert_eq!(r.outcome, FcuOutcome::Created);
    assert_eq!(
      r.record.type_id,
      e.registry().type_id(OrganizationKind::Club)
    );
    assert_eq!(r.record.nickname, "FG Waalre");

    // Same identity again: found, nothing to update.
    let again = e
      .organization(
        OrganizationKind::Club,
        &waalre_id(),
        OrganizationPatch::default(),
      )
      .await
      .unwrap();
    assert_eq!(again.outcome, FcuOutcome::Unchanged);
    assert_eq!(again.record.id, r.record.id);
  }

  #[tokio::test]
  async fn portfolio_pair_stays_exclusive() {
    let e = engine().await;
    let org = e
      .organization(
        OrganizationKind::Club,
        &waalre_id(),
        OrganizationPatch::default(),
      )
      .await
      .unwrap()
      .record;
    let p = e
      .photographer(
        &PersonName::new("Miek", "", "Kerkhoven"),
        PhotographerPatch::default(),
      )
      .await
      .unwrap()
      .record;

    let first = e
      .portfolio(&org, &p, PortfolioPatch {
        roles_and_status: RolesAndStatus::new()
          .with_role(MemberRole::Chairman, true),
        ..Default::default()
      })
      .await
      .unwrap();
    assert_eq!(first.outcome, FcuOutcome::Created);

    let second = e.portfolio(&org, &p, PortfolioPatch::default()).await.unwrap();
    assert_eq!(second.outcome, FcuOutcome::Unchanged);
    assert!(second.record.is_chairman, "role survives an empty patch");

    let stored = e.store().portfolios_by_pair(org.id, p.id).await.unwrap();
    assert_eq!(stored.len(), 1);
  }

  #[tokio::test]
  async fn add_member_borrows_missing_thumbnail() {
    let e = engine().await;
    let org = e
      .organization(
        OrganizationKind::Club,
        &waalre_id(),
        OrganizationPatch::default(),
      )
      .await
      .unwrap()
      .record;

    let r = e
      .add_member(&org, &PersonName::new("Rico", "", "Coolen"), NewMember {
        latest_image: Some("https://club.example/rico.jpg".to_string()),
        ..Default::default()
      })
      .await
      .unwrap();

    assert_eq!(
      r.record.featured_thumbnail.as_deref(),
      Some("https://club.example/rico.jpg")
    );
  }

  #[tokio::test]
  async fn add_member_applies_deceased_to_photographer() {
    let e = engine().await;
    let org = e
      .organization(
        OrganizationKind::Club,
        &waalre_id(),
        OrganizationPatch::default(),
      )
      .await
      .unwrap()
      .record;

    e.add_member(&org, &PersonName::new("Kees", "van", "Gemert"), NewMember {
      roles_and_status: RolesAndStatus::new()
        .with_status(MemberStatus::Deceased, true),
      ..Default::default()
    })
    .await
    .unwrap();

    let p = e.store().photographers_by_name("Kees", "Gemert").await.unwrap();
    assert!(p[0].is_deceased);
    assert_eq!(p[0].infix_name, "van");
  }
}
