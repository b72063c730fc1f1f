//! The organization-type registry.
//!
//! Maps each [`OrganizationKind`] to its persisted type record. Built
//! exactly once at startup — before any loader runs — and passed into
//! the [`crate::SyncEngine`] by value, so a second initialization of a
//! shared map cannot be expressed. A lookup for a kind the registry does
//! not know is a programming error and panics by contract.

use std::collections::BTreeMap;

use fotohub_core::{
  entity::{OrganizationKind, OrganizationType},
  store::HubStore,
};
use strum::IntoEnumIterator as _;
use uuid::Uuid;

use crate::{Error, FailurePolicy, Result};

#[derive(Debug, Clone)]
pub struct TypeRegistry {
  ids: BTreeMap<OrganizationKind, Uuid>,
}

impl TypeRegistry {
  /// Find-or-create the type record for every [`OrganizationKind`] and
  /// capture their ids. Idempotent: an already-seeded store yields the
  /// existing records.
  pub async fn initialize<S: HubStore>(
    store: &S,
    policy: FailurePolicy,
  ) -> Result<Self> {
    let mut ids = BTreeMap::new();

    for kind in OrganizationKind::iter() {
      let matches = store
        .organization_types_by_name(kind.singular())
        .await
        .map_err(Error::store)?;

      if matches.len() > 1 {
        policy.report(&format!(
          "query returned multiple ({}) organization types named {:?}",
          matches.len(),
          kind.singular()
        ));
      }

      let record = match matches.into_iter().next() {
        Some(existing) => existing,
        None => {
          let created = OrganizationType {
            id:   Uuid::new_v4(),
            name: kind.singular().to_string(),
          };
          store
            .insert_organization_type(&created)
            .await
            .map_err(Error::store)?;
          tracing::info!(name = created.name, "created organization type");
          created
        }
      };

      ids.insert(kind, record.id);
    }

    if let Err(e) = store.commit().await {
      policy.report(&format!("commit failed for organization types: {e}"));
    }

    Ok(Self { ids })
  }

  /// The persisted type id for `kind`.
  ///
  /// Panics when the registry has no entry — initialization covers every
  /// kind, so a miss means the registry was constructed some other way.
  pub fn type_id(&self, kind: OrganizationKind) -> Uuid {
    *self
      .ids
      .get(&kind)
      .unwrap_or_else(|| panic!("type registry has no entry for {kind:?}"))
  }
}
