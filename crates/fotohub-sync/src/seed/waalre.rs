//! Hardcoded seed roster for Fotogroep Waalre.

use fotohub_core::{
  entity::{OrganizationIdPlus, OrganizationKind, OrganizationPatch},
  name::PersonName,
  patch::Patch,
  roles::{MemberRole, MemberStatus, RolesAndStatus},
  store::HubStore,
};

use crate::{
  Result,
  engine::{NewMember, SyncEngine},
};

pub fn id_plus() -> OrganizationIdPlus {
  OrganizationIdPlus::new("Fotogroep Waalre", "Waalre", "FG Waalre")
}

pub async fn insert_hardcoded_members<S: HubStore>(
  engine: &SyncEngine<S>,
) -> Result<()> {
  let organization = engine
    .organization(OrganizationKind::Club, &id_plus(), OrganizationPatch {
      has_hardcoded_members: Patch::Set(true),
      ..Default::default()
    })
    .await?
    .record;

  tracing::info!(
    organization = %organization.full_name_town(),
    "inserting hardcoded member data"
  );

  let members = [
    ("Carel", "", "Bullens", RolesAndStatus::new()
      .with_role(MemberRole::ViceChairman, true)),
    ("Erik", "van", "Geest", RolesAndStatus::new()
      .with_role(MemberRole::Admin, true)),
    ("Henriëtte", "van", "Ekert", RolesAndStatus::new()
      .with_role(MemberRole::Admin, true)),
    ("Jos", "", "Jansen", RolesAndStatus::new()
      .with_role(MemberRole::Treasurer, true)),
    ("Kees", "van", "Gemert", RolesAndStatus::new()
      .with_role(MemberRole::Secretary, true)),
    ("Marijke", "", "Gallas", RolesAndStatus::new()
      .with_status(MemberStatus::Honorary, true)),
    ("Miek", "", "Kerkhoven", RolesAndStatus::new()
      .with_role(MemberRole::Chairman, true)),
  ];

  for (given, infix, family, roles_and_status) in members {
    engine
      .add_member(
        &organization,
        &PersonName::new(given, infix, family),
        NewMember { roles_and_status, ..Default::default() },
      )
      .await?;
  }

  engine.commit().await;
  Ok(())
}
