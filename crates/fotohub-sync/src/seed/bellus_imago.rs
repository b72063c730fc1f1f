//! Hardcoded seed roster for Fotoclub Bellus Imago.

use fotohub_core::{
  entity::{OrganizationIdPlus, OrganizationKind, OrganizationPatch},
  name::PersonName,
  patch::Patch,
  roles::{MemberRole, RolesAndStatus},
  store::HubStore,
};

use crate::{
  Result,
  engine::{NewMember, SyncEngine},
};

pub fn id_plus() -> OrganizationIdPlus {
  OrganizationIdPlus::new("Fotoclub Bellus Imago", "Veldhoven", "FC BellusImago")
}

pub async fn insert_hardcoded_members<S: HubStore>(
  engine: &SyncEngine<S>,
) -> Result<()> {
  let organization = engine
    .organization(OrganizationKind::Club, &id_plus(), OrganizationPatch {
      website: Patch::Set("https://www.fotoclubbellusimago.nl".to_string()),
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
    ("Rico", "", "Coolen", NewMember {
      website: Some("https://www.ricoco.nl".to_string()),
      e_mail: Some("info@ricoco.nl".to_string()),
      member_website: Some(
        "https://www.fotoclubbellusimago.nl/rico.html".to_string(),
      ),
      latest_image: Some(
        "https://www.fotoclubbellusimago.nl/uploads/5/5/1/2/55129719/\
         vrijwerk-rico-3_orig.jpg"
          .to_string(),
      ),
      ..Default::default()
    }),
    ("Loek", "", "Dirkx", NewMember {
      roles_and_status: RolesAndStatus::new()
        .with_role(MemberRole::Chairman, true),
      member_website: Some(
        "https://www.fotoclubbellusimago.nl/loek.html".to_string(),
      ),
      latest_image: Some(
        "https://www.fotoclubbellusimago.nl/uploads/5/5/1/2/55129719/\
         vrijwerk-loek-1_2_orig.jpg"
          .to_string(),
      ),
      ..Default::default()
    }),
  ];

  for (given, infix, family, member) in members {
    engine
      .add_member(&organization, &PersonName::new(given, infix, family), member)
      .await?;
  }

  engine.commit().await;
  Ok(())
}
