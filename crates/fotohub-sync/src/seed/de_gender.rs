//! Hardcoded seed roster for Fotogroep de Gender.

use chrono::NaiveDate;
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
  OrganizationIdPlus::new("Fotogroep de Gender", "Eindhoven", "FG deGender")
}

pub async fn insert_hardcoded_members<S: HubStore>(
  engine: &SyncEngine<S>,
) -> Result<()> {
  let organization = engine
    .organization(OrganizationKind::Club, &id_plus(), OrganizationPatch {
      website: Patch::Set("https://www.fcdegender.nl".to_string()),
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
    ("Mariet", "", "Wielders", NewMember {
      // Explicit false: the source data withdraws a role it once granted.
      roles_and_status: RolesAndStatus::new()
        .with_role(MemberRole::Chairman, false),
      website: Some("https://www.m3w.nl".to_string()),
      born_on: NaiveDate::from_ymd_opt(1954, 10, 9),
      member_website: Some(
        "https://www.fcdegender.nl/wp-content/uploads/Expositie%202023/\
         Mariet/"
          .to_string(),
      ),
      latest_image: Some(
        "https://www.fcdegender.nl/wp-content/uploads/Expositie%202023/\
         Mariet/slides/Mariet%203.jpg"
          .to_string(),
      ),
      ..Default::default()
    }),
    ("Peter", "van den", "Hamer", NewMember {
      roles_and_status: RolesAndStatus::new()
        .with_status(MemberStatus::Prospective, false),
      member_website: Some(
        "http://www.vdHamer.com/fgWaalre/Empty_Website/".to_string(),
      ),
      latest_image: Some(
        "http://www.vdhamer.com/wp-content/uploads/2024/04/\
         2023_Cornwall_R5_581-Pano.jpg"
          .to_string(),
      ),
      ..Default::default()
    }),
    ("Bettina", "de", "Graaf", NewMember {
      roles_and_status: RolesAndStatus::new()
        .with_status(MemberStatus::Prospective, false),
      member_website: Some(
        "http://www.vdHamer.com/fgWaalre/Empty_Website/".to_string(),
      ),
      latest_image: Some(
        "http://www.vdhamer.com/wp-content/uploads/2023/11/\
         BettinaDeGraaf.jpeg"
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
