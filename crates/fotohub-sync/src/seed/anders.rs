//! Hardcoded seed roster for Fotogroep Anders.

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
  OrganizationIdPlus::new("Fotogroep Anders", "Eindhoven", "FG Anders")
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
    ("Helga", "", "Nuchelmans", NewMember {
      roles_and_status: RolesAndStatus::new()
        .with_role(MemberRole::Admin, true),
      member_website: Some("https://helganuchelmans.nl".to_string()),
      latest_image: Some(
        "https://cdn.myportfolio.com/d8801b208f49ae95bc80b15c07cde6f2/\
         902cb616-6aaf-4f1f-9d40-3487d0e1254a_rw_1200.jpg"
          .to_string(),
      ),
      ..Default::default()
    }),
    ("Mirjam", "", "Evers", NewMember {
      roles_and_status: RolesAndStatus::new()
        .with_role(MemberRole::Admin, true),
      member_website: Some(
        "https://me4photo.jimdosite.com/portfolio/".to_string(),
      ),
      latest_image: Some(
        "https://jimdo-storage.freetls.fastly.net/image/\
         bf4d707f-ff72-4e16-8f2f-63680e7a8f91.jpg"
          .to_string(),
      ),
      ..Default::default()
    }),
    ("Lotte", "", "Vrij", NewMember {
      roles_and_status: RolesAndStatus::new()
        .with_role(MemberRole::Admin, true),
      member_website: Some(
        "http://www.vdHamer.com/fgWaalre/Empty_Website/".to_string(),
      ),
      latest_image: Some(
        "https://image.jimcdn.com/app/cms/image/transf/none/path/\
         sb2e92183adfb60fb/image/ie69f110f416b6822/version/1678882175/\
         image.jpg"
          .to_string(),
      ),
      latest_thumbnail: Some(
        "https://image.jimcdn.com/app/cms/image/transf/\
         dimension=150x150:mode=crop:format=jpg/path/sb2e92183adfb60fb/\
         image/ie69f110f416b6822/version/1678882175/image.jpg"
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
