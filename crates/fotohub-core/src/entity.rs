//! The three entity kinds of the club graph, plus their patch types.
//!
//! Entities are plain data; the store owns persistence and the sync engine
//! owns reconciliation. Identity fields are immutable once set — every
//! other attribute is updated through a patch struct whose fields follow
//! the "never erase by omission" rule of [`crate::patch::Patch`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use uuid::Uuid;

use crate::{
  error::Error,
  name::PersonName,
  patch::Patch,
  roles::{MemberRole, MemberStatus, RolesAndStatus},
};

// ─── Photographer ────────────────────────────────────────────────────────────

/// A photographer, identified by the (given_name, family_name) pair.
/// Club-independent: one record regardless of how many clubs the person
/// belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photographer {
  pub id:           Uuid,
  pub given_name:   String,
  /// Display attribute, not part of the identity.
  pub infix_name:   String,
  pub family_name:  String,
  pub is_deceased:  bool,
  pub born_on:      Option<NaiveDate>,
  pub phone_number: Option<String>,
  pub e_mail:       Option<String>,
  pub website:      Option<String>,
}

impl Photographer {
  /// Fresh record with identity assigned and every attribute at its
  /// defaults; callers apply a patch immediately after.
  pub fn new(name: &PersonName) -> Self {
    Self {
      id:           Uuid::new_v4(),
      given_name:   name.given_name.clone(),
      infix_name:   name.infix_name.clone(),
      family_name:  name.family_name.clone(),
      is_deceased:  false,
      born_on:      None,
      phone_number: None,
      e_mail:       None,
      website:      None,
    }
  }

  pub fn person_name(&self) -> PersonName {
    PersonName::new(&self.given_name, &self.infix_name, &self.family_name)
  }

  pub fn full_name(&self) -> String { self.person_name().full_name() }

  /// Apply non-identity updates. Returns whether anything changed.
  pub fn apply_patch(&mut self, patch: &PhotographerPatch) -> bool {
    let mut changed = false;

    if let Some(&deceased) =
      patch.roles_and_status.status.get(&MemberStatus::Deceased)
      && self.is_deceased != deceased
    {
      self.is_deceased = deceased;
      changed = true;
    }

    let changed_infix = patch.infix_name.apply_to(&mut self.infix_name);
    let changed_born = patch.born_on.apply_to_opt(&mut self.born_on);
    let changed_phone = patch.phone_number.apply_to_opt(&mut self.phone_number);
    let changed_mail = patch.e_mail.apply_to_opt(&mut self.e_mail);
    let changed_site = patch.website.apply_to_opt(&mut self.website);

    changed
      || changed_infix
      || changed_born
      || changed_phone
      || changed_mail
      || changed_site
  }
}

/// Non-identity updates for a photographer. The status map's `deceased`
/// key is the only role/status information a photographer carries.
#[derive(Debug, Clone, Default)]
pub struct PhotographerPatch {
  pub infix_name:       Patch<String>,
  pub roles_and_status: RolesAndStatus,
  pub born_on:          Patch<NaiveDate>,
  pub phone_number:     Patch<String>,
  pub e_mail:           Patch<String>,
  pub website:          Patch<String>,
}

// ─── Organization ────────────────────────────────────────────────────────────

/// The kind of organization a record represents. `plural()` doubles as the
/// top-level key in the organization list feed.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum OrganizationKind {
  Club,
  Museum,
  Unknown,
}

impl OrganizationKind {
  pub fn singular(&self) -> &'static str {
    match self {
      Self::Club => "club",
      Self::Museum => "museum",
      Self::Unknown => "unknown",
    }
  }

  pub fn plural(&self) -> &'static str {
    match self {
      Self::Club => "clubs",
      Self::Museum => "museums",
      Self::Unknown => "unknowns",
    }
  }

  pub fn from_singular(s: &str) -> Result<Self, Error> {
    match s {
      "club" => Ok(Self::Club),
      "museum" => Ok(Self::Museum),
      "unknown" => Ok(Self::Unknown),
      other => Err(Error::UnknownOrganizationKind(other.to_string())),
    }
  }
}

/// A persisted organization-type record; the registry maps each
/// [`OrganizationKind`] to exactly one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationType {
  pub id:   Uuid,
  pub name: String,
}

/// The identity-plus-display triple used to address an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationIdPlus {
  pub full_name: String,
  pub town:      String,
  pub nickname:  String,
}

impl OrganizationIdPlus {
  pub fn new(full_name: &str, town: &str, nickname: &str) -> Self {
    Self {
      full_name: full_name.to_string(),
      town:      town.to_string(),
      nickname:  nickname.to_string(),
    }
  }
}

/// Geographic coordinates as supplied by the organization feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
  pub latitude:  f64,
  pub longitude: f64,
}

/// A description in one language, as supplied by the organization feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedDescription {
  pub language: String,
  pub value:    String,
}

/// A photography club or museum, identified by (full_name, town).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
  pub id:                    Uuid,
  pub full_name:             String,
  pub town:                  String,
  pub nickname:              String,
  pub type_id:               Uuid,
  pub coordinates:           Option<Coordinates>,
  pub website:               Option<String>,
  pub wikipedia:             Option<String>,
  /// Dutch photography-federation membership number.
  pub fotobond_number:       Option<i16>,
  /// Dutch chamber-of-commerce registration number.
  pub kvk_number:            Option<i32>,
  pub descriptions:          Vec<LocalizedDescription>,
  /// Set once a hardcoded seed loader has run for this organization.
  pub has_hardcoded_members: bool,
}

impl Organization {
  pub fn new(id_plus: &OrganizationIdPlus, type_id: Uuid) -> Self {
    Self {
      id: Uuid::new_v4(),
      full_name: id_plus.full_name.clone(),
      town: id_plus.town.clone(),
      nickname: id_plus.nickname.clone(),
      type_id,
      coordinates: None,
      website: None,
      wikipedia: None,
      fotobond_number: None,
      kvk_number: None,
      descriptions: Vec::new(),
      has_hardcoded_members: false,
    }
  }

  /// "Fotogroep Waalre (Waalre)" — the display form used in log lines.
  pub fn full_name_town(&self) -> String {
    format!("{} ({})", self.full_name, self.town)
  }

  pub fn apply_patch(&mut self, patch: &OrganizationPatch) -> bool {
    let changed_nick = patch.nickname.apply_to(&mut self.nickname);
    let changed_type = patch.type_id.apply_to(&mut self.type_id);
    let changed_coord = patch.coordinates.apply_to_opt(&mut self.coordinates);
    let changed_site = patch.website.apply_to_opt(&mut self.website);
    let changed_wiki = patch.wikipedia.apply_to_opt(&mut self.wikipedia);
    let changed_bond =
      patch.fotobond_number.apply_to_opt(&mut self.fotobond_number);
    let changed_kvk = patch.kvk_number.apply_to_opt(&mut self.kvk_number);
    let changed_desc = patch.descriptions.apply_to(&mut self.descriptions);
    let changed_seeded =
      patch.has_hardcoded_members.apply_to(&mut self.has_hardcoded_members);

    changed_nick
      || changed_type
      || changed_coord
      || changed_site
      || changed_wiki
      || changed_bond
      || changed_kvk
      || changed_desc
      || changed_seeded
  }
}

/// Non-identity updates for an organization.
#[derive(Debug, Clone, Default)]
pub struct OrganizationPatch {
  pub nickname:              Patch<String>,
  pub type_id:               Patch<Uuid>,
  pub coordinates:           Patch<Coordinates>,
  pub website:               Patch<String>,
  pub wikipedia:             Patch<String>,
  pub fotobond_number:       Patch<i16>,
  pub kvk_number:            Patch<i32>,
  pub descriptions:          Patch<Vec<LocalizedDescription>>,
  pub has_hardcoded_members: Patch<bool>,
}

// ─── MemberPortfolio ─────────────────────────────────────────────────────────

/// The membership join entity: one photographer's portfolio within one
/// organization. Identified by the (organization, photographer) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberPortfolio {
  pub id:                    Uuid,
  pub organization_id:       Uuid,
  pub photographer_id:       Uuid,

  // Denormalized cache of the role map.
  pub is_chairman:           bool,
  pub is_vice_chairman:      bool,
  pub is_treasurer:          bool,
  pub is_secretary:          bool,
  pub is_admin:              bool,

  // Denormalized cache of the status map (deceased lives on the
  // photographer).
  pub is_former_member:      bool,
  pub is_honorary_member:    bool,
  pub is_prospective_member: bool,
  pub is_mentor:             bool,

  pub membership_start:      Option<NaiveDate>,
  pub membership_end:        Option<NaiveDate>,
  /// The member's page on the club site.
  pub member_website:        Option<String>,
  pub featured_image:        Option<String>,
  pub featured_thumbnail:    Option<String>,
}

impl MemberPortfolio {
  pub fn new(organization_id: Uuid, photographer_id: Uuid) -> Self {
    Self {
      id: Uuid::new_v4(),
      organization_id,
      photographer_id,
      is_chairman: false,
      is_vice_chairman: false,
      is_treasurer: false,
      is_secretary: false,
      is_admin: false,
      is_former_member: false,
      is_honorary_member: false,
      is_prospective_member: false,
      is_mentor: false,
      membership_start: None,
      membership_end: None,
      member_website: None,
      featured_image: None,
      featured_thumbnail: None,
    }
  }

  /// The complete role/status snapshot, with `current` derived: a member
  /// is current when none of former/honorary/prospective/coach apply.
  pub fn roles_and_status(
    &self,
    photographer: &Photographer,
  ) -> RolesAndStatus {
    let mut rs = RolesAndStatus::new();

    if photographer.is_deceased {
      rs.status.insert(MemberStatus::Deceased, true);
    }
    if self.is_former_member {
      rs.status.insert(MemberStatus::Former, true);
    }
    if self.is_honorary_member {
      rs.status.insert(MemberStatus::Honorary, true);
    }
    if self.is_prospective_member {
      rs.status.insert(MemberStatus::Prospective, true);
    }
    if self.is_mentor {
      rs.status.insert(MemberStatus::Coach, true);
    }
    if !self.is_former_member
      && !self.is_honorary_member
      && !self.is_prospective_member
      && !self.is_mentor
    {
      rs.status.insert(MemberStatus::Current, true);
    }

    if self.is_chairman {
      rs.role.insert(MemberRole::Chairman, true);
    }
    if self.is_vice_chairman {
      rs.role.insert(MemberRole::ViceChairman, true);
    }
    if self.is_treasurer {
      rs.role.insert(MemberRole::Treasurer, true);
    }
    if self.is_secretary {
      rs.role.insert(MemberRole::Secretary, true);
    }
    if self.is_admin {
      rs.role.insert(MemberRole::Admin, true);
    }

    rs
  }

  /// Merge a partial role/status map into the boolean cache. Only keys
  /// present in the incoming maps are applied. The `deceased` and
  /// `current` keys are ignored here: deceased belongs to the
  /// photographer, current is always derived.
  pub fn merge_roles_and_status(&mut self, incoming: &RolesAndStatus) -> bool {
    let mut changed = false;

    let mut set = |field: &mut bool, value: Option<&bool>| {
      if let Some(&new) = value
        && *field != new
      {
        *field = new;
        changed = true;
      }
    };

    set(
      &mut self.is_former_member,
      incoming.status.get(&MemberStatus::Former),
    );
    set(
      &mut self.is_honorary_member,
      incoming.status.get(&MemberStatus::Honorary),
    );
    set(
      &mut self.is_prospective_member,
      incoming.status.get(&MemberStatus::Prospective),
    );
    set(&mut self.is_mentor, incoming.status.get(&MemberStatus::Coach));

    set(&mut self.is_chairman, incoming.role.get(&MemberRole::Chairman));
    set(
      &mut self.is_vice_chairman,
      incoming.role.get(&MemberRole::ViceChairman),
    );
    set(&mut self.is_treasurer, incoming.role.get(&MemberRole::Treasurer));
    set(&mut self.is_secretary, incoming.role.get(&MemberRole::Secretary));
    set(&mut self.is_admin, incoming.role.get(&MemberRole::Admin));

    changed
  }

  pub fn apply_patch(&mut self, patch: &PortfolioPatch) -> bool {
    let changed_roles = self.merge_roles_and_status(&patch.roles_and_status);
    let changed_start =
      patch.membership_start.apply_to_opt(&mut self.membership_start);
    let changed_end =
      patch.membership_end.apply_to_opt(&mut self.membership_end);
    let changed_site =
      patch.member_website.apply_to_opt(&mut self.member_website);
    let changed_image =
      patch.featured_image.apply_to_opt(&mut self.featured_image);
    let changed_thumb =
      patch.featured_thumbnail.apply_to_opt(&mut self.featured_thumbnail);

    changed_roles
      || changed_start
      || changed_end
      || changed_site
      || changed_image
      || changed_thumb
  }

  /// "Chairman and secretary and current" — see
  /// [`RolesAndStatus::describe`].
  pub fn role_description(&self, photographer: &Photographer) -> String {
    self.roles_and_status(photographer).describe()
  }

  /// "<phrase> of <full name> (<town>)".
  pub fn role_description_of_club_town(
    &self,
    photographer: &Photographer,
    organization: &Organization,
  ) -> String {
    format!(
      "{} of {}",
      self.role_description(photographer),
      organization.full_name_town()
    )
  }
}

/// Non-identity updates for a portfolio.
#[derive(Debug, Clone, Default)]
pub struct PortfolioPatch {
  pub roles_and_status:   RolesAndStatus,
  pub membership_start:   Patch<NaiveDate>,
  pub membership_end:     Patch<NaiveDate>,
  pub member_website:     Patch<String>,
  pub featured_image:     Patch<String>,
  pub featured_thumbnail: Patch<String>,
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn photographer(name: &str) -> Photographer {
    Photographer::new(&PersonName::parse(name))
  }

  #[test]
  fn photographer_patch_never_erases() {
    let mut p = photographer("Jos Jansen");
    let filled = PhotographerPatch {
      e_mail: Patch::Set("jos@example.nl".to_string()),
      ..Default::default()
    };
    assert!(p.apply_patch(&filled));

    // A later patch without e_mail leaves the stored address alone.
    let empty = PhotographerPatch::default();
    assert!(!p.apply_patch(&empty));
    assert_eq!(p.e_mail.as_deref(), Some("jos@example.nl"));
  }

  #[test]
  fn photographer_deceased_via_status_map() {
    let mut p = photographer("Jos Jansen");
    let patch = PhotographerPatch {
      roles_and_status: RolesAndStatus::new()
        .with_status(MemberStatus::Deceased, true),
      ..Default::default()
    };
    assert!(p.apply_patch(&patch));
    assert!(p.is_deceased);
    // Applying the same status again is a no-op.
    assert!(!p.apply_patch(&patch));
  }

  #[test]
  fn portfolio_merge_applies_only_present_keys() {
    let mut m = MemberPortfolio::new(Uuid::new_v4(), Uuid::new_v4());
    m.is_treasurer = true;

    let incoming =
      RolesAndStatus::new().with_role(MemberRole::Chairman, true);
    assert!(m.merge_roles_and_status(&incoming));
    assert!(m.is_chairman);
    assert!(m.is_treasurer, "absent key must not clear the flag");
  }

  #[test]
  fn portfolio_merge_false_clears_flag() {
    let mut m = MemberPortfolio::new(Uuid::new_v4(), Uuid::new_v4());
    m.is_mentor = true;

    let incoming =
      RolesAndStatus::new().with_status(MemberStatus::Coach, false);
    assert!(m.merge_roles_and_status(&incoming));
    assert!(!m.is_mentor);
  }

  #[test]
  fn portfolio_snapshot_derives_current() {
    let p = photographer("Miek Kerkhoven");
    let m = MemberPortfolio::new(Uuid::new_v4(), p.id);
    let rs = m.roles_and_status(&p);
    assert_eq!(rs.status.get(&MemberStatus::Current), Some(&true));
  }

  #[test]
  fn portfolio_snapshot_mentor_not_current() {
    let p = photographer("Miek Kerkhoven");
    let mut m = MemberPortfolio::new(Uuid::new_v4(), p.id);
    m.is_mentor = true;
    let rs = m.roles_and_status(&p);
    assert!(!rs.status.contains_key(&MemberStatus::Current));
    assert_eq!(rs.status.get(&MemberStatus::Coach), Some(&true));
  }

  #[test]
  fn role_description_of_club_town_format() {
    let p = photographer("Miek Kerkhoven");
    let id_plus = OrganizationIdPlus::new("Fotogroep Waalre", "Waalre", "FG Waalre");
    let org = Organization::new(&id_plus, Uuid::new_v4());
    let mut m = MemberPortfolio::new(org.id, p.id);
    m.is_chairman = true;
    assert_eq!(
      m.role_description_of_club_town(&p, &org),
      "Chairman and current of Fotogroep Waalre (Waalre)"
    );
  }

  #[test]
  fn organization_patch_reports_changes_once() {
    let id_plus = OrganizationIdPlus::new("Fotografiska", "New York", "Fotografiska NYC");
    let mut org = Organization::new(&id_plus, Uuid::new_v4());

    let patch = OrganizationPatch {
      website: Patch::Set("https://www.fotografiska.com/nyc/".to_string()),
      coordinates: Patch::Set(Coordinates {
        latitude:  40.739278,
        longitude: -73.986722,
      }),
      ..Default::default()
    };
    assert!(org.apply_patch(&patch));
    assert!(!org.apply_patch(&patch), "idempotent second application");
  }
}
