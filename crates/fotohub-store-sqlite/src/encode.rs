//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Dates are stored as ISO 8601 strings, description lists as compact
//! JSON, UUIDs as hyphenated lowercase strings, booleans as 0/1.

use chrono::NaiveDate;
use fotohub_core::entity::{
  Coordinates, LocalizedDescription, MemberPortfolio, Organization,
  OrganizationType, Photographer,
};
use uuid::Uuid;

use crate::Result;

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| crate::Error::DateParse(e.to_string()))
}

pub fn encode_descriptions(d: &[LocalizedDescription]) -> Result<String> {
  Ok(serde_json::to_string(d)?)
}

pub fn decode_descriptions(s: &str) -> Result<Vec<LocalizedDescription>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read from an `organization_types` row.
pub struct RawOrganizationType {
  pub type_id: String,
  pub name:    String,
}

impl RawOrganizationType {
  pub fn into_record(self) -> Result<OrganizationType> {
    Ok(OrganizationType {
      id:   decode_uuid(&self.type_id)?,
      name: self.name,
    })
  }
}

/// Raw values read from an `organizations` row.
pub struct RawOrganization {
  pub organization_id:       String,
  pub full_name:             String,
  pub town:                  String,
  pub nickname:              String,
  pub type_id:               String,
  pub latitude:              Option<f64>,
  pub longitude:             Option<f64>,
  pub website:               Option<String>,
  pub wikipedia:             Option<String>,
  pub fotobond_number:       Option<i16>,
  pub kvk_number:            Option<i32>,
  pub descriptions:          String,
  pub has_hardcoded_members: bool,
}

impl RawOrganization {
  pub fn into_record(self) -> Result<Organization> {
    let coordinates = match (self.latitude, self.longitude) {
      (Some(latitude), Some(longitude)) => {
        Some(Coordinates { latitude, longitude })
      }
      _ => None,
    };
    Ok(Organization {
      id: decode_uuid(&self.organization_id)?,
      full_name: self.full_name,
      town: self.town,
      nickname: self.nickname,
      type_id: decode_uuid(&self.type_id)?,
      coordinates,
      website: self.website,
      wikipedia: self.wikipedia,
      fotobond_number: self.fotobond_number,
      kvk_number: self.kvk_number,
      descriptions: decode_descriptions(&self.descriptions)?,
      has_hardcoded_members: self.has_hardcoded_members,
    })
  }
}

/// Raw values read from a `photographers` row.
pub struct RawPhotographer {
  pub photographer_id: String,
  pub given_name:      String,
  pub infix_name:      String,
  pub family_name:     String,
  pub is_deceased:     bool,
  pub born_on:         Option<String>,
  pub phone_number:    Option<String>,
  pub e_mail:          Option<String>,
  pub website:         Option<String>,
}

impl RawPhotographer {
  pub fn into_record(self) -> Result<Photographer> {
    Ok(Photographer {
      id: decode_uuid(&self.photographer_id)?,
      given_name: self.given_name,
      infix_name: self.infix_name,
      family_name: self.family_name,
      is_deceased: self.is_deceased,
      born_on: self.born_on.as_deref().map(decode_date).transpose()?,
      phone_number: self.phone_number,
      e_mail: self.e_mail,
      website: self.website,
    })
  }
}

/// Raw values read from a `member_portfolios` row.
pub struct RawPortfolio {
  pub portfolio_id:          String,
  pub organization_id:       String,
  pub photographer_id:       String,
  pub is_chairman:           bool,
  pub is_vice_chairman:      bool,
  pub is_treasurer:          bool,
  pub is_secretary:          bool,
  pub is_admin:              bool,
  pub is_former_member:      bool,
  pub is_honorary_member:    bool,
  pub is_prospective_member: bool,
  pub is_mentor:             bool,
  pub membership_start:      Option<String>,
  pub membership_end:        Option<String>,
  pub member_website:        Option<String>,
  pub featured_image:        Option<String>,
  pub featured_thumbnail:    Option<String>,
}

impl RawPortfolio {
  pub fn into_record(self) -> Result<MemberPortfolio> {
    Ok(MemberPortfolio {
      id: decode_uuid(&self.portfolio_id)?,
      organization_id: decode_uuid(&self.organization_id)?,
      photographer_id: decode_uuid(&self.photographer_id)?,
      is_chairman: self.is_chairman,
      is_vice_chairman: self.is_vice_chairman,
      is_treasurer: self.is_treasurer,
      is_secretary: self.is_secretary,
      is_admin: self.is_admin,
      is_former_member: self.is_former_member,
      is_honorary_member: self.is_honorary_member,
      is_prospective_member: self.is_prospective_member,
      is_mentor: self.is_mentor,
      membership_start: self
        .membership_start
        .as_deref()
        .map(decode_date)
        .transpose()?,
      membership_end: self
        .membership_end
        .as_deref()
        .map(decode_date)
        .transpose()?,
      member_website: self.member_website,
      featured_image: self.featured_image,
      featured_thumbnail: self.featured_thumbnail,
    })
  }
}
