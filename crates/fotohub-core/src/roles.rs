//! Role and status vocabulary for club memberships.
//!
//! The canonical representation is a pair of partial maps (role → bool,
//! status → bool). A key that is absent from a map means "no information" —
//! merging such a map into an entity leaves the corresponding flag
//! untouched. The boolean convenience fields on `MemberPortfolio` are a
//! denormalized cache of these maps.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::name::capitalize_first;

/// Conjunction used between role nouns ("secretary and admin").
/// Localization is out of scope; the English form is fixed here.
const AND: &str = "and";

// ─── Vocabulary ──────────────────────────────────────────────────────────────

/// Formal roles a member can hold in a club. Declaration order is the
/// precedence order used in the derived role phrase.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
  Chairman,
  ViceChairman,
  Treasurer,
  Secretary,
  Admin,
}

impl MemberRole {
  pub fn label(&self) -> &'static str {
    match self {
      Self::Chairman => "chairman",
      Self::ViceChairman => "vice-chairman",
      Self::Treasurer => "treasurer",
      Self::Secretary => "secretary",
      Self::Admin => "admin",
    }
  }
}

/// Membership status adjectives. `Deceased` belongs to the photographer
/// (it is club-independent); the rest describe one membership.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
  Deceased,
  Former,
  Honorary,
  Prospective,
  Coach,
  Current,
}

impl MemberStatus {
  pub fn label(&self) -> &'static str {
    match self {
      Self::Deceased => "deceased",
      Self::Former => "former",
      Self::Honorary => "honorary",
      Self::Prospective => "prospective",
      Self::Coach => "coach",
      Self::Current => "current",
    }
  }
}

// ─── Partial role/status maps ────────────────────────────────────────────────

/// A pair of partial maps carrying new role/status information.
///
/// Only keys present in a map are applied when merging; `false` values
/// actively clear a flag, absent keys leave it alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolesAndStatus {
  pub role:   BTreeMap<MemberRole, bool>,
  pub status: BTreeMap<MemberStatus, bool>,
}

impl RolesAndStatus {
  pub fn new() -> Self { Self::default() }

  pub fn with_role(mut self, role: MemberRole, value: bool) -> Self {
    self.role.insert(role, value);
    self
  }

  pub fn with_status(mut self, status: MemberStatus, value: bool) -> Self {
    self.status.insert(status, value);
    self
  }

  pub fn is_empty(&self) -> bool {
    self.role.is_empty() && self.status.is_empty()
  }

  fn role_active(&self, role: MemberRole) -> bool {
    self.role.get(&role).copied().unwrap_or(false)
  }

  fn status_active(&self, status: MemberStatus) -> bool {
    self.status.get(&status).copied().unwrap_or(false)
  }

  /// Build the human-readable role/status phrase from a complete snapshot
  /// (one where every flag the entity knows about is present).
  ///
  /// The output reproduces the loop the UI text depends on: each element is
  /// emitted with a trailing space, the conjunction goes between
  /// consecutive suffix elements only, and the result is trimmed and
  /// capitalized. `{chairman, secretary}` for a living current member
  /// yields exactly "Chairman and secretary and current".
  pub fn describe(&self) -> String {
    let mut prefixes: Vec<&'static str> = Vec::new();
    let mut suffixes: Vec<&'static str> = Vec::new();

    if self.status_active(MemberStatus::Deceased) {
      prefixes.push(MemberStatus::Deceased.label());
    }
    if self.status_active(MemberStatus::Former)
      && !self.status_active(MemberStatus::Honorary)
    {
      prefixes.push(MemberStatus::Former.label());
    }

    for role in [
      MemberRole::Chairman,
      MemberRole::ViceChairman,
      MemberRole::Treasurer,
      MemberRole::Secretary,
      MemberRole::Admin,
    ] {
      if self.role_active(role) {
        suffixes.push(role.label());
      }
    }

    // Exactly one trailing status qualifier, by priority.
    if self.status_active(MemberStatus::Prospective) {
      suffixes.push(MemberStatus::Prospective.label());
    } else if self.status_active(MemberStatus::Honorary) {
      suffixes.push(MemberStatus::Honorary.label());
    } else if self.status_active(MemberStatus::Coach) {
      suffixes.push(MemberStatus::Coach.label());
    } else {
      suffixes.push(MemberStatus::Current.label());
    }

    let mut result = String::new();
    for prefix in &prefixes {
      result.push_str(prefix);
      result.push(' ');
    }
    for (index, element) in suffixes.iter().enumerate() {
      result.push_str(element);
      result.push(' ');
      if index < suffixes.len() - 1 {
        result.push_str(AND);
        result.push(' ');
      }
    }

    capitalize_first(result.trim())
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plain_current_member() {
    let rs = RolesAndStatus::new();
    assert_eq!(rs.describe(), "Current");
  }

  #[test]
  fn chairman_and_secretary_literal_join() {
    let rs = RolesAndStatus::new()
      .with_role(MemberRole::Chairman, true)
      .with_role(MemberRole::Secretary, true);
    // The loop emits the trailing qualifier too; the literal output is
    // asserted because downstream text depends on the exact spacing.
    assert_eq!(rs.describe(), "Chairman and secretary and current");
  }

  #[test]
  fn deceased_prefix_comes_first() {
    let rs = RolesAndStatus::new()
      .with_status(MemberStatus::Deceased, true)
      .with_role(MemberRole::Treasurer, true);
    assert_eq!(rs.describe(), "Deceased treasurer and current");
  }

  #[test]
  fn former_skipped_when_honorary() {
    let rs = RolesAndStatus::new()
      .with_status(MemberStatus::Former, true)
      .with_status(MemberStatus::Honorary, true);
    assert_eq!(rs.describe(), "Honorary");
  }

  #[test]
  fn prospective_beats_honorary_and_coach() {
    let rs = RolesAndStatus::new()
      .with_status(MemberStatus::Prospective, true)
      .with_status(MemberStatus::Honorary, true)
      .with_status(MemberStatus::Coach, true);
    assert_eq!(rs.describe(), "Prospective");
  }

  #[test]
  fn coach_without_other_status() {
    let rs = RolesAndStatus::new().with_status(MemberStatus::Coach, true);
    assert_eq!(rs.describe(), "Coach");
  }

  #[test]
  fn role_precedence_is_fixed() {
    let rs = RolesAndStatus::new()
      .with_role(MemberRole::Admin, true)
      .with_role(MemberRole::ViceChairman, true);
    assert_eq!(rs.describe(), "Vice-chairman and admin and current");
  }

  #[test]
  fn false_entries_do_not_activate() {
    let rs = RolesAndStatus::new()
      .with_role(MemberRole::Chairman, false)
      .with_status(MemberStatus::Former, false);
    assert_eq!(rs.describe(), "Current");
  }
}
