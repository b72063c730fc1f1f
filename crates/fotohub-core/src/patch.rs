//! Explicit update values for the find-create-update contract.
//!
//! Every non-identity attribute travels as a [`Patch`]: `Unchanged` leaves
//! the stored value alone, `Set` overwrites it when (and only when) it
//! differs. This makes "absent means leave alone" impossible to confuse
//! with "absent means clear".

use serde::{Deserialize, Serialize};

/// An update value for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Patch<T> {
  #[default]
  Unchanged,
  Set(T),
}

impl<T> Patch<T> {
  pub fn is_set(&self) -> bool { matches!(self, Self::Set(_)) }

  /// `Some(v)` → `Set(v)`, `None` → `Unchanged`. Use when the source
  /// genuinely cannot distinguish "absent" from "clear" (it never clears).
  pub fn from_option(value: Option<T>) -> Self {
    match value {
      Some(v) => Self::Set(v),
      None => Self::Unchanged,
    }
  }
}

impl<T: Clone + PartialEq> Patch<T> {
  /// Apply to a required field. Returns whether the field changed.
  pub fn apply_to(&self, field: &mut T) -> bool {
    match self {
      Self::Set(new) if new != field => {
        *field = new.clone();
        true
      }
      _ => false,
    }
  }

  /// Apply to an optional field. `Set` fills an empty field or overwrites
  /// a different value; `Unchanged` never erases.
  pub fn apply_to_opt(&self, field: &mut Option<T>) -> bool {
    match self {
      Self::Set(new) if field.as_ref() != Some(new) => {
        *field = Some(new.clone());
        true
      }
      _ => false,
    }
  }
}

impl<T> From<Option<T>> for Patch<T> {
  fn from(value: Option<T>) -> Self { Self::from_option(value) }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unchanged_leaves_field_alone() {
    let mut field = "kept".to_string();
    assert!(!Patch::<String>::Unchanged.apply_to(&mut field));
    assert_eq!(field, "kept");
  }

  #[test]
  fn set_overwrites_different_value() {
    let mut field = "old".to_string();
    assert!(Patch::Set("new".to_string()).apply_to(&mut field));
    assert_eq!(field, "new");
  }

  #[test]
  fn set_identical_value_reports_no_change() {
    let mut field = "same".to_string();
    assert!(!Patch::Set("same".to_string()).apply_to(&mut field));
  }

  #[test]
  fn unchanged_never_erases_optional() {
    let mut field = Some(42);
    assert!(!Patch::<i32>::Unchanged.apply_to_opt(&mut field));
    assert_eq!(field, Some(42));
  }

  #[test]
  fn set_fills_empty_optional() {
    let mut field: Option<i32> = None;
    assert!(Patch::Set(7).apply_to_opt(&mut field));
    assert_eq!(field, Some(7));
  }

  #[test]
  fn from_option_maps_none_to_unchanged() {
    assert_eq!(Patch::<u8>::from_option(None), Patch::Unchanged);
    assert_eq!(Patch::from_option(Some(3u8)), Patch::Set(3));
  }
}
