//! Person names used as natural keys.
//!
//! A name has three components: given, infix ("van den", "de", …), and
//! family. Identity comparisons use the (given, family) pair only, with
//! case-sensitive exact matching — the infix is a display attribute.

use serde::{Deserialize, Serialize};

/// A structured human name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
  pub given_name:  String,
  /// Lowercase name particles between given and family name; empty when
  /// there are none.
  pub infix_name:  String,
  pub family_name: String,
}

impl PersonName {
  pub fn new(given: &str, infix: &str, family: &str) -> Self {
    Self {
      given_name:  given.trim().to_string(),
      infix_name:  infix.trim().to_string(),
      family_name: family.trim().to_string(),
    }
  }

  /// "Peter" + "van den" + "Hamer" → "Peter van den Hamer".
  pub fn full_name(&self) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(3);
    if !self.given_name.is_empty() {
      parts.push(&self.given_name);
    }
    if !self.infix_name.is_empty() {
      parts.push(&self.infix_name);
    }
    if !self.family_name.is_empty() {
      parts.push(&self.family_name);
    }
    parts.join(" ")
  }

  /// Split a flat display name into components.
  ///
  /// A parenthesized role suffix ("Jan Jansen (voorzitter)") is stripped
  /// first. The first token is the given name; any run of tokens starting
  /// with a lowercase letter after it forms the infix; the remainder is the
  /// family name.
  pub fn parse(display: &str) -> Self {
    let cleaned = strip_parenthesized_role(display);
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    let Some((given, rest)) = tokens.split_first() else {
      return Self::new("", "", "");
    };

    let infix_len = rest
      .iter()
      .take_while(|t| t.chars().next().is_some_and(|c| c.is_lowercase()))
      .count();
    let (infix, family) = rest.split_at(infix_len);

    Self::new(given, &infix.join(" "), &family.join(" "))
  }
}

/// Drop a trailing parenthesized role: "Jan Jansen (voorzitter)" → "Jan
/// Jansen". Names without parentheses pass through unchanged.
pub fn strip_parenthesized_role(display: &str) -> String {
  match display.find('(') {
    Some(open) => display[..open].trim_end().to_string(),
    None => display.trim().to_string(),
  }
}

/// Uppercase the first letter, leave the rest untouched.
pub fn capitalize_first(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    None => String::new(),
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn full_name_with_infix() {
    let n = PersonName::new("Peter", "van den", "Hamer");
    assert_eq!(n.full_name(), "Peter van den Hamer");
  }

  #[test]
  fn full_name_without_infix() {
    let n = PersonName::new("Miek", "", "Kerkhoven");
    assert_eq!(n.full_name(), "Miek Kerkhoven");
  }

  #[test]
  fn parse_plain_name() {
    let n = PersonName::parse("Jos Jansen");
    assert_eq!(n, PersonName::new("Jos", "", "Jansen"));
  }

  #[test]
  fn parse_name_with_infix_run() {
    let n = PersonName::parse("Peter van den Hamer");
    assert_eq!(n, PersonName::new("Peter", "van den", "Hamer"));
  }

  #[test]
  fn parse_strips_role_suffix() {
    let n = PersonName::parse("Henriëtte van Ekert (secretaris)");
    assert_eq!(n, PersonName::new("Henriëtte", "van", "Ekert"));
  }

  #[test]
  fn parse_single_token() {
    let n = PersonName::parse("Cher");
    assert_eq!(n, PersonName::new("Cher", "", ""));
  }

  #[test]
  fn strip_role_without_parentheses() {
    assert_eq!(strip_parenthesized_role("  Jan Jansen  "), "Jan Jansen");
  }

  #[test]
  fn capitalize_first_letter() {
    assert_eq!(capitalize_first("chairman and secretary"), "Chairman and secretary");
    assert_eq!(capitalize_first(""), "");
  }
}
