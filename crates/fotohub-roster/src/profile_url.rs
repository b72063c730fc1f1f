//! Canonical per-member profile URLs on the club site.
//!
//! The site only serves profile paths made of ASCII letters and
//! underscores. Spaces become underscores and a small fixed set of
//! diacritics is substituted; anything else truncates the name at the
//! first unsupported character (the site simply has no page for it).

/// Used when a scraped name yields no valid path at all — a known
/// limitation carried over from the production data.
pub const FALLBACK_PROFILE_NAME: &str = "Peter_van_den_Hamer";

fn is_profile_char(c: char) -> bool { c.is_ascii_alphabetic() || c == '_' }

/// Reduce a display name to the ASCII letters/underscore path segment the
/// club site uses.
///
///   "Peter van den Hamer"  → "Peter_van_den_Hamer"
///   "Henriëtte van Ekert"  → "Henriette_van_Ekert"
///   "Ekin Özbiçer"         → "Ekin_"  (Ö has no substitution yet)
pub fn ascii_profile_name(display_name: &str) -> String {
  let tweaked = display_name
    .replace(' ', "_")
    .replace('á', "a") // affects István_Nagy
    .replace('ç', "c") // affects François_Hermans
    .replace('ë', "e") // affects Henriëtte_van_Ekert
    .replace('é', "e"); // affects José_Daniëls

  if !tweaked.is_empty() && tweaked.chars().all(is_profile_char) {
    return tweaked;
  }

  let prefix: String = tweaked.chars().take_while(|&c| is_profile_char(c)).collect();
  match tweaked.chars().find(|&c| !is_profile_char(c)) {
    Some(offending) if !prefix.is_empty() => {
      tracing::warn!(
        name = %tweaked,
        character = %offending,
        "unsupported character in profile name, truncating"
      );
      prefix
    }
    _ => {
      tracing::warn!(
        name = %tweaked,
        "no usable profile name could be derived, using fallback"
      );
      FALLBACK_PROFILE_NAME.to_string()
    }
  }
}

/// Full profile URL: `<base>/<ascii name>/`. The trailing slash matches
/// the club site's canonical form.
pub fn derive_profile_url(base_url: &str, display_name: &str) -> String {
  format!(
    "{}/{}/",
    base_url.trim_end_matches('/'),
    ascii_profile_name(display_name)
  )
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plain_name_gets_underscores() {
    assert_eq!(
      ascii_profile_name("Peter van den Hamer"),
      "Peter_van_den_Hamer"
    );
  }

  #[test]
  fn known_diacritics_are_substituted() {
    assert_eq!(
      ascii_profile_name("Henriëtte van Ekert"),
      "Henriette_van_Ekert"
    );
    assert_eq!(ascii_profile_name("José Daniëls"), "Jose_Daniels");
    assert_eq!(ascii_profile_name("François Hermans"), "Francois_Hermans");
    assert_eq!(ascii_profile_name("István Nagy"), "Istvan_Nagy");
  }

  #[test]
  fn unsupported_character_truncates_at_prefix() {
    // Ö is not in the substitution set; the name is cut right before it.
    // The ç later in the name is never reached.
    assert_eq!(ascii_profile_name("Ekin Özbiçer"), "Ekin_");
  }

  #[test]
  fn no_valid_prefix_falls_back() {
    assert_eq!(ascii_profile_name("Ötzi"), FALLBACK_PROFILE_NAME);
    assert_eq!(ascii_profile_name(""), FALLBACK_PROFILE_NAME);
  }

  #[test]
  fn url_joins_with_single_slash() {
    assert_eq!(
      derive_profile_url("https://club.example/members/", "Jos Jansen"),
      "https://club.example/members/Jos_Jansen/"
    );
  }
}
