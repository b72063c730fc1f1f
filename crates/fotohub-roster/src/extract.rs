//! Per-cell extraction helpers.
//!
//! Each helper receives the full line its state matched and returns the
//! cleaned-up field value. All of them are forgiving: a cell that does
//! not look as expected yields `None`, never an error — the page is not
//! ours to validate.

use chrono::NaiveDate;

/// Strip HTML tags and decode the handful of entities the member table
/// actually uses, then trim.
pub fn cell_text(line: &str) -> String {
  let mut text = String::with_capacity(line.len());
  let mut in_tag = false;
  for c in line.chars() {
    match c {
      '<' => in_tag = true,
      '>' => in_tag = false,
      _ if !in_tag => text.push(c),
      _ => {}
    }
  }

  text
    .replace("&amp;", "&")
    .replace("&lt;", "<")
    .replace("&gt;", ">")
    .replace("&nbsp;", " ")
    .trim()
    .to_string()
}

/// `Some(trimmed)` when non-empty, `None` otherwise.
fn opt_text(s: String) -> Option<String> {
  if s.is_empty() { None } else { Some(s) }
}

/// Phone cell. An empty cell or a bare dash placeholder counts as "no
/// phone number" — which the loaders read as a deceased member.
pub fn phone(line: &str) -> Option<String> {
  let text = cell_text(line);
  if text == "-" || text == "–" {
    return None;
  }
  opt_text(text)
}

/// E-mail cell: prefer the `mailto:` href when present, otherwise the
/// cell text.
pub fn e_mail(line: &str) -> Option<String> {
  if let Some(start) = line.find("mailto:") {
    let rest = &line[start + "mailto:".len()..];
    let end = rest.find(['"', '\'', '>']).unwrap_or(rest.len());
    return opt_text(rest[..end].trim().to_string());
  }
  opt_text(cell_text(line))
}

/// Website cell: prefer the `href` attribute, otherwise the cell text.
pub fn website(line: &str) -> Option<String> {
  if let Some(start) = line.find("href=\"") {
    let rest = &line[start + "href=\"".len()..];
    if let Some(end) = rest.find('"') {
      return opt_text(rest[..end].trim().to_string());
    }
  }
  opt_text(cell_text(line))
}

/// Birth-date cell, in the site's `d/m/yyyy` format.
pub fn birth_date(line: &str) -> Option<NaiveDate> {
  let text = cell_text(line);
  NaiveDate::parse_from_str(&text, "%d/%m/%Y").ok()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cell_text_strips_nested_tags() {
    let line = "<td class=\"name\"><a href=\"/leden/jos\">Jos Jansen</a></td>";
    assert_eq!(cell_text(line), "Jos Jansen");
  }

  #[test]
  fn cell_text_decodes_ampersand() {
    assert_eq!(cell_text("<td>Foto &amp; Film</td>"), "Foto & Film");
  }

  #[test]
  fn phone_dash_placeholder_is_absent() {
    assert_eq!(phone("<td class=\"phone\">-</td>"), None);
    assert_eq!(
      phone("<td class=\"phone\">040-1234567</td>"),
      Some("040-1234567".to_string())
    );
  }

  #[test]
  fn e_mail_prefers_mailto_href() {
    let line =
      "<td class=\"email\"><a href=\"mailto:jos@example.nl\">mail</a></td>";
    assert_eq!(e_mail(line), Some("jos@example.nl".to_string()));
  }

  #[test]
  fn e_mail_falls_back_to_cell_text() {
    assert_eq!(
      e_mail("<td class=\"email\">jos@example.nl</td>"),
      Some("jos@example.nl".to_string())
    );
  }

  #[test]
  fn website_reads_href() {
    let line =
      "<td class=\"website\"><a href=\"https://www.m3w.nl\">site</a></td>";
    assert_eq!(website(line), Some("https://www.m3w.nl".to_string()));
  }

  #[test]
  fn birth_date_parses_day_month_year() {
    let d = birth_date("<td class=\"birthdate\">9/10/1954</td>").unwrap();
    assert_eq!(d.to_string(), "1954-10-09");
  }

  #[test]
  fn birth_date_garbage_is_none() {
    assert!(birth_date("<td class=\"birthdate\">unknown</td>").is_none());
  }
}
