//! Single-pass roster parsing: lines in, member records out.

use fotohub_core::name::PersonName;

use crate::{
  MemberRecord,
  state::{Extraction, RosterState, step},
};

#[derive(Default)]
struct RecordAccum {
  raw_name: Option<String>,
  phone:    Option<String>,
  e_mail:   Option<String>,
  website:  Option<String>,
}

impl RecordAccum {
  fn flush(
    &mut self,
    born_on: Option<chrono::NaiveDate>,
  ) -> Option<MemberRecord> {
    let raw_name = self.raw_name.take()?;
    let record = MemberRecord {
      name: PersonName::parse(&raw_name),
      raw_name,
      phone_number: self.phone.take(),
      e_mail: self.e_mail.take(),
      website: self.website.take(),
      born_on,
    };
    Some(record)
  }
}

/// Walk the document once and assemble one record per completed state
/// cycle. Rows the machine never completes (a truncated document, a
/// layout change mid-table) are dropped silently — best-effort scraping.
///
/// The output depends only on the input text, so repeated runs over the
/// same fetched page yield identical record sequences.
pub fn parse_roster(html: &str) -> Vec<MemberRecord> {
  let mut state = RosterState::TableStart;
  let mut accum = RecordAccum::default();
  let mut records = Vec::new();

  for line in html.lines() {
    let (next, extraction) = step(state, line);
    state = next;

    match extraction {
      None => {}
      Some(Extraction::Name(raw)) => accum.raw_name = Some(raw),
      Some(Extraction::Phone(v)) => accum.phone = v,
      Some(Extraction::EMail(v)) => accum.e_mail = v,
      Some(Extraction::Website(v)) => accum.website = v,
      Some(Extraction::BirthDate(born_on)) => {
        if let Some(record) = accum.flush(born_on) {
          records.push(record);
        }
      }
    }
  }

  records
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  const PAGE: &str = r#"<html>
<body>
<h1>Ledenlijst</h1>
<table class="members">
<thead>
<tr>
<th>Naam</th><th>Telefoon</th><th>E-mail</th><th>Website</th><th>Geboortedatum</th>
</tr>
</thead>
<tbody>
<tr>
<td class="name">Miek Kerkhoven (voorzitter)</td>
<td class="phone">040-1234567</td>
<td class="email"><a href="mailto:miek@example.nl">miek@example.nl</a></td>
<td class="website"><a href="https://miek.example.nl">site</a></td>
<td class="birthdate">12/03/1961</td>
</tr>
<tr>
<td class="name">Henriëtte van Ekert</td>
<td class="phone"></td>
<td class="email">henriette@example.nl</td>
<td class="website"></td>
<td class="birthdate">1/1/1940</td>
</tr>
</tbody>
</table>
</body>
</html>"#;

  #[test]
  fn two_rows_two_records() {
    let records = parse_roster(PAGE);
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.raw_name, "Miek Kerkhoven (voorzitter)");
    assert_eq!(first.name, PersonName::new("Miek", "", "Kerkhoven"));
    assert_eq!(first.phone_number.as_deref(), Some("040-1234567"));
    assert_eq!(first.e_mail.as_deref(), Some("miek@example.nl"));
    assert_eq!(first.website.as_deref(), Some("https://miek.example.nl"));
    assert_eq!(first.born_on.unwrap().to_string(), "1961-03-12");

    let second = &records[1];
    assert_eq!(second.name, PersonName::new("Henriëtte", "van", "Ekert"));
    assert!(second.phone_number.is_none(), "empty phone cell stays empty");
    assert!(second.website.is_none());
  }

  #[test]
  fn repeated_runs_are_identical() {
    assert_eq!(parse_roster(PAGE), parse_roster(PAGE));
  }

  #[test]
  fn document_without_table_yields_nothing() {
    let html = "<html><body><p>Onderhoud</p></body></html>";
    assert!(parse_roster(html).is_empty());
  }

  #[test]
  fn truncated_final_row_is_dropped() {
    // Cut the document after the second row's email cell: the machine
    // never reaches BirthDate, so only the first record survives.
    let cut = PAGE.find("<td class=\"website\"></td>").unwrap();
    let records = parse_roster(&PAGE[..cut]);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].raw_name, "Miek Kerkhoven (voorzitter)");
  }

  #[test]
  fn header_row_is_not_a_record() {
    // The header <tr> consumes the RowStart state, but its <th> cells
    // never match a <td class=...> marker, so no phantom record appears.
    let records = parse_roster(PAGE);
    assert!(records.iter().all(|r| r.raw_name != "Naam"));
  }
}
