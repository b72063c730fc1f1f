//! The roster state machine.
//!
//! States form a fixed cycle; one full cycle assembles one member record.
//! Each state owns a marker substring. A line that contains the current
//! state's marker triggers that state's extraction and advances the
//! cycle; any other line is skipped with the state unchanged. Single
//! pass, no backtracking.

use chrono::NaiveDate;

use crate::extract;

/// Position in the scraping cycle.
///
/// tableStart → tableHeader → rowStart → personName → phoneNumber →
/// eMail → externalUrl → birthDate → (back to rowStart).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterState {
  TableStart,
  TableHeader,
  RowStart,
  PersonName,
  PhoneNumber,
  EMail,
  ExternalUrl,
  BirthDate,
}

impl RosterState {
  /// The substring this state searches for. These are constants of the
  /// scraped site's markup, not a grammar.
  pub fn marker(&self) -> &'static str {
    match self {
      Self::TableStart => "<table",
      Self::TableHeader => "<thead",
      Self::RowStart => "<tr",
      Self::PersonName => "<td class=\"name\"",
      Self::PhoneNumber => "<td class=\"phone\"",
      Self::EMail => "<td class=\"email\"",
      Self::ExternalUrl => "<td class=\"website\"",
      Self::BirthDate => "<td class=\"birthdate\"",
    }
  }

  /// The next state in the fixed cycle. `BirthDate` loops back to
  /// `RowStart`: the table prologue states run only once per document.
  pub fn next(&self) -> Self {
    match self {
      Self::TableStart => Self::TableHeader,
      Self::TableHeader => Self::RowStart,
      Self::RowStart => Self::PersonName,
      Self::PersonName => Self::PhoneNumber,
      Self::PhoneNumber => Self::EMail,
      Self::EMail => Self::ExternalUrl,
      Self::ExternalUrl => Self::BirthDate,
      Self::BirthDate => Self::RowStart,
    }
  }
}

/// A field pulled out of a matched line.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
  /// The raw display name (may carry a parenthesized role).
  Name(String),
  Phone(Option<String>),
  EMail(Option<String>),
  Website(Option<String>),
  /// Completes the current record.
  BirthDate(Option<NaiveDate>),
}

/// The total transition function over (state, line).
///
/// Returns the successor state and the field extracted from the line, if
/// any. Lines that do not contain the current marker leave the state
/// untouched and extract nothing.
pub fn step(state: RosterState, line: &str) -> (RosterState, Option<Extraction>) {
  if !line.contains(state.marker()) {
    return (state, None);
  }

  let extraction = match state {
    RosterState::TableStart
    | RosterState::TableHeader
    | RosterState::RowStart => None,
    RosterState::PersonName => {
      Some(Extraction::Name(extract::cell_text(line)))
    }
    RosterState::PhoneNumber => {
      Some(Extraction::Phone(extract::phone(line)))
    }
    RosterState::EMail => Some(Extraction::EMail(extract::e_mail(line))),
    RosterState::ExternalUrl => {
      Some(Extraction::Website(extract::website(line)))
    }
    RosterState::BirthDate => {
      Some(Extraction::BirthDate(extract::birth_date(line)))
    }
  };

  (state.next(), extraction)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn non_matching_line_keeps_state() {
    let (next, extraction) =
      step(RosterState::TableStart, "<p>Welkom bij de fotogroep</p>");
    assert_eq!(next, RosterState::TableStart);
    assert!(extraction.is_none());
  }

  #[test]
  fn prologue_states_extract_nothing() {
    let (s1, e1) = step(RosterState::TableStart, "<table class=\"members\">");
    assert_eq!(s1, RosterState::TableHeader);
    assert!(e1.is_none());

    let (s2, e2) = step(RosterState::TableHeader, "<thead>");
    assert_eq!(s2, RosterState::RowStart);
    assert!(e2.is_none());
  }

  #[test]
  fn name_cell_extracts_raw_display_name() {
    let (next, extraction) = step(
      RosterState::PersonName,
      "<td class=\"name\">Miek Kerkhoven (voorzitter)</td>",
    );
    assert_eq!(next, RosterState::PhoneNumber);
    assert_eq!(
      extraction,
      Some(Extraction::Name("Miek Kerkhoven (voorzitter)".to_string()))
    );
  }

  #[test]
  fn empty_phone_cell_extracts_none() {
    let (next, extraction) =
      step(RosterState::PhoneNumber, "<td class=\"phone\"></td>");
    assert_eq!(next, RosterState::EMail);
    assert_eq!(extraction, Some(Extraction::Phone(None)));
  }

  #[test]
  fn birth_date_loops_back_to_row_start() {
    let (next, extraction) = step(
      RosterState::BirthDate,
      "<td class=\"birthdate\">9/10/1954</td>",
    );
    assert_eq!(next, RosterState::RowStart);
    let Some(Extraction::BirthDate(Some(d))) = extraction else {
      panic!("expected a parsed birth date");
    };
    assert_eq!(d.to_string(), "1954-10-09");
  }

  #[test]
  fn cycle_is_closed() {
    // Following `next` from TableStart must reach every state and loop.
    let mut state = RosterState::TableStart;
    let mut seen = Vec::new();
    for _ in 0..8 {
      seen.push(state);
      state = state.next();
    }
    assert_eq!(state, RosterState::RowStart, "cycle re-enters at RowStart");
    assert_eq!(seen.len(), 8);
  }
}
