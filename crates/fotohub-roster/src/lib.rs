//! Best-effort scraper for the club's member-roster web page.
//!
//! The page is third-party HTML with no formal grammar; the parser is a
//! line-oriented state machine that looks for one marker substring per
//! state and extracts one member record per table row. Brittle by design —
//! a layout change on the site degrades to fewer (or zero) records, never
//! to a crash.
//!
//! Pipeline:
//!   raw &str
//!     └─ per line: step(state, line)  → (state, Option<Extraction>)
//!          └─ accumulate fields       → flush on BirthDate
//!               └─ Vec<MemberRecord>

pub mod extract;
pub mod parse;
pub mod profile_url;
pub mod state;

use chrono::NaiveDate;
use fotohub_core::name::PersonName;

pub use parse::parse_roster;
pub use profile_url::{ascii_profile_name, derive_profile_url};
pub use state::{Extraction, RosterState, step};

/// One member row, as assembled by a full pass through the state cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberRecord {
  pub name:         PersonName,
  /// The display name exactly as scraped, including any parenthesized
  /// role — auxiliary name-list lookups match against this form.
  pub raw_name:     String,
  /// `None` when the phone cell is empty; the loaders read that as a
  /// deceased member.
  pub phone_number: Option<String>,
  pub e_mail:       Option<String>,
  pub website:      Option<String>,
  pub born_on:      Option<NaiveDate>,
}
