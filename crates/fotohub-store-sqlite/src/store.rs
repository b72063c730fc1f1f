//! [`SqliteStore`] — the SQLite implementation of [`HubStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use fotohub_core::{
  entity::{MemberPortfolio, Organization, OrganizationType, Photographer},
  store::HubStore,
};

use crate::{
  Error, Result,
  encode::{
    RawOrganization, RawOrganizationType, RawPhotographer, RawPortfolio,
    encode_date, encode_descriptions, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Row mappers ─────────────────────────────────────────────────────────────

const ORG_TYPE_COLUMNS: &str = "type_id, name";

const ORG_COLUMNS: &str = "organization_id, full_name, town, nickname, \
                           type_id, latitude, longitude, website, wikipedia, \
                           fotobond_number, kvk_number, descriptions, \
                           has_hardcoded_members";

const PHOTOGRAPHER_COLUMNS: &str =
  "photographer_id, given_name, infix_name, family_name, is_deceased, \
   born_on, phone_number, e_mail, website";

const PORTFOLIO_COLUMNS: &str =
  "portfolio_id, organization_id, photographer_id, is_chairman, \
   is_vice_chairman, is_treasurer, is_secretary, is_admin, \
   is_former_member, is_honorary_member, is_prospective_member, is_mentor, \
   membership_start, membership_end, member_website, featured_image, \
   featured_thumbnail";

fn org_type_from_row(
  row: &rusqlite::Row<'_>,
) -> rusqlite::Result<RawOrganizationType> {
  Ok(RawOrganizationType {
    type_id: row.get(0)?,
    name:    row.get(1)?,
  })
}

fn org_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawOrganization> {
  Ok(RawOrganization {
    organization_id:       row.get(0)?,
    full_name:             row.get(1)?,
    town:                  row.get(2)?,
    nickname:              row.get(3)?,
    type_id:               row.get(4)?,
    latitude:              row.get(5)?,
    longitude:             row.get(6)?,
    website:               row.get(7)?,
    wikipedia:             row.get(8)?,
    fotobond_number:       row.get(9)?,
    kvk_number:            row.get(10)?,
    descriptions:          row.get(11)?,
    has_hardcoded_members: row.get(12)?,
  })
}

fn photographer_from_row(
  row: &rusqlite::Row<'_>,
) -> rusqlite::Result<RawPhotographer> {
  Ok(RawPhotographer {
    photographer_id: row.get(0)?,
    given_name:      row.get(1)?,
    infix_name:      row.get(2)?,
    family_name:     row.get(3)?,
    is_deceased:     row.get(4)?,
    born_on:         row.get(5)?,
    phone_number:    row.get(6)?,
    e_mail:          row.get(7)?,
    website:         row.get(8)?,
  })
}

fn portfolio_from_row(
  row: &rusqlite::Row<'_>,
) -> rusqlite::Result<RawPortfolio> {
  Ok(RawPortfolio {
    portfolio_id:          row.get(0)?,
    organization_id:       row.get(1)?,
    photographer_id:       row.get(2)?,
    is_chairman:           row.get(3)?,
    is_vice_chairman:      row.get(4)?,
    is_treasurer:          row.get(5)?,
    is_secretary:          row.get(6)?,
    is_admin:              row.get(7)?,
    is_former_member:      row.get(8)?,
    is_honorary_member:    row.get(9)?,
    is_prospective_member: row.get(10)?,
    is_mentor:             row.get(11)?,
    membership_start:      row.get(12)?,
    membership_end:        row.get(13)?,
    member_website:        row.get(14)?,
    featured_image:        row.get(15)?,
    featured_thumbnail:    row.get(16)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A fotohub store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All
/// statements funnel through one connection worker, which serialises
/// writes without further locking.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── HubStore impl ───────────────────────────────────────────────────────────

impl HubStore for SqliteStore {
  type Error = Error;

  // ── Organization types ────────────────────────────────────────────────

  async fn organization_types_by_name(
    &self,
    name: &str,
  ) -> Result<Vec<OrganizationType>> {
    let name = name.to_owned();
    let raws: Vec<RawOrganizationType> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ORG_TYPE_COLUMNS} FROM organization_types
           WHERE name = ?1 ORDER BY type_id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![name], org_type_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawOrganizationType::into_record).collect()
  }

  async fn insert_organization_type(
    &self,
    record: &OrganizationType,
  ) -> Result<()> {
    let id_str = encode_uuid(record.id);
    let name = record.name.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO organization_types (type_id, name) VALUES (?1, ?2)",
          rusqlite::params![id_str, name],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Organizations ─────────────────────────────────────────────────────

  async fn organizations_by_identity(
    &self,
    full_name: &str,
    town: &str,
  ) -> Result<Vec<Organization>> {
    let full_name = full_name.to_owned();
    let town = town.to_owned();

    let raws: Vec<RawOrganization> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ORG_COLUMNS} FROM organizations
           WHERE full_name = ?1 AND town = ?2 ORDER BY organization_id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![full_name, town], org_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawOrganization::into_record).collect()
  }

  async fn get_organization(&self, id: Uuid) -> Result<Option<Organization>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawOrganization> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {ORG_COLUMNS} FROM organizations
                 WHERE organization_id = ?1"
              ),
              rusqlite::params![id_str],
              org_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawOrganization::into_record).transpose()
  }

  async fn list_organizations(&self) -> Result<Vec<Organization>> {
    let raws: Vec<RawOrganization> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ORG_COLUMNS} FROM organizations ORDER BY full_name, town"
        ))?;
        let rows = stmt
          .query_map([], org_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawOrganization::into_record).collect()
  }

  async fn insert_organization(&self, record: &Organization) -> Result<()> {
    let id_str = encode_uuid(record.id);
    let type_id_str = encode_uuid(record.type_id);
    let descriptions_str = encode_descriptions(&record.descriptions)?;
    let record = record.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO organizations (
             organization_id, full_name, town, nickname, type_id,
             latitude, longitude, website, wikipedia,
             fotobond_number, kvk_number, descriptions,
             has_hardcoded_members
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
          rusqlite::params![
            id_str,
            record.full_name,
            record.town,
            record.nickname,
            type_id_str,
            record.coordinates.map(|c| c.latitude),
            record.coordinates.map(|c| c.longitude),
            record.website,
            record.wikipedia,
            record.fotobond_number,
            record.kvk_number,
            descriptions_str,
            record.has_hardcoded_members,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn update_organization(&self, record: &Organization) -> Result<()> {
    let id_str = encode_uuid(record.id);
    let type_id_str = encode_uuid(record.type_id);
    let descriptions_str = encode_descriptions(&record.descriptions)?;
    let record = record.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE organizations SET
             nickname = ?2, type_id = ?3, latitude = ?4, longitude = ?5,
             website = ?6, wikipedia = ?7, fotobond_number = ?8,
             kvk_number = ?9, descriptions = ?10, has_hardcoded_members = ?11
           WHERE organization_id = ?1",
          rusqlite::params![
            id_str,
            record.nickname,
            type_id_str,
            record.coordinates.map(|c| c.latitude),
            record.coordinates.map(|c| c.longitude),
            record.website,
            record.wikipedia,
            record.fotobond_number,
            record.kvk_number,
            descriptions_str,
            record.has_hardcoded_members,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Photographers ─────────────────────────────────────────────────────

  async fn photographers_by_name(
    &self,
    given_name: &str,
    family_name: &str,
  ) -> Result<Vec<Photographer>> {
    let given_name = given_name.to_owned();
    let family_name = family_name.to_owned();

    let raws: Vec<RawPhotographer> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PHOTOGRAPHER_COLUMNS} FROM photographers
           WHERE given_name = ?1 AND family_name = ?2
           ORDER BY photographer_id"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![given_name, family_name],
            photographer_from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPhotographer::into_record).collect()
  }

  async fn get_photographer(&self, id: Uuid) -> Result<Option<Photographer>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPhotographer> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {PHOTOGRAPHER_COLUMNS} FROM photographers
                 WHERE photographer_id = ?1"
              ),
              rusqlite::params![id_str],
              photographer_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPhotographer::into_record).transpose()
  }

  async fn list_photographers(&self) -> Result<Vec<Photographer>> {
    let raws: Vec<RawPhotographer> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PHOTOGRAPHER_COLUMNS} FROM photographers
           ORDER BY family_name, given_name"
        ))?;
        let rows = stmt
          .query_map([], photographer_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPhotographer::into_record).collect()
  }

  async fn insert_photographer(&self, record: &Photographer) -> Result<()> {
    let id_str = encode_uuid(record.id);
    let born_str = record.born_on.map(encode_date);
    let record = record.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO photographers (
             photographer_id, given_name, infix_name, family_name,
             is_deceased, born_on, phone_number, e_mail, website
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            id_str,
            record.given_name,
            record.infix_name,
            record.family_name,
            record.is_deceased,
            born_str,
            record.phone_number,
            record.e_mail,
            record.website,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn update_photographer(&self, record: &Photographer) -> Result<()> {
    let id_str = encode_uuid(record.id);
    let born_str = record.born_on.map(encode_date);
    let record = record.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE photographers SET
             infix_name = ?2, is_deceased = ?3, born_on = ?4,
             phone_number = ?5, e_mail = ?6, website = ?7
           WHERE photographer_id = ?1",
          rusqlite::params![
            id_str,
            record.infix_name,
            record.is_deceased,
            born_str,
            record.phone_number,
            record.e_mail,
            record.website,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Member portfolios ─────────────────────────────────────────────────

  async fn portfolios_by_pair(
    &self,
    organization_id: Uuid,
    photographer_id: Uuid,
  ) -> Result<Vec<MemberPortfolio>> {
    let org_str = encode_uuid(organization_id);
    let photographer_str = encode_uuid(photographer_id);

    let raws: Vec<RawPortfolio> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PORTFOLIO_COLUMNS} FROM member_portfolios
           WHERE organization_id = ?1 AND photographer_id = ?2
           ORDER BY portfolio_id"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![org_str, photographer_str],
            portfolio_from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPortfolio::into_record).collect()
  }

  async fn portfolios_of_organization(
    &self,
    organization_id: Uuid,
  ) -> Result<Vec<MemberPortfolio>> {
    let org_str = encode_uuid(organization_id);

    let raws: Vec<RawPortfolio> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PORTFOLIO_COLUMNS} FROM member_portfolios
           WHERE organization_id = ?1 ORDER BY portfolio_id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![org_str], portfolio_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPortfolio::into_record).collect()
  }

  async fn portfolios_of_photographer(
    &self,
    photographer_id: Uuid,
  ) -> Result<Vec<MemberPortfolio>> {
    let photographer_str = encode_uuid(photographer_id);

    let raws: Vec<RawPortfolio> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PORTFOLIO_COLUMNS} FROM member_portfolios
           WHERE photographer_id = ?1 ORDER BY portfolio_id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![photographer_str], portfolio_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPortfolio::into_record).collect()
  }

  async fn insert_portfolio(&self, record: &MemberPortfolio) -> Result<()> {
    let id_str = encode_uuid(record.id);
    let org_str = encode_uuid(record.organization_id);
    let photographer_str = encode_uuid(record.photographer_id);
    let start_str = record.membership_start.map(encode_date);
    let end_str = record.membership_end.map(encode_date);
    let record = record.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO member_portfolios (
             portfolio_id, organization_id, photographer_id,
             is_chairman, is_vice_chairman, is_treasurer, is_secretary,
             is_admin, is_former_member, is_honorary_member,
             is_prospective_member, is_mentor,
             membership_start, membership_end, member_website,
             featured_image, featured_thumbnail
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                     ?13, ?14, ?15, ?16, ?17)",
          rusqlite::params![
            id_str,
            org_str,
            photographer_str,
            record.is_chairman,
            record.is_vice_chairman,
            record.is_treasurer,
            record.is_secretary,
            record.is_admin,
            record.is_former_member,
            record.is_honorary_member,
            record.is_prospective_member,
            record.is_mentor,
            start_str,
            end_str,
            record.member_website,
            record.featured_image,
            record.featured_thumbnail,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn update_portfolio(&self, record: &MemberPortfolio) -> Result<()> {
    let id_str = encode_uuid(record.id);
    let start_str = record.membership_start.map(encode_date);
    let end_str = record.membership_end.map(encode_date);
    let record = record.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE member_portfolios SET
             is_chairman = ?2, is_vice_chairman = ?3, is_treasurer = ?4,
             is_secretary = ?5, is_admin = ?6, is_former_member = ?7,
             is_honorary_member = ?8, is_prospective_member = ?9,
             is_mentor = ?10, membership_start = ?11, membership_end = ?12,
             member_website = ?13, featured_image = ?14,
             featured_thumbnail = ?15
           WHERE portfolio_id = ?1",
          rusqlite::params![
            id_str,
            record.is_chairman,
            record.is_vice_chairman,
            record.is_treasurer,
            record.is_secretary,
            record.is_admin,
            record.is_former_member,
            record.is_honorary_member,
            record.is_prospective_member,
            record.is_mentor,
            start_str,
            end_str,
            record.member_website,
            record.featured_image,
            record.featured_thumbnail,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Durability ────────────────────────────────────────────────────────

  async fn commit(&self) -> Result<()> {
    // Statements autocommit; flushing the WAL into the main database is
    // the batch durability barrier the loaders report on.
    self
      .conn
      .call(|conn| {
        conn.query_row("PRAGMA wal_checkpoint(PASSIVE)", [], |_| Ok(()))?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
