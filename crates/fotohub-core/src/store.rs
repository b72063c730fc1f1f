//! The `HubStore` trait — the persistence abstraction for the club graph.
//!
//! The trait is implemented by storage backends (e.g.
//! `fotohub-store-sqlite`). The sync engine and the API depend on this
//! abstraction, not on any concrete backend.
//!
//! Identity queries return a `Vec` on purpose: the backend enforces
//! uniqueness, but the reconciliation engine still wants to observe (and
//! log) constraint drift rather than trust it blindly. Results come back
//! in the store's default order (ascending id) so duplicate handling is
//! deterministic.

use std::future::Future;

use uuid::Uuid;

use crate::entity::{
  MemberPortfolio, Organization, OrganizationType, Photographer,
};

/// Abstraction over a fotohub store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait HubStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Organization types ────────────────────────────────────────────────

  /// Exact-match lookup by type name ("club", "museum", "unknown").
  fn organization_types_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Vec<OrganizationType>, Self::Error>>
  + Send
  + 'a;

  fn insert_organization_type<'a>(
    &'a self,
    record: &'a OrganizationType,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Organizations ─────────────────────────────────────────────────────

  /// Exact-match lookup on the (full_name, town) identity pair.
  fn organizations_by_identity<'a>(
    &'a self,
    full_name: &'a str,
    town: &'a str,
  ) -> impl Future<Output = Result<Vec<Organization>, Self::Error>> + Send + 'a;

  fn get_organization(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Organization>, Self::Error>> + Send + '_;

  fn list_organizations(
    &self,
  ) -> impl Future<Output = Result<Vec<Organization>, Self::Error>> + Send + '_;

  fn insert_organization<'a>(
    &'a self,
    record: &'a Organization,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Overwrite every non-identity column of an existing organization.
  fn update_organization<'a>(
    &'a self,
    record: &'a Organization,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Photographers ─────────────────────────────────────────────────────

  /// Exact-match lookup on the (given_name, family_name) identity pair —
  /// case-sensitive, as the natural key demands.
  fn photographers_by_name<'a>(
    &'a self,
    given_name: &'a str,
    family_name: &'a str,
  ) -> impl Future<Output = Result<Vec<Photographer>, Self::Error>> + Send + 'a;

  fn get_photographer(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Photographer>, Self::Error>> + Send + '_;

  fn list_photographers(
    &self,
  ) -> impl Future<Output = Result<Vec<Photographer>, Self::Error>> + Send + '_;

  fn insert_photographer<'a>(
    &'a self,
    record: &'a Photographer,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  fn update_photographer<'a>(
    &'a self,
    record: &'a Photographer,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Member portfolios ─────────────────────────────────────────────────

  /// Exact-match lookup on the (organization, photographer) pair.
  fn portfolios_by_pair(
    &self,
    organization_id: Uuid,
    photographer_id: Uuid,
  ) -> impl Future<Output = Result<Vec<MemberPortfolio>, Self::Error>> + Send + '_;

  fn portfolios_of_organization(
    &self,
    organization_id: Uuid,
  ) -> impl Future<Output = Result<Vec<MemberPortfolio>, Self::Error>> + Send + '_;

  fn portfolios_of_photographer(
    &self,
    photographer_id: Uuid,
  ) -> impl Future<Output = Result<Vec<MemberPortfolio>, Self::Error>> + Send + '_;

  fn insert_portfolio<'a>(
    &'a self,
    record: &'a MemberPortfolio,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  fn update_portfolio<'a>(
    &'a self,
    record: &'a MemberPortfolio,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Durability ────────────────────────────────────────────────────────

  /// Flush committed state to durable storage. Individual writes are
  /// transactional on their own; this is the batch-boundary barrier the
  /// loaders call (and report failures on).
  fn commit(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
