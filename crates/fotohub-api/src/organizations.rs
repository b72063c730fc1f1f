//! Handlers for `/organizations` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/organizations` | All organizations, name order |
//! | `GET`  | `/organizations/:id` | 404 if not found |
//! | `GET`  | `/organizations/:id/members` | Portfolios joined with their photographers |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use fotohub_core::{
  entity::{MemberPortfolio, Organization, Photographer},
  store::HubStore,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;

/// `GET /organizations`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Organization>>, ApiError>
where
  S: HubStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let organizations =
    store.list_organizations().await.map_err(ApiError::store)?;
  Ok(Json(organizations))
}

/// `GET /organizations/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Organization>, ApiError>
where
  S: HubStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store
    .get_organization(id)
    .await
    .map_err(ApiError::store)?
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("organization {id}")))
}

// ─── Member listing ───────────────────────────────────────────────────────────

/// One member row: the portfolio, its photographer, and the derived
/// role/status phrase the UI shows.
#[derive(Debug, Serialize)]
pub struct MemberView {
  pub portfolio:        MemberPortfolio,
  pub photographer:     Photographer,
  pub role_description: String,
}

/// `GET /organizations/:id/members`
pub async fn members<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<MemberView>>, ApiError>
where
  S: HubStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let organization = store
    .get_organization(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("organization {id}")))?;

  let portfolios = store
    .portfolios_of_organization(organization.id)
    .await
    .map_err(ApiError::store)?;

  let mut views = Vec::with_capacity(portfolios.len());
  for portfolio in portfolios {
    // A dangling photographer reference is a store-level integrity
    // break; surface it rather than skipping the row silently.
    let photographer = store
      .get_photographer(portfolio.photographer_id)
      .await
      .map_err(ApiError::store)?
      .ok_or_else(|| {
        ApiError::NotFound(format!(
          "photographer {} referenced by portfolio {}",
          portfolio.photographer_id, portfolio.id
        ))
      })?;

    let role_description = portfolio.role_description(&photographer);
    views.push(MemberView { portfolio, photographer, role_description });
  }

  Ok(Json(views))
}
