//! Handlers for `/photographers` endpoints.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use fotohub_core::{
  entity::{MemberPortfolio, Photographer},
  store::HubStore,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;

/// `GET /photographers`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Photographer>>, ApiError>
where
  S: HubStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let photographers =
    store.list_photographers().await.map_err(ApiError::store)?;
  Ok(Json(photographers))
}

/// A photographer with the memberships that link them into clubs.
#[derive(Debug, Serialize)]
pub struct PhotographerView {
  pub photographer: Photographer,
  pub memberships:  Vec<MemberPortfolio>,
}

/// `GET /photographers/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<PhotographerView>, ApiError>
where
  S: HubStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let photographer = store
    .get_photographer(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("photographer {id}")))?;

  let memberships = store
    .portfolios_of_photographer(photographer.id)
    .await
    .map_err(ApiError::store)?;

  Ok(Json(PhotographerView { photographer, memberships }))
}
