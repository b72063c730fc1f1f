//! Read-only JSON API over the club graph.
//!
//! Exposes an axum [`Router`] backed by any [`fotohub_core::store::HubStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//! Mutation happens exclusively through the sync loaders — the API is the
//! query surface the (out-of-process) views read.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", fotohub_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod organizations;
pub mod photographers;

use std::sync::Arc;

use axum::{Router, routing::get};
use fotohub_core::store::HubStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: HubStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Organizations
    .route("/organizations", get(organizations::list::<S>))
    .route("/organizations/{id}", get(organizations::get_one::<S>))
    .route(
      "/organizations/{id}/members",
      get(organizations::members::<S>),
    )
    // Photographers
    .route("/photographers", get(photographers::list::<S>))
    .route("/photographers/{id}", get(photographers::get_one::<S>))
    .with_state(store)
}
