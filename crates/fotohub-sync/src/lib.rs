//! The reconciliation layer: find-create-update for the club graph.
//!
//! Every data source — hardcoded seed rosters, the scraped member page,
//! the remote organization feed — produces attribute patches that the
//! [`SyncEngine`] reconciles into the store: find by identity, create if
//! missing, overwrite only fields that actually changed, never erase a
//! value by omission.

pub mod engine;
pub mod error;
pub mod feed;
pub mod policy;
pub mod queue;
pub mod registry;
pub mod roster;
pub mod seed;

mod fetch;

pub use engine::{FcuOutcome, NewMember, Reconciled, SyncEngine};
pub use error::{Error, Result};
pub use policy::FailurePolicy;
pub use queue::LoadQueue;
pub use registry::TypeRegistry;
