//! Regulus Domain Layer
//!
//! This crate contains the core domain model shared by every other layer of
//! Regulus: the regulatory `Record` entity, its identifier, the `Priority`
//! scale, and the trait interface to the persistence collaborator.
//!
//! ## Key Concepts
//!
//! - **Record**: one aggregated regulatory item (an update, a legal case, a
//!   newsletter entry) as ingested from an external source
//! - **Priority**: the four-step urgency scale (low → medium → high → critical)
//! - **RecordStore**: the storage boundary - Regulus reads whole collections
//!   and hands back accepted remediations, nothing more
//!
//! ## Architecture
//!
//! The quality engine treats records as immutable input; anything that looks
//! like a mutation (standardization, deduplication) produces new values that
//! the caller may or may not persist through `RecordStore`. Infrastructure
//! implementations of the store live outside this workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod priority;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use priority::Priority;
pub use record::{Record, RecordId};
pub use traits::RecordStore;
