//! Trait definitions for external interactions
//!
//! These traits define the boundary between the quality engine and the
//! persistence infrastructure. Implementations live outside this workspace.

use crate::{Record, RecordId};

/// Trait for storing and retrieving regulatory records
///
/// The quality engine only ever needs whole collections plus per-id
/// update/delete for accepted remediations; querying and pagination belong
/// to the collaborator.
pub trait RecordStore {
    /// Error type for store operations
    type Error;

    /// Fetch every record of the collection
    fn get_all(&self) -> Result<Vec<Record>, Self::Error>;

    /// Get a record by ID
    fn get(&self, id: RecordId) -> Result<Option<Record>, Self::Error>;

    /// Replace a stored record with an updated value, keyed by its id
    fn update(&mut self, record: Record) -> Result<(), Self::Error>;

    /// Delete a record by ID
    fn delete(&mut self, id: RecordId) -> Result<(), Self::Error>;
}
