//! Record store seam.
//!
//! The query engine is storage-agnostic: it only needs a consistent
//! snapshot of the records per call. [`RecordStore`] is that seam, and
//! [`MemoryStore`] is the in-process implementation used by tests and by
//! embedders that hold the whole directory in memory. A database-backed
//! store plugs in behind the same trait.

use ahash::AHashMap as HashMap;
use chrono::Utc;
use thiserror::Error;

use crate::model::{Location, LocationDraft, LocationId, ModelError};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record store unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Read access to the durable holder of location records.
///
/// Each method observes a consistent snapshot of the store's current
/// contents; read-committed semantics are sufficient. Failures surface as
/// [`StoreError`] and are propagated unchanged; retry policy, if any,
/// belongs to the implementation.
pub trait RecordStore {
    /// All records, in no particular order.
    fn snapshot(&self) -> Result<Vec<Location>>;

    /// Point lookup by id.
    fn get(&self, id: LocationId) -> Result<Option<Location>>;

    /// Total number of records, unfiltered.
    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// In-memory [`RecordStore`] with sequential id assignment and
/// store-managed timestamps.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<LocationId, Location>,
    next_id: LocationId,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new record, assigning its id and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyTitle`] when the draft's title is blank.
    pub fn insert(&mut self, draft: LocationDraft) -> std::result::Result<LocationId, ModelError> {
        draft.validate()?;
        self.next_id += 1;
        let id = self.next_id;
        let now = Utc::now();
        self.records.insert(
            id,
            Location {
                id,
                title: draft.title,
                description: draft.description,
                address: draft.address,
                coords: draft.coords,
                status: draft.status,
                opening_hours: draft.opening_hours,
                ticket_price: draft.ticket_price,
                website: draft.website,
                phone: draft.phone,
                visitor_notes: draft.visitor_notes,
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    /// Replace the caller-provided fields of an existing record, bumping
    /// `updated_at` and keeping `created_at`.
    ///
    /// Returns false when no record has the given id.
    pub fn update(
        &mut self,
        id: LocationId,
        draft: LocationDraft,
    ) -> std::result::Result<bool, ModelError> {
        draft.validate()?;
        let Some(existing) = self.records.get_mut(&id) else {
            return Ok(false);
        };
        existing.title = draft.title;
        existing.description = draft.description;
        existing.address = draft.address;
        existing.coords = draft.coords;
        existing.status = draft.status;
        existing.opening_hours = draft.opening_hours;
        existing.ticket_price = draft.ticket_price;
        existing.website = draft.website;
        existing.phone = draft.phone;
        existing.visitor_notes = draft.visitor_notes;
        existing.updated_at = Utc::now();
        Ok(true)
    }

    /// Remove a record, returning it if it existed.
    pub fn remove(&mut self, id: LocationId) -> Option<Location> {
        self.records.remove(&id)
    }
}

impl RecordStore for MemoryStore {
    fn snapshot(&self) -> Result<Vec<Location>> {
        Ok(self.records.values().cloned().collect())
    }

    fn get(&self, id: LocationId) -> Result<Option<Location>> {
        Ok(self.records.get(&id).cloned())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let mut store = MemoryStore::new();
        let first = store.insert(LocationDraft::titled("Colosseo")).unwrap();
        let second = store.insert(LocationDraft::titled("Duomo")).unwrap();
        assert!(second > first);
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn test_insert_rejects_blank_title() {
        let mut store = MemoryStore::new();
        assert_eq!(
            store.insert(LocationDraft::titled("  ")),
            Err(ModelError::EmptyTitle)
        );
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_update_bumps_updated_at_only() {
        let mut store = MemoryStore::new();
        let id = store.insert(LocationDraft::titled("Colosseo")).unwrap();
        let created_at = store.get(id).unwrap().unwrap().created_at;

        let mut draft = LocationDraft::titled("Colosseo");
        draft.status = Status::Alarmed;
        assert!(store.update(id, draft).unwrap());

        let record = store.get(id).unwrap().unwrap();
        assert_eq!(record.status, Status::Alarmed);
        assert_eq!(record.created_at, created_at);
        assert!(record.updated_at >= created_at);
    }

    #[test]
    fn test_update_missing_record_is_false() {
        let mut store = MemoryStore::new();
        assert!(!store.update(42, LocationDraft::titled("Ghost")).unwrap());
    }

    #[test]
    fn test_remove() {
        let mut store = MemoryStore::new();
        let id = store.insert(LocationDraft::titled("Colosseo")).unwrap();
        assert!(store.remove(id).is_some());
        assert!(store.get(id).unwrap().is_none());
    }
}
