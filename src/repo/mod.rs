//! Repository adapters over the generic data source.
//!
//! Repositories translate between entities (numeric IDs) and the backend's
//! records (opaque string IDs). Each repository borrows the service context
//! and owns the [`IdIndex`] for the collections it touches; nothing here is
//! shared global state.

pub mod courses;
pub mod enrollments;
pub mod periods;

pub use courses::CourseRepository;
pub use enrollments::EnrollmentRepository;
pub use periods::PeriodRepository;

use crate::ident::{derive_local_id, IdMap, LocalId, RemoteId};
use crate::ports::data_source::{remote_id_of, DataSource, Record};

/// Per-collection ID bookkeeping: derivation plus the bidirectional cache.
///
/// `observe` is called for every record that passes through a repository, so
/// the cache fills as a side effect of ordinary reads. `resolve` recovers the
/// remote ID needed for update/delete calls, falling back to a full scan of
/// the collection when the cache misses (O(n) in the collection size; the
/// accepted cost of not persisting the mapping).
pub(crate) struct IdIndex {
    collection: &'static str,
    ids: IdMap,
}

impl IdIndex {
    pub(crate) fn new(collection: &'static str) -> Self {
        Self { collection, ids: IdMap::new() }
    }

    /// Derives the local ID for a stored record and caches the pair.
    ///
    /// # Errors
    ///
    /// Returns an error when the record has no usable `_id`.
    pub(crate) fn observe(&mut self, record: &Record) -> Result<LocalId, String> {
        let remote = remote_id_of(record)
            .map_err(|e| format!("malformed {} record: {e}", self.collection))?;
        let local = derive_local_id(remote);
        self.ids.record(local, RemoteId::new(remote));
        Ok(local)
    }

    /// Recovers the remote ID for `local`, scanning the collection on a miss.
    ///
    /// # Errors
    ///
    /// Returns a "no record found" error when the scan also misses, or a
    /// transport error from the scan itself.
    pub(crate) async fn resolve(
        &mut self,
        data: &dyn DataSource,
        local: LocalId,
    ) -> Result<RemoteId, String> {
        if let Some(remote) = self.ids.remote_of(local) {
            return Ok(remote.clone());
        }

        // Cache miss: rebuild from the collection, re-deriving every ID.
        let records = data
            .get_all(self.collection)
            .await
            .map_err(|e| format!("Failed to scan {} for id {local}: {e}", self.collection))?;
        for record in &records {
            if let Ok(remote) = remote_id_of(record) {
                self.ids.record(derive_local_id(remote), RemoteId::new(remote));
            }
        }

        self.ids
            .remote_of(local)
            .cloned()
            .ok_or_else(|| format!("no {} record found for id {local}", self.collection))
    }

    /// Drops the cached pair for a deleted record.
    pub(crate) fn forget(&mut self, local: LocalId) {
        self.ids.forget(local);
    }
}
