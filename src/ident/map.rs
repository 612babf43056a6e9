//! Bidirectional cache pairing local numeric IDs with remote string IDs.
//!
//! Repositories derive a [`LocalId`] the first time a record is fetched,
//! created, or searched, and need the original [`RemoteId`] back for later
//! update/delete calls. This cache remembers discovered pairs for the life of
//! the owning repository. It is an ordinary owned value: construct it where
//! the repository is constructed and pass it by reference; there is no shared
//! global state and no locking (callers run on a single logical thread,
//! suspending only at network boundaries).

use std::collections::HashMap;

use super::{LocalId, RemoteId};

/// Two coupled lookup tables, local→remote and remote→local.
///
/// Every insertion writes both directions and every removal clears both, so
/// the tables never disagree. A lookup miss is an absence, not an error:
/// callers rebuild missing entries by scanning all remote records and
/// re-deriving each local ID.
#[derive(Debug, Default)]
pub struct IdMap {
    to_remote: HashMap<LocalId, RemoteId>,
    to_local: HashMap<RemoteId, LocalId>,
}

impl IdMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a discovered pair in both directions.
    ///
    /// Overwrites existing entries for either key, unlinking any stale
    /// counterpart so no half-pair survives. A zero local ID or empty remote
    /// ID is ignored (zero is the "unset" sentinel).
    pub fn record(&mut self, local: LocalId, remote: RemoteId) {
        if local.is_unset() || remote.is_empty() {
            return;
        }
        if let Some(stale) = self.to_remote.insert(local, remote.clone()) {
            if stale != remote {
                self.to_local.remove(&stale);
            }
        }
        if let Some(stale) = self.to_local.insert(remote, local) {
            if stale != local {
                self.to_remote.remove(&stale);
            }
        }
    }

    /// Looks up the remote ID recorded for `local`, if any.
    #[must_use]
    pub fn remote_of(&self, local: LocalId) -> Option<&RemoteId> {
        self.to_remote.get(&local)
    }

    /// Looks up the local ID recorded for `remote`, if any.
    ///
    /// Present for symmetry; callers may instead recompute the local ID
    /// directly from the remote string.
    #[must_use]
    pub fn local_of(&self, remote: &RemoteId) -> Option<LocalId> {
        self.to_local.get(remote).copied()
    }

    /// Removes the pair recorded for `local` from both directions.
    ///
    /// Used when the backing record is deleted. A miss is a no-op.
    pub fn forget(&mut self, local: LocalId) {
        if let Some(remote) = self.to_remote.remove(&local) {
            self.to_local.remove(&remote);
        }
    }

    /// Number of recorded pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.to_remote.len()
    }

    /// Returns `true` when no pairs are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_remote.is_empty()
    }
}
