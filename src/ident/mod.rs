//! Identifier types and deterministic local-ID derivation.
//!
//! The backend assigns opaque string IDs; the application works with stable
//! numeric IDs derived from them. Derivation must produce the same value on
//! every platform that shares the backend, so it is written out explicitly
//! rather than delegated to `std::hash` (whose output is seeded per process).

pub mod map;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use map::IdMap;

/// Opaque record identifier assigned by the remote backend.
///
/// Unique per record and stable across reads; never parsed or interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteId(String);

impl RemoteId {
    /// Wraps a backend-assigned identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the identifier is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RemoteId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Application-facing numeric identifier, derived from a [`RemoteId`].
///
/// Always fits in 31 bits so the value stays positive under any client's
/// native signed 32-bit representation. Zero is reserved as the "unset"
/// sentinel and is never produced by [`derive_local_id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocalId(u32);

impl LocalId {
    /// Wraps a raw identifier value, masking it to 31 bits.
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id & 0x7FFF_FFFF)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Returns `true` for the reserved zero sentinel.
    #[must_use]
    pub fn is_unset(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Derives the stable [`LocalId`] for a remote identifier string.
///
/// Iterates the string's UTF-16 code units, folding each into a running hash
/// `h = ((h << 5) - h + unit) & 0x7FFF_FFFF` (`h * 31 + unit`, masked to 31
/// bits each step so the result is positive under 32-bit signed arithmetic).
/// The empty string, or an input whose hash lands on zero, maps to `1`.
///
/// Pure and total: identical input always yields identical output, on every
/// platform. Distinct inputs may collide; collisions are not detected.
#[must_use]
pub fn derive_local_id(remote: &str) -> LocalId {
    let mut h: u32 = 0;
    for unit in remote.encode_utf16() {
        h = h.wrapping_shl(5).wrapping_sub(h).wrapping_add(u32::from(unit)) & 0x7FFF_FFFF;
    }
    if h == 0 {
        h = 1;
    }
    LocalId(h)
}

impl From<&RemoteId> for LocalId {
    fn from(remote: &RemoteId) -> Self {
        derive_local_id(remote.as_str())
    }
}
