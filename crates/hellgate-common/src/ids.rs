//! Identifiers for mobile objects and sound effects.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Next id handed out by [`EntityId::new`]. Zero is reserved for [`EntityId::NULL`].
static NEXT_MOBJ: AtomicU64 = AtomicU64::new(1);

/// Process-unique handle of a mobile object.
///
/// Ids are never reused, so a stale id held after a despawn fails lookup
/// instead of aliasing a newer object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Refers to no object.
    pub const NULL: Self = Self(0);

    /// Allocates a fresh id.
    #[must_use]
    pub fn new() -> Self {
        Self(NEXT_MOBJ.fetch_add(1, Ordering::Relaxed))
    }

    /// Rebuilds an id from a logged or serialized value.
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// The raw counter value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// False only for [`EntityId::NULL`].
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mobj#{}", self.0)
    }
}

/// Index of a sound effect in the platform's sound table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundId(u16);

impl SoundId {
    /// Wraps a sound table index.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// The sound table index.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}
