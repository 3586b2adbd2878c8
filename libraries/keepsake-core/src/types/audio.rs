/// Audio-related types
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_HANDLE_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque reference to a loaded, playable audio resource
///
/// Deliberately neither `Clone` nor `Copy`: whoever holds the value owns the
/// platform resource and must hand it back through `AudioBackend::release`.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct AudioHandle(u64);

impl AudioHandle {
    /// Wrap a backend-assigned handle id
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Allocate a process-unique handle id
    ///
    /// For backends that have no native identifier of their own.
    #[must_use]
    pub fn generate() -> Self {
        Self(NEXT_HANDLE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw handle id
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AudioHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "audio#{}", self.0)
    }
}
