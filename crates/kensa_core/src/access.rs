//! Exclusive-access regions over the source tree.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Arbitrates read and write access to the source tree for one engine run.
///
/// Created once by the caller and threaded through the run; never a hidden
/// static. Analysis holds the read region for a whole tool pass, the
/// transactional fix phase holds the write region, and the two regions are
/// never open at the same time. Guards release on every exit path.
#[derive(Debug, Default)]
pub struct AccessArbiter {
    tree: RwLock<()>,
}

impl AccessArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the read region. Source-tree mutation is forbidden while a
    /// read guard is live.
    pub fn acquire_read(&self) -> ReadGuard<'_> {
        ReadGuard {
            _guard: self.tree.read(),
        }
    }

    /// Acquires the exclusive write region.
    pub fn acquire_write(&self) -> WriteGuard<'_> {
        WriteGuard {
            _guard: self.tree.write(),
        }
    }
}

/// RAII guard for the read region.
pub struct ReadGuard<'a> {
    _guard: RwLockReadGuard<'a, ()>,
}

/// RAII guard for the write region.
pub struct WriteGuard<'a> {
    _guard: RwLockWriteGuard<'a, ()>,
}
