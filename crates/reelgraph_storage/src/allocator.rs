//! Monotonic identifier allocation.
//!
//! Identifiers are never reused for the lifetime of an allocator, even if
//! the record they were issued for is later rejected or removed. The
//! allocator refuses to wrap: once `u64::MAX` is reached it stops issuing.

use std::sync::atomic::{AtomicU64, Ordering};

use reelgraph_foundation::{Error, Result};

/// Issues strictly increasing identifiers.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new(1)
    }
}

impl IdAllocator {
    /// Creates an allocator whose first identifier is `first`.
    #[must_use]
    pub fn new(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Issues the next identifier.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` once the identifier space is exhausted.
    pub fn next_id(&self) -> Result<u64> {
        self.next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
            .map_err(|last| Error::invalid_argument(format!("identifier space exhausted at {last}")))
    }

    /// The identifier the next call to [`next_id`](Self::next_id) would return.
    #[must_use]
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}
