//! Error types shared by every strata container.

use std::alloc::Layout;

use thiserror::Error;

/// The global allocator returned null for `layout`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("memory allocation of {} bytes failed", layout.size())]
pub struct AllocError {
    /// Layout of the failed request.
    pub layout: Layout,
}

/// Error returned by fallible (`try_*`) growth operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TryReserveError {
    /// The requested element count exceeds what the address space can hold.
    #[error("capacity overflow")]
    CapacityOverflow,
    /// The allocator could not satisfy the request.
    #[error(transparent)]
    AllocError(#[from] AllocError),
}

impl TryReserveError {
    /// Escalates the error the way infallible operations do: aborts through
    /// [`std::alloc::handle_alloc_error`] on allocation failure, panics with
    /// `"capacity overflow"` otherwise.
    #[cold]
    #[track_caller]
    pub fn handle(self) -> ! {
        match self {
            TryReserveError::CapacityOverflow => panic!("capacity overflow"),
            TryReserveError::AllocError(e) => std::alloc::handle_alloc_error(e.layout),
        }
    }
}

/// Checked index access outside `[0, len)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("index {index} out of range for length {len}")]
pub struct RangeError {
    /// Requested index.
    pub index: usize,
    /// Length of the container at the time of the call.
    pub len: usize,
}
