//! Allocation failure injection for rollback tests.
//!
//! State is thread-local, so tests running in parallel do not interfere.
//! Every [`Allocator`](crate::Allocator) call on the current thread consults
//! it.
//!
//! ```
//! use strata_mem::{Allocator, fault};
//!
//! let _guard = fault::fail_after(1);
//! let a = Allocator::<u64>::allocate(4).unwrap();
//! assert!(Allocator::<u64>::allocate(4).is_err());
//! unsafe { Allocator::<u64>::deallocate(a, 4) };
//! ```

use std::cell::Cell;

thread_local! {
    static REMAINING: Cell<Option<usize>> = const { Cell::new(None) };
    static LIVE: Cell<isize> = const { Cell::new(0) };
}

/// Disarms injection when dropped.
#[must_use = "injection is disarmed as soon as the guard is dropped"]
#[derive(Debug)]
pub struct FaultGuard {
    _private: (),
}

impl Drop for FaultGuard {
    fn drop(&mut self) {
        REMAINING.with(|r| r.set(None));
    }
}

/// Lets the next `n` allocations on this thread succeed, then fails every
/// allocation until the returned guard is dropped.
pub fn fail_after(n: usize) -> FaultGuard {
    REMAINING.with(|r| r.set(Some(n)));
    FaultGuard { _private: () }
}

/// Number of allocations made on this thread that have not been freed.
///
/// Compare before and after an operation to detect leaks.
pub fn live_allocations() -> isize {
    LIVE.with(Cell::get)
}

pub(crate) fn should_fail() -> bool {
    REMAINING.with(|r| match r.get() {
        None => false,
        Some(0) => true,
        Some(n) => {
            r.set(Some(n - 1));
            false
        }
    })
}

pub(crate) fn record_alloc() {
    LIVE.with(|l| l.set(l.get() + 1));
}

pub(crate) fn record_dealloc() {
    LIVE.with(|l| l.set(l.get() - 1));
}
