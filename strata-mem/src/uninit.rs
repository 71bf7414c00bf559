//! Algorithms that construct values into uninitialized storage.
//!
//! The general forms walk cursors and construct one element at a time. If a
//! clone panics part way through, every element already constructed by that
//! call is dropped in reverse order before the panic continues, so the
//! destination is left fully uninitialized again.
//!
//! The `*_bitwise` forms take raw pointers and require `T: Copy`; they lower
//! to `memset`/`memcpy`. Relocation (`uninitialized_move*`) is always a bitwise
//! copy and cannot fail; the source slots are logically uninitialized after.

use std::mem;
use std::ptr;

use strata_cursor::{BidirectionalCursor, Category, Cursor};

use crate::alloc::Allocator;

/// Destroys `[start, cur)` in reverse unless finished.
struct Rollback<C: BidirectionalCursor> {
    start: C,
    cur: C,
    armed: bool,
}

impl<C: BidirectionalCursor> Rollback<C> {
    #[inline]
    fn new(dst: C) -> Self {
        Self {
            start: dst.clone(),
            cur: dst,
            armed: true,
        }
    }

    #[inline]
    fn finish(mut self) -> C {
        self.armed = false;
        self.cur.clone()
    }
}

impl<C: BidirectionalCursor> Drop for Rollback<C> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        while self.cur != self.start {
            // Safety: every slot in [start, cur) was constructed by this call
            unsafe {
                self.cur.dec();
                Allocator::<C::Value>::destroy(self.cur.as_ptr());
            }
        }
    }
}

// =============================================================================
// General path
// =============================================================================

/// Constructs `n` clones of `value` starting at `dst`. Returns the cursor
/// past the last constructed element.
///
/// # Safety
///
/// `[dst, dst + n)` must be uninitialized, writable and reachable by `inc`.
pub unsafe fn uninitialized_fill_n<O>(dst: O, n: usize, value: &O::Value) -> O
where
    O: BidirectionalCursor,
    O::Value: Clone,
{
    let mut guard = Rollback::new(dst);
    for _ in 0..n {
        unsafe {
            Allocator::construct_clone(guard.cur.as_ptr(), value);
            guard.cur.inc();
        }
    }
    guard.finish()
}

/// Constructs clones of `value` into every slot of `[first, last)`.
///
/// # Safety
///
/// Every slot in the range must be uninitialized and writable.
pub unsafe fn uninitialized_fill<O>(first: O, last: O, value: &O::Value)
where
    O: BidirectionalCursor,
    O::Value: Clone,
{
    let mut guard = Rollback::new(first);
    while guard.cur != last {
        unsafe {
            Allocator::construct_clone(guard.cur.as_ptr(), value);
            guard.cur.inc();
        }
    }
    guard.finish();
}

/// Constructs `n` values produced by `f` starting at `dst`.
///
/// # Safety
///
/// Same as [`uninitialized_fill_n`].
pub unsafe fn uninitialized_fill_with<O, F>(dst: O, n: usize, mut f: F) -> O
where
    O: BidirectionalCursor,
    F: FnMut() -> O::Value,
{
    let mut guard = Rollback::new(dst);
    for _ in 0..n {
        unsafe {
            Allocator::construct_with(guard.cur.as_ptr(), &mut f);
            guard.cur.inc();
        }
    }
    guard.finish()
}

/// Clones `[first, last)` into uninitialized storage at `dst`. Returns the
/// cursor past the last constructed element.
///
/// Random-access sources loop on a precomputed count; other sources loop
/// until `first == last`.
///
/// # Safety
///
/// The source range must be valid and the destination must have room for
/// every element.
pub unsafe fn uninitialized_copy<I, O>(mut first: I, last: I, dst: O) -> O
where
    I: Cursor,
    I::Value: Clone,
    O: BidirectionalCursor<Value = I::Value>,
{
    let mut guard = Rollback::new(dst);
    if I::Category::KIND.is_random_access() {
        let n = unsafe { first.distance_to(&last) };
        for _ in 0..n {
            unsafe {
                Allocator::construct_clone(guard.cur.as_ptr(), &*first.as_ptr());
                first.inc();
                guard.cur.inc();
            }
        }
    } else {
        while first != last {
            unsafe {
                Allocator::construct_clone(guard.cur.as_ptr(), &*first.as_ptr());
                first.inc();
                guard.cur.inc();
            }
        }
    }
    guard.finish()
}

/// Clones `n` elements starting at `first` into `dst`. Returns the advanced
/// source and destination cursors.
///
/// # Safety
///
/// Same as [`uninitialized_copy`].
pub unsafe fn uninitialized_copy_n<I, O>(mut first: I, n: usize, dst: O) -> (I, O)
where
    I: Cursor,
    I::Value: Clone,
    O: BidirectionalCursor<Value = I::Value>,
{
    let mut guard = Rollback::new(dst);
    for _ in 0..n {
        unsafe {
            Allocator::construct_clone(guard.cur.as_ptr(), &*first.as_ptr());
            first.inc();
            guard.cur.inc();
        }
    }
    (first, guard.finish())
}

/// Relocates `[first, last)` to `dst`, front to back.
///
/// Overlap is allowed when `dst` precedes `first`.
///
/// # Safety
///
/// The destination slots must be writable; their previous contents are
/// overwritten without being dropped. The source slots must be treated as
/// uninitialized afterwards.
pub unsafe fn uninitialized_move<I, O>(mut first: I, last: I, mut dst: O) -> O
where
    I: Cursor,
    O: Cursor<Value = I::Value>,
{
    while first != last {
        unsafe {
            dst.as_ptr().write(first.as_ptr().read());
            first.inc();
            dst.inc();
        }
    }
    dst
}

/// Relocates `[first, last)` so that it ends at `dst_last`, back to front.
/// Returns the cursor to the first relocated element.
///
/// Overlap is allowed when `dst_last` follows `last`.
///
/// # Safety
///
/// Same as [`uninitialized_move`].
pub unsafe fn uninitialized_move_backward<I, O>(first: I, mut last: I, mut dst_last: O) -> O
where
    I: BidirectionalCursor,
    O: BidirectionalCursor<Value = I::Value>,
{
    while last != first {
        unsafe {
            last.dec();
            dst_last.dec();
            dst_last.as_ptr().write(last.as_ptr().read());
        }
    }
    dst_last
}

/// Drops every element in `[first, last)`.
///
/// Skipped entirely for types without drop glue.
///
/// # Safety
///
/// Every element in the range must be live, and is dead afterwards.
pub unsafe fn destroy<C: Cursor>(mut first: C, last: C) {
    if !mem::needs_drop::<C::Value>() {
        return;
    }
    while first != last {
        unsafe {
            Allocator::<C::Value>::destroy(first.as_ptr());
            first.inc();
        }
    }
}

// =============================================================================
// Bitwise path
// =============================================================================

/// Writes `n` copies of `value` at `dst`. Single-byte types use `memset`.
///
/// # Safety
///
/// `[dst, dst + n)` must be writable.
pub unsafe fn uninitialized_fill_n_bitwise<T: Copy>(dst: *mut T, n: usize, value: T) -> *mut T {
    if mem::size_of::<T>() == 1 {
        // Safety: T is exactly one byte
        let byte = unsafe { mem::transmute_copy::<T, u8>(&value) };
        unsafe { ptr::write_bytes(dst.cast::<u8>(), byte, n) };
    } else {
        for i in 0..n {
            unsafe { dst.add(i).write(value) };
        }
    }
    unsafe { dst.add(n) }
}

/// Copies `[first, last)` to `dst` with a single `memcpy`.
///
/// # Safety
///
/// The ranges must not overlap and `dst` must have room for every element.
pub unsafe fn uninitialized_copy_bitwise<T: Copy>(
    first: *const T,
    last: *const T,
    dst: *mut T,
) -> *mut T {
    let n = unsafe { last.offset_from(first) } as usize;
    unsafe {
        ptr::copy_nonoverlapping(first, dst, n);
        dst.add(n)
    }
}
