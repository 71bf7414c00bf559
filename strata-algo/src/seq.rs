//! Fill, copy, move, compare and search over cursor ranges.
//!
//! Ranges are half-open `[first, last)` pairs of cursors. Destination ranges
//! hold live values, which are overwritten by assignment (the previous value
//! is dropped). Random-access inputs iterate on a precomputed count, so the
//! loop has no cursor comparison per element.

use std::cmp::Ordering;
use std::mem;
use std::ptr;

use strata_cursor::{BidirectionalCursor, Category, Cursor, ForwardCursor};
use strata_mem::precondition;

use crate::compare::{Compare, EqualTo, Equivalence, Less};

#[inline]
unsafe fn count<C: Cursor>(first: &C, last: &C) -> Option<isize> {
    if C::Category::KIND.is_random_access() {
        Some(unsafe { first.distance_to(last) })
    } else {
        None
    }
}

// =============================================================================
// Fill
// =============================================================================

/// Assigns a clone of `value` to every element of `[first, last)`.
///
/// # Safety
///
/// The range must be valid and every element live.
pub unsafe fn fill<C>(mut first: C, last: C, value: &C::Value)
where
    C: ForwardCursor,
    C::Value: Clone,
{
    match unsafe { count(&first, &last) } {
        Some(n) => {
            for _ in 0..n {
                unsafe {
                    (*first.as_ptr()).clone_from(value);
                    first.inc();
                }
            }
        }
        None => {
            while first != last {
                unsafe {
                    (*first.as_ptr()).clone_from(value);
                    first.inc();
                }
            }
        }
    }
}

/// Assigns a clone of `value` to `n` elements starting at `first`. Returns the
/// cursor past the last assigned element.
///
/// # Safety
///
/// `n` live elements must be reachable from `first`.
pub unsafe fn fill_n<C>(mut first: C, n: usize, value: &C::Value) -> C
where
    C: Cursor,
    C::Value: Clone,
{
    for _ in 0..n {
        unsafe {
            (*first.as_ptr()).clone_from(value);
            first.inc();
        }
    }
    first
}

/// Fills `[first, last)` with `value` using `memset` for single-byte types.
///
/// # Safety
///
/// Both pointers must belong to the same allocation with `first <= last`.
pub unsafe fn fill_trivial<T: Copy>(first: *mut T, last: *mut T, value: T) {
    precondition!(first <= last);
    let n = unsafe { last.offset_from(first) } as usize;
    if mem::size_of::<T>() == 1 {
        // Safety: T is exactly one byte
        let byte = unsafe { mem::transmute_copy::<T, u8>(&value) };
        unsafe { ptr::write_bytes(first.cast::<u8>(), byte, n) };
    } else {
        for i in 0..n {
            unsafe { first.add(i).write(value) };
        }
    }
}

// =============================================================================
// Copy / move
// =============================================================================

/// Clone-assigns `[first, last)` onto `dst`. Returns the cursor past the last
/// assigned destination element.
///
/// # Safety
///
/// Source and destination must be valid. Overlap is allowed only when `dst`
/// precedes `first`.
pub unsafe fn copy<I, O>(mut first: I, last: I, mut dst: O) -> O
where
    I: Cursor,
    I::Value: Clone,
    O: Cursor<Value = I::Value>,
{
    match unsafe { count(&first, &last) } {
        Some(n) => {
            for _ in 0..n {
                unsafe {
                    (*dst.as_ptr()).clone_from(&*first.as_ptr());
                    first.inc();
                    dst.inc();
                }
            }
        }
        None => {
            while first != last {
                unsafe {
                    (*dst.as_ptr()).clone_from(&*first.as_ptr());
                    first.inc();
                    dst.inc();
                }
            }
        }
    }
    dst
}

/// Clone-assigns `[first, last)` so it ends at `dst_last`, back to front.
/// Returns the cursor to the first assigned destination element.
///
/// # Safety
///
/// Overlap is allowed only when `dst_last` follows `last`.
pub unsafe fn copy_backward<I, O>(first: I, mut last: I, mut dst_last: O) -> O
where
    I: BidirectionalCursor,
    I::Value: Clone,
    O: BidirectionalCursor<Value = I::Value>,
{
    match unsafe { count(&first, &last) } {
        Some(n) => {
            for _ in 0..n {
                unsafe {
                    last.dec();
                    dst_last.dec();
                    (*dst_last.as_ptr()).clone_from(&*last.as_ptr());
                }
            }
        }
        None => {
            while first != last {
                unsafe {
                    last.dec();
                    dst_last.dec();
                    (*dst_last.as_ptr()).clone_from(&*last.as_ptr());
                }
            }
        }
    }
    dst_last
}

/// Move-assigns `[first, last)` onto `dst`, leaving `T::default()` behind in
/// each source slot.
///
/// # Safety
///
/// Same as [`copy`].
pub unsafe fn move_assign<I, O>(mut first: I, last: I, mut dst: O) -> O
where
    I: Cursor,
    I::Value: Default,
    O: Cursor<Value = I::Value>,
{
    while first != last {
        unsafe {
            *dst.as_ptr() = mem::take(&mut *first.as_ptr());
            first.inc();
            dst.inc();
        }
    }
    dst
}

/// Move-assigns `[first, last)` so it ends at `dst_last`, back to front.
///
/// # Safety
///
/// Same as [`copy_backward`].
pub unsafe fn move_backward<I, O>(first: I, mut last: I, mut dst_last: O) -> O
where
    I: BidirectionalCursor,
    I::Value: Default,
    O: BidirectionalCursor<Value = I::Value>,
{
    while first != last {
        unsafe {
            last.dec();
            dst_last.dec();
            *dst_last.as_ptr() = mem::take(&mut *last.as_ptr());
        }
    }
    dst_last
}

/// `memmove` of `[first, last)` to `dst`. Returns `dst + (last - first)`.
///
/// # Safety
///
/// Both ranges must be valid for `T: Copy` values; they may overlap.
pub unsafe fn copy_trivial<T: Copy>(first: *const T, last: *const T, dst: *mut T) -> *mut T {
    let n = unsafe { last.offset_from(first) } as usize;
    unsafe {
        ptr::copy(first, dst, n);
        dst.add(n)
    }
}

/// `memmove` of `[first, last)` so it ends at `dst_last`. Returns the start of
/// the destination.
///
/// # Safety
///
/// Same as [`copy_trivial`].
pub unsafe fn copy_backward_trivial<T: Copy>(
    first: *const T,
    last: *const T,
    dst_last: *mut T,
) -> *mut T {
    let n = unsafe { last.offset_from(first) } as usize;
    unsafe {
        let dst = dst_last.sub(n);
        ptr::copy(first, dst, n);
        dst
    }
}

/// Swaps each element of `[first, last)` with the matching one at `other`.
///
/// # Safety
///
/// The ranges must not overlap.
pub unsafe fn swap_ranges<I, O>(mut first: I, last: I, mut other: O) -> O
where
    I: Cursor,
    O: Cursor<Value = I::Value>,
{
    while first != last {
        unsafe {
            ptr::swap(first.as_ptr(), other.as_ptr());
            first.inc();
            other.inc();
        }
    }
    other
}

/// Reverses `[first, last)` in place.
///
/// # Safety
///
/// The range must be valid.
pub unsafe fn reverse<C: BidirectionalCursor>(mut first: C, mut last: C) {
    loop {
        if first == last {
            return;
        }
        unsafe { last.dec() };
        if first == last {
            return;
        }
        unsafe {
            ptr::swap(first.as_ptr(), last.as_ptr());
            first.inc();
        }
    }
}

// =============================================================================
// Compare / search
// =============================================================================

/// `true` if `[first1, last1)` equals the same-length range at `first2`.
///
/// # Safety
///
/// `first2` must have at least as many elements as the first range.
pub unsafe fn equal<I1, I2>(first1: I1, last1: I1, first2: I2) -> bool
where
    I1: Cursor,
    I2: Cursor<Value = I1::Value>,
    I1::Value: PartialEq,
{
    unsafe { equal_by(first1, last1, first2, EqualTo) }
}

/// [`equal`] with a caller-supplied predicate.
///
/// # Safety
///
/// Same as [`equal`].
pub unsafe fn equal_by<I1, I2, E>(mut first1: I1, last1: I1, mut first2: I2, eq: E) -> bool
where
    I1: Cursor,
    I2: Cursor<Value = I1::Value>,
    E: Equivalence<I1::Value>,
{
    while first1 != last1 {
        let same = unsafe { eq.eq(&*first1.as_ptr(), &*first2.as_ptr()) };
        if !same {
            return false;
        }
        unsafe {
            first1.inc();
            first2.inc();
        }
    }
    true
}

/// `true` if `[first1, last1)` orders before `[first2, last2)`.
///
/// # Safety
///
/// Both ranges must be valid.
pub unsafe fn lexicographical_compare<I1, I2>(first1: I1, last1: I1, first2: I2, last2: I2) -> bool
where
    I1: Cursor,
    I2: Cursor<Value = I1::Value>,
    I1::Value: PartialOrd,
{
    unsafe { lexicographical_compare_by(first1, last1, first2, last2, Less) }
}

/// [`lexicographical_compare`] with a caller-supplied ordering.
///
/// # Safety
///
/// Both ranges must be valid.
pub unsafe fn lexicographical_compare_by<I1, I2, P>(
    mut first1: I1,
    last1: I1,
    mut first2: I2,
    last2: I2,
    cmp: P,
) -> bool
where
    I1: Cursor,
    I2: Cursor<Value = I1::Value>,
    P: Compare<I1::Value>,
{
    while first1 != last1 && first2 != last2 {
        let (a, b) = unsafe { (&*first1.as_ptr(), &*first2.as_ptr()) };
        if cmp.less(a, b) {
            return true;
        }
        if cmp.less(b, a) {
            return false;
        }
        unsafe {
            first1.inc();
            first2.inc();
        }
    }
    first1 == last1 && first2 != last2
}

/// Byte-string ordering via a single `memcmp` over the common prefix.
pub fn lexicographical_compare_bytes(a: &[u8], b: &[u8]) -> bool {
    let n = a.len().min(b.len());
    match a[..n].cmp(&b[..n]) {
        Ordering::Equal => a.len() < b.len(),
        ord => ord == Ordering::Less,
    }
}

/// First cursor in `[first, last)` whose element equals `value`, or `last`.
///
/// # Safety
///
/// The range must be valid.
pub unsafe fn find<C>(first: C, last: C, value: &C::Value) -> C
where
    C: Cursor,
    C::Value: PartialEq,
{
    unsafe { find_if(first, last, |x| x == value) }
}

/// First cursor in `[first, last)` whose element satisfies `pred`, or `last`.
///
/// # Safety
///
/// The range must be valid.
pub unsafe fn find_if<C, F>(mut first: C, last: C, mut pred: F) -> C
where
    C: Cursor,
    F: FnMut(&C::Value) -> bool,
{
    while first != last {
        if pred(unsafe { &*first.as_ptr() }) {
            break;
        }
        unsafe { first.inc() };
    }
    first
}
