//! Binary heap operations over random-access ranges.
//!
//! The range `[first, last)` is a heap with respect to `cmp` when no element
//! is ordered before one of its children, so `first` holds the greatest
//! element. With [`Less`] that is a max-heap; with
//! [`Greater`](crate::Greater) a min-heap.
//!
//! Elements move through a *hole*: the value being placed is held aside and
//! its slot is treated as vacant while other elements shift into it. If the
//! comparator panics, the held value is written back into the current hole,
//! so every element is still present exactly once.
//!
//! # Example
//!
//! ```
//! use strata_algo::{make_heap, pop_heap, push_heap};
//!
//! let mut v = vec![3, 1, 4, 1, 5];
//! let p = v.as_mut_ptr();
//! unsafe { make_heap(p, p.add(5)) };
//! assert_eq!(v[0], 5);
//!
//! v.push(9);
//! let p = v.as_mut_ptr();
//! unsafe { push_heap(p, p.add(6)) };
//! assert_eq!(v[0], 9);
//!
//! unsafe { pop_heap(p, p.add(6)) };
//! assert_eq!(v.pop(), Some(9));
//! ```

use std::mem::ManuallyDrop;
use std::ptr;

use strata_cursor::RandomAccessCursor;

use crate::compare::{Compare, Less};

// =============================================================================
// Hole
// =============================================================================

/// A vacant slot plus the value that will fill it.
struct Hole<C: RandomAccessCursor> {
    base: C,
    pos: isize,
    value: ManuallyDrop<C::Value>,
}

impl<C: RandomAccessCursor> Hole<C> {
    /// # Safety
    /// The slot at `pos` must not hold a live value.
    #[inline]
    unsafe fn new(base: C, pos: isize, value: C::Value) -> Self {
        Self {
            base,
            pos,
            value: ManuallyDrop::new(value),
        }
    }

    #[inline]
    fn value(&self) -> &C::Value {
        &self.value
    }

    /// # Safety
    /// `i` must be in range and differ from the hole.
    #[inline]
    unsafe fn get(&self, i: isize) -> &C::Value {
        debug_assert!(i != self.pos);
        unsafe { &*self.base.at(i) }
    }

    /// Moves the element at `i` into the hole; `i` becomes the hole.
    ///
    /// # Safety
    /// `i` must be in range and differ from the hole.
    #[inline]
    unsafe fn move_to(&mut self, i: isize) {
        debug_assert!(i != self.pos);
        unsafe { ptr::copy_nonoverlapping(self.base.at(i), self.base.at(self.pos), 1) };
        self.pos = i;
    }
}

impl<C: RandomAccessCursor> Drop for Hole<C> {
    fn drop(&mut self) {
        // Safety: the hole is vacant and the value has not been moved out
        unsafe {
            let value = ManuallyDrop::take(&mut self.value);
            self.base.at(self.pos).write(value);
        }
    }
}

// =============================================================================
// Internals
// =============================================================================

/// Moves the hole toward `top` while its parent orders before the value.
unsafe fn sift_up<C, P>(hole: &mut Hole<C>, top: isize, cmp: &P)
where
    C: RandomAccessCursor,
    P: Compare<C::Value>,
{
    while hole.pos > top {
        let parent = (hole.pos - 1) / 2;
        // Safety: parent < hole.pos < len
        if !cmp.less(unsafe { hole.get(parent) }, hole.value()) {
            break;
        }
        unsafe { hole.move_to(parent) };
    }
}

/// Descends from the hole to a leaf, following the greater child (the right
/// child unless it orders before the left), then sifts the value back up.
unsafe fn adjust<C, P>(first: C, hole_index: isize, len: isize, value: C::Value, cmp: &P)
where
    C: RandomAccessCursor,
    P: Compare<C::Value>,
{
    let top = hole_index;
    let mut hole = unsafe { Hole::new(first, hole_index, value) };
    let mut child = 2 * hole_index + 2;

    while child < len {
        // Safety: child - 1 < child < len, neither is the hole
        if cmp.less(unsafe { hole.get(child) }, unsafe { hole.get(child - 1) }) {
            child -= 1;
        }
        unsafe { hole.move_to(child) };
        child = 2 * child + 2;
    }

    if child == len {
        unsafe { hole.move_to(child - 1) };
    }

    unsafe { sift_up(&mut hole, top, cmp) };
}

unsafe fn pop<C, P>(first: C, last: C, cmp: &P)
where
    C: RandomAccessCursor,
    P: Compare<C::Value>,
{
    let len = unsafe { first.distance_to(&last) };
    if len < 2 {
        return;
    }
    let tail = len - 1;
    unsafe {
        let value = first.at(tail).read();
        ptr::copy_nonoverlapping(first.at(0), first.at(tail), 1);
        adjust(first, 0, tail, value, cmp);
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Restores the heap after `*(last - 1)` was appended to the heap
/// `[first, last - 1)`.
///
/// # Safety
///
/// `[first, last)` must be a valid range of live elements.
pub unsafe fn push_heap<C>(first: C, last: C)
where
    C: RandomAccessCursor,
    C::Value: PartialOrd,
{
    unsafe { push_heap_by(first, last, Less) }
}

/// [`push_heap`] with a caller-supplied ordering.
///
/// # Safety
///
/// See [`push_heap`].
pub unsafe fn push_heap_by<C, P>(first: C, last: C, cmp: P)
where
    C: RandomAccessCursor,
    P: Compare<C::Value>,
{
    let len = unsafe { first.distance_to(&last) };
    if len < 2 {
        return;
    }
    let pos = len - 1;
    unsafe {
        let value = first.at(pos).read();
        let mut hole = Hole::new(first, pos, value);
        sift_up(&mut hole, 0, &cmp);
    }
}

/// Moves the greatest element to `last - 1` and restores the heap on
/// `[first, last - 1)`.
///
/// # Safety
///
/// `[first, last)` must be a heap of live elements.
pub unsafe fn pop_heap<C>(first: C, last: C)
where
    C: RandomAccessCursor,
    C::Value: PartialOrd,
{
    unsafe { pop_heap_by(first, last, Less) }
}

/// [`pop_heap`] with a caller-supplied ordering.
///
/// # Safety
///
/// See [`pop_heap`].
pub unsafe fn pop_heap_by<C, P>(first: C, last: C, cmp: P)
where
    C: RandomAccessCursor,
    P: Compare<C::Value>,
{
    unsafe { pop(first, last, &cmp) }
}

/// Rearranges `[first, last)` into a heap, bottom-up from the last parent.
///
/// # Safety
///
/// `[first, last)` must be a valid range of live elements.
pub unsafe fn make_heap<C>(first: C, last: C)
where
    C: RandomAccessCursor,
    C::Value: PartialOrd,
{
    unsafe { make_heap_by(first, last, Less) }
}

/// [`make_heap`] with a caller-supplied ordering.
///
/// # Safety
///
/// See [`make_heap`].
pub unsafe fn make_heap_by<C, P>(first: C, last: C, cmp: P)
where
    C: RandomAccessCursor,
    P: Compare<C::Value>,
{
    let len = unsafe { first.distance_to(&last) };
    if len < 2 {
        return;
    }
    let mut parent = (len - 2) / 2;
    loop {
        unsafe {
            let value = first.at(parent).read();
            adjust(first.clone(), parent, len, value, &cmp);
        }
        if parent == 0 {
            return;
        }
        parent -= 1;
    }
}

/// Places `value` into the vacant slot `hole_index` of a heap of length
/// `len`, descending to a leaf and sifting back up.
///
/// # Safety
///
/// The slot at `hole_index` must not hold a live value; every other slot in
/// `[first, first + len)` must.
pub unsafe fn adjust_heap<C>(first: C, hole_index: isize, len: isize, value: C::Value)
where
    C: RandomAccessCursor,
    C::Value: PartialOrd,
{
    unsafe { adjust(first, hole_index, len, value, &Less) }
}

/// [`adjust_heap`] with a caller-supplied ordering.
///
/// # Safety
///
/// See [`adjust_heap`].
pub unsafe fn adjust_heap_by<C, P>(first: C, hole_index: isize, len: isize, value: C::Value, cmp: P)
where
    C: RandomAccessCursor,
    P: Compare<C::Value>,
{
    unsafe { adjust(first, hole_index, len, value, &cmp) }
}

/// Sorts a heap in ascending order with respect to its ordering.
///
/// # Safety
///
/// `[first, last)` must be a heap of live elements.
pub unsafe fn sort_heap<C>(first: C, last: C)
where
    C: RandomAccessCursor,
    C::Value: PartialOrd,
{
    unsafe { sort_heap_by(first, last, Less) }
}

/// [`sort_heap`] with a caller-supplied ordering.
///
/// # Safety
///
/// See [`sort_heap`].
pub unsafe fn sort_heap_by<C, P>(first: C, mut last: C, cmp: P)
where
    C: RandomAccessCursor,
    P: Compare<C::Value>,
{
    while unsafe { first.distance_to(&last) } > 1 {
        unsafe {
            pop(first.clone(), last.clone(), &cmp);
            last.jump(-1);
        }
    }
}

/// `true` if `[first, last)` is a heap.
///
/// # Safety
///
/// `[first, last)` must be a valid range of live elements.
pub unsafe fn is_heap<C>(first: C, last: C) -> bool
where
    C: RandomAccessCursor,
    C::Value: PartialOrd,
{
    unsafe { is_heap_by(first, last, Less) }
}

/// [`is_heap`] with a caller-supplied ordering.
///
/// # Safety
///
/// See [`is_heap`].
pub unsafe fn is_heap_by<C, P>(first: C, last: C, cmp: P) -> bool
where
    C: RandomAccessCursor,
    P: Compare<C::Value>,
{
    let len = unsafe { first.distance_to(&last) };
    (1..len).all(|i| unsafe { !cmp.less(&*first.at((i - 1) / 2), &*first.at(i)) })
}
