//! Cursor traits and category-dispatched traversal.

use crate::category::{BidirectionalTag, Category, ForwardTag, RandomAccessTag, Refines};

// =============================================================================
// Traits
// =============================================================================

/// A position in a sequence.
///
/// A cursor is a non-owning view: it never keeps the underlying storage alive
/// and it is not tied to a borrow. Traversal is therefore `unsafe`; callers
/// guarantee the cursor stays inside the sequence it was taken from and that
/// the sequence outlives every use.
///
/// The provided [`distance_to`](Cursor::distance_to) and
/// [`advance`](Cursor::advance) step one element at a time. Random-access
/// cursors override both with constant-time arithmetic, which is how
/// category dispatch works here.
pub trait Cursor: Clone + PartialEq {
    /// Traversal category tag.
    type Category: Category;

    /// Element type.
    type Value;

    /// Address of the current element.
    ///
    /// # Safety
    ///
    /// The cursor must be dereferenceable. Adapters such as
    /// [`Reverse`](crate::Reverse) compute the address from a neighbouring
    /// position, which only exists inside the sequence.
    unsafe fn as_ptr(&self) -> *mut Self::Value;

    /// Steps to the next element.
    ///
    /// # Safety
    ///
    /// The cursor must be dereferenceable (not at the end of its sequence).
    unsafe fn inc(&mut self);

    /// Number of increments needed to reach `last`.
    ///
    /// # Safety
    ///
    /// `last` must be reachable from `self` by repeated [`inc`](Cursor::inc),
    /// unless both are random-access.
    unsafe fn distance_to(&self, last: &Self) -> isize {
        let mut cur = self.clone();
        let mut n = 0isize;
        while cur != *last {
            unsafe { cur.inc() };
            n += 1;
        }
        n
    }

    /// Moves the cursor by `n` positions.
    ///
    /// Cursors below bidirectional only accept non-negative `n`.
    /// Bidirectional implementations must accept negative `n`; see
    /// [`advance_bidirectional`].
    ///
    /// # Safety
    ///
    /// Every intermediate position must be inside the sequence.
    unsafe fn advance(&mut self, n: isize) {
        debug_assert!(n >= 0, "negative advance on a forward-only cursor");
        for _ in 0..n {
            unsafe { self.inc() };
        }
    }
}

/// Multi-pass cursor: copies traverse independently and see the same elements.
pub trait ForwardCursor: Cursor<Category: Refines<ForwardTag>> {}

/// Cursor that can also step backwards.
pub trait BidirectionalCursor: ForwardCursor<Category: Refines<BidirectionalTag>> {
    /// Steps to the previous element.
    ///
    /// # Safety
    ///
    /// The cursor must not be at the start of its sequence.
    unsafe fn dec(&mut self);
}

/// Cursor with constant-time jumps.
pub trait RandomAccessCursor:
    BidirectionalCursor<Category: Refines<RandomAccessTag>> + PartialOrd
{
    /// Moves by `n` positions in constant time. Negative `n` moves backwards.
    ///
    /// # Safety
    ///
    /// The target must be inside the sequence or one past its end.
    unsafe fn jump(&mut self, n: isize);

    /// Returns a copy moved by `n` positions.
    ///
    /// # Safety
    ///
    /// Same as [`jump`](RandomAccessCursor::jump).
    #[inline]
    unsafe fn offset(&self, n: isize) -> Self {
        let mut c = self.clone();
        unsafe { c.jump(n) };
        c
    }

    /// Address of the element `n` positions away.
    ///
    /// # Safety
    ///
    /// Same as [`jump`](RandomAccessCursor::jump).
    #[inline]
    unsafe fn at(&self, n: isize) -> *mut Self::Value {
        unsafe { self.offset(n).as_ptr() }
    }
}

// =============================================================================
// Trait extraction
// =============================================================================

/// Associated types recovered from any cursor.
///
/// Blanket-implemented, so generic code can name `C::Pointer` or
/// `C::Difference` without knowing the concrete cursor.
pub trait CursorTraits {
    /// Category tag.
    type Category: Category;
    /// Element type.
    type Value;
    /// Element pointer.
    type Pointer;
    /// Signed distance type.
    type Difference;
}

impl<C: Cursor> CursorTraits for C {
    type Category = C::Category;
    type Value = C::Value;
    type Pointer = *mut C::Value;
    type Difference = isize;
}

// =============================================================================
// Free functions
// =============================================================================

/// Returns the category tag of `cursor`.
#[inline]
pub fn category<C: Cursor>(_cursor: &C) -> C::Category {
    C::Category::default()
}

/// Number of elements in `[first, last)`.
///
/// # Safety
///
/// See [`Cursor::distance_to`].
#[inline]
pub unsafe fn distance<C: Cursor>(first: &C, last: &C) -> isize {
    unsafe { first.distance_to(last) }
}

/// Moves `cursor` by `n`. Negative `n` requires a bidirectional cursor.
///
/// # Safety
///
/// See [`Cursor::advance`].
#[inline]
pub unsafe fn advance<C: Cursor>(cursor: &mut C, n: isize) {
    unsafe { cursor.advance(n) }
}

/// Returns `cursor` moved forward by `n`.
///
/// # Safety
///
/// See [`Cursor::advance`].
#[inline]
pub unsafe fn next<C: Cursor>(mut cursor: C, n: isize) -> C {
    unsafe { cursor.advance(n) };
    cursor
}

/// Returns `cursor` moved backward by `n`.
///
/// # Safety
///
/// See [`Cursor::advance`].
#[inline]
pub unsafe fn prev<C: BidirectionalCursor>(mut cursor: C, n: isize) -> C {
    unsafe { cursor.advance(-n) };
    cursor
}

/// Step-wise `advance` in either direction.
///
/// Bidirectional cursors without constant-time jumps call this from their
/// [`Cursor::advance`] implementation.
///
/// # Safety
///
/// See [`Cursor::advance`].
pub unsafe fn advance_bidirectional<C: BidirectionalCursor>(cursor: &mut C, n: isize) {
    if n >= 0 {
        for _ in 0..n {
            unsafe { cursor.inc() };
        }
    } else {
        for _ in 0..n.unsigned_abs() {
            unsafe { cursor.dec() };
        }
    }
}
