//! Reverse cursor adapter.
//!
//! `Reverse::new(end)` denotes the last element of a sequence and
//! `Reverse::new(begin)` is one past the first. Dereferencing reads the
//! element just before the wrapped base cursor.

use std::cmp::Ordering;

use crate::cursor::{BidirectionalCursor, Cursor, ForwardCursor, RandomAccessCursor};

/// Walks a bidirectional sequence backwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Reverse<C> {
    base: C,
}

impl<C: BidirectionalCursor> Reverse<C> {
    /// Wraps `base`. The new cursor refers to the element before `base`.
    #[inline]
    pub const fn new(base: C) -> Self {
        Self { base }
    }

    /// Returns the wrapped cursor.
    #[inline]
    pub fn base(&self) -> &C {
        &self.base
    }

    /// Unwraps into the base cursor.
    #[inline]
    pub fn into_base(self) -> C {
        self.base
    }
}

impl<C: BidirectionalCursor> Cursor for Reverse<C> {
    type Category = C::Category;
    type Value = C::Value;

    #[inline]
    unsafe fn as_ptr(&self) -> *mut C::Value {
        let mut prev = self.base.clone();
        // Safety: a dereferenceable reverse cursor has a predecessor base
        unsafe {
            prev.dec();
            prev.as_ptr()
        }
    }

    #[inline]
    unsafe fn inc(&mut self) {
        unsafe { self.base.dec() };
    }

    #[inline]
    unsafe fn distance_to(&self, last: &Self) -> isize {
        unsafe { last.base.distance_to(&self.base) }
    }

    #[inline]
    unsafe fn advance(&mut self, n: isize) {
        unsafe { self.base.advance(-n) };
    }
}

impl<C: BidirectionalCursor> ForwardCursor for Reverse<C> {}

impl<C: BidirectionalCursor> BidirectionalCursor for Reverse<C> {
    #[inline]
    unsafe fn dec(&mut self) {
        unsafe { self.base.inc() };
    }
}

impl<C: RandomAccessCursor> PartialOrd for Reverse<C> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        other.base.partial_cmp(&self.base)
    }
}

impl<C: RandomAccessCursor> RandomAccessCursor for Reverse<C> {
    #[inline]
    unsafe fn jump(&mut self, n: isize) {
        unsafe { self.base.jump(-n) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_reads_backwards() {
        let mut data = [1i32, 2, 3, 4];
        let first = data.as_mut_ptr();
        let last = unsafe { first.add(4) };

        let mut r = Reverse::new(last);
        let rend = Reverse::new(first);
        let mut seen = Vec::new();
        while r != rend {
            seen.push(unsafe { *r.as_ptr() });
            unsafe { r.inc() };
        }
        assert_eq!(seen, [4, 3, 2, 1]);
    }

    #[test]
    fn reverse_jump_negates() {
        let mut data = [1i32, 2, 3, 4, 5];
        let first = data.as_mut_ptr();
        let last = unsafe { first.add(5) };

        let mut r = Reverse::new(last);
        unsafe { r.jump(2) };
        assert_eq!(unsafe { *r.as_ptr() }, 3);
        unsafe { r.jump(-1) };
        assert_eq!(unsafe { *r.as_ptr() }, 4);
        assert_eq!(unsafe { Reverse::new(last).distance_to(&Reverse::new(first)) }, 5);
    }

    #[test]
    fn reverse_ordering_is_flipped() {
        let mut data = [0u8; 3];
        let first = data.as_mut_ptr();
        let last = unsafe { first.add(3) };
        assert!(Reverse::new(last) < Reverse::new(first));
    }

    #[test]
    fn double_reverse_is_identity() {
        let mut data = [9u16, 8];
        let first = data.as_mut_ptr();
        let rr = Reverse::new(Reverse::new(first));
        assert_eq!(unsafe { *rr.as_ptr() }, 9);
    }
}
