//! Raw pointers as random-access cursors.

use crate::category::RandomAccessTag;
use crate::cursor::{BidirectionalCursor, Cursor, ForwardCursor, RandomAccessCursor};

macro_rules! impl_raw_cursor {
    ($ptr:ty, $to_mut:expr) => {
        impl<T> Cursor for $ptr {
            type Category = RandomAccessTag;
            type Value = T;

            #[inline]
            unsafe fn as_ptr(&self) -> *mut T {
                $to_mut(*self)
            }

            #[inline]
            unsafe fn inc(&mut self) {
                *self = unsafe { (*self).add(1) };
            }

            #[inline]
            unsafe fn distance_to(&self, last: &Self) -> isize {
                // Safety: caller guarantees both point into the same allocation
                unsafe { last.offset_from(*self) }
            }

            #[inline]
            unsafe fn advance(&mut self, n: isize) {
                *self = unsafe { (*self).offset(n) };
            }
        }

        impl<T> ForwardCursor for $ptr {}

        impl<T> BidirectionalCursor for $ptr {
            #[inline]
            unsafe fn dec(&mut self) {
                *self = unsafe { (*self).sub(1) };
            }
        }

        impl<T> RandomAccessCursor for $ptr {
            #[inline]
            unsafe fn jump(&mut self, n: isize) {
                *self = unsafe { (*self).offset(n) };
            }
        }
    };
}

impl_raw_cursor!(*mut T, |p: *mut T| p);
impl_raw_cursor!(*const T, |p: *const T| p.cast_mut());
