//! Typed allocator over the global heap.

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

use log::debug;

use crate::error::{AllocError, TryReserveError};

/// Stateless, type-scoped allocator.
///
/// `Allocator<T>` is zero-sized and every operation is an associated
/// function, so containers carry no allocator state. Storage returned by
/// [`allocate`](Allocator::allocate) is uninitialized; the caller constructs
/// and destroys values in it explicitly and must destroy them before
/// [`deallocate`](Allocator::deallocate). The allocator does not track which
/// slots are live.
///
/// # Example
///
/// ```
/// use strata_mem::Allocator;
///
/// let p = Allocator::<String>::allocate(2).unwrap();
/// unsafe {
///     Allocator::construct(p.as_ptr(), String::from("a"));
///     Allocator::construct_with(p.as_ptr().add(1), || String::from("b"));
///     assert_eq!(*p.as_ptr().add(1), "b");
///     Allocator::destroy_range(p.as_ptr(), p.as_ptr().add(2));
///     Allocator::deallocate(p, 2);
/// }
/// ```
pub struct Allocator<T>(PhantomData<fn() -> T>);

impl<T> Allocator<T> {
    /// Largest element count a single allocation may request.
    #[inline]
    pub const fn max_size() -> usize {
        let size = mem::size_of::<T>();
        if size == 0 {
            usize::MAX
        } else {
            isize::MAX as usize / size
        }
    }

    /// Allocates one uninitialized slot.
    #[inline]
    pub fn allocate_one() -> Result<NonNull<T>, TryReserveError> {
        Self::allocate(1)
    }

    /// Allocates `n` contiguous uninitialized slots.
    ///
    /// `n == 0` (or a zero-sized `T`) returns a dangling, well-aligned pointer
    /// that must not be dereferenced; passing it back to
    /// [`deallocate`](Allocator::deallocate) is a no-op.
    pub fn allocate(n: usize) -> Result<NonNull<T>, TryReserveError> {
        if n == 0 || mem::size_of::<T>() == 0 {
            return Ok(NonNull::dangling());
        }

        let layout = Layout::array::<T>(n).map_err(|_| TryReserveError::CapacityOverflow)?;

        #[cfg(feature = "fault-injection")]
        if crate::fault::should_fail() {
            debug!("injected allocation failure ({} bytes)", layout.size());
            return Err(AllocError { layout }.into());
        }

        // Safety: layout has non-zero size
        let ptr = unsafe { alloc::alloc(layout) };
        match NonNull::new(ptr.cast::<T>()) {
            Some(p) => {
                #[cfg(feature = "fault-injection")]
                crate::fault::record_alloc();
                Ok(p)
            }
            None => {
                debug!("allocation of {} bytes failed", layout.size());
                Err(AllocError { layout }.into())
            }
        }
    }

    /// Releases storage from [`allocate`](Allocator::allocate).
    ///
    /// # Safety
    ///
    /// `ptr` and `n` must match a previous `allocate(n)` call, and every slot
    /// must already be destroyed.
    pub unsafe fn deallocate(ptr: NonNull<T>, n: usize) {
        if n == 0 || mem::size_of::<T>() == 0 {
            return;
        }
        // Safety: the same layout was valid when the storage was allocated
        let layout = unsafe {
            Layout::from_size_align_unchecked(mem::size_of::<T>() * n, mem::align_of::<T>())
        };
        unsafe { alloc::dealloc(ptr.as_ptr().cast::<u8>(), layout) };

        #[cfg(feature = "fault-injection")]
        crate::fault::record_dealloc();
    }

    /// Moves `value` into the uninitialized slot at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes and properly aligned.
    #[inline]
    pub unsafe fn construct(ptr: *mut T, value: T) {
        unsafe { ptr.write(value) };
    }

    /// Constructs the value returned by `f` in the slot at `ptr`.
    ///
    /// If `f` panics the slot stays uninitialized.
    ///
    /// # Safety
    ///
    /// Same as [`construct`](Allocator::construct).
    #[inline]
    pub unsafe fn construct_with<F: FnOnce() -> T>(ptr: *mut T, f: F) {
        unsafe { ptr.write(f()) };
    }

    /// Constructs `T::default()` at `ptr`.
    ///
    /// # Safety
    ///
    /// Same as [`construct`](Allocator::construct).
    #[inline]
    pub unsafe fn construct_default(ptr: *mut T)
    where
        T: Default,
    {
        unsafe { ptr.write(T::default()) };
    }

    /// Constructs a clone of `src` at `ptr`.
    ///
    /// # Safety
    ///
    /// Same as [`construct`](Allocator::construct).
    #[inline]
    pub unsafe fn construct_clone(ptr: *mut T, src: &T)
    where
        T: Clone,
    {
        unsafe { ptr.write(src.clone()) };
    }

    /// Drops the value at `ptr`. No-op for types without drop glue.
    ///
    /// # Safety
    ///
    /// `ptr` must hold a live value, which is dead afterwards.
    #[inline]
    pub unsafe fn destroy(ptr: *mut T) {
        if mem::needs_drop::<T>() {
            unsafe { ptr::drop_in_place(ptr) };
        }
    }

    /// Drops every value in `[first, last)`.
    ///
    /// # Safety
    ///
    /// Both pointers must belong to the same allocation with
    /// `first <= last`, and every slot in between must be live.
    #[inline]
    pub unsafe fn destroy_range(first: *mut T, last: *mut T) {
        precondition!(first <= last);
        if mem::needs_drop::<T>() {
            let len = unsafe { last.offset_from(first) } as usize;
            unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(first, len)) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counted(Rc<Cell<usize>>);

    impl Drop for Counted {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn zero_allocation_is_dangling() {
        let p = Allocator::<u64>::allocate(0).unwrap();
        assert_eq!(p, NonNull::dangling());
        unsafe { Allocator::deallocate(p, 0) };
    }

    #[test]
    fn allocate_construct_destroy() {
        let drops = Rc::new(Cell::new(0));
        let p = Allocator::<Counted>::allocate(3).unwrap();
        unsafe {
            for i in 0..3 {
                Allocator::construct(p.as_ptr().add(i), Counted(drops.clone()));
            }
            Allocator::destroy(p.as_ptr());
            assert_eq!(drops.get(), 1);
            Allocator::destroy_range(p.as_ptr().add(1), p.as_ptr().add(3));
            assert_eq!(drops.get(), 3);
            Allocator::deallocate(p, 3);
        }
    }

    #[test]
    fn construct_variants() {
        let p = Allocator::<Vec<u8>>::allocate(3).unwrap();
        let src = vec![1u8, 2];
        unsafe {
            Allocator::construct_default(p.as_ptr());
            Allocator::construct_clone(p.as_ptr().add(1), &src);
            Allocator::construct_with(p.as_ptr().add(2), || vec![9u8; 3]);
            assert!((*p.as_ptr()).is_empty());
            assert_eq!(*p.as_ptr().add(1), src);
            assert_eq!(*p.as_ptr().add(2), [9, 9, 9]);
            Allocator::destroy_range(p.as_ptr(), p.as_ptr().add(3));
            Allocator::deallocate(p, 3);
        }
    }

    #[test]
    fn oversized_request_is_capacity_overflow() {
        let err = Allocator::<u64>::allocate(usize::MAX / 2).unwrap_err();
        assert_eq!(err, TryReserveError::CapacityOverflow);
    }

    #[test]
    fn max_size_bounds() {
        assert_eq!(Allocator::<u8>::max_size(), isize::MAX as usize);
        assert_eq!(Allocator::<u64>::max_size(), isize::MAX as usize / 8);
        assert_eq!(Allocator::<()>::max_size(), usize::MAX);
    }
}
