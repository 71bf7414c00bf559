//! Cursor categories and traversal for strata containers.
//!
//! A *cursor* is a copyable position in a sequence. Cursors are classified by
//! the traversal they support:
//!
//! | Category        | Trait                  | Adds                        |
//! |-----------------|------------------------|-----------------------------|
//! | input           | [`Cursor`]             | `inc`, `as_ptr`             |
//! | forward         | [`ForwardCursor`]      | multi-pass guarantee        |
//! | bidirectional   | [`BidirectionalCursor`]| `dec`                       |
//! | random access   | [`RandomAccessCursor`] | `jump`, `offset`, ordering  |
//!
//! Raw pointers (`*mut T`, `*const T`) are random-access cursors.
//! [`distance`] and [`advance`] take the constant-time path for random-access
//! cursors and walk otherwise.
//!
//! # Example
//!
//! ```
//! use strata_cursor::{Cursor, Reverse, distance};
//!
//! let mut data = [1, 2, 3];
//! let first = data.as_mut_ptr();
//! let last = unsafe { first.add(3) };
//! assert_eq!(unsafe { distance(&first, &last) }, 3);
//!
//! let back = Reverse::new(last);
//! assert_eq!(unsafe { *back.as_ptr() }, 3);
//! ```

#![warn(missing_docs)]

mod category;
mod cursor;
mod raw;
mod reverse;

pub use category::{
    BidirectionalTag, Category, CategoryKind, ForwardTag, InputTag, OutputTag, RandomAccessTag,
    Refines,
};
pub use cursor::{
    BidirectionalCursor, Cursor, CursorTraits, ForwardCursor, RandomAccessCursor, advance,
    advance_bidirectional, category, distance, next, prev,
};
pub use reverse::Reverse;
