//! Generic algorithms over strata cursors.
//!
//! Every algorithm takes half-open cursor ranges and is `unsafe`, because
//! cursors do not borrow the sequence they point into. Safe containers in
//! `strata-collections` wrap these with their own bounds.
//!
//! - [`fill`], [`copy`], [`copy_backward`], [`move_assign`],
//!   [`move_backward`] and their trivial (`memmove`/`memset`) forms
//! - [`equal`], [`lexicographical_compare`], [`find`]
//! - binary heaps: [`push_heap`], [`pop_heap`], [`make_heap`],
//!   [`adjust_heap_by`], [`sort_heap`], [`is_heap`]
//! - comparators: [`Less`], [`Greater`], [`EqualTo`]

#![warn(missing_docs)]

mod compare;
mod heap;
mod seq;

pub use compare::{Compare, EqualTo, Equivalence, Greater, Less};
pub use heap::{
    adjust_heap, adjust_heap_by, is_heap, is_heap_by, make_heap, make_heap_by, pop_heap, pop_heap_by,
    push_heap, push_heap_by, sort_heap, sort_heap_by,
};
pub use seq::{
    copy, copy_backward, copy_backward_trivial, copy_trivial, equal, equal_by, fill, fill_n,
    fill_trivial, find, find_if, lexicographical_compare, lexicographical_compare_by,
    lexicographical_compare_bytes, move_assign, move_backward, reverse, swap_ranges,
};
