//! Memory substrate for strata containers.
//!
//! - [`Allocator`]: stateless typed allocator with explicit
//!   construct/destroy.
//! - Uninitialized-memory algorithms ([`uninitialized_fill_n`],
//!   [`uninitialized_copy`], [`uninitialized_move`], ...) that roll back on
//!   panic.
//! - The error taxonomy ([`TryReserveError`], [`AllocError`], [`RangeError`])
//!   and check macros ([`ensure!`], [`precondition!`]).
//!
//! With the `fault-injection` feature, the [`fault`] module can make
//! allocations fail on demand and count live allocations, which is how
//! container rollback paths are tested.

#![warn(missing_docs)]

#[macro_use]
mod macros;

mod alloc;
mod error;
#[cfg(feature = "fault-injection")]
pub mod fault;
mod uninit;

pub use alloc::Allocator;
pub use error::{AllocError, RangeError, TryReserveError};
pub use uninit::{
    destroy, uninitialized_copy, uninitialized_copy_bitwise, uninitialized_copy_n,
    uninitialized_fill, uninitialized_fill_n, uninitialized_fill_n_bitwise,
    uninitialized_fill_with, uninitialized_move, uninitialized_move_backward,
};
