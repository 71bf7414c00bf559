//! Check macros.

/// Returns `Err($err.into())` from the enclosing function unless `$cond` holds.
///
/// ```
/// use strata_mem::{TryReserveError, ensure};
///
/// fn grow(n: usize) -> Result<usize, TryReserveError> {
///     ensure!(n <= isize::MAX as usize, TryReserveError::CapacityOverflow);
///     Ok(n * 2)
/// }
///
/// assert!(grow(usize::MAX).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err(::core::convert::From::from($err));
        }
    };
}

/// Debug-only check of a caller obligation on an `unsafe` API.
///
/// Compiles to nothing in release builds.
#[macro_export]
macro_rules! precondition {
    ($cond:expr $(,)?) => {
        debug_assert!($cond, concat!("precondition violated: ", stringify!($cond)))
    };
    ($cond:expr, $($arg:tt)+) => {
        debug_assert!($cond, $($arg)+)
    };
}
