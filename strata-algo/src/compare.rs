//! Comparators.

/// Strict weak ordering: `less(a, b)` is `true` when `a` sorts before `b`.
///
/// Implemented by [`Less`], [`Greater`] and any `Fn(&T, &T) -> bool`.
pub trait Compare<T: ?Sized> {
    /// Returns `true` if `a` is ordered before `b`.
    fn less(&self, a: &T, b: &T) -> bool;
}

/// Orders by `<`. Heaps built with `Less` are max-heaps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Less;

/// Orders by `>`. Heaps built with `Greater` are min-heaps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Greater;

impl<T: PartialOrd + ?Sized> Compare<T> for Less {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

impl<T: PartialOrd + ?Sized> Compare<T> for Greater {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a > b
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Binary equivalence predicate.
pub trait Equivalence<T: ?Sized> {
    /// Returns `true` if `a` and `b` are equivalent.
    fn eq(&self, a: &T, b: &T) -> bool;
}

/// Equivalence by `==`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EqualTo;

impl<T: PartialEq + ?Sized> Equivalence<T> for EqualTo {
    #[inline]
    fn eq(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

impl<T: ?Sized, F> Equivalence<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn eq(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn less_and_greater() {
        assert!(Compare::<i32>::less(&Less, &1, &2));
        assert!(!Compare::<i32>::less(&Less, &2, &2));
        assert!(Compare::<i32>::less(&Greater, &3, &2));
    }

    #[test]
    fn closures_compare() {
        let by_len = |a: &&str, b: &&str| a.len() < b.len();
        assert!(by_len.less(&"ab", &"abc"));
    }

    #[test]
    fn equal_to_and_closure() {
        assert!(Equivalence::<str>::eq(&EqualTo, "x", "x"));
        let ci = |a: &str, b: &str| a.eq_ignore_ascii_case(b);
        assert!(Equivalence::<str>::eq(&ci, "Ab", "aB"));
    }
}
