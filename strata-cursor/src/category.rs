//! Traversal categories.
//!
//! Every cursor declares one of five zero-sized tags. The tags form a
//! refinement lattice:
//!
//! ```text
//! input  <  forward  <  bidirectional  <  random_access
//! output                                   (separate root)
//! ```
//!
//! The lattice is available both at the type level, through [`Refines`], and
//! as a const-evaluable value, through [`CategoryKind::refines`], so generic
//! algorithms can pick a strategy with a plain `if` that the optimizer folds.

/// Runtime mirror of the category tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    /// Single-pass, read-only traversal.
    Input,
    /// Single-pass, write-only traversal.
    Output,
    /// Multi-pass traversal.
    Forward,
    /// Multi-pass traversal in both directions.
    Bidirectional,
    /// Constant-time jumps and distances.
    RandomAccess,
}

impl CategoryKind {
    /// Returns `true` if `self` is `base` or a refinement of it.
    #[inline]
    pub const fn refines(self, base: CategoryKind) -> bool {
        match (self, base) {
            (CategoryKind::Output, CategoryKind::Output) => true,
            (CategoryKind::Output, _) | (_, CategoryKind::Output) => false,
            _ => self.rank() >= base.rank(),
        }
    }

    /// Returns `true` for [`CategoryKind::RandomAccess`].
    #[inline]
    pub const fn is_random_access(self) -> bool {
        matches!(self, CategoryKind::RandomAccess)
    }

    const fn rank(self) -> u8 {
        match self {
            CategoryKind::Input | CategoryKind::Output => 0,
            CategoryKind::Forward => 1,
            CategoryKind::Bidirectional => 2,
            CategoryKind::RandomAccess => 3,
        }
    }
}

/// A category tag type.
pub trait Category: Copy + Default + Send + Sync + 'static {
    /// The runtime value of this tag.
    const KIND: CategoryKind;
}

/// Type-level refinement: `Self` can be used wherever `Base` is expected.
///
/// Every tag refines itself.
pub trait Refines<Base: Category>: Category {}

/// Single-pass read-only traversal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InputTag;

/// Single-pass write-only traversal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct OutputTag;

/// Multi-pass traversal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ForwardTag;

/// Multi-pass traversal in both directions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BidirectionalTag;

/// Constant-time jumps and distances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RandomAccessTag;

impl Category for InputTag {
    const KIND: CategoryKind = CategoryKind::Input;
}

impl Category for OutputTag {
    const KIND: CategoryKind = CategoryKind::Output;
}

impl Category for ForwardTag {
    const KIND: CategoryKind = CategoryKind::Forward;
}

impl Category for BidirectionalTag {
    const KIND: CategoryKind = CategoryKind::Bidirectional;
}

impl Category for RandomAccessTag {
    const KIND: CategoryKind = CategoryKind::RandomAccess;
}

macro_rules! refines {
    ($tag:ty => $($base:ty),+) => {
        $(impl Refines<$base> for $tag {})+
    };
}

refines!(InputTag => InputTag);
refines!(OutputTag => OutputTag);
refines!(ForwardTag => ForwardTag, InputTag);
refines!(BidirectionalTag => BidirectionalTag, ForwardTag, InputTag);
refines!(RandomAccessTag => RandomAccessTag, BidirectionalTag, ForwardTag, InputTag);

#[cfg(test)]
mod tests {
    use super::*;

    fn requires_forward<C: Refines<ForwardTag>>() -> CategoryKind {
        C::KIND
    }

    #[test]
    fn lattice_is_reflexive() {
        for kind in [
            CategoryKind::Input,
            CategoryKind::Output,
            CategoryKind::Forward,
            CategoryKind::Bidirectional,
            CategoryKind::RandomAccess,
        ] {
            assert!(kind.refines(kind));
        }
    }

    #[test]
    fn lattice_order() {
        assert!(CategoryKind::RandomAccess.refines(CategoryKind::Input));
        assert!(CategoryKind::Bidirectional.refines(CategoryKind::Forward));
        assert!(!CategoryKind::Forward.refines(CategoryKind::Bidirectional));
        assert!(!CategoryKind::Input.refines(CategoryKind::Forward));
    }

    #[test]
    fn output_is_separate_root() {
        assert!(!CategoryKind::Output.refines(CategoryKind::Input));
        assert!(!CategoryKind::Input.refines(CategoryKind::Output));
        assert!(!CategoryKind::RandomAccess.refines(CategoryKind::Output));
    }

    #[test]
    fn type_level_refinement() {
        assert_eq!(requires_forward::<ForwardTag>(), CategoryKind::Forward);
        assert_eq!(
            requires_forward::<RandomAccessTag>(),
            CategoryKind::RandomAccess
        );
    }

    #[test]
    fn kind_is_const() {
        const RA: bool = RandomAccessTag::KIND.is_random_access();
        assert!(RA);
        assert!(!BidirectionalTag::KIND.is_random_access());
    }
}
