use super::handle::Handle;

/// Node count of a subtree.
///
/// A subtree can never hold more nodes than the arena has handles, so the size
/// shares the handle's representation (and its niche).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Size(Handle);

impl Size {
    pub(crate) const MAX: usize = Handle::MAX;
    pub(crate) const ONE: Self = Self::from_usize(1);

    #[inline]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        Self(Handle::from_index(size))
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0.to_index()
    }

    /// The size of a node whose children have sizes `left` and `right`.
    #[inline]
    pub(crate) const fn of_parent(left: usize, right: usize) -> Self {
        Self::from_usize(1 + left + right)
    }
}
