use thiserror::Error;

/// Result type returned by the fallible operations of this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported by [`RBTreeMap`](crate::RBTreeMap) and
/// [`RBTreeSet`](crate::RBTreeSet).
///
/// Every error is reported synchronously by the call that detects it and
/// leaves the tree unchanged.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// The operation needs at least one entry.
    #[error("`{operation}` called on an empty tree")]
    EmptyContainer { operation: &'static str },

    /// The key to remove is not in the tree.
    #[error("`{operation}` called with a key that is not in the tree")]
    AbsentKey { operation: &'static str },

    /// No key satisfies the query.
    #[error("`{operation}` found no qualifying key")]
    KeyNotFound { operation: &'static str },

    /// A rank at or past the number of entries.
    #[error("rank {rank} is out of bounds for a tree of {len} entries")]
    RankOutOfBounds { rank: usize, len: usize },

    /// A detached traversal was advanced after the tree was mutated.
    #[error("tree was modified during traversal (version {expected}, now {found})")]
    ConcurrentModification { expected: u64, found: u64 },

    /// Reported by `validate`; unreachable unless the tree itself is broken.
    #[error("red-black invariant violated: {0}")]
    InvariantViolation(#[from] Violation),
}

impl Error {
    pub(crate) fn empty(operation: &'static str) -> Self {
        tracing::debug!(operation, "operation needs a non-empty tree");
        Error::EmptyContainer { operation }
    }

    pub(crate) fn absent(operation: &'static str) -> Self {
        tracing::debug!(operation, "key to remove is not in the tree");
        Error::AbsentKey { operation }
    }

    pub(crate) fn not_found(operation: &'static str) -> Self {
        tracing::debug!(operation, "no qualifying key");
        Error::KeyNotFound { operation }
    }

    pub(crate) fn rank_out_of_bounds(rank: usize, len: usize) -> Self {
        tracing::debug!(rank, len, "rank out of bounds");
        Error::RankOutOfBounds { rank, len }
    }

    pub(crate) fn modified(expected: u64, found: u64) -> Self {
        tracing::debug!(expected, found, "tree modified during traversal");
        Error::ConcurrentModification { expected, found }
    }

    /// Returns `true` for errors caused by calling an operation whose
    /// precondition did not hold: an empty tree, or removing a missing key.
    #[must_use]
    pub const fn is_precondition_violation(&self) -> bool {
        matches!(self, Error::EmptyContainer { .. } | Error::AbsentKey { .. })
    }
}

/// The structural invariant a tree failed to satisfy.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Violation {
    #[error("keys are not in ascending order at in-order position {position}")]
    UnorderedKeys { position: usize },

    #[error("right-leaning red link")]
    RightLeaningRed,

    #[error("two consecutive red links")]
    ConsecutiveReds,

    #[error("root-to-leaf paths have different black heights")]
    BlackHeightMismatch,

    #[error("stored subtree size {stored} differs from actual size {actual}")]
    SizeMismatch { stored: usize, actual: usize },

    #[error("root is red")]
    RedRoot,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn precondition_violations_are_grouped() {
        assert!(Error::EmptyContainer { operation: "min" }.is_precondition_violation());
        assert!(Error::AbsentKey { operation: "remove" }.is_precondition_violation());
        assert!(!Error::KeyNotFound { operation: "floor" }.is_precondition_violation());
        assert!(!Error::ConcurrentModification { expected: 1, found: 2 }.is_precondition_violation());
    }

    #[test]
    fn messages_name_the_operation() {
        assert_eq!(Error::EmptyContainer { operation: "min" }.to_string(), "`min` called on an empty tree");
        assert_eq!(
            Error::RankOutOfBounds { rank: 4, len: 3 }.to_string(),
            "rank 4 is out of bounds for a tree of 3 entries"
        );
        assert_eq!(
            Error::from(Violation::RedRoot).to_string(),
            "red-black invariant violated: root is red"
        );
    }
}
