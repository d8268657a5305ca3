//! Status returned by behavior nodes.

/// The result of evaluating a behavior node.
///
/// # Turn-based Semantics
///
/// Every node resolves within a single evaluation:
/// - Conditions answer immediately (e.g., "Is my health below 30%?")
/// - Actions always succeed and record themselves as the decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The node completed successfully.
    ///
    /// For conditions: The condition was met.
    /// For actions: The action was recorded as the decision.
    Success,

    /// The node failed.
    ///
    /// For conditions: The condition was not met.
    /// For composites: No child path could succeed.
    Failure,
}

impl Status {
    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Inverts the status: Success becomes Failure and vice versa.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
        }
    }
}

impl From<bool> for Status {
    #[inline]
    fn from(passed: bool) -> Self {
        if passed {
            Status::Success
        } else {
            Status::Failure
        }
    }
}
