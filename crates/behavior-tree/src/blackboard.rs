//! Read-only world access for condition leaves.
//!
//! A [`Blackboard`] is whatever view of the game the tree is evaluated
//! against. The tree never mutates it; conditions only ask questions.

/// Answers the condition leaves of a tree.
pub trait Blackboard {
    /// Condition vocabulary understood by this blackboard.
    type Condition;

    /// Returns `true` when the condition currently holds.
    fn check(&self, condition: &Self::Condition) -> bool;
}

impl<B: Blackboard + ?Sized> Blackboard for &B {
    type Condition = B::Condition;

    #[inline]
    fn check(&self, condition: &Self::Condition) -> bool {
        (**self).check(condition)
    }
}
