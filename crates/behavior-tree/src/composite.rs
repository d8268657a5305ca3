//! Composite behavior nodes.
//!
//! Composite nodes control the evaluation order of multiple children:
//! [`Node::Sequence`] (AND logic) and [`Node::Selector`] (OR logic).

use crate::{Blackboard, Node, Status, tick};

/// Evaluates children in order until one fails.
///
/// - If a child returns `Failure`, the sequence **stops immediately** and returns `Failure`
/// - If a child returns `Success`, the sequence **continues** to the next child
/// - If all children return `Success`, the sequence returns `Success`
pub(crate) fn tick_sequence<B, A>(
    children: &[Node<B::Condition, A>],
    board: &B,
    chosen: &mut Option<A>,
) -> Status
where
    B: Blackboard + ?Sized,
    A: Clone,
{
    for child in children {
        match tick(child, board, chosen) {
            Status::Success => continue,
            Status::Failure => return Status::Failure,
        }
    }
    Status::Success
}

/// Evaluates children in order until one succeeds.
///
/// - If a child returns `Success`, the selector **stops immediately** and returns `Success`
/// - If a child returns `Failure`, the selector **continues** to the next child
/// - If all children return `Failure`, the selector returns `Failure`
pub(crate) fn tick_selector<B, A>(
    children: &[Node<B::Condition, A>],
    board: &B,
    chosen: &mut Option<A>,
) -> Status
where
    B: Blackboard + ?Sized,
    A: Clone,
{
    for child in children {
        match tick(child, board, chosen) {
            Status::Success => return Status::Success,
            Status::Failure => continue,
        }
    }
    Status::Failure
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use crate::builder::*;
    use crate::{Blackboard, Status, tick};

    /// Counts how many conditions were asked, to observe short-circuiting.
    struct Probe {
        asked: Cell<u32>,
    }

    impl Probe {
        fn new() -> Self {
            Self { asked: Cell::new(0) }
        }
    }

    impl Blackboard for Probe {
        type Condition = bool;

        fn check(&self, answer: &bool) -> bool {
            self.asked.set(self.asked.get() + 1);
            *answer
        }
    }

    #[test]
    fn sequence_all_success() {
        let seq = sequence::<bool, ()>(vec![condition(true), condition(true)]);

        let probe = Probe::new();
        assert_eq!(tick(&seq, &probe, &mut None), Status::Success);
        assert_eq!(probe.asked.get(), 2);
    }

    #[test]
    fn sequence_fails_on_first_failure() {
        let seq = sequence::<bool, ()>(vec![
            condition(true),
            condition(false),
            condition(true), // Should not be asked
        ]);

        let probe = Probe::new();
        assert_eq!(tick(&seq, &probe, &mut None), Status::Failure);
        assert_eq!(probe.asked.get(), 2);
    }

    #[test]
    fn selector_succeeds_on_first_success() {
        let sel = selector::<bool, ()>(vec![
            condition(false),
            condition(true),
            condition(true), // Should not be asked
        ]);

        let probe = Probe::new();
        assert_eq!(tick(&sel, &probe, &mut None), Status::Success);
        assert_eq!(probe.asked.get(), 2);
    }

    #[test]
    fn selector_fails_when_all_fail() {
        let sel = selector::<bool, ()>(vec![condition(false), condition(false)]);

        let probe = Probe::new();
        assert_eq!(tick(&sel, &probe, &mut None), Status::Failure);
    }

    #[test]
    fn empty_composites_follow_logical_identities() {
        let probe = Probe::new();
        let empty_seq: crate::Node<bool, ()> = crate::Node::Sequence(Vec::new());
        let empty_sel: crate::Node<bool, ()> = crate::Node::Selector(Vec::new());

        assert_eq!(tick(&empty_seq, &probe, &mut None), Status::Success);
        assert_eq!(tick(&empty_sel, &probe, &mut None), Status::Failure);
    }
}
