//! Decorator behavior nodes.
//!
//! Decorators wrap a single child and modify its result:
//! [`Node::Inverter`] (NOT logic) and [`Node::AlwaysSucceed`] (failure suppression).

use crate::{Blackboard, Node, Status, tick};

/// Inverts the result of the child.
///
/// An action recorded by a child that succeeded is discarded, because the
/// inverter turns that success into a failure.
pub(crate) fn tick_inverter<B, A>(
    child: &Node<B::Condition, A>,
    board: &B,
    chosen: &mut Option<A>,
) -> Status
where
    B: Blackboard + ?Sized,
    A: Clone,
{
    tick(child, board, chosen).invert()
}

/// Runs the child and reports `Success` regardless of its result.
///
/// Useful for optional checks that shouldn't cause a sequence to fail.
pub(crate) fn tick_always_succeed<B, A>(
    child: &Node<B::Condition, A>,
    board: &B,
    chosen: &mut Option<A>,
) -> Status
where
    B: Blackboard + ?Sized,
    A: Clone,
{
    let _ = tick(child, board, chosen);
    Status::Success
}
