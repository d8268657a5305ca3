//! Tree representation and evaluation.
//!
//! A tree is an owned value generic over its condition type `C` and action
//! type `A`. Nothing in it is executable by itself: [`evaluate`] interprets it
//! against a [`Blackboard`] and returns the action the tree settled on.

use crate::{Blackboard, Status, composite, decorator};

/// A behavior tree node.
///
/// # Semantics
///
/// - `Sequence`: children left to right, stop on the first failure (AND)
/// - `Selector`: children left to right, stop on the first success (OR)
/// - `Inverter`: flips the child's status (NOT)
/// - `AlwaysSucceed`: runs the child, reports success regardless
/// - `Condition`: asks the blackboard
/// - `Action`: records itself as the decision and succeeds
///
/// An empty sequence succeeds and an empty selector fails, matching the
/// identities of AND and OR.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node<C, A> {
    Sequence(Vec<Node<C, A>>),
    Selector(Vec<Node<C, A>>),
    Inverter(Box<Node<C, A>>),
    AlwaysSucceed(Box<Node<C, A>>),
    Condition(C),
    Action(A),
}

impl<C, A> Node<C, A> {
    /// Counts every node in the tree, including this one.
    pub fn len(&self) -> usize {
        match self {
            Node::Sequence(children) | Node::Selector(children) => {
                1 + children.iter().map(Node::len).sum::<usize>()
            }
            Node::Inverter(child) | Node::AlwaysSucceed(child) => 1 + child.len(),
            Node::Condition(_) | Node::Action(_) => 1,
        }
    }

    /// A tree always has at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates over the action leaves in depth-first order.
    pub fn actions(&self) -> Vec<&A> {
        let mut out = Vec::new();
        self.collect_actions(&mut out);
        out
    }

    fn collect_actions<'a>(&'a self, out: &mut Vec<&'a A>) {
        match self {
            Node::Sequence(children) | Node::Selector(children) => {
                for child in children {
                    child.collect_actions(out);
                }
            }
            Node::Inverter(child) | Node::AlwaysSucceed(child) => child.collect_actions(out),
            Node::Condition(_) => {}
            Node::Action(action) => out.push(action),
        }
    }
}

/// Evaluates a tree and returns the chosen action.
///
/// Returns `None` when the root fails or when it succeeds without reaching
/// an action leaf.
pub fn evaluate<B, A>(root: &Node<B::Condition, A>, board: &B) -> Option<A>
where
    B: Blackboard + ?Sized,
    A: Clone,
{
    let mut chosen = None;
    match tick(root, board, &mut chosen) {
        Status::Success => chosen,
        Status::Failure => None,
    }
}

/// Ticks a single node, writing the first reached action into `chosen`.
///
/// If the node fails, any action it recorded is rolled back so that only
/// actions on a successful path survive.
pub fn tick<B, A>(node: &Node<B::Condition, A>, board: &B, chosen: &mut Option<A>) -> Status
where
    B: Blackboard + ?Sized,
    A: Clone,
{
    let was_empty = chosen.is_none();

    let status = match node {
        Node::Sequence(children) => composite::tick_sequence(children, board, chosen),
        Node::Selector(children) => composite::tick_selector(children, board, chosen),
        Node::Inverter(child) => decorator::tick_inverter(child, board, chosen),
        Node::AlwaysSucceed(child) => decorator::tick_always_succeed(child, board, chosen),
        Node::Condition(condition) => Status::from(board.check(condition)),
        Node::Action(action) => {
            if chosen.is_none() {
                *chosen = Some(action.clone());
            }
            Status::Success
        }
    };

    if status.is_failure() && was_empty {
        *chosen = None;
    }
    status
}
