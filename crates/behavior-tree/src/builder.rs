//! Builder utilities for ergonomic behavior tree construction.
//!
//! Instead of writing `Node::Sequence(vec![Node::Condition(..), ...])` or
//! `Node::Inverter(Box::new(...))`, use the shorter helpers below.

use crate::Node;

/// Creates a sequence node.
///
/// # Panics
///
/// Panics if `children` is empty. A hand-built sequence with no children is
/// meaningless and likely indicates a programming error.
#[inline]
pub fn sequence<C, A>(children: Vec<Node<C, A>>) -> Node<C, A> {
    assert!(
        !children.is_empty(),
        "Sequence must have at least one child"
    );
    Node::Sequence(children)
}

/// Creates a selector node.
///
/// # Panics
///
/// Panics if `children` is empty.
#[inline]
pub fn selector<C, A>(children: Vec<Node<C, A>>) -> Node<C, A> {
    assert!(
        !children.is_empty(),
        "Selector must have at least one child"
    );
    Node::Selector(children)
}

/// Creates an inverter node.
#[inline]
pub fn inverter<C, A>(child: Node<C, A>) -> Node<C, A> {
    Node::Inverter(Box::new(child))
}

/// Creates an always-succeed node.
#[inline]
pub fn always_succeed<C, A>(child: Node<C, A>) -> Node<C, A> {
    Node::AlwaysSucceed(Box::new(child))
}

/// Creates a condition leaf.
#[inline]
pub fn condition<C, A>(condition: C) -> Node<C, A> {
    Node::Condition(condition)
}

/// Creates an action leaf.
#[inline]
pub fn action<C, A>(action: A) -> Node<C, A> {
    Node::Action(action)
}
