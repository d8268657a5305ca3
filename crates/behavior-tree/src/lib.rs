//! Data-driven behavior trees for turn-based decision making.
//!
//! Trees are plain values: a [`Node`] is either a composite, a decorator, a
//! condition leaf or an action leaf. Evaluation is a pure function of the tree
//! and a read-only [`Blackboard`], so the same tree can be stored in a content
//! catalog, cloned into every enemy instance and replayed deterministically.
//!
//! - **No delta time**: every evaluation completes immediately
//! - **No Running state**: nodes either succeed or fail
//! - **First action wins**: the first action leaf reached on a successful
//!   path is the decision; actions emitted on failed branches are discarded
//!
//! # Architecture
//!
//! - [`Node`]: the tree itself (composites, decorators, leaves)
//! - [`Blackboard`]: answers condition leaves against the current world
//! - [`Status`]: Success or Failure
//! - [`evaluate`]: walks a tree and returns the chosen action, if any

pub mod blackboard;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod node;
pub mod status;

pub use blackboard::Blackboard;
pub use builder::{action, always_succeed, condition, inverter, selector, sequence};
pub use node::{Node, evaluate, tick};
pub use status::Status;
