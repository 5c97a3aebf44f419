//! Identity-keyed traversal state shared by the engines.
//!
//! Both trackers are scoped to one top-level call: each invocation of merge
//! or clone constructs a fresh one, so independent calls can never observe
//! each other's visits as spurious cycles. Identity is the composite handle
//! address ([`Value::address`]); primitives are never tracked. Addresses are
//! stable because the engines borrow the source graph for the whole
//! traversal.

use std::collections::{HashMap, HashSet};

use crate::value::Value;

/// The set of composite values already visited by the merge engine.
///
/// A composite is marked before its children are recursed into, so a value
/// that directly or transitively contains itself is seen on re-entry and the
/// traversal short-circuits instead of recursing without bound.
#[derive(Debug, Default)]
pub struct VisitSet {
    seen: HashSet<usize>,
}

impl VisitSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `value` is a composite that has already been marked.
    pub fn has_visited(&self, value: &Value) -> bool {
        value
            .address()
            .is_some_and(|address| self.seen.contains(&address))
    }

    /// Mark a composite as visited. No-op for primitives.
    pub fn mark_visited(&mut self, value: &Value) {
        if let Some(address) = value.address() {
            self.seen.insert(address);
        }
    }
}

/// Identity map from source composites to their clones.
///
/// The clone engine registers each composite's clone before descending into
/// its children, so re-encountering a source mid-traversal yields the clone
/// in progress: cyclic back-edges in the result point into the new graph,
/// not back into the source.
#[derive(Debug, Default)]
pub struct CloneLog {
    clones: HashMap<usize, Value>,
}

impl CloneLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The clone previously registered for `source`, if any.
    pub fn lookup(&self, source: &Value) -> Option<Value> {
        let address = source.address()?;
        self.clones.get(&address).cloned()
    }

    /// Register `clone` as the copy of `source`. No-op for primitives.
    pub fn record(&mut self, source: &Value, clone: &Value) {
        if let Some(address) = source.address() {
            self.clones.insert(address, clone.clone());
        }
    }
}
