//! Merge engine for the Object Graph Merger.
//!
//! Folds the enumerable contents of a source value into a target value in
//! place, recursing into nested records, with configurable concatenation
//! semantics for string, sequence, set, and map leaves. Cyclic sources
//! terminate: a revisited sub-value is linked into the target by reference.

pub mod engine;

pub use engine::merge;
