//! Clone engine for the Object Graph Merger.
//!
//! Produces a structurally independent copy of an arbitrary value:
//! sequences, sets, maps, and records are rebuilt member by member,
//! temporal and pattern leaves are reconstructed from their underlying
//! data, callables become forwarding handles, and opaque values use their
//! registered custom-clone hook when one exists. Cyclic graphs terminate,
//! with back-edges pointing into the new graph.

pub mod engine;

pub use engine::deep_clone;
