//! High-level API for the Object Graph Merger (OGM).
//!
//! Provides the stateful [`Merger`] wrapper plus direct re-exports of the
//! two engine entry points. This is the main entry point for applications
//! embedding OGM; the free functions are usable without instantiating the
//! wrapper.

pub mod merger;

pub use merger::Merger;

// Re-export the engine entry points and key types.
pub use ogm_clone::deep_clone;
pub use ogm_merge::merge;
pub use ogm_types::{Category, FieldMeta, Key, Options, Symbol, Timestamp, Value};
