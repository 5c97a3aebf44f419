//! The recursive merge algorithm.
//!
//! # Invariants
//!
//! - The target is mutated in place through its handle; the returned value
//!   is the same handle the caller passed in.
//! - A fresh [`VisitSet`] is created per top-level call. Both roots are
//!   marked visited before the first level is processed; only re-visits at
//!   depth > 0 short-circuit.
//! - Only records are descended into. Every other category is assigned at
//!   the parent level, by reference for composites.

use ogm_types::{
    are_maps, are_sequences, are_sets, are_strings, Options, Value, VisitSet,
};

/// Merge `source` into `target` in place and return `target`.
///
/// A non-record `source` leaves `target` untouched. Keys are enumerated per
/// `options` (all own keys by default; see [`Options::enumerable_only`]).
/// At each colliding key the source value replaces the target value unless
/// a concatenation rule for the matching category applies; nested records
/// merge recursively. A sub-value seen twice in the same call is linked into
/// the target by reference rather than descended into again, so cyclic
/// sources terminate.
pub fn merge(target: &Value, source: &Value, options: &Options) -> Value {
    let mut visited = VisitSet::new();
    merge_into(target, source, options, &mut visited, 0)
}

fn merge_into(
    target: &Value,
    source: &Value,
    options: &Options,
    visited: &mut VisitSet,
    depth: u32,
) -> Value {
    if depth != 0 && visited.has_visited(source) {
        tracing::trace!(depth, "revisited source sub-value, linking by reference");
        return source.clone();
    }
    visited.mark_visited(source);
    visited.mark_visited(target);

    let (Some(source_record), Some(target_record)) = (source.as_record(), target.as_record())
    else {
        return target.clone();
    };

    let keys = source_record.borrow().selected_keys(options, false);
    for key in keys {
        let field = source_record
            .borrow()
            .get(&key)
            .map(|field| (field.value.clone(), field.meta));
        let Some((source_value, source_meta)) = field else {
            continue;
        };
        let existing = target_record
            .borrow()
            .get(&key)
            .map(|field| field.value.clone());

        let candidate = concatenated(existing.as_ref(), &source_value, options);
        if let Some(existing) = &existing {
            if existing.same(&candidate) {
                continue;
            }
        }

        let assigned = if candidate.is_record() {
            let base = match &existing {
                Some(value) if value.is_record() => value.clone(),
                _ => Value::record(),
            };
            merge_into(&base, &candidate, options, visited, depth + 1)
        } else {
            candidate
        };

        let written = target_record
            .borrow_mut()
            .write_field(key.clone(), assigned, source_meta);
        if !written {
            tracing::trace!(key = ?key, "write to non-writable field dropped");
        }
    }

    target.clone()
}

/// The candidate replacement value for one key: the concatenation of the
/// existing and source values when a matching-category rule is enabled,
/// otherwise the source value itself. Concatenation always allocates a
/// fresh collection.
fn concatenated(existing: Option<&Value>, source: &Value, options: &Options) -> Value {
    let Some(existing) = existing else {
        return source.clone();
    };
    if options.string.concat && are_strings(&[existing, source]) {
        if let (Value::Str(head), Value::Str(tail)) = (existing, source) {
            return Value::Str(format!("{head}{tail}"));
        }
    }
    if options.array.concat && are_sequences(&[existing, source]) {
        if let (Some(head), Some(tail)) = (existing.as_sequence(), source.as_sequence()) {
            let mut items = head.borrow().clone();
            items.extend(tail.borrow().iter().cloned());
            return Value::sequence(items);
        }
    }
    if options.set.concat && are_sets(&[existing, source]) {
        if let (Some(head), Some(tail)) = (existing.as_set(), source.as_set()) {
            let mut union = head.borrow().clone();
            for member in tail.borrow().iter() {
                union.insert(member.clone());
            }
            return Value::from_set(union);
        }
    }
    if options.map.concat && are_maps(&[existing, source]) {
        if let (Some(head), Some(tail)) = (existing.as_map(), source.as_map()) {
            let mut union = head.borrow().clone();
            for (key, value) in tail.borrow().entries() {
                union.insert(key.clone(), value.clone());
            }
            return Value::from_map(union);
        }
    }
    source.clone()
}
