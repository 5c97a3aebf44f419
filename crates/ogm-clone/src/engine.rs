//! The recursive clone algorithm.
//!
//! Dispatch precedence per value: sequence, set, map, temporal, pattern,
//! record, callable, opaque. Each composite's clone is registered in the
//! [`CloneLog`] before its children are descended into, so a value reached
//! twice (shared subtree or cycle) resolves to the one clone already built.

use std::cell::RefCell;
use std::rc::Rc;

use ogm_types::{
    CloneLog, MapHandle, Options, Pattern, Record, RecordHandle, SeqHandle, SetHandle, Value,
    ValueMap, ValueSet,
};

/// Produce a structurally independent copy of `source`.
///
/// Primitives are returned as-is: they are immutable by-value data, so
/// identity preservation is both safe and cheapest. Composites are rebuilt
/// recursively with no shared mutable identity between source and result,
/// except where an opaque value without a custom-clone hook is carried by
/// reference. Record keys are enumerated per `options`, enumerable-only by
/// default (see [`Options::enumerable_only`]).
pub fn deep_clone(source: &Value, options: &Options) -> Value {
    let mut log = CloneLog::new();
    clone_value(source, options, &mut log)
}

fn clone_value(source: &Value, options: &Options, log: &mut CloneLog) -> Value {
    if source.is_primitive() {
        return source.clone();
    }
    if let Some(already_cloned) = log.lookup(source) {
        tracing::trace!("revisited sub-value, reusing its clone");
        return already_cloned;
    }
    match source {
        Value::Seq(handle) => clone_sequence(source, handle, options, log),
        Value::Set(handle) => clone_set(source, handle, options, log),
        Value::Map(handle) => clone_map(source, handle, options, log),
        Value::Time(instant) => Value::Time(*instant),
        Value::Pattern(pattern) => Value::Pattern(Pattern::new(pattern.source(), pattern.flags())),
        Value::Record(handle) => clone_record(source, handle, options, log),
        Value::Callable(callable) => Value::Callable(callable.forwarding()),
        Value::Opaque(opaque) => opaque.custom_clone().unwrap_or_else(|| source.clone()),
        // Remaining variants are by-value primitives (including NaN floats,
        // which classify as opaque but carry no mutable state).
        _ => source.clone(),
    }
}

fn clone_sequence(source: &Value, handle: &SeqHandle, options: &Options, log: &mut CloneLog) -> Value {
    let items: Vec<Value> = handle.borrow().clone();
    let out_handle: SeqHandle = Rc::new(RefCell::new(Vec::with_capacity(items.len())));
    let out = Value::Seq(Rc::clone(&out_handle));
    log.record(source, &out);
    for item in &items {
        let cloned = clone_value(item, options, log);
        out_handle.borrow_mut().push(cloned);
    }
    out
}

fn clone_set(source: &Value, handle: &SetHandle, options: &Options, log: &mut CloneLog) -> Value {
    let members: Vec<Value> = handle.borrow().iter().cloned().collect();
    let out_handle: SetHandle = Rc::new(RefCell::new(ValueSet::new()));
    let out = Value::Set(Rc::clone(&out_handle));
    log.record(source, &out);
    for member in &members {
        let cloned = clone_value(member, options, log);
        out_handle.borrow_mut().insert(cloned);
    }
    out
}

fn clone_map(source: &Value, handle: &MapHandle, options: &Options, log: &mut CloneLog) -> Value {
    let entries: Vec<(Value, Value)> = handle.borrow().entries().to_vec();
    let out_handle: MapHandle = Rc::new(RefCell::new(ValueMap::new()));
    let out = Value::Map(Rc::clone(&out_handle));
    log.record(source, &out);
    for (key, value) in &entries {
        // Keys are cloned too: a composite key in the copy must not alias
        // the source graph.
        let cloned_key = clone_value(key, options, log);
        let cloned_value = clone_value(value, options, log);
        out_handle.borrow_mut().insert(cloned_key, cloned_value);
    }
    out
}

fn clone_record(source: &Value, handle: &RecordHandle, options: &Options, log: &mut CloneLog) -> Value {
    let out_handle: RecordHandle = Rc::new(RefCell::new(Record::new()));
    let out = Value::Record(Rc::clone(&out_handle));
    log.record(source, &out);
    let keys = handle.borrow().selected_keys(options, true);
    for key in keys {
        let field = handle
            .borrow()
            .get(&key)
            .map(|field| (field.value.clone(), field.meta));
        let Some((value, meta)) = field else {
            continue;
        };
        let cloned = clone_value(&value, options, log);
        out_handle.borrow_mut().write_field(key, cloned, meta);
    }
    out
}


#[cfg(test)]
mod prop_tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    fn json_subset_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[a-z]{0,8}".prop_map(|s| Value::from(s.as_str())),
        ];
        leaf.prop_recursive(4, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4)
                    .prop_map(|items| Value::sequence(items)),
                prop::collection::vec(("[a-z]{1,6}", inner), 0..4)
                    .prop_map(|fields| Value::record_from(fields)),
            ]
        })
    }

    proptest! {
        #[test]
        fn clone_preserves_structure(source in json_subset_value()) {
            let cloned = deep_clone(&source, &Options::default());
            prop_assert_eq!(&cloned, &source);
        }

        #[test]
        fn clone_never_shares_composite_identity(source in json_subset_value()) {
            let cloned = deep_clone(&source, &Options::default());
            if let (Some(source_address), Some(clone_address)) =
                (source.address(), cloned.address())
            {
                prop_assert_ne!(source_address, clone_address);
            }
        }

        #[test]
        fn cloning_twice_is_stable(source in json_subset_value()) {
            let once = deep_clone(&source, &Options::default());
            let twice = deep_clone(&once, &Options::default());
            prop_assert_eq!(&twice, &once);
        }
    }

    #[test]
    fn regression_deep_nesting_stays_equal() {
        let source = Value::from_json(json!({"a": [{"b": [{"c": 0}]}]}));
        let cloned = deep_clone(&source, &Options::default());
        assert_eq!(cloned, source);
    }
}
