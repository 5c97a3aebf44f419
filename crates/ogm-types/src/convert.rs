//! JSON interop for the value model.
//!
//! JSON is a strict subset of the value model, so ingress is total: every
//! JSON document maps onto null/bool/number/string/sequence/record values
//! with default field meta. Egress is fallible: sets, maps, timestamps,
//! patterns, symbols, callables, and opaques have no canonical JSON image,
//! and cyclic graphs cannot be written out at all. This is fixture and
//! interop glue, not a wire format.

use serde_json::Value as Json;

use crate::error::{TypeError, TypeResult};
use crate::record::Field;
use crate::value::Value;

impl Value {
    /// Build a value graph from a JSON document.
    ///
    /// Objects become records with all-default field meta; note that the
    /// JSON parser sorts object keys, so record field order follows key
    /// order rather than document order.
    pub fn from_json(json: Json) -> Value {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Value::Str(s),
            Json::Array(items) => Value::sequence(items.into_iter().map(Value::from_json)),
            Json::Object(fields) => Value::record_from(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, Value::from_json(value))),
            ),
        }
    }

    /// Write the value graph out as JSON.
    ///
    /// Records contribute their enumerable name-keyed fields; symbol keys
    /// are skipped. Values outside the JSON subset error with
    /// [`TypeError::Unrepresentable`], cyclic graphs with
    /// [`TypeError::CyclicValue`].
    pub fn to_json(&self) -> TypeResult<Json> {
        let mut path = Vec::new();
        to_json_inner(self, &mut path)
    }
}

fn to_json_inner(value: &Value, path: &mut Vec<usize>) -> TypeResult<Json> {
    match value {
        Value::Null => Ok(Json::Null),
        Value::Bool(b) => Ok(Json::Bool(*b)),
        Value::Int(i) => Ok(Json::from(*i)),
        Value::Float(v) => serde_json::Number::from_f64(*v)
            .map(Json::Number)
            .ok_or(TypeError::Unrepresentable("non-finite number")),
        Value::Str(s) => Ok(Json::String(s.clone())),
        Value::Sym(_) => Err(TypeError::Unrepresentable("symbol")),
        Value::Seq(handle) => {
            let address = enter(value, path)?;
            let items: Vec<Value> = handle.borrow().clone();
            let mut out = Vec::with_capacity(items.len());
            for item in &items {
                out.push(to_json_inner(item, path)?);
            }
            leave(address, path);
            Ok(Json::Array(out))
        }
        Value::Record(handle) => {
            let address = enter(value, path)?;
            let entries: Vec<_> = handle.borrow().entries().to_vec();
            let mut out = serde_json::Map::new();
            for (key, Field { value, meta }) in &entries {
                let Some(name) = key.name() else { continue };
                if !meta.is_enumerable() {
                    continue;
                }
                out.insert(name.to_string(), to_json_inner(value, path)?);
            }
            leave(address, path);
            Ok(Json::Object(out))
        }
        Value::Set(_) => Err(TypeError::Unrepresentable("set")),
        Value::Map(_) => Err(TypeError::Unrepresentable("map")),
        Value::Time(_) => Err(TypeError::Unrepresentable("timestamp")),
        Value::Pattern(_) => Err(TypeError::Unrepresentable("pattern")),
        Value::Callable(_) => Err(TypeError::Unrepresentable("callable")),
        Value::Opaque(_) => Err(TypeError::Unrepresentable("opaque")),
    }
}

fn enter(value: &Value, path: &mut Vec<usize>) -> TypeResult<Option<usize>> {
    let Some(address) = value.address() else {
        return Ok(None);
    };
    if path.contains(&address) {
        return Err(TypeError::CyclicValue);
    }
    path.push(address);
    Ok(Some(address))
}

fn leave(address: Option<usize>, path: &mut Vec<usize>) {
    if address.is_some() {
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::record::FieldMeta;

    #[test]
    fn json_roundtrip_for_the_json_subset() {
        let doc = json!({"a": 1, "b": [true, null, "s"], "c": {"d": 2.5}});
        let value = Value::from_json(doc.clone());
        assert_eq!(value.to_json().unwrap(), doc);
    }

    #[test]
    fn numbers_split_into_int_and_float() {
        assert_eq!(Value::from_json(json!(3)), Value::Int(3));
        assert_eq!(Value::from_json(json!(3.5)), Value::Float(3.5));
    }

    #[test]
    fn hidden_fields_are_not_written_out() {
        let rec = Value::record();
        rec.set_field("visible", Value::from(1));
        rec.define_field("hidden", Value::from(2), FieldMeta::hidden());
        assert_eq!(rec.to_json().unwrap(), json!({"visible": 1}));
    }

    #[test]
    fn shared_subtrees_are_duplicated_not_cyclic() {
        let shared = Value::from_json(json!({"k": 1}));
        let root = Value::record();
        root.set_field("a", shared.clone());
        root.set_field("b", shared);
        assert_eq!(root.to_json().unwrap(), json!({"a": {"k": 1}, "b": {"k": 1}}));
    }

    #[test]
    fn cyclic_graphs_are_rejected() {
        let root = Value::record();
        root.set_field("this", root.clone());
        assert_eq!(root.to_json().unwrap_err(), TypeError::CyclicValue);
    }

    #[test]
    fn non_json_leaves_are_unrepresentable() {
        let err = Value::set_of([]).to_json().unwrap_err();
        assert!(matches!(err, TypeError::Unrepresentable(_)));
        let err = Value::callable(|_| Value::Null).to_json().unwrap_err();
        assert!(matches!(err, TypeError::Unrepresentable(_)));
    }
}
