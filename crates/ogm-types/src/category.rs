//! The type classifier: one primary category per value, mutually exclusive
//! for dispatch, plus the pairwise predicates the merge engine uses for
//! "are both values of this category" checks.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Primary classification of a value for engine dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Primitive,
    Sequence,
    Set,
    Map,
    Temporal,
    Pattern,
    Record,
    Callable,
    Opaque,
}

impl Value {
    /// The category this value dispatches under, computed once per step.
    ///
    /// A non-finite-NaN float is not a number for classification purposes
    /// and degrades to [`Category::Opaque`], the conservative fallback.
    pub fn category(&self) -> Category {
        match self {
            Self::Null | Self::Bool(_) | Self::Int(_) | Self::Str(_) | Self::Sym(_) => {
                Category::Primitive
            }
            Self::Float(v) if v.is_nan() => Category::Opaque,
            Self::Float(_) => Category::Primitive,
            Self::Seq(_) => Category::Sequence,
            Self::Set(_) => Category::Set,
            Self::Map(_) => Category::Map,
            Self::Time(_) => Category::Temporal,
            Self::Pattern(_) => Category::Pattern,
            Self::Record(_) => Category::Record,
            Self::Callable(_) => Category::Callable,
            Self::Opaque(_) => Category::Opaque,
        }
    }

    pub fn is_primitive(&self) -> bool {
        self.category() == Category::Primitive
    }

    pub fn is_record(&self) -> bool {
        self.category() == Category::Record
    }
}

/// True iff every given value is of `category`.
pub fn are_all(values: &[&Value], category: Category) -> bool {
    values.iter().all(|value| value.category() == category)
}

/// True iff every given value is a string.
pub fn are_strings(values: &[&Value]) -> bool {
    values.iter().all(|value| matches!(value, Value::Str(_)))
}

pub fn are_primitives(values: &[&Value]) -> bool {
    are_all(values, Category::Primitive)
}

pub fn are_sequences(values: &[&Value]) -> bool {
    are_all(values, Category::Sequence)
}

pub fn are_sets(values: &[&Value]) -> bool {
    are_all(values, Category::Set)
}

pub fn are_maps(values: &[&Value]) -> bool {
    are_all(values, Category::Map)
}

pub fn are_temporals(values: &[&Value]) -> bool {
    are_all(values, Category::Temporal)
}

pub fn are_patterns(values: &[&Value]) -> bool {
    are_all(values, Category::Pattern)
}

pub fn are_records(values: &[&Value]) -> bool {
    are_all(values, Category::Record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Pattern;
    use crate::symbol::Symbol;
    use crate::temporal::Timestamp;

    #[test]
    fn every_value_has_exactly_one_category() {
        let values = [
            (Value::Null, Category::Primitive),
            (Value::from(true), Category::Primitive),
            (Value::from(1), Category::Primitive),
            (Value::from(1.5), Category::Primitive),
            (Value::from("s"), Category::Primitive),
            (Value::from(Symbol::new("s")), Category::Primitive),
            (Value::sequence([]), Category::Sequence),
            (Value::set_of([]), Category::Set),
            (Value::map_of([]), Category::Map),
            (Value::from(Timestamp::from_epoch_ms(0)), Category::Temporal),
            (
                Value::from(Pattern::parse("a+", "").unwrap()),
                Category::Pattern,
            ),
            (Value::record(), Category::Record),
            (Value::callable(|_| Value::Null), Category::Callable),
        ];
        for (value, expected) in values {
            assert_eq!(value.category(), expected, "for {value:?}");
        }
    }

    #[test]
    fn nan_is_not_a_primitive() {
        assert_eq!(Value::Float(f64::NAN).category(), Category::Opaque);
        assert!(!Value::Float(f64::NAN).is_primitive());
    }

    #[test]
    fn pairwise_predicates_require_all_values_to_match() {
        let seq = Value::sequence([]);
        let rec = Value::record();
        assert!(are_sequences(&[&seq, &Value::sequence([])]));
        assert!(!are_sequences(&[&seq, &rec]));
        assert!(are_strings(&[&Value::from("a"), &Value::from("b")]));
        assert!(!are_strings(&[&Value::from("a"), &Value::from(1)]));
    }

    #[test]
    fn records_are_not_any_specialized_category() {
        let rec = Value::record();
        assert!(are_records(&[&rec]));
        assert!(!are_sequences(&[&rec]));
        assert!(!are_sets(&[&rec]));
        assert!(!are_maps(&[&rec]));
        assert!(!are_temporals(&[&rec]));
        assert!(!are_patterns(&[&rec]));
    }
}
