use ogm_clone::deep_clone;
use ogm_merge::merge;
use ogm_types::{Options, Value};

/// A stateful wrapper over the two engines: a held value plus held merge
/// options.
///
/// Sources applied through the wrapper merge into the held value using the
/// held options; the held value keeps its identity across applications, so
/// handles obtained from [`value`] stay live. [`snapshot`] and [`fork`]
/// are the read-side: an independent copy of the current value, and a new
/// wrapper seeded with one.
///
/// [`value`]: Merger::value
/// [`snapshot`]: Merger::snapshot
/// [`fork`]: Merger::fork
#[derive(Debug)]
pub struct Merger {
    value: Value,
    options: Options,
}

impl Merger {
    /// Wrap an initial value with merge options.
    pub fn new(value: Value, options: Options) -> Self {
        Self { value, options }
    }

    /// Wrap an initial value with default options.
    pub fn from_value(value: Value) -> Self {
        Self::new(value, Options::default())
    }

    /// Merge `source` into the held value using the held options.
    pub fn apply(&mut self, source: &Value) {
        tracing::debug!(category = ?source.category(), "applying source to held value");
        self.value = merge(&self.value, source, &self.options);
    }

    /// Merge many sources into the held value, in sequence.
    pub fn apply_all<'a, I>(&mut self, sources: I)
    where
        I: IntoIterator<Item = &'a Value>,
    {
        for source in sources {
            self.apply(source);
        }
    }

    /// The current value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// A deep clone of the current value, taken with default options.
    pub fn snapshot(&self) -> Value {
        deep_clone(&self.value, &Options::default())
    }

    /// A copy of the held options.
    pub fn options(&self) -> Options {
        self.options.clone()
    }

    /// Overlay new options onto the held options.
    pub fn merge_options(&mut self, other: &Options) {
        self.options.overlay(other);
    }

    /// A brand-new wrapper seeded with a clone of the current value and a
    /// copy of the held options.
    pub fn fork(&self) -> Self {
        Self::new(self.snapshot(), self.options())
    }
}

impl Default for Merger {
    /// An empty record with default options.
    fn default() -> Self {
        Self::new(Value::record(), Options::default())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn value(doc: serde_json::Value) -> Value {
        Value::from_json(doc)
    }

    #[test]
    fn default_wrapper_holds_an_empty_record() {
        let merger = Merger::default();
        assert!(merger.value().is_record());
        assert_eq!(merger.value().to_json().unwrap(), json!({}));
    }

    #[test]
    fn apply_merges_with_held_options() {
        let mut merger = Merger::new(
            value(json!({"tags": ["a"]})),
            Options::new().concat_arrays(),
        );
        merger.apply(&value(json!({"tags": ["b"]})));
        assert_eq!(
            merger.value().to_json().unwrap(),
            json!({"tags": ["a", "b"]})
        );
    }

    #[test]
    fn held_value_identity_survives_applications() {
        let mut merger = Merger::default();
        let before = merger.value().clone();
        merger.apply(&value(json!({"a": 1})));
        assert!(merger.value().same(&before));
    }

    #[test]
    fn apply_all_merges_in_sequence() {
        let mut merger = Merger::default();
        let sources = [
            value(json!({"a": 1})),
            value(json!({"b": 2})),
            value(json!({"a": 3})),
        ];
        merger.apply_all(&sources);
        assert_eq!(
            merger.value().to_json().unwrap(),
            json!({"a": 3, "b": 2})
        );
    }

    #[test]
    fn snapshot_is_independent_of_the_held_value() {
        let mut merger = Merger::from_value(value(json!({"nested": {"n": 1}})));
        let snapshot = merger.snapshot();
        merger.apply(&value(json!({"nested": {"n": 2}})));

        assert_eq!(snapshot.to_json().unwrap(), json!({"nested": {"n": 1}}));
        assert!(!snapshot.same(merger.value()));
    }

    #[test]
    fn options_accessor_returns_a_copy() {
        let mut merger = Merger::new(Value::record(), Options::new().concat_sets());
        let mut copy = merger.options();
        copy.include_symbols = true;
        assert!(!merger.options().include_symbols);

        merger.merge_options(&Options::new().with_symbols(true));
        assert!(merger.options().include_symbols);
        assert!(merger.options().set.concat);
    }

    #[test]
    fn fork_seeds_a_detached_wrapper() {
        let mut original = Merger::new(
            value(json!({"n": 1})),
            Options::new().concat_strings(),
        );
        let mut forked = original.fork();

        assert_eq!(forked.value().to_json().unwrap(), json!({"n": 1}));
        assert!(!forked.value().same(original.value()));
        assert!(forked.options().string.concat);

        forked.apply(&value(json!({"n": 2})));
        assert_eq!(original.value().to_json().unwrap(), json!({"n": 1}));

        original.apply(&value(json!({"n": 3})));
        assert_eq!(forked.value().to_json().unwrap(), json!({"n": 2}));
    }

    #[test]
    fn free_functions_work_without_the_wrapper() {
        let target = value(json!({"a": 1}));
        let merged = crate::merge(&target, &value(json!({"b": 2})), &Options::default());
        assert_eq!(merged.to_json().unwrap(), json!({"a": 1, "b": 2}));

        let cloned = crate::deep_clone(&target, &Options::default());
        assert_eq!(cloned, target);
        assert!(!cloned.same(&target));
    }
}
