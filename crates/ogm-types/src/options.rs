use serde::{Deserialize, Serialize};

/// Shared configuration read by both engines.
///
/// All fields are optional in a serialized options document; an empty
/// document deserializes to the defaults. The concatenation rules only
/// affect merge; key-enumeration fields affect both engines.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Restrict key enumeration to enumerable fields. When unset, each
    /// engine applies its own default: merge enumerates all own keys,
    /// clone enumerates enumerable keys only.
    pub enumerable_only: Option<bool>,
    /// Include symbol-keyed fields in enumeration.
    pub include_symbols: bool,
    /// Concatenation rule for string values at colliding keys.
    pub string: ConcatRule,
    /// Concatenation rule for sequence values at colliding keys.
    pub array: ConcatRule,
    /// Concatenation rule for set values at colliding keys.
    pub set: ConcatRule,
    /// Concatenation rule for map values at colliding keys.
    pub map: ConcatRule,
}

/// Per-category concatenation switch: when enabled and both the existing
/// target value and the source value at a key are of the matching category,
/// merge concatenates them instead of replacing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcatRule {
    pub concat: bool,
}

impl ConcatRule {
    pub fn enabled() -> Self {
        Self { concat: true }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enumerable_only(mut self, enumerable_only: bool) -> Self {
        self.enumerable_only = Some(enumerable_only);
        self
    }

    pub fn with_symbols(mut self, include_symbols: bool) -> Self {
        self.include_symbols = include_symbols;
        self
    }

    pub fn concat_strings(mut self) -> Self {
        self.string = ConcatRule::enabled();
        self
    }

    pub fn concat_arrays(mut self) -> Self {
        self.array = ConcatRule::enabled();
        self
    }

    pub fn concat_sets(mut self) -> Self {
        self.set = ConcatRule::enabled();
        self
    }

    pub fn concat_maps(mut self) -> Self {
        self.map = ConcatRule::enabled();
        self
    }

    /// Overlay `other` onto these options: any flag enabled on `other` is
    /// enabled here, and an explicit enumeration policy on `other` is
    /// adopted. A previously enabled flag is never cleared.
    pub fn overlay(&mut self, other: &Options) {
        if other.enumerable_only.is_some() {
            self.enumerable_only = other.enumerable_only;
        }
        self.include_symbols |= other.include_symbols;
        self.string.concat |= other.string.concat;
        self.array.concat |= other.array.concat;
        self.set.concat |= other.set.concat;
        self.map.concat |= other.map.concat;
    }
}
