use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};

/// A text-matching rule: source text plus a set of matching flags.
///
/// Patterns are immutable value data. The rule text is not compiled or
/// interpreted here; the type exists so that pattern-shaped values survive a
/// merge or clone with their rule text and flags intact, rebuilt into a
/// fresh value rather than shared.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pattern {
    source: String,
    flags: PatternFlags,
}

impl Pattern {
    /// Create a pattern from rule text and flags.
    pub fn new(source: impl Into<String>, flags: PatternFlags) -> Self {
        Self {
            source: source.into(),
            flags,
        }
    }

    /// Parse a pattern from rule text and a flag string such as `"gi"`.
    pub fn parse(source: impl Into<String>, flags: &str) -> TypeResult<Self> {
        Ok(Self::new(source, PatternFlags::parse(flags)?))
    }

    /// The rule text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The matching flags.
    pub fn flags(&self) -> PatternFlags {
        self.flags
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern(/{}/{})", self.source, self.flags)
    }
}

/// Matching flags carried by a [`Pattern`].
///
/// The flag letters follow the conventional single-character spellings:
/// `g` (global), `i` (ignore case), `m` (multiline), `s` (dot matches
/// newline), `u` (unicode), `y` (sticky).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternFlags {
    pub global: bool,
    pub ignore_case: bool,
    pub multiline: bool,
    pub dot_all: bool,
    pub unicode: bool,
    pub sticky: bool,
}

impl PatternFlags {
    /// Parse a flag string. Each letter may appear at most once.
    pub fn parse(flags: &str) -> TypeResult<Self> {
        let mut out = Self::default();
        for c in flags.chars() {
            let slot = match c {
                'g' => &mut out.global,
                'i' => &mut out.ignore_case,
                'm' => &mut out.multiline,
                's' => &mut out.dot_all,
                'u' => &mut out.unicode,
                'y' => &mut out.sticky,
                other => return Err(TypeError::UnknownPatternFlag(other)),
            };
            if *slot {
                return Err(TypeError::DuplicatePatternFlag(c));
            }
            *slot = true;
        }
        Ok(out)
    }
}

impl fmt::Display for PatternFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Canonical order: gimsuy.
        for (set, c) in [
            (self.global, 'g'),
            (self.ignore_case, 'i'),
            (self.multiline, 'm'),
            (self.dot_all, 's'),
            (self.unicode, 'u'),
            (self.sticky, 'y'),
        ] {
            if set {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for PatternFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PatternFlags({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_roundtrip() {
        let flags = PatternFlags::parse("gi").unwrap();
        assert!(flags.global);
        assert!(flags.ignore_case);
        assert_eq!(flags.to_string(), "gi");
    }

    #[test]
    fn display_uses_canonical_order() {
        let flags = PatternFlags::parse("yig").unwrap();
        assert_eq!(flags.to_string(), "giy");
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let err = PatternFlags::parse("gx").unwrap_err();
        assert_eq!(err, TypeError::UnknownPatternFlag('x'));
    }

    #[test]
    fn duplicate_flag_is_rejected() {
        let err = PatternFlags::parse("gg").unwrap_err();
        assert_eq!(err, TypeError::DuplicatePatternFlag('g'));
    }

    #[test]
    fn pattern_equality_is_structural() {
        let a = Pattern::parse("[a-z]+", "i").unwrap();
        let b = Pattern::parse("[a-z]+", "i").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.source(), "[a-z]+");
    }
}
