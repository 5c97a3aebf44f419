use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// An absolute instant in time, in milliseconds since the UNIX epoch.
///
/// Timestamps are immutable by-value data: copying one yields a new instant
/// with the same absolute time and no shared state. Negative values represent
/// instants before the epoch.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp {
    epoch_ms: i64,
}

impl Timestamp {
    /// Create a timestamp from epoch milliseconds.
    pub fn from_epoch_ms(epoch_ms: i64) -> Self {
        Self { epoch_ms }
    }

    /// The current wall-clock instant.
    pub fn now() -> Self {
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        Self { epoch_ms: ms }
    }

    /// Milliseconds since the UNIX epoch.
    pub fn epoch_ms(&self) -> i64 {
        self.epoch_ms
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({}ms)", self.epoch_ms)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.epoch_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_is_value_equal() {
        let a = Timestamp::from_epoch_ms(0);
        let b = a;
        assert_eq!(a, b);
        assert_eq!(b.epoch_ms(), 0);
    }

    #[test]
    fn ordering_follows_epoch() {
        assert!(Timestamp::from_epoch_ms(-1) < Timestamp::from_epoch_ms(1));
    }

    #[test]
    fn serde_roundtrip() {
        let t = Timestamp::from_epoch_ms(1_700_000_000_000);
        let json = serde_json::to_string(&t).unwrap();
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(t, parsed);
    }
}
