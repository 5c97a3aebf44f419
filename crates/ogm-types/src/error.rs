use thiserror::Error;

/// Errors produced at the edges of the value model.
///
/// The merge and clone engines themselves never fail: unknown shapes degrade
/// to the most conservative category and are carried by reference. Errors
/// only arise when constructing validated leaf types or converting a graph
/// to JSON.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown pattern flag: {0:?}")]
    UnknownPatternFlag(char),

    #[error("duplicate pattern flag: {0:?}")]
    DuplicatePatternFlag(char),

    #[error("value has no JSON representation: {0}")]
    Unrepresentable(&'static str),

    #[error("cyclic value cannot be converted to JSON")]
    CyclicValue,
}

/// Convenience alias for fallible type operations.
pub type TypeResult<T> = Result<T, TypeError>;
