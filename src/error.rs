//! Error types for `StableDeque`.
//!
//! Misuse of the container (out-of-range indexing, erasing the end position,
//! resolving an erased handle) panics instead. The only recoverable failure is
//! running out of memory while growing, reported by the `try_*` methods.

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors returned by the fallible operations on
/// [`StableDeque`](crate::StableDeque).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// Growing the node storage or the node store failed. The deque is left
    /// exactly as it was before the call.
    #[error("failed to allocate room for a node: {0}")]
    Alloc(#[from] TryReserveError),
}

#[cfg(test)]
mod tests {
    use crate::Error;
    use std::error::Error as StdError;

    fn takes_error(e: &dyn StdError) -> String {
        e.to_string()
    }

    #[test]
    fn error_is_std_error() {
        let overflow = Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err();
        let s = takes_error(&Error::from(overflow));
        assert!(s.starts_with("failed to allocate room for a node"));
    }
}
