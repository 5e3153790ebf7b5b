//! The parsed call descriptor.

use crate::wire;
use serde::{Deserialize, Serialize};

/// A single call crossing the engine/host boundary.
///
/// Immutable once built: an operation identifier plus an ordered argument
/// list. One `CallInfo` is constructed per dispatch and discarded after
/// the dispatch returns; no partially-parsed state is ever observable.
///
/// Argument *decoding* (numbers, flags, …) belongs to whoever handles the
/// call - this type only owns tokenization.
///
/// # Example
///
/// ```
/// use embr_call::CallInfo;
///
/// let call = CallInfo::parse("volume:0.5:fade");
/// assert_eq!(call.operation(), "volume");
/// assert_eq!(call.args(), ["0.5", "fade"]);
/// assert_eq!(call.arg(1), Some("fade"));
/// assert_eq!(call.to_wire(), "volume:0.5:fade");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallInfo {
    operation: String,
    args: Vec<String>,
}

impl CallInfo {
    /// Builds a descriptor from already-tokenized parts.
    ///
    /// Tokens must be delimiter-free; violations are emitter-contract
    /// bugs and trip a debug assertion.
    #[must_use]
    pub fn new(operation: impl Into<String>, args: Vec<String>) -> Self {
        let operation = operation.into();
        debug_assert!(
            !operation.contains(wire::DELIMITER) && !args.iter().any(|a| a.contains(wire::DELIMITER)),
            "call tokens must not contain {:?}",
            wire::DELIMITER
        );
        Self { operation, args }
    }

    /// Parses a raw wire string.
    ///
    /// Total and deterministic over the contractual alphabet. An empty
    /// raw string cannot name an operation; the engine stub never sends
    /// one, so this trips a debug assertion rather than returning an
    /// error the caller would have to invent a policy for.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        debug_assert!(!raw.is_empty(), "raw call string must name an operation");
        wire::parse(raw)
    }

    /// The operation identifier.
    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// All argument tokens, in wire order.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The argument at `index`, if present.
    #[must_use]
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Re-serializes to the wire form.
    ///
    /// Inverse of [`parse`](Self::parse) over the contractual alphabet.
    #[must_use]
    pub fn to_wire(&self) -> String {
        wire::to_wire(&self.operation, &self.args)
    }
}

impl std::fmt::Display for CallInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_wire())
    }
}
