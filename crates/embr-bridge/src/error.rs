//! Bridge-layer errors.
//!
//! # Error Code Convention
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`BridgeError::DeadHost`] | `BRIDGE_DEAD_HOST` | No |
//! | [`BridgeError::Handler`] | inner handler code | inner |
//!
//! Dead-host is the hard failure of this layer: the engine called into
//! a host that was already torn down. It is never swallowed and never
//! retried - retrying cannot change liveness, and hiding it would hide
//! a use-after-teardown bug that is invisible anywhere else.

use embr_host::HandlerError;
use embr_types::ErrorCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of an engine-facing bridge entry point.
///
/// # Example
///
/// ```
/// use embr_bridge::BridgeError;
/// use embr_types::ErrorCode;
///
/// let err = BridgeError::DeadHost { container: "shell#6f9c2e6a".into() };
/// assert_eq!(err.code(), "BRIDGE_DEAD_HOST");
/// assert!(!err.is_recoverable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum BridgeError {
    /// Dispatch was attempted after the host reference was cleared or
    /// the host context stopped being usable.
    ///
    /// Signals a lifecycle-ordering bug in the embedding, not a
    /// transient condition.
    #[error("dispatch into dead host container {container}")]
    DeadHost {
        /// Short id of the container the call was aimed at.
        container: String,
    },

    /// The bound handler reported a failure on the return-call path.
    ///
    /// Forwarded unmodified; code and recoverability are the inner
    /// error's own.
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

impl ErrorCode for BridgeError {
    fn code(&self) -> &'static str {
        match self {
            Self::DeadHost { .. } => "BRIDGE_DEAD_HOST",
            Self::Handler(inner) => inner.code(),
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::DeadHost { .. } => false,
            Self::Handler(inner) => inner.is_recoverable(),
        }
    }
}
