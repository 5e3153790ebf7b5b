//! Host-layer errors.
//!
//! # Error Code Convention
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`HandlerError::NotSupported`] | `HANDLER_NOT_SUPPORTED` | No |
//! | [`HandlerError::ExecutionFailed`] | `HANDLER_EXECUTION_FAILED` | Yes |
//! | [`HandlerError::InvalidArgs`] | `HANDLER_INVALID_ARGS` | No |
//! | [`ResolveError::AlreadyResolved`] | `RESOLVE_ALREADY_RESOLVED` | No |
//!
//! Setup-ordering failures ([`ResolveError`]) are never recoverable:
//! they mean the container wiring itself is wrong, and retrying the same
//! wiring cannot fix it.

use embr_types::ErrorCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by a [`CallHandler`](crate::CallHandler) on the
/// return-call path.
///
/// Fire-and-forget calls have no failure channel; these errors exist
/// only where the engine is waiting on a value.
///
/// # Example
///
/// ```
/// use embr_host::HandlerError;
/// use embr_types::ErrorCode;
///
/// let err = HandlerError::NotSupported("warp".into());
/// assert_eq!(err.code(), "HANDLER_NOT_SUPPORTED");
/// assert!(!err.is_recoverable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum HandlerError {
    /// The operation identifier names nothing this handler implements.
    ///
    /// **Not recoverable** - the same operation will never work.
    #[error("operation not supported: {0}")]
    NotSupported(String),

    /// The operation was recognized but failed while running.
    ///
    /// **Recoverable** - retry may succeed.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The argument tokens do not fit the operation's shape.
    ///
    /// **Not recoverable** - the emitter must fix the call.
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

impl ErrorCode for HandlerError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotSupported(_) => "HANDLER_NOT_SUPPORTED",
            Self::ExecutionFailed(_) => "HANDLER_EXECUTION_FAILED",
            Self::InvalidArgs(_) => "HANDLER_INVALID_ARGS",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::ExecutionFailed(_))
    }
}

/// Failure of the one-shot delegate resolution step.
///
/// Raised at container initialization, never at dispatch time. The
/// delegate-kind set itself is closed at the type level
/// ([`DelegateSpec`](crate::DelegateSpec)), so the only way to misuse
/// resolution is to run it twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ResolveError {
    /// A second resolution was attempted on the same container.
    ///
    /// The active handler is immutable after the first resolution;
    /// hitting this means the container's init path ran twice.
    #[error("delegate already resolved for this container")]
    AlreadyResolved,
}

impl ErrorCode for ResolveError {
    fn code(&self) -> &'static str {
        match self {
            Self::AlreadyResolved => "RESOLVE_ALREADY_RESOLVED",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embr_types::assert_error_codes;

    fn all_handler_variants() -> Vec<HandlerError> {
        vec![
            HandlerError::NotSupported("x".into()),
            HandlerError::ExecutionFailed("x".into()),
            HandlerError::InvalidArgs("x".into()),
        ]
    }

    #[test]
    fn handler_codes_conform() {
        assert_error_codes(&all_handler_variants(), "HANDLER_");
    }

    #[test]
    fn resolve_codes_conform() {
        assert_error_codes(&[ResolveError::AlreadyResolved], "RESOLVE_");
    }

    #[test]
    fn only_execution_failure_is_recoverable() {
        assert!(HandlerError::ExecutionFailed("timeout".into()).is_recoverable());
        assert!(!HandlerError::NotSupported("x".into()).is_recoverable());
        assert!(!HandlerError::InvalidArgs("x".into()).is_recoverable());
        assert!(!ResolveError::AlreadyResolved.is_recoverable());
    }

    #[test]
    fn messages_name_the_problem() {
        assert!(HandlerError::NotSupported("warp".into())
            .to_string()
            .contains("warp"));
        assert!(ResolveError::AlreadyResolved
            .to_string()
            .contains("already resolved"));
    }
}
