//! The [`ErrorCode`] contract shared by every EMBR error type.
//!
//! A bridge error crosses two ownership boundaries: the host application
//! that configures the bridge and the engine-side stub that receives the
//! failure. Both need something stabler than a `Display` string, so every
//! error enum in the workspace carries:
//!
//! - a **machine-readable code** (`UPPER_SNAKE_CASE`, crate-prefixed),
//! - a **recoverability flag** telling the caller whether retrying can
//!   ever help.
//!
//! Lifecycle-ordering failures are the canonical non-recoverable case:
//! retrying a call against a torn-down host cannot change liveness.
//!
//! # Example
//!
//! ```
//! use embr_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum SlotError {
//!     Occupied,
//!     Detached,
//! }
//!
//! impl ErrorCode for SlotError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Occupied => "SLOT_OCCUPIED",
//!             Self::Detached => "SLOT_DETACHED",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Occupied)
//!     }
//! }
//!
//! assert_eq!(SlotError::Detached.code(), "SLOT_DETACHED");
//! assert!(!SlotError::Detached.is_recoverable());
//! ```

/// Machine-readable error classification.
///
/// # Code Format
///
/// - `UPPER_SNAKE_CASE`, non-empty
/// - prefixed with the owning domain (`BRIDGE_`, `HANDLER_`, `RESOLVE_`)
/// - stable once published; changing a code is a breaking change
///
/// # Recoverability
///
/// `is_recoverable` answers one question: can retrying the same operation
/// ever succeed? Dead-host and setup-ordering errors answer `false`:
/// they signal a bug in lifecycle wiring, not a transient condition.
pub trait ErrorCode {
    /// Returns the stable machine-readable code for this error.
    fn code(&self) -> &'static str;

    /// Returns `true` if retrying the failed operation may succeed.
    fn is_recoverable(&self) -> bool;
}

/// Asserts that an error's code is well-formed and carries the expected
/// domain prefix.
///
/// Intended for tests that pin down an error enum's public code surface.
///
/// # Panics
///
/// Panics with a descriptive message when the code is empty, not
/// `UPPER_SNAKE_CASE`, or missing the prefix.
///
/// # Example
///
/// ```
/// use embr_types::{assert_error_code, ErrorCode};
///
/// #[derive(Debug)]
/// struct Dead;
///
/// impl ErrorCode for Dead {
///     fn code(&self) -> &'static str { "BRIDGE_DEAD_HOST" }
///     fn is_recoverable(&self) -> bool { false }
/// }
///
/// assert_error_code(&Dead, "BRIDGE_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, prefix: &str) {
    let code = err.code();
    assert!(
        well_formed(code),
        "error code {:?} must be non-empty UPPER_SNAKE_CASE",
        code
    );
    assert!(
        code.starts_with(prefix),
        "error code {:?} must carry prefix {:?}",
        code,
        prefix
    );
}

/// Asserts [`assert_error_code`] over every variant of an error enum.
///
/// Pair with an `all_variants()` helper in the enum's test module so new
/// variants cannot ship without a conforming code.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], prefix: &str) {
    for err in errors {
        assert_error_code(err, prefix);
    }
}

/// Non-empty, `UPPER_SNAKE_CASE`, no leading/trailing/doubled underscores.
fn well_formed(code: &str) -> bool {
    !code.is_empty()
        && !code.starts_with('_')
        && !code.ends_with('_')
        && !code.contains("__")
        && code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
