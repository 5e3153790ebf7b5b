//! The host-supplied context handle.

/// Handle the host container gives out for liveness observation.
///
/// The bridge holds this weakly and consults it before every dispatch.
/// Liveness is a conjunction: the bridge's own reference must not have
/// been cleared, *and* the context must still report itself usable.
/// Hosts flip [`is_valid`](Self::is_valid) to `false` the moment their
/// own teardown begins, so late engine call-outs fail fast instead of
/// racing the teardown.
///
/// # Example
///
/// ```
/// use embr_host::HostContext;
/// use std::sync::atomic::{AtomicBool, Ordering};
///
/// struct ShellContext {
///     torn_down: AtomicBool,
/// }
///
/// impl HostContext for ShellContext {
///     fn is_valid(&self) -> bool {
///         !self.torn_down.load(Ordering::Acquire)
///     }
/// }
/// ```
pub trait HostContext: Send + Sync {
    /// Whether the host still considers this context usable.
    ///
    /// Must be cheap; it runs on every dispatch.
    fn is_valid(&self) -> bool;
}
