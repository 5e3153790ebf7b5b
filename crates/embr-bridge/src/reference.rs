//! The cleared-on-demand host reference.

use embr_host::HostContext;
use std::sync::{Arc, Weak};

/// Weakly-held, explicitly clearable reference to the host context.
///
/// The engine side can be asked to operate past the host's intended
/// lifetime - a late call-out firing after teardown begins. Holding the
/// context weakly means the bridge never extends the host's lifetime;
/// holding a clearable slot on top means the host can invalidate the
/// reference *now* instead of waiting for the last strong handle to
/// drop.
///
/// Liveness is therefore a conjunction of three observations:
///
/// 1. the slot was not [`clear`](Self::clear)ed,
/// 2. the weak handle still upgrades,
/// 3. the context's own [`is_valid`](HostContext::is_valid) agrees.
///
/// Once cleared, every later check reports dead - the tombstone is
/// irreversible for this instance.
///
/// # Example
///
/// ```
/// use embr_bridge::HostRef;
/// use embr_host::{testing::StaticContext, HostContext};
/// use std::sync::Arc;
///
/// let ctx = StaticContext::live();
/// let ctx_dyn: Arc<dyn HostContext> = ctx.clone();
/// let mut host = HostRef::new(&ctx_dyn);
/// assert!(host.is_alive());
///
/// host.clear();
/// assert!(!host.is_alive());
/// host.clear(); // idempotent
/// ```
#[derive(Debug, Default)]
pub struct HostRef {
    ctx: Option<Weak<dyn HostContext>>,
}

impl HostRef {
    /// Builds a reference to `ctx` without taking ownership of it.
    ///
    /// The host retains the strong handle; dropping it kills liveness
    /// just like an explicit [`clear`](Self::clear).
    #[must_use]
    pub fn new(ctx: &Arc<dyn HostContext>) -> Self {
        Self {
            ctx: Some(Arc::downgrade(ctx)),
        }
    }

    /// A reference that was never attached to a context.
    ///
    /// Reports dead from the start; useful for containers torn down
    /// before the bridge was wired.
    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }

    /// The live context, or `None` when dead by any of the three
    /// observations.
    #[must_use]
    pub fn get(&self) -> Option<Arc<dyn HostContext>> {
        self.ctx
            .as_ref()?
            .upgrade()
            .filter(|ctx| ctx.is_valid())
    }

    /// Whether dispatch through this reference is still permitted.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.get().is_some()
    }

    /// Tombstones the reference. Idempotent; irreversible.
    pub fn clear(&mut self) {
        self.ctx = None;
    }

    /// Whether [`clear`](Self::clear) has run (distinct from liveness:
    /// an uncleared reference can still be dead).
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.ctx.is_none()
    }
}
