//! One-shot delegate resolution.
//!
//! At container initialization the host is asked a single question: *do
//! you want someone else to answer engine calls?* The answer decides two
//! things at once - who the active [`CallHandler`] is, and how the
//! engine's render surface gets composed into the container:
//!
//! | Factory result | CallHandler | Surface composition |
//! |----------------|-------------|---------------------|
//! | `None` | the host itself | surface straight into the slot |
//! | `Child(c)` | the child | child in the slot, keyed by its id |
//! | `View(v)` | the view | view in the slot |
//!
//! Exactly one of these holds afterward - never both, never neither -
//! and the decision is immutable for the container's lifetime. The
//! engine-facing call surface never learns which one was picked.
//!
//! The result kinds form a closed set by construction: [`DelegateSpec`]
//! is the only way to hand back a delegate, so an unsupported kind is
//! unrepresentable. Extending the set means adding a variant here, and
//! the compiler then walks every match site.

use crate::{CallHandler, Identifiable, ResolveError, SharedHandler};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Opaque handle to the engine's displayable surface.
///
/// Created by whoever owns the engine runtime and threaded through
/// resolution so the chosen container kind can host it. The bridge
/// never looks inside.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngineSurface {
    id: Uuid,
}

impl EngineSurface {
    /// Allocates a fresh surface handle.
    #[must_use]
    pub fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }

    /// The surface's identity, for diagnostics.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Default for EngineSurface {
    fn default() -> Self {
        Self::new()
    }
}

/// A delegate that lives in the container's child hierarchy.
///
/// The child both answers calls and hosts the engine surface itself;
/// it is composed into the container keyed by its own
/// [`id`](Identifiable::id).
pub trait EmbeddedChild: CallHandler + Identifiable {
    /// Called once during resolution, handing over the surface this
    /// child is responsible for displaying.
    fn on_compose(&mut self, surface: &EngineSurface);
}

/// A delegate that is itself a displayable view.
///
/// Inserted directly into the container's view slot; the engine surface
/// is attached to it during resolution.
pub trait SurfaceView: CallHandler {
    /// Called once during resolution, attaching the engine surface.
    fn on_attach(&mut self, surface: &EngineSurface);
}

/// The closed set of delegate kinds a host may hand back.
///
/// Returned (wrapped in `Option`) by [`HostContainer::delegate`];
/// `None` means the host keeps call handling for itself.
pub enum DelegateSpec {
    /// An embeddable child component; composed by identity.
    Child(Box<dyn EmbeddedChild>),
    /// A displayable view; inserted into the view slot.
    View(Box<dyn SurfaceView>),
}

impl std::fmt::Debug for DelegateSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Child(c) => f.debug_tuple("Child").field(&c.id()).finish(),
            Self::View(_) => f.debug_tuple("View").finish(),
        }
    }
}

/// Record of how the engine surface was composed into the container.
///
/// Produced once by resolution, consumed once by the container's wiring
/// step; the actual slot mutation is the host platform's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceMount {
    /// Engine surface goes straight into the container's slot.
    Direct,
    /// The child delegate occupies the slot, keyed by its identity.
    Child {
        /// The child's identity key.
        id: String,
    },
    /// The view delegate occupies the slot.
    View,
}

impl SurfaceMount {
    /// Returns `true` for the direct-surface composition.
    #[must_use]
    pub fn is_direct(&self) -> bool {
        matches!(self, Self::Direct)
    }

    /// Returns `true` for the child composition.
    #[must_use]
    pub fn is_child(&self) -> bool {
        matches!(self, Self::Child { .. })
    }

    /// Returns `true` for the view composition.
    #[must_use]
    pub fn is_view(&self) -> bool {
        matches!(self, Self::View)
    }
}

impl std::fmt::Display for SurfaceMount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::Child { id } => write!(f, "child:{}", id),
            Self::View => write!(f, "view"),
        }
    }
}

/// Outcome of a successful resolution.
#[derive(Clone)]
pub struct Resolved {
    /// The active call handler for this container's bridge.
    pub handler: SharedHandler,
    /// How the engine surface was composed.
    pub mount: SurfaceMount,
}

/// Capability a host container implements to participate in resolution.
///
/// Supplies the three things the bridge layer needs from the host: its
/// identity, its liveness-observable context, and the one-time delegate
/// factory.
pub trait HostContainer {
    /// The container's identity, used in trace fields and dead-host
    /// diagnostics.
    fn container_id(&self) -> &embr_types::ContainerId;

    /// The context handle the bridge will hold weakly.
    fn context(&self) -> Arc<dyn crate::HostContext>;

    /// One-time delegate factory.
    ///
    /// Default: no delegate - the host answers calls itself and the
    /// surface is mounted directly.
    fn delegate(&mut self, surface: &EngineSurface) -> Option<DelegateSpec> {
        let _ = surface;
        None
    }
}

/// The `Unresolved → Resolved` step, firing exactly once.
///
/// # Example
///
/// ```
/// use embr_host::{share_handler, DelegateResolver, EngineSurface};
/// use embr_host::testing::RecordingHandler;
///
/// let mut resolver = DelegateResolver::new();
/// let host = share_handler(RecordingHandler::new());
/// let surface = EngineSurface::new();
///
/// let resolved = resolver.resolve(host, None, &surface).unwrap();
/// assert!(resolved.mount.is_direct());
/// assert!(resolver.is_resolved());
///
/// // The transition is one-shot.
/// let again = resolver.resolve(resolved.handler.clone(), None, &surface);
/// assert!(again.is_err());
/// ```
#[derive(Debug, Default)]
pub struct DelegateResolver {
    mount: Option<SurfaceMount>,
}

impl DelegateResolver {
    /// A resolver in the unresolved state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the one-shot transition has fired.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.mount.is_some()
    }

    /// The recorded composition, once resolved.
    #[must_use]
    pub fn mount(&self) -> Option<&SurfaceMount> {
        self.mount.as_ref()
    }

    /// Classifies the factory result and wires the surface.
    ///
    /// `host` is the handler to use when the container keeps call
    /// handling for itself (`spec == None`).
    ///
    /// # Errors
    ///
    /// [`ResolveError::AlreadyResolved`] if resolution already fired on
    /// this container.
    pub fn resolve(
        &mut self,
        host: SharedHandler,
        spec: Option<DelegateSpec>,
        surface: &EngineSurface,
    ) -> Result<Resolved, ResolveError> {
        if self.is_resolved() {
            return Err(ResolveError::AlreadyResolved);
        }

        let resolved = match spec {
            None => Resolved {
                handler: host,
                mount: SurfaceMount::Direct,
            },
            Some(DelegateSpec::Child(mut child)) => {
                let id = child.id().to_owned();
                child.on_compose(surface);
                let handler: Box<dyn CallHandler> = child;
                Resolved {
                    handler: Arc::new(Mutex::new(handler)),
                    mount: SurfaceMount::Child { id },
                }
            }
            Some(DelegateSpec::View(mut view)) => {
                view.on_attach(surface);
                let handler: Box<dyn CallHandler> = view;
                Resolved {
                    handler: Arc::new(Mutex::new(handler)),
                    mount: SurfaceMount::View,
                }
            }
        };

        tracing::debug!(mount = %resolved.mount, "delegate resolved");
        self.mount = Some(resolved.mount.clone());
        Ok(resolved)
    }

    /// Runs the container's factory and resolves its result.
    ///
    /// `self_handler` stands in for the container on the `None` path.
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve).
    pub fn resolve_container(
        &mut self,
        container: &mut dyn HostContainer,
        self_handler: SharedHandler,
        surface: &EngineSurface,
    ) -> Result<Resolved, ResolveError> {
        if self.is_resolved() {
            return Err(ResolveError::AlreadyResolved);
        }
        let spec = container.delegate(surface);
        tracing::debug!(
            container = %container.container_id(),
            delegated = spec.is_some(),
            "delegate factory consulted"
        );
        self.resolve(self_handler, spec, surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingChild, RecordingHandler, RecordingView, StaticContext};
    use crate::CallInfo;
    use embr_types::ContainerId;

    #[test]
    fn no_delegate_keeps_host_as_handler() {
        let mut resolver = DelegateResolver::new();
        let host = crate::share_handler(RecordingHandler::new());
        let surface = EngineSurface::new();

        let resolved = resolver.resolve(host.clone(), None, &surface).unwrap();

        assert!(Arc::ptr_eq(&resolved.handler, &host));
        assert_eq!(resolved.mount, SurfaceMount::Direct);
    }

    #[test]
    fn child_delegate_becomes_handler_keyed_by_id() {
        let mut resolver = DelegateResolver::new();
        let host = crate::share_handler(RecordingHandler::new());
        let child = RecordingChild::new("minimap");
        let child_log = child.log();
        let composed = child.composed_surface();
        let surface = EngineSurface::new();

        let resolved = resolver
            .resolve(host.clone(), Some(DelegateSpec::Child(Box::new(child))), &surface)
            .unwrap();

        assert_eq!(
            resolved.mount,
            SurfaceMount::Child {
                id: "minimap".into()
            }
        );
        assert!(!Arc::ptr_eq(&resolved.handler, &host));
        assert_eq!(composed.lock().as_ref(), Some(&surface));

        // Dispatch lands on the child, not the host.
        resolved.handler.lock().on_void_call(&CallInfo::parse("ping"));
        assert_eq!(child_log.void_calls().len(), 1);
    }

    #[test]
    fn view_delegate_becomes_handler_with_view_mount() {
        let mut resolver = DelegateResolver::new();
        let host = crate::share_handler(RecordingHandler::new());
        let view = RecordingView::new();
        let attached = view.attached_surface();
        let surface = EngineSurface::new();

        let resolved = resolver
            .resolve(host, Some(DelegateSpec::View(Box::new(view))), &surface)
            .unwrap();

        assert_eq!(resolved.mount, SurfaceMount::View);
        assert_eq!(attached.lock().as_ref(), Some(&surface));
    }

    #[test]
    fn second_resolution_fails_fast() {
        let mut resolver = DelegateResolver::new();
        let host = crate::share_handler(RecordingHandler::new());
        let surface = EngineSurface::new();

        let first = resolver.resolve(host.clone(), None, &surface).unwrap();
        let second = resolver.resolve(first.handler, None, &surface);

        assert!(matches!(second, Err(ResolveError::AlreadyResolved)));
        // The recorded mount is untouched by the failed attempt.
        assert_eq!(resolver.mount(), Some(&SurfaceMount::Direct));
    }

    #[test]
    fn resolve_container_uses_the_factory() {
        struct ChildHost {
            id: ContainerId,
            ctx: Arc<StaticContext>,
        }

        impl HostContainer for ChildHost {
            fn container_id(&self) -> &ContainerId {
                &self.id
            }

            fn context(&self) -> Arc<dyn crate::HostContext> {
                self.ctx.clone()
            }

            fn delegate(&mut self, _surface: &EngineSurface) -> Option<DelegateSpec> {
                Some(DelegateSpec::Child(Box::new(RecordingChild::new("hud"))))
            }
        }

        let mut container = ChildHost {
            id: ContainerId::stable("shell"),
            ctx: StaticContext::live(),
        };
        let mut resolver = DelegateResolver::new();
        let self_handler = crate::share_handler(RecordingHandler::new());

        let resolved = resolver
            .resolve_container(&mut container, self_handler, &EngineSurface::new())
            .unwrap();

        assert_eq!(resolved.mount, SurfaceMount::Child { id: "hud".into() });
    }

    #[test]
    fn default_factory_requests_no_delegate() {
        struct PlainHost {
            id: ContainerId,
            ctx: Arc<StaticContext>,
        }

        impl HostContainer for PlainHost {
            fn container_id(&self) -> &ContainerId {
                &self.id
            }

            fn context(&self) -> Arc<dyn crate::HostContext> {
                self.ctx.clone()
            }
        }

        let mut container = PlainHost {
            id: ContainerId::stable("shell"),
            ctx: StaticContext::live(),
        };
        let mut resolver = DelegateResolver::new();
        let self_handler = crate::share_handler(RecordingHandler::new());

        let resolved = resolver
            .resolve_container(&mut container, self_handler.clone(), &EngineSurface::new())
            .unwrap();

        assert!(Arc::ptr_eq(&resolved.handler, &self_handler));
        assert!(resolved.mount.is_direct());
    }

    #[test]
    fn mount_display_and_predicates() {
        assert_eq!(SurfaceMount::Direct.to_string(), "direct");
        assert_eq!(
            SurfaceMount::Child { id: "hud".into() }.to_string(),
            "child:hud"
        );
        assert_eq!(SurfaceMount::View.to_string(), "view");

        assert!(SurfaceMount::Direct.is_direct());
        assert!(SurfaceMount::Child { id: "x".into() }.is_child());
        assert!(SurfaceMount::View.is_view());
    }
}
