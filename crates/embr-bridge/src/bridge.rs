//! The engine-facing call bridge.

use crate::{BridgeError, HostRef};
use embr_call::{encode_result, CallInfo};
use embr_host::{HostContext, SharedHandler};
use embr_types::ContainerId;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// Bridge configuration, fixed at construction.
///
/// Replaces any notion of process-wide switches: two bridges in one
/// process can trace independently.
#[derive(Debug, Clone, Default)]
pub struct BridgeConfig {
    /// Emit a `tracing` debug event for every entry-point invocation
    /// and every produced result.
    pub trace_calls: bool,
}

/// What the bridge pulls from the host side at construction.
///
/// Implemented by the container wiring once delegate resolution has
/// run; the bridge itself never sees the container's concrete type.
pub trait BridgeProvider {
    /// Identity of the container this bridge belongs to.
    fn container_id(&self) -> &ContainerId;

    /// The context handle the bridge will hold weakly.
    ///
    /// The host retains ownership; dropping or invalidating the
    /// context kills the bridge's liveness.
    fn host_context(&self) -> Arc<dyn HostContext>;

    /// The resolved call handler, or `None` when this container
    /// legitimately has nothing bound (e.g. mid-teardown).
    fn call_handler(&self) -> Option<SharedHandler>;
}

/// The two call entry points the embedded engine dispatches into.
///
/// Owns the [`HostRef`]; every entry point validates liveness before
/// touching the handler, and the liveness check plus the dispatch run
/// under one guard so "never dispatch after clear" holds atomically
/// even on a multi-threaded host-engine pairing.
///
/// # Call Outcomes
///
/// | State | `void_call` | `return_call` |
/// |-------|-------------|---------------|
/// | live + handler | dispatched once | handler's result, unmodified |
/// | live, no handler | no-op `Ok(())` | `Ok(None)` |
/// | dead | `Err(DeadHost)` | `Err(DeadHost)` |
///
/// No-handler is a valid terminal configuration, not an error. Dead is
/// always an error: the engine tried to call into a torn-down host.
///
/// # Re-entrancy
///
/// Handler code runs with the bridge guard held and must not call back
/// into the same bridge instance.
pub struct CallBridge {
    id: ContainerId,
    config: BridgeConfig,
    state: Mutex<BridgeState>,
}

struct BridgeState {
    host: HostRef,
    handler: Option<SharedHandler>,
}

impl CallBridge {
    /// Wires a bridge to the given provider.
    ///
    /// Snapshots the handler binding and builds the weak host
    /// reference; both are immutable afterward (the reference can only
    /// be tombstoned).
    #[must_use]
    pub fn new(provider: &dyn BridgeProvider, config: BridgeConfig) -> Self {
        let ctx = provider.host_context();
        Self {
            id: provider.container_id().clone(),
            config,
            state: Mutex::new(BridgeState {
                host: HostRef::new(&ctx),
                handler: provider.call_handler(),
            }),
        }
    }

    /// Identity of the container this bridge serves.
    #[must_use]
    pub fn container_id(&self) -> &ContainerId {
        &self.id
    }

    /// Fire-and-forget entry point.
    ///
    /// Parses `raw`, validates liveness, and hands the call to the
    /// bound handler's void entry. Nothing is observable to the caller
    /// beyond whatever the handler does.
    ///
    /// # Errors
    ///
    /// [`BridgeError::DeadHost`] when the host reference is cleared or
    /// the host context is no longer usable.
    pub fn void_call(&self, raw: &str) -> Result<(), BridgeError> {
        if self.config.trace_calls {
            tracing::debug!(container = %self.id, param = raw, "void call");
        }
        let call = CallInfo::parse(raw);

        let state = self.state.lock();
        self.ensure_alive(&state)?;
        if let Some(handler) = &state.handler {
            handler.lock().on_void_call(&call);
        }
        Ok(())
    }

    /// Call-with-result entry point.
    ///
    /// Same liveness and no-handler rules as [`void_call`]; with a
    /// handler bound, produces exactly what the handler's return entry
    /// produced, unmodified.
    ///
    /// # Errors
    ///
    /// [`BridgeError::DeadHost`] as for [`void_call`], or the
    /// handler's own failure forwarded as [`BridgeError::Handler`].
    ///
    /// [`void_call`]: Self::void_call
    pub fn return_call(&self, raw: &str) -> Result<Option<Value>, BridgeError> {
        if self.config.trace_calls {
            tracing::debug!(container = %self.id, param = raw, "return call");
        }
        let call = CallInfo::parse(raw);

        let state = self.state.lock();
        self.ensure_alive(&state)?;
        let Some(handler) = &state.handler else {
            return Ok(None);
        };
        let value = handler.lock().on_return_call(&call)?;
        if self.config.trace_calls {
            tracing::debug!(container = %self.id, result = %encode_result(&value), "return call produced");
        }
        Ok(Some(value))
    }

    /// Whether dispatch is currently permitted.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.state.lock().host.is_alive()
    }

    /// The live host context, while there is one.
    #[must_use]
    pub fn context(&self) -> Option<Arc<dyn HostContext>> {
        self.state.lock().host.get()
    }

    /// Tears the bridge down, mirroring the host container's own
    /// destruction.
    ///
    /// Clears the host reference; every subsequent entry-point call
    /// takes the dead path. Irreversible, idempotent.
    pub fn destroy(&self) {
        let mut state = self.state.lock();
        state.host.clear();
        tracing::debug!(container = %self.id, "bridge destroyed");
    }

    fn ensure_alive(&self, state: &BridgeState) -> Result<(), BridgeError> {
        if state.host.is_alive() {
            Ok(())
        } else {
            Err(BridgeError::DeadHost {
                container: self.id.short(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embr_host::testing::{RecordingHandler, StaticContext};
    use embr_host::{share_handler, HandlerError};
    use serde_json::json;

    struct TestProvider {
        id: ContainerId,
        ctx: Arc<StaticContext>,
        handler: Option<SharedHandler>,
    }

    impl TestProvider {
        fn new(handler: Option<SharedHandler>) -> Self {
            Self {
                id: ContainerId::stable("shell"),
                ctx: StaticContext::live(),
                handler,
            }
        }
    }

    impl BridgeProvider for TestProvider {
        fn container_id(&self) -> &ContainerId {
            &self.id
        }

        fn host_context(&self) -> Arc<dyn HostContext> {
            self.ctx.clone()
        }

        fn call_handler(&self) -> Option<SharedHandler> {
            self.handler.clone()
        }
    }

    #[test]
    fn void_call_dispatches_exactly_once() {
        let handler = RecordingHandler::new();
        let log = handler.log();
        let provider = TestProvider::new(Some(share_handler(handler)));
        let bridge = CallBridge::new(&provider, BridgeConfig::default());

        bridge.void_call("foo:bar").unwrap();

        let voids = log.void_calls();
        assert_eq!(voids.len(), 1);
        assert_eq!(voids[0].operation(), "foo");
        assert_eq!(voids[0].args(), ["bar"]);
        assert!(log.return_calls().is_empty());
    }

    #[test]
    fn return_call_produces_handler_result_unmodified() {
        let handler = RecordingHandler::with_response(json!({"hp": 20}));
        let log = handler.log();
        let provider = TestProvider::new(Some(share_handler(handler)));
        let bridge = CallBridge::new(&provider, BridgeConfig::default());

        let out = bridge.return_call("stats:hero").unwrap();

        assert_eq!(out, Some(json!({"hp": 20})));
        assert_eq!(log.return_calls().len(), 1);
        assert!(log.void_calls().is_empty());
    }

    #[test]
    fn handler_failure_is_forwarded() {
        let handler = RecordingHandler::failing(HandlerError::InvalidArgs("want 2".into()));
        let provider = TestProvider::new(Some(share_handler(handler)));
        let bridge = CallBridge::new(&provider, BridgeConfig::default());

        let err = bridge.return_call("stats").unwrap_err();
        assert_eq!(err, BridgeError::Handler(HandlerError::InvalidArgs("want 2".into())));
    }

    #[test]
    fn no_handler_is_a_noop_not_an_error() {
        let provider = TestProvider::new(None);
        let bridge = CallBridge::new(&provider, BridgeConfig::default());

        for raw in ["foo", "foo:bar", "x:y:z"] {
            assert_eq!(bridge.void_call(raw), Ok(()));
            assert_eq!(bridge.return_call(raw), Ok(None));
        }
    }

    #[test]
    fn destroy_makes_every_call_fail_deterministically() {
        let handler = RecordingHandler::new();
        let log = handler.log();
        let provider = TestProvider::new(Some(share_handler(handler)));
        let bridge = CallBridge::new(&provider, BridgeConfig::default());

        bridge.destroy();

        for _ in 0..3 {
            for raw in ["foo", "foo:bar"] {
                assert!(matches!(
                    bridge.void_call(raw),
                    Err(BridgeError::DeadHost { .. })
                ));
                assert!(matches!(
                    bridge.return_call(raw),
                    Err(BridgeError::DeadHost { .. })
                ));
            }
        }
        // Nothing leaked through to the handler.
        assert!(log.void_calls().is_empty());
        assert!(log.return_calls().is_empty());
    }

    #[test]
    fn destroy_is_idempotent() {
        let provider = TestProvider::new(None);
        let bridge = CallBridge::new(&provider, BridgeConfig::default());
        bridge.destroy();
        bridge.destroy();
        assert!(!bridge.is_alive());
    }

    #[test]
    fn invalidated_context_takes_the_dead_path() {
        let provider = TestProvider::new(Some(share_handler(RecordingHandler::new())));
        let bridge = CallBridge::new(&provider, BridgeConfig::default());
        assert!(bridge.is_alive());

        provider.ctx.invalidate();

        assert!(!bridge.is_alive());
        assert!(matches!(
            bridge.void_call("foo"),
            Err(BridgeError::DeadHost { .. })
        ));
    }

    #[test]
    fn context_accessor_tracks_liveness() {
        let provider = TestProvider::new(None);
        let bridge = CallBridge::new(&provider, BridgeConfig::default());
        assert!(bridge.context().is_some());

        bridge.destroy();
        assert!(bridge.context().is_none());
    }

    #[test]
    fn dead_host_error_names_the_container() {
        let provider = TestProvider::new(None);
        let bridge = CallBridge::new(&provider, BridgeConfig::default());
        bridge.destroy();

        let err = bridge.void_call("foo").unwrap_err();
        match err {
            BridgeError::DeadHost { container } => assert!(container.starts_with("shell#")),
            other => panic!("expected DeadHost, got {:?}", other),
        }
    }

    #[test]
    fn tracing_config_does_not_change_outcomes() {
        let handler = RecordingHandler::new();
        let log = handler.log();
        let provider = TestProvider::new(Some(share_handler(handler)));
        let bridge = CallBridge::new(&provider, BridgeConfig { trace_calls: true });

        bridge.void_call("foo:bar").unwrap();
        assert_eq!(bridge.return_call("baz").unwrap(), Some(Value::Null));
        assert_eq!(log.void_calls().len(), 1);
        assert_eq!(log.return_calls().len(), 1);
    }
}
