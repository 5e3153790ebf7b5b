//! Reusable test fixtures.
//!
//! Shared by the unit tests in this crate and the integration suites in
//! the bridge layer. Not intended for production use.
//!
//! | Fixture | Stands in for |
//! |---------|---------------|
//! | [`RecordingHandler`] | a handler; records every dispatch |
//! | [`RecordingChild`] | a child delegate; records composition |
//! | [`RecordingView`] | a view delegate; records attachment |
//! | [`StaticContext`] | a host context with a flippable validity flag |
//! | [`CallLog`] | a probe kept after the fixture moves into a shared slot |

use crate::{
    CallHandler, CallInfo, EmbeddedChild, EngineSurface, HandlerError, HostContext, Identifiable,
    SurfaceView,
};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared record of the calls a fixture has seen.
///
/// Fixtures move into `Arc<Mutex<Box<dyn CallHandler>>>` slots where
/// they can no longer be inspected directly; keep a clone of the log
/// before handing the fixture over.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    inner: Arc<Mutex<LogInner>>,
}

#[derive(Debug, Default)]
struct LogInner {
    void_calls: Vec<CallInfo>,
    return_calls: Vec<CallInfo>,
}

impl CallLog {
    /// Calls that arrived on the void entry, in order.
    #[must_use]
    pub fn void_calls(&self) -> Vec<CallInfo> {
        self.inner.lock().void_calls.clone()
    }

    /// Calls that arrived on the return entry, in order.
    #[must_use]
    pub fn return_calls(&self) -> Vec<CallInfo> {
        self.inner.lock().return_calls.clone()
    }

    fn record_void(&self, call: &CallInfo) {
        self.inner.lock().void_calls.push(call.clone());
    }

    fn record_return(&self, call: &CallInfo) {
        self.inner.lock().return_calls.push(call.clone());
    }
}

/// A [`CallHandler`] that records dispatches and replays a scripted
/// response.
#[derive(Debug)]
pub struct RecordingHandler {
    log: CallLog,
    response: Value,
    fail_with: Option<HandlerError>,
}

impl RecordingHandler {
    /// Handler answering every return call with `null`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            log: CallLog::default(),
            response: Value::Null,
            fail_with: None,
        }
    }

    /// Handler answering every return call with `response`.
    #[must_use]
    pub fn with_response(response: Value) -> Self {
        Self {
            response,
            ..Self::new()
        }
    }

    /// Handler failing every return call with `err`.
    #[must_use]
    pub fn failing(err: HandlerError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::new()
        }
    }

    /// A probe into this handler's dispatch record.
    #[must_use]
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }
}

impl Default for RecordingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CallHandler for RecordingHandler {
    fn on_void_call(&mut self, call: &CallInfo) {
        self.log.record_void(call);
    }

    fn on_return_call(&mut self, call: &CallInfo) -> Result<Value, HandlerError> {
        self.log.record_return(call);
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(self.response.clone()),
        }
    }
}

/// A [`HostContext`] whose validity is a flag the test controls.
#[derive(Debug)]
pub struct StaticContext {
    valid: AtomicBool,
}

impl StaticContext {
    /// A context that reports itself usable.
    #[must_use]
    pub fn live() -> Arc<Self> {
        Arc::new(Self {
            valid: AtomicBool::new(true),
        })
    }

    /// Marks the context torn down; [`HostContext::is_valid`] reports
    /// `false` from here on.
    pub fn invalidate(&self) {
        self.valid.store(false, Ordering::Release);
    }
}

impl HostContext for StaticContext {
    fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Acquire)
    }
}

/// An [`EmbeddedChild`] fixture: records dispatches and the surface it
/// was composed with.
#[derive(Debug)]
pub struct RecordingChild {
    id: String,
    log: CallLog,
    composed: Arc<Mutex<Option<EngineSurface>>>,
}

impl RecordingChild {
    /// A child with the given identity key.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            log: CallLog::default(),
            composed: Arc::new(Mutex::new(None)),
        }
    }

    /// A probe into this child's dispatch record.
    #[must_use]
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    /// The surface handed over at composition, once resolution ran.
    #[must_use]
    pub fn composed_surface(&self) -> Arc<Mutex<Option<EngineSurface>>> {
        self.composed.clone()
    }
}

impl Identifiable for RecordingChild {
    fn id(&self) -> &str {
        &self.id
    }
}

impl CallHandler for RecordingChild {
    fn on_void_call(&mut self, call: &CallInfo) {
        self.log.record_void(call);
    }

    fn on_return_call(&mut self, call: &CallInfo) -> Result<Value, HandlerError> {
        self.log.record_return(call);
        Ok(Value::Null)
    }
}

impl EmbeddedChild for RecordingChild {
    fn on_compose(&mut self, surface: &EngineSurface) {
        *self.composed.lock() = Some(surface.clone());
    }
}

/// A [`SurfaceView`] fixture: records dispatches and the attached
/// surface.
#[derive(Debug)]
pub struct RecordingView {
    log: CallLog,
    attached: Arc<Mutex<Option<EngineSurface>>>,
}

impl RecordingView {
    /// A fresh, unattached view.
    #[must_use]
    pub fn new() -> Self {
        Self {
            log: CallLog::default(),
            attached: Arc::new(Mutex::new(None)),
        }
    }

    /// A probe into this view's dispatch record.
    #[must_use]
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    /// The surface attached at resolution, if any.
    #[must_use]
    pub fn attached_surface(&self) -> Arc<Mutex<Option<EngineSurface>>> {
        self.attached.clone()
    }
}

impl Default for RecordingView {
    fn default() -> Self {
        Self::new()
    }
}

impl CallHandler for RecordingView {
    fn on_void_call(&mut self, call: &CallInfo) {
        self.log.record_void(call);
    }

    fn on_return_call(&mut self, call: &CallInfo) -> Result<Value, HandlerError> {
        self.log.record_return(call);
        Ok(Value::Null)
    }
}

impl SurfaceView for RecordingView {
    fn on_attach(&mut self, surface: &EngineSurface) {
        *self.attached.lock() = Some(surface.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recording_handler_replays_response() {
        let mut handler = RecordingHandler::with_response(json!({"ok": true}));
        let out = handler.on_return_call(&CallInfo::parse("status")).unwrap();
        assert_eq!(out, json!({"ok": true}));
        assert_eq!(handler.log().return_calls().len(), 1);
    }

    #[test]
    fn recording_handler_scripted_failure() {
        let mut handler = RecordingHandler::failing(HandlerError::NotSupported("x".into()));
        assert!(handler.on_return_call(&CallInfo::parse("x")).is_err());
    }

    #[test]
    fn static_context_flips_once() {
        let ctx = StaticContext::live();
        assert!(ctx.is_valid());
        ctx.invalidate();
        assert!(!ctx.is_valid());
    }

    #[test]
    fn log_separates_entry_points() {
        let mut handler = RecordingHandler::new();
        let log = handler.log();
        handler.on_void_call(&CallInfo::parse("a"));
        let _ = handler.on_return_call(&CallInfo::parse("b"));

        assert_eq!(log.void_calls().len(), 1);
        assert_eq!(log.return_calls().len(), 1);
        assert_eq!(log.void_calls()[0].operation(), "a");
        assert_eq!(log.return_calls()[0].operation(), "b");
    }
}
