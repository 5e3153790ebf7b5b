//! The call-handling capability.

use crate::HandlerError;
use embr_call::CallInfo;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// The active delegate slot, shareable between the container that
/// resolved it and the bridge that dispatches into it.
pub type SharedHandler = Arc<Mutex<Box<dyn CallHandler>>>;

/// Whatever currently answers dispatched calls.
///
/// Implemented by the host container itself or by the delegate it
/// appointed ([`EmbeddedChild`](crate::EmbeddedChild) /
/// [`SurfaceView`](crate::SurfaceView)) - the dispatching side never
/// knows which.
///
/// # Two Entry Points
///
/// | Entry | Produces | Used for |
/// |-------|----------|----------|
/// | [`on_void_call`](Self::on_void_call) | nothing | fire-and-forget notifications |
/// | [`on_return_call`](Self::on_return_call) | `Result<Value, HandlerError>` | queries the engine waits on |
///
/// The two paths never cross: a void dispatch reaches only the void
/// entry and a return dispatch only the return entry.
///
/// # Re-entrancy
///
/// Dispatch runs with the bridge's guard held. Handler code must not
/// call back into the same bridge instance from inside either entry.
///
/// # Example
///
/// ```
/// use embr_host::{CallHandler, CallInfo, HandlerError};
/// use serde_json::{json, Value};
///
/// struct Scoreboard {
///     score: i64,
/// }
///
/// impl CallHandler for Scoreboard {
///     fn on_void_call(&mut self, call: &CallInfo) {
///         if call.operation() == "reset" {
///             self.score = 0;
///         }
///     }
///
///     fn on_return_call(&mut self, call: &CallInfo) -> Result<Value, HandlerError> {
///         match call.operation() {
///             "score" => Ok(json!(self.score)),
///             op => Err(HandlerError::NotSupported(op.into())),
///         }
///     }
/// }
/// ```
pub trait CallHandler: Send {
    /// Handles a fire-and-forget call. Nothing is reported back; any
    /// effect is the handler's own business.
    fn on_void_call(&mut self, call: &CallInfo);

    /// Handles a call the engine waits on, producing a value or a typed
    /// failure. The bridge forwards the result unmodified.
    fn on_return_call(&mut self, call: &CallInfo) -> Result<Value, HandlerError>;
}

/// Identity for entities composed into the container by key.
///
/// A child delegate is mounted into the container's child hierarchy
/// keyed by its own id, so the id must be stable for the life of the
/// container.
pub trait Identifiable {
    /// Returns the entity's identifier.
    fn id(&self) -> &str;
}

/// Wraps a concrete handler into the shared slot shape.
///
/// # Example
///
/// ```
/// use embr_host::{share_handler, CallHandler, CallInfo, testing::RecordingHandler};
///
/// let shared = share_handler(RecordingHandler::new());
/// assert!(shared.lock().on_return_call(&CallInfo::parse("x")).is_ok());
/// ```
#[must_use]
pub fn share_handler<H: CallHandler + 'static>(handler: H) -> SharedHandler {
    Arc::new(Mutex::new(Box::new(handler)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingHandler;

    #[test]
    fn shared_handler_dispatches_through_lock() {
        let handler = RecordingHandler::new();
        let log = handler.log();
        let shared = share_handler(handler);

        shared.lock().on_void_call(&CallInfo::parse("ping"));
        assert_eq!(log.void_calls().len(), 1);
        assert_eq!(log.void_calls()[0].operation(), "ping");
    }

    #[test]
    fn shared_handler_clones_point_at_same_slot() {
        let shared = share_handler(RecordingHandler::new());
        let clone = Arc::clone(&shared);
        assert!(Arc::ptr_eq(&shared, &clone));
    }
}
