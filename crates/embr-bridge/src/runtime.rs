//! Guarded lifecycle forwarding to the engine runtime.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Capability surface of the embedded engine runtime.
///
/// Every method is a 1:1 forward of a host lifecycle event; the bridge
/// layer adds no policy on top. The runtime owns its own render/input
/// loop and is opaque beyond this trait.
pub trait EngineRuntime: Send + Sync {
    /// Host became visible.
    fn start(&self);
    /// Host is in the foreground and interactive.
    fn resume(&self);
    /// Host left the foreground.
    fn pause(&self);
    /// Host is no longer visible.
    fn stop(&self);
    /// Final shutdown; the runtime will not be used again.
    fn quit(&self);
    /// Host is under memory pressure.
    fn low_memory(&self);
    /// Host environment changed (orientation, locale, …); the runtime
    /// re-reads what it needs.
    fn configuration_changed(&self);
    /// Host window focus changed.
    fn focus_changed(&self, focused: bool);
    /// Raw input injection. Returns `true` if the runtime consumed the
    /// event.
    fn inject_event(&self, event: &InputEvent) -> bool;
}

/// Input event payload injected into the engine.
///
/// Payload only - routing and dispatch stay on the host side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Key transition.
    Key {
        /// Platform key code.
        code: u32,
        /// `true` on press, `false` on release.
        pressed: bool,
    },
    /// Pointer contact.
    Touch {
        /// Horizontal position in surface coordinates.
        x: f32,
        /// Vertical position in surface coordinates.
        y: f32,
        /// Contact phase.
        action: TouchAction,
    },
}

/// Phase of a pointer contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchAction {
    /// Contact began.
    Down,
    /// Contact moved.
    Move,
    /// Contact ended.
    Up,
}

/// Presence-guarded handle to the engine runtime.
///
/// The host's lifecycle callbacks can fire before the runtime exists or
/// after it was shut down; each forward runs iff a runtime is attached,
/// and does nothing otherwise. [`quit`](Self::quit) forwards the final
/// shutdown and drops the handle in one step, so nothing can be
/// forwarded afterward.
///
/// # Example
///
/// ```
/// use embr_bridge::EngineHandle;
///
/// let handle = EngineHandle::detached();
/// handle.pause(); // no runtime, no-op
/// assert!(!handle.is_attached());
/// ```
#[derive(Default)]
pub struct EngineHandle {
    runtime: Option<Arc<dyn EngineRuntime>>,
}

impl EngineHandle {
    /// A handle forwarding into `runtime`.
    #[must_use]
    pub fn attached(runtime: Arc<dyn EngineRuntime>) -> Self {
        Self {
            runtime: Some(runtime),
        }
    }

    /// A handle with no runtime; every forward is a no-op.
    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }

    /// Whether a runtime is currently attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.runtime.is_some()
    }

    /// Forwards visibility start.
    pub fn start(&self) {
        if let Some(rt) = &self.runtime {
            rt.start();
        }
    }

    /// Forwards foreground entry.
    pub fn resume(&self) {
        if let Some(rt) = &self.runtime {
            rt.resume();
        }
    }

    /// Forwards foreground exit.
    pub fn pause(&self) {
        if let Some(rt) = &self.runtime {
            rt.pause();
        }
    }

    /// Forwards visibility stop.
    pub fn stop(&self) {
        if let Some(rt) = &self.runtime {
            rt.stop();
        }
    }

    /// Forwards memory pressure.
    pub fn low_memory(&self) {
        if let Some(rt) = &self.runtime {
            rt.low_memory();
        }
    }

    /// Forwards an environment change.
    pub fn configuration_changed(&self) {
        if let Some(rt) = &self.runtime {
            rt.configuration_changed();
        }
    }

    /// Forwards a focus change.
    pub fn focus_changed(&self, focused: bool) {
        if let Some(rt) = &self.runtime {
            rt.focus_changed(focused);
        }
    }

    /// Injects an input event; `false` (unhandled) when detached.
    pub fn inject_event(&self, event: &InputEvent) -> bool {
        match &self.runtime {
            Some(rt) => rt.inject_event(event),
            None => false,
        }
    }

    /// Forwards final shutdown and drops the runtime.
    ///
    /// Later forwards on this handle are no-ops; idempotent.
    pub fn quit(&mut self) {
        if let Some(rt) = self.runtime.take() {
            rt.quit();
        }
    }
}
