//! Engine-facing call bridge for the EMBR workspace.
//!
//! An embedded 3D-engine runtime invokes behavior in its containing
//! host application through exactly two string-parameter entry points.
//! This crate owns that boundary and the lifetime safety around it:
//!
//! ```text
//!  engine ──"foo:bar"──▶ CallBridge
//!                           │ parse (embr-call)
//!                           │ liveness check (HostRef)
//!                           ▼
//!                    active CallHandler (embr-host)
//!                           │
//!  engine ◀── value / (), or BRIDGE_DEAD_HOST ──┘
//! ```
//!
//! # Pieces
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`CallBridge`] | `void_call` / `return_call` dispatch with liveness validation |
//! | [`HostRef`] | weakly-held, explicitly clearable host reference |
//! | [`BridgeProvider`] | what the container wiring supplies at construction |
//! | [`BridgeConfig`] | per-bridge configuration (call tracing) |
//! | [`EngineHandle`] | presence-guarded lifecycle forwarding into the engine |
//!
//! # Threading
//!
//! All entry points are driven synchronously from the host's main
//! execution context; the engine serializes its own call-outs and the
//! bridge introduces no threads. The liveness check and the handler
//! dispatch still run under a single guard, so the "never dispatch
//! after clear" invariant holds even if an embedding pairs the bridge
//! with a genuinely multi-threaded engine.
//!
//! # Example
//!
//! ```
//! use embr_bridge::{BridgeConfig, BridgeProvider, CallBridge};
//! use embr_host::testing::{RecordingHandler, StaticContext};
//! use embr_host::{share_handler, HostContext, SharedHandler};
//! use embr_types::ContainerId;
//! use std::sync::Arc;
//!
//! struct Shell {
//!     id: ContainerId,
//!     ctx: Arc<StaticContext>,
//!     handler: SharedHandler,
//! }
//!
//! impl BridgeProvider for Shell {
//!     fn container_id(&self) -> &ContainerId { &self.id }
//!     fn host_context(&self) -> Arc<dyn HostContext> { self.ctx.clone() }
//!     fn call_handler(&self) -> Option<SharedHandler> { Some(self.handler.clone()) }
//! }
//!
//! let shell = Shell {
//!     id: ContainerId::stable("shell"),
//!     ctx: StaticContext::live(),
//!     handler: share_handler(RecordingHandler::new()),
//! };
//! let bridge = CallBridge::new(&shell, BridgeConfig::default());
//!
//! bridge.void_call("loaded:level-1").unwrap();
//! bridge.destroy();
//! assert!(bridge.void_call("loaded:level-1").is_err());
//! ```

mod bridge;
mod error;
mod reference;
mod runtime;

pub use bridge::{BridgeConfig, BridgeProvider, CallBridge};
pub use error::BridgeError;
pub use reference::HostRef;
pub use runtime::{EngineHandle, EngineRuntime, InputEvent, TouchAction};
