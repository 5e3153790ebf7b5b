//! Host-side capabilities for the EMBR call bridge.
//!
//! An embedded engine calls out to the application that hosts it. This
//! crate defines what the host side must look like for those calls to
//! land, without the engine-facing surface ever naming a concrete type:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       Host container                         │
//! │                                                              │
//! │  HostContext ──── "am I still usable?"                       │
//! │  HostContainer ── "here is my context, id, and (maybe)       │
//! │                    a delegate to answer calls for me"        │
//! │                                                              │
//! │        DelegateResolver (one-shot)                           │
//! │        ├── None           → host answers, surface direct     │
//! │        ├── Child(child)   → child answers, keyed by its id   │
//! │        └── View(view)     → view answers, view in the slot   │
//! └──────────────────────────────────────────────────────────────┘
//!                         │ SharedHandler
//!                         ▼
//!                  CallHandler::on_void_call / on_return_call
//! ```
//!
//! # Core Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`CallHandler`] | Answer dispatched calls (void + return entry) |
//! | [`HostContext`] | Liveness observation point for the host handle |
//! | [`HostContainer`] | Supply context, identity, and the delegate factory |
//! | [`Identifiable`] | Identity key for child composition |
//! | [`EmbeddedChild`], [`SurfaceView`] | The two delegate kinds |
//!
//! # One Handler, Resolved Once
//!
//! Exactly one [`CallHandler`] is active per bridge instance. The choice
//! is made once, at container initialization, by [`DelegateResolver`],
//! and the set of choices is closed at the type level ([`DelegateSpec`]).
//! Widening the set means widening the enum, never probing types at a
//! call site.

mod context;
mod delegate;
mod error;
mod handler;
pub mod testing;

pub use context::HostContext;
pub use delegate::{
    DelegateResolver, DelegateSpec, EmbeddedChild, EngineSurface, HostContainer, Resolved,
    SurfaceMount, SurfaceView,
};
pub use error::{HandlerError, ResolveError};
pub use handler::{share_handler, CallHandler, Identifiable, SharedHandler};

// Re-export the call descriptor for convenience
pub use embr_call::CallInfo;
