//! Call descriptor and wire grammar for the EMBR call bridge.
//!
//! The embedded engine marshals every host call into a single string.
//! This crate owns both directions of that boundary:
//!
//! ```text
//! engine stub ──"volume:0.5"──▶ CallInfo::parse ──▶ CallInfo { op, args }
//! CallInfo ──to_wire()──▶ "volume:0.5" ──▶ engine stub
//! ```
//!
//! # Wire Grammar
//!
//! `operation[:arg]*` - tokens separated by [`DELIMITER`] (`:`), the first
//! token is the operation identifier, the rest are arguments in order.
//! Tokens are contractually delimiter-free; there is no escaping. The
//! grammar is shared with the engine-side emitter and must not drift.
//!
//! Parsing is deterministic, total over the contractual alphabet, and has
//! no side effects. A malformed raw string (empty input) is a bug in the
//! emitter, not a runtime condition - see [`CallInfo::parse`].
//!
//! # Results
//!
//! A call that produces a value hands it back as a [`serde_json::Value`]
//! by move. [`encode_result`] renders such a value as JSON text for the
//! places where only primitive data crosses (trace output, engine-side
//! debug display).

mod info;
mod wire;

pub use info::CallInfo;
pub use wire::{encode_result, DELIMITER};
