//! Shared types for the EMBR call bridge.
//!
//! This crate is the bottom layer of the EMBR (EMbedded Bridge Runtime)
//! workspace. It carries the pieces every other crate agrees on and nothing
//! else:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  embr-bridge   : CallBridge, HostRef, EngineHandle          │
//! │  embr-host     : CallHandler, DelegateSpec, resolution      │
//! │  embr-call     : CallInfo, wire grammar                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  embr-types    : ContainerId, ErrorCode  ◄── HERE           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Contents
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`ContainerId`] | Identity of a host container instance |
//! | [`ErrorCode`] | Machine-readable code + recoverability for all errors |
//! | [`assert_error_codes`] | Test helper validating an error enum's codes |
//!
//! # Error Code Convention
//!
//! Every error enum in the workspace implements [`ErrorCode`]. Codes are
//! `UPPER_SNAKE_CASE` with a crate prefix (`BRIDGE_`, `HANDLER_`,
//! `RESOLVE_`) and are stable once published.

mod error;
mod id;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::ContainerId;
