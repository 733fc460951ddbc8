//! Reprise HTTP gateway library.
//!
//! This crate is primarily used by the `reprise` server binary; the gateway
//! module is exposed so integration tests can drive the router directly.

pub mod gateway;
