//! Connection request gating.
//!
//! A [`ConnectionRequest`] is the single decision point user code gets for an
//! inbound connection attempt before the core materializes a peer session.

#[allow(clippy::module_inception)]
mod request;

pub use request::*;
