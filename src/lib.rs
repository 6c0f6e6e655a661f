//! # netgate
//!
//! Admission control and event notification for a connection-oriented
//! transport built on unreliable datagrams.
//!
//! The transport core (sockets, reliability channels, the peer session state
//! machine) lives elsewhere. This crate is the boundary between that core and
//! user code:
//!
//! - **Gating**: every inbound connection attempt surfaces as a
//!   [`ConnectionRequest`] that user code accepts or rejects exactly once,
//!   from any thread
//! - **Notification**: the core pushes peer lifecycle, data, error and
//!   latency events through the [`NetEventListener`] capability
//! - **Subscription**: [`EventBasedListener`] realizes the capability with
//!   per-event callback lists for callers who would rather register closures
//!
//! ## Feature Flags
//!
//! - `channel` (default): [`ChannelListener`], a tokio mpsc-backed event
//!   queue for consumers that poll on their own task or thread
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use netgate::prelude::*;
//!
//! let listener = Arc::new(EventBasedListener::new());
//! listener.on_peer_connected(|peer| println!("peer connected: {peer}"));
//! listener.on_peer_disconnected(|peer, info| {
//!     println!("peer {peer} left: {}", info.reason);
//! });
//!
//! // The core surfaces a handshake; the application decides.
//! let request = ConnectionRequest::new(
//!     ConnectionId::next(),
//!     "198.51.100.7:7777".parse().unwrap(),
//!     b"\x03\x00key".to_vec(),
//!     |req, outcome| println!("{} resolved: {:?}", req.connection_id(), outcome),
//! );
//! request.accept_if(|data| data.get_string() == Ok("key"));
//! assert_eq!(request.state(), RequestState::Accepted);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Boundary types (always included)
pub mod core;

// Taxonomies, listener capability, subscription adapter
pub mod events;

// Connection request gating
pub mod request;

// Event queue (feature-gated)
#[cfg(feature = "channel")]
#[cfg_attr(docsrs, doc(cfg(feature = "channel")))]
pub mod channel;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::*;
    pub use crate::events::*;
    pub use crate::request::*;

    #[cfg(feature = "channel")]
    pub use crate::channel::*;
}

// Re-export commonly used items at crate root
pub use crate::core::{ConnectionId, DataReader, Peer, PeerId, ReadError, ReadResult};
pub use crate::events::{
    DisconnectInfo, DisconnectReason, EventBasedListener, EventKind, NetEventListener,
    SubscriptionId, UnconnectedMessageType,
};
pub use crate::request::{ConnectionRequest, RequestOutcome, RequestState};

#[cfg(feature = "channel")]
pub use crate::channel::{ChannelListener, NetEvent, NetEventReceiver};
