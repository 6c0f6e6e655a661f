//! Transport event notification.
//!
//! - **Taxonomies**: [`DisconnectReason`], [`UnconnectedMessageType`],
//!   [`DisconnectInfo`]
//! - **Capability**: [`NetEventListener`], the six one-way notifications the
//!   transport core pushes
//! - **Subscription adapter**: [`EventBasedListener`], which fans each
//!   notification out to callbacks registered per [`EventKind`]
//!
//! ```text
//! transport core ──► NetEventListener::network_receive(..)
//!                         │
//!                         └─► EventBasedListener
//!                                 ├─► callback #1
//!                                 ├─► callback #2   (registration order)
//!                                 └─► ...
//! ```

mod disconnect;
mod listener;
mod subscription;

pub use disconnect::*;
pub use listener::*;
pub use subscription::{
    Callback, EventBasedListener, EventKind, NetworkErrorFn, NetworkLatencyUpdateFn,
    NetworkReceiveFn, NetworkReceiveUnconnectedFn, PeerConnectedFn, PeerDisconnectedFn,
    SubscriptionId,
};
