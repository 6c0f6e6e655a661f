//! The notification capability the transport core pushes events through.

use std::net::SocketAddr;
use std::sync::Arc;

use super::disconnect::{DisconnectInfo, UnconnectedMessageType};
use crate::core::{DataReader, Peer};

/// Receiver of transport events.
///
/// The core calls these from its network thread as conditions occur. Every
/// method is a one-way notification: nothing is returned and no error flows
/// back to the core. Calls are synchronous, so a slow implementation stalls
/// the emitting thread.
///
/// Implement it directly, or use [`EventBasedListener`](super::EventBasedListener)
/// to register per-event callbacks instead.
pub trait NetEventListener: Send + Sync {
    /// A session became established (inbound accept completed, or an
    /// outbound connect succeeded).
    fn peer_connected(&self, peer: &Peer);

    /// A session ended. Fires exactly once per peer.
    fn peer_disconnected(&self, peer: &Peer, info: DisconnectInfo);

    /// A socket-level send or receive failed. `endpoint` is `None` when the
    /// remote side is unknown.
    fn network_error(&self, endpoint: Option<SocketAddr>, socket_error_code: i32);

    /// One logical message arrived from `peer`.
    ///
    /// `reader` borrows the core's pooled receive buffer and must be fully
    /// consumed before returning.
    fn network_receive(&self, peer: &Peer, reader: &mut DataReader<'_>);

    /// A datagram arrived outside any session.
    fn network_receive_unconnected(
        &self,
        endpoint: SocketAddr,
        reader: &mut DataReader<'_>,
        message_type: UnconnectedMessageType,
    );

    /// Round-trip latency estimate for `peer` changed.
    fn network_latency_update(&self, peer: &Peer, latency_ms: u32);
}

macro_rules! forward_listener {
    ($($ty:ty),* $(,)?) => {$(
        impl<L: NetEventListener + ?Sized> NetEventListener for $ty {
            fn peer_connected(&self, peer: &Peer) {
                (**self).peer_connected(peer)
            }

            fn peer_disconnected(&self, peer: &Peer, info: DisconnectInfo) {
                (**self).peer_disconnected(peer, info)
            }

            fn network_error(&self, endpoint: Option<SocketAddr>, socket_error_code: i32) {
                (**self).network_error(endpoint, socket_error_code)
            }

            fn network_receive(&self, peer: &Peer, reader: &mut DataReader<'_>) {
                (**self).network_receive(peer, reader)
            }

            fn network_receive_unconnected(
                &self,
                endpoint: SocketAddr,
                reader: &mut DataReader<'_>,
                message_type: UnconnectedMessageType,
            ) {
                (**self).network_receive_unconnected(endpoint, reader, message_type)
            }

            fn network_latency_update(&self, peer: &Peer, latency_ms: u32) {
                (**self).network_latency_update(peer, latency_ms)
            }
        }
    )*};
}

forward_listener!(&L, Box<L>, Arc<L>);
