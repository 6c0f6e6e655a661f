//! Event queue realization of [`NetEventListener`].

use std::net::SocketAddr;

use tokio::sync::mpsc;
use tracing::debug;

use crate::core::{DataReader, Peer};
use crate::events::{DisconnectInfo, EventKind, NetEventListener, UnconnectedMessageType};

/// Owned copy of one transport notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetEvent {
    /// A session became established.
    PeerConnected {
        /// The new peer.
        peer: Peer,
    },

    /// A session ended.
    PeerDisconnected {
        /// The peer that left.
        peer: Peer,
        /// Reason and accompanying data.
        info: DisconnectInfo,
    },

    /// A socket-level failure.
    NetworkError {
        /// Remote side, if known.
        endpoint: Option<SocketAddr>,
        /// Raw platform error code.
        socket_error_code: i32,
    },

    /// A message from a peer.
    NetworkReceive {
        /// Sender.
        peer: Peer,
        /// Unread payload bytes at delivery time.
        data: Vec<u8>,
    },

    /// A datagram outside any session.
    NetworkReceiveUnconnected {
        /// Sender.
        endpoint: SocketAddr,
        /// Unread payload bytes at delivery time.
        data: Vec<u8>,
        /// Message classification.
        message_type: UnconnectedMessageType,
    },

    /// A latency estimate changed.
    NetworkLatencyUpdate {
        /// The measured peer.
        peer: Peer,
        /// Round-trip latency in milliseconds.
        latency_ms: u32,
    },
}

impl NetEvent {
    /// The notification kind this event came from.
    pub fn kind(&self) -> EventKind {
        match self {
            NetEvent::PeerConnected { .. } => EventKind::PeerConnected,
            NetEvent::PeerDisconnected { .. } => EventKind::PeerDisconnected,
            NetEvent::NetworkError { .. } => EventKind::NetworkError,
            NetEvent::NetworkReceive { .. } => EventKind::NetworkReceive,
            NetEvent::NetworkReceiveUnconnected { .. } => EventKind::NetworkReceiveUnconnected,
            NetEvent::NetworkLatencyUpdate { .. } => EventKind::NetworkLatencyUpdate,
        }
    }

    /// Replay this event into `listener`.
    pub fn dispatch_to<L: NetEventListener + ?Sized>(self, listener: &L) {
        match self {
            NetEvent::PeerConnected { peer } => listener.peer_connected(&peer),
            NetEvent::PeerDisconnected { peer, info } => listener.peer_disconnected(&peer, info),
            NetEvent::NetworkError {
                endpoint,
                socket_error_code,
            } => listener.network_error(endpoint, socket_error_code),
            NetEvent::NetworkReceive { peer, data } => {
                listener.network_receive(&peer, &mut DataReader::new(&data))
            }
            NetEvent::NetworkReceiveUnconnected {
                endpoint,
                data,
                message_type,
            } => listener.network_receive_unconnected(
                endpoint,
                &mut DataReader::new(&data),
                message_type,
            ),
            NetEvent::NetworkLatencyUpdate { peer, latency_ms } => {
                listener.network_latency_update(&peer, latency_ms)
            }
        }
    }
}

/// [`NetEventListener`] that queues every notification for a consumer
/// running elsewhere.
///
/// The queue is unbounded, so the emitting thread never waits on the
/// consumer and nothing is dropped or reordered. Received payloads are
/// copied out of the core's buffer before the notification returns.
///
/// # Example
///
/// ```
/// use netgate::channel::{ChannelListener, NetEvent};
/// use netgate::core::{Peer, PeerId};
/// use netgate::events::NetEventListener;
///
/// let (listener, mut events) = ChannelListener::channel();
/// let peer = Peer::new(PeerId::new(1), "127.0.0.1:9050".parse().unwrap());
///
/// listener.network_latency_update(&peer, 42);
///
/// assert_eq!(
///     events.try_recv(),
///     Some(NetEvent::NetworkLatencyUpdate { peer, latency_ms: 42 })
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ChannelListener {
    tx: mpsc::UnboundedSender<NetEvent>,
}

impl ChannelListener {
    /// Create a listener and the receiving end of its queue.
    pub fn channel() -> (Self, NetEventReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, NetEventReceiver { rx })
    }

    /// Check if the receiving end is gone.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    fn send(&self, event: NetEvent) {
        if let Err(mpsc::error::SendError(event)) = self.tx.send(event) {
            debug!(kind = ?event.kind(), "event receiver dropped, discarding event");
        }
    }
}

impl NetEventListener for ChannelListener {
    fn peer_connected(&self, peer: &Peer) {
        self.send(NetEvent::PeerConnected { peer: *peer });
    }

    fn peer_disconnected(&self, peer: &Peer, info: DisconnectInfo) {
        self.send(NetEvent::PeerDisconnected { peer: *peer, info });
    }

    fn network_error(&self, endpoint: Option<SocketAddr>, socket_error_code: i32) {
        self.send(NetEvent::NetworkError {
            endpoint,
            socket_error_code,
        });
    }

    fn network_receive(&self, peer: &Peer, reader: &mut DataReader<'_>) {
        let data = reader.get_remaining_bytes().to_vec();
        self.send(NetEvent::NetworkReceive { peer: *peer, data });
    }

    fn network_receive_unconnected(
        &self,
        endpoint: SocketAddr,
        reader: &mut DataReader<'_>,
        message_type: UnconnectedMessageType,
    ) {
        let data = reader.get_remaining_bytes().to_vec();
        self.send(NetEvent::NetworkReceiveUnconnected {
            endpoint,
            data,
            message_type,
        });
    }

    fn network_latency_update(&self, peer: &Peer, latency_ms: u32) {
        self.send(NetEvent::NetworkLatencyUpdate {
            peer: *peer,
            latency_ms,
        });
    }
}

/// Receiving end of a [`ChannelListener`] queue.
#[derive(Debug)]
pub struct NetEventReceiver {
    rx: mpsc::UnboundedReceiver<NetEvent>,
}

impl NetEventReceiver {
    /// Wait for the next event.
    ///
    /// Returns `None` once every [`ChannelListener`] clone is dropped and the
    /// queue is empty.
    pub async fn recv(&mut self) -> Option<NetEvent> {
        self.rx.recv().await
    }

    /// Take the next event if one is queued.
    pub fn try_recv(&mut self) -> Option<NetEvent> {
        self.rx.try_recv().ok()
    }

    /// Replay every currently queued event into `listener`, in order.
    ///
    /// Returns the number of events delivered. For game-loop style
    /// consumers that poll once per tick on their own thread.
    pub fn poll_events<L: NetEventListener + ?Sized>(&mut self, listener: &L) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.try_recv() {
            event.dispatch_to(listener);
            delivered += 1;
        }
        delivered
    }
}
