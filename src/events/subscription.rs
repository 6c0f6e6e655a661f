//! Callback-registration realization of [`NetEventListener`].
//!
//! [`EventBasedListener`] keeps one ordered callback list per [`EventKind`].
//! Each notification walks the list for its kind and calls every entry once,
//! in registration order, with the same arguments.
//!
//! Lists are copy-on-write: subscribing or unsubscribing swaps in a new
//! vector, and a dispatch iterates the snapshot it loaded when it started.
//! No lock is held while a callback runs, so callbacks may themselves
//! subscribe or unsubscribe; such changes apply from the next notification.

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwap;
use tracing::trace;

use super::disconnect::{DisconnectInfo, UnconnectedMessageType};
use super::listener::NetEventListener;
use crate::core::{DataReader, Peer};

/// Callback for [`NetEventListener::peer_connected`].
pub type PeerConnectedFn = dyn Fn(&Peer) + Send + Sync;
/// Callback for [`NetEventListener::peer_disconnected`].
pub type PeerDisconnectedFn = dyn Fn(&Peer, &DisconnectInfo) + Send + Sync;
/// Callback for [`NetEventListener::network_error`].
pub type NetworkErrorFn = dyn Fn(Option<SocketAddr>, i32) + Send + Sync;
/// Callback for [`NetEventListener::network_receive`].
pub type NetworkReceiveFn = dyn Fn(&Peer, &mut DataReader<'_>) + Send + Sync;
/// Callback for [`NetEventListener::network_receive_unconnected`].
pub type NetworkReceiveUnconnectedFn =
    dyn Fn(SocketAddr, &mut DataReader<'_>, UnconnectedMessageType) + Send + Sync;
/// Callback for [`NetEventListener::network_latency_update`].
pub type NetworkLatencyUpdateFn = dyn Fn(&Peer, u32) + Send + Sync;

/// Process-wide counter, so a [`SubscriptionId`] never matches a
/// registration on another listener.
static SUBSCRIPTION_SEQ: AtomicU64 = AtomicU64::new(0);

/// The six notification kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// [`NetEventListener::peer_connected`]
    PeerConnected,
    /// [`NetEventListener::peer_disconnected`]
    PeerDisconnected,
    /// [`NetEventListener::network_error`]
    NetworkError,
    /// [`NetEventListener::network_receive`]
    NetworkReceive,
    /// [`NetEventListener::network_receive_unconnected`]
    NetworkReceiveUnconnected,
    /// [`NetEventListener::network_latency_update`]
    NetworkLatencyUpdate,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [EventKind; 6] = [
        EventKind::PeerConnected,
        EventKind::PeerDisconnected,
        EventKind::NetworkError,
        EventKind::NetworkReceive,
        EventKind::NetworkReceiveUnconnected,
        EventKind::NetworkLatencyUpdate,
    ];
}

/// A callback tagged with the event kind it handles.
#[derive(Clone)]
pub enum Callback {
    /// Peer connected.
    PeerConnected(Arc<PeerConnectedFn>),
    /// Peer disconnected.
    PeerDisconnected(Arc<PeerDisconnectedFn>),
    /// Socket error.
    NetworkError(Arc<NetworkErrorFn>),
    /// Data from a peer.
    NetworkReceive(Arc<NetworkReceiveFn>),
    /// Data from outside any session.
    NetworkReceiveUnconnected(Arc<NetworkReceiveUnconnectedFn>),
    /// Latency changed.
    NetworkLatencyUpdate(Arc<NetworkLatencyUpdateFn>),
}

impl Callback {
    /// The event kind this callback is registered for.
    pub fn kind(&self) -> EventKind {
        match self {
            Callback::PeerConnected(_) => EventKind::PeerConnected,
            Callback::PeerDisconnected(_) => EventKind::PeerDisconnected,
            Callback::NetworkError(_) => EventKind::NetworkError,
            Callback::NetworkReceive(_) => EventKind::NetworkReceive,
            Callback::NetworkReceiveUnconnected(_) => EventKind::NetworkReceiveUnconnected,
            Callback::NetworkLatencyUpdate(_) => EventKind::NetworkLatencyUpdate,
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback").field(&self.kind()).finish()
    }
}

/// Handle returned by a subscribe call; pass it to
/// [`EventBasedListener::unsubscribe`] to remove that registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    kind: EventKind,
    seq: u64,
}

impl SubscriptionId {
    /// The event kind the subscription belongs to.
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

struct Subscriber<F: ?Sized> {
    seq: u64,
    callback: Arc<F>,
}

impl<F: ?Sized> Clone for Subscriber<F> {
    fn clone(&self) -> Self {
        Self {
            seq: self.seq,
            callback: Arc::clone(&self.callback),
        }
    }
}

/// Ordered, copy-on-write list of callbacks for one event kind.
pub(crate) struct CallbackList<F: ?Sized> {
    entries: ArcSwap<Vec<Subscriber<F>>>,
}

impl<F: ?Sized> CallbackList<F> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self {
            entries: ArcSwap::from_pointee(Vec::new()),
        }
    }

    fn push(&self, seq: u64, callback: Arc<F>) {
        self.entries.rcu(|current| {
            let mut next = Vec::with_capacity(current.len() + 1);
            next.extend(current.iter().cloned());
            next.push(Subscriber {
                seq,
                callback: Arc::clone(&callback),
            });
            next
        });
    }

    fn remove(&self, seq: u64) -> bool {
        let previous = self.entries.rcu(|current| {
            current
                .iter()
                .filter(|s| s.seq != seq)
                .cloned()
                .collect::<Vec<_>>()
        });
        previous.iter().any(|s| s.seq == seq)
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    /// Remove every callback.
    pub fn clear(&self) {
        self.entries.store(Arc::new(Vec::new()));
    }

    /// Call `invoke` once per registered callback, in registration order.
    ///
    /// Iterates a snapshot taken on entry; an empty list does nothing.
    pub fn emit(&self, mut invoke: impl FnMut(&F)) {
        let snapshot = self.entries.load_full();
        for subscriber in snapshot.iter() {
            invoke(&subscriber.callback);
        }
    }
}

impl<F: ?Sized> Default for CallbackList<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> fmt::Debug for CallbackList<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackList")
            .field("len", &self.len())
            .finish()
    }
}

/// [`NetEventListener`] that fans each notification out to registered
/// callbacks.
///
/// Dispatch is synchronous: a notification returns only after every
/// callback for its kind has returned.
///
/// # Example
///
/// ```
/// use netgate::events::{EventBasedListener, NetEventListener};
/// use netgate::core::{Peer, PeerId};
///
/// let listener = EventBasedListener::new();
/// let id = listener.on_peer_connected(|peer| println!("connected: {peer}"));
///
/// let peer = Peer::new(PeerId::new(1), "127.0.0.1:9050".parse().unwrap());
/// listener.peer_connected(&peer);
///
/// assert!(listener.unsubscribe(id));
/// ```
pub struct EventBasedListener {
    peer_connected: CallbackList<PeerConnectedFn>,
    peer_disconnected: CallbackList<PeerDisconnectedFn>,
    network_error: CallbackList<NetworkErrorFn>,
    network_receive: CallbackList<NetworkReceiveFn>,
    network_receive_unconnected: CallbackList<NetworkReceiveUnconnectedFn>,
    network_latency_update: CallbackList<NetworkLatencyUpdateFn>,
}

impl EventBasedListener {
    /// Create a listener with no subscribers.
    pub fn new() -> Self {
        Self {
            peer_connected: CallbackList::new(),
            peer_disconnected: CallbackList::new(),
            network_error: CallbackList::new(),
            network_receive: CallbackList::new(),
            network_receive_unconnected: CallbackList::new(),
            network_latency_update: CallbackList::new(),
        }
    }

    /// Append `callback` to the list for its kind.
    pub fn subscribe(&self, callback: Callback) -> SubscriptionId {
        let kind = callback.kind();
        let seq = SUBSCRIPTION_SEQ.fetch_add(1, Ordering::Relaxed);
        match callback {
            Callback::PeerConnected(f) => self.peer_connected.push(seq, f),
            Callback::PeerDisconnected(f) => self.peer_disconnected.push(seq, f),
            Callback::NetworkError(f) => self.network_error.push(seq, f),
            Callback::NetworkReceive(f) => self.network_receive.push(seq, f),
            Callback::NetworkReceiveUnconnected(f) => {
                self.network_receive_unconnected.push(seq, f)
            }
            Callback::NetworkLatencyUpdate(f) => self.network_latency_update.push(seq, f),
        }
        trace!(?kind, seq, "subscribed");
        SubscriptionId { kind, seq }
    }

    /// Remove a registration.
    ///
    /// Returns `false` if it was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = match id.kind {
            EventKind::PeerConnected => self.peer_connected.remove(id.seq),
            EventKind::PeerDisconnected => self.peer_disconnected.remove(id.seq),
            EventKind::NetworkError => self.network_error.remove(id.seq),
            EventKind::NetworkReceive => self.network_receive.remove(id.seq),
            EventKind::NetworkReceiveUnconnected => {
                self.network_receive_unconnected.remove(id.seq)
            }
            EventKind::NetworkLatencyUpdate => self.network_latency_update.remove(id.seq),
        };
        trace!(kind = ?id.kind, seq = id.seq, removed, "unsubscribed");
        removed
    }

    /// Subscribe to [`NetEventListener::peer_connected`].
    pub fn on_peer_connected<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Peer) + Send + Sync + 'static,
    {
        self.subscribe(Callback::PeerConnected(Arc::new(callback)))
    }

    /// Subscribe to [`NetEventListener::peer_disconnected`].
    pub fn on_peer_disconnected<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Peer, &DisconnectInfo) + Send + Sync + 'static,
    {
        self.subscribe(Callback::PeerDisconnected(Arc::new(callback)))
    }

    /// Subscribe to [`NetEventListener::network_error`].
    pub fn on_network_error<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Option<SocketAddr>, i32) + Send + Sync + 'static,
    {
        self.subscribe(Callback::NetworkError(Arc::new(callback)))
    }

    /// Subscribe to [`NetEventListener::network_receive`].
    ///
    /// Each subscriber gets its own cursor starting where the core's reader
    /// stood, so what one subscriber reads does not shift the next.
    pub fn on_network_receive<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Peer, &mut DataReader<'_>) + Send + Sync + 'static,
    {
        self.subscribe(Callback::NetworkReceive(Arc::new(callback)))
    }

    /// Subscribe to [`NetEventListener::network_receive_unconnected`].
    pub fn on_network_receive_unconnected<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(SocketAddr, &mut DataReader<'_>, UnconnectedMessageType) + Send + Sync + 'static,
    {
        self.subscribe(Callback::NetworkReceiveUnconnected(Arc::new(callback)))
    }

    /// Subscribe to [`NetEventListener::network_latency_update`].
    pub fn on_network_latency_update<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Peer, u32) + Send + Sync + 'static,
    {
        self.subscribe(Callback::NetworkLatencyUpdate(Arc::new(callback)))
    }

    /// Number of callbacks registered for `kind`.
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        match kind {
            EventKind::PeerConnected => self.peer_connected.len(),
            EventKind::PeerDisconnected => self.peer_disconnected.len(),
            EventKind::NetworkError => self.network_error.len(),
            EventKind::NetworkReceive => self.network_receive.len(),
            EventKind::NetworkReceiveUnconnected => self.network_receive_unconnected.len(),
            EventKind::NetworkLatencyUpdate => self.network_latency_update.len(),
        }
    }

    /// Remove every callback registered for `kind`.
    pub fn clear(&self, kind: EventKind) {
        match kind {
            EventKind::PeerConnected => self.peer_connected.clear(),
            EventKind::PeerDisconnected => self.peer_disconnected.clear(),
            EventKind::NetworkError => self.network_error.clear(),
            EventKind::NetworkReceive => self.network_receive.clear(),
            EventKind::NetworkReceiveUnconnected => self.network_receive_unconnected.clear(),
            EventKind::NetworkLatencyUpdate => self.network_latency_update.clear(),
        }
    }

    /// Remove every callback of every kind.
    pub fn clear_all(&self) {
        for kind in EventKind::ALL {
            self.clear(kind);
        }
    }
}

impl Default for EventBasedListener {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBasedListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBasedListener")
            .field("peer_connected", &self.peer_connected.len())
            .field("peer_disconnected", &self.peer_disconnected.len())
            .field("network_error", &self.network_error.len())
            .field("network_receive", &self.network_receive.len())
            .field(
                "network_receive_unconnected",
                &self.network_receive_unconnected.len(),
            )
            .field("network_latency_update", &self.network_latency_update.len())
            .finish()
    }
}

impl NetEventListener for EventBasedListener {
    fn peer_connected(&self, peer: &Peer) {
        self.peer_connected.emit(|f| f(peer));
    }

    fn peer_disconnected(&self, peer: &Peer, info: DisconnectInfo) {
        self.peer_disconnected.emit(|f| f(peer, &info));
    }

    fn network_error(&self, endpoint: Option<SocketAddr>, socket_error_code: i32) {
        self.network_error.emit(|f| f(endpoint, socket_error_code));
    }

    fn network_receive(&self, peer: &Peer, reader: &mut DataReader<'_>) {
        let start = *reader;
        self.network_receive.emit(|f| {
            let mut view = start;
            f(peer, &mut view)
        });
    }

    fn network_receive_unconnected(
        &self,
        endpoint: SocketAddr,
        reader: &mut DataReader<'_>,
        message_type: UnconnectedMessageType,
    ) {
        let start = *reader;
        self.network_receive_unconnected.emit(|f| {
            let mut view = start;
            f(endpoint, &mut view, message_type)
        });
    }

    fn network_latency_update(&self, peer: &Peer, latency_ms: u32) {
        self.network_latency_update.emit(|f| f(peer, latency_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::Mutex;
    use std::thread;

    use crate::core::PeerId;
    use crate::events::DisconnectReason;

    fn test_peer() -> Peer {
        Peer::new(
            PeerId::new(3),
            SocketAddr::new(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 5)), 9000),
        )
    }

    type Log = Arc<Mutex<Vec<(&'static str, u32)>>>;

    fn latency_recorder(
        log: Log,
        name: &'static str,
    ) -> impl Fn(&Peer, u32) + Send + Sync + 'static {
        move |_, latency| log.lock().unwrap().push((name, latency))
    }

    #[test]
    fn test_no_subscribers_is_noop() {
        let listener = EventBasedListener::new();
        let peer = test_peer();

        listener.peer_connected(&peer);
        listener.peer_disconnected(&peer, DisconnectInfo::new(DisconnectReason::Timeout));
        listener.network_error(None, 10054);
        listener.network_receive(&peer, &mut DataReader::new(&[1, 2, 3]));
        listener.network_receive_unconnected(
            peer.endpoint(),
            &mut DataReader::new(&[]),
            UnconnectedMessageType::Default,
        );
        listener.network_latency_update(&peer, 20);

        for kind in EventKind::ALL {
            assert_eq!(listener.subscriber_count(kind), 0);
        }
    }

    #[test]
    fn test_fan_out_in_registration_order() {
        let listener = EventBasedListener::new();
        let log: Log = Arc::default();

        listener.on_network_latency_update(latency_recorder(Arc::clone(&log), "c1"));
        listener.on_network_latency_update(latency_recorder(Arc::clone(&log), "c2"));
        listener.on_network_latency_update(latency_recorder(Arc::clone(&log), "c3"));

        listener.network_latency_update(&test_peer(), 48);

        assert_eq!(*log.lock().unwrap(), [("c1", 48), ("c2", 48), ("c3", 48)]);
    }

    #[test]
    fn test_unsubscribe_middle() {
        let listener = EventBasedListener::new();
        let log: Log = Arc::default();

        listener.on_network_latency_update(latency_recorder(Arc::clone(&log), "c1"));
        let c2 = listener.on_network_latency_update(latency_recorder(Arc::clone(&log), "c2"));
        listener.on_network_latency_update(latency_recorder(Arc::clone(&log), "c3"));

        assert!(listener.unsubscribe(c2));
        assert!(!listener.unsubscribe(c2));
        listener.network_latency_update(&test_peer(), 7);

        assert_eq!(*log.lock().unwrap(), [("c1", 7), ("c3", 7)]);
        assert_eq!(listener.subscriber_count(EventKind::NetworkLatencyUpdate), 2);
    }

    #[test]
    fn test_kinds_are_independent() {
        let listener = EventBasedListener::new();
        let log: Log = Arc::default();

        listener.on_network_latency_update(latency_recorder(Arc::clone(&log), "latency"));
        let connected = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&connected);
        listener.on_peer_connected(move |_| *counter.lock().unwrap() += 1);

        listener.peer_connected(&test_peer());

        assert_eq!(*connected.lock().unwrap(), 1);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_disconnect_delivered_identically() {
        let listener = EventBasedListener::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for _ in 0..2 {
            let seen = Arc::clone(&seen);
            listener.on_peer_disconnected(move |peer, info| {
                seen.lock().unwrap().push((*peer, info.clone()));
            });
        }

        let info = DisconnectInfo::new(DisconnectReason::Timeout);
        listener.peer_disconnected(&test_peer(), info.clone());

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        for (peer, observed) in seen.iter() {
            assert_eq!(*peer, test_peer());
            assert_eq!(observed.reason, DisconnectReason::Timeout);
            assert_eq!(observed.socket_error_code, 0);
            assert!(observed.additional_data().is_empty());
            assert_eq!(*observed, info);
        }
    }

    #[test]
    fn test_receive_subscribers_see_same_payload() {
        let listener = EventBasedListener::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for _ in 0..2 {
            let seen = Arc::clone(&seen);
            listener.on_network_receive(move |_, reader| {
                let value = reader.get_u32().unwrap();
                assert!(reader.is_empty());
                seen.lock().unwrap().push(value);
            });
        }

        let payload = 0xDEAD_BEEFu32.to_le_bytes();
        listener.network_receive(&test_peer(), &mut DataReader::new(&payload));

        assert_eq!(*seen.lock().unwrap(), [0xDEAD_BEEF, 0xDEAD_BEEF]);
    }

    #[test]
    fn test_unconnected_passes_message_type() {
        let listener = EventBasedListener::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        listener.on_network_receive_unconnected(move |endpoint, reader, kind| {
            let bytes = reader.get_remaining_bytes().to_vec();
            sink.lock().unwrap().push((endpoint, bytes, kind));
        });

        let endpoint = test_peer().endpoint();
        listener.network_receive_unconnected(
            endpoint,
            &mut DataReader::new(b"ping"),
            UnconnectedMessageType::DiscoveryRequest,
        );

        assert_eq!(
            *seen.lock().unwrap(),
            [(
                endpoint,
                b"ping".to_vec(),
                UnconnectedMessageType::DiscoveryRequest
            )]
        );
    }

    #[test]
    fn test_network_error_without_endpoint() {
        let listener = EventBasedListener::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        listener.on_network_error(move |endpoint, code| {
            sink.lock().unwrap().push((endpoint, code));
        });

        listener.network_error(None, 10065);

        assert_eq!(*seen.lock().unwrap(), [(None, 10065)]);
    }

    #[test]
    fn test_subscribe_during_dispatch_applies_next_time() {
        let listener = Arc::new(EventBasedListener::new());
        let log: Log = Arc::default();

        let inner = Arc::clone(&listener);
        let inner_log = Arc::clone(&log);
        listener.on_network_latency_update(move |_, latency| {
            inner_log.lock().unwrap().push(("outer", latency));
            inner.on_network_latency_update(latency_recorder(Arc::clone(&inner_log), "late"));
        });

        listener.network_latency_update(&test_peer(), 1);
        assert_eq!(*log.lock().unwrap(), [("outer", 1)]);

        listener.network_latency_update(&test_peer(), 2);
        assert_eq!(
            *log.lock().unwrap(),
            [("outer", 1), ("outer", 2), ("late", 2)]
        );
    }

    #[test]
    fn test_unsubscribe_self_during_dispatch() {
        let listener = Arc::new(EventBasedListener::new());
        let log: Log = Arc::default();
        let own_id: Arc<Mutex<Option<SubscriptionId>>> = Arc::default();

        let inner = Arc::clone(&listener);
        let inner_log = Arc::clone(&log);
        let slot = Arc::clone(&own_id);
        let id = listener.on_network_latency_update(move |_, latency| {
            inner_log.lock().unwrap().push(("once", latency));
            if let Some(id) = slot.lock().unwrap().take() {
                inner.unsubscribe(id);
            }
        });
        *own_id.lock().unwrap() = Some(id);
        listener.on_network_latency_update(latency_recorder(Arc::clone(&log), "always"));

        listener.network_latency_update(&test_peer(), 1);
        listener.network_latency_update(&test_peer(), 2);

        assert_eq!(
            *log.lock().unwrap(),
            [("once", 1), ("always", 1), ("always", 2)]
        );
    }

    #[test]
    fn test_concurrent_subscribe_while_dispatching() {
        let listener = Arc::new(EventBasedListener::new());
        let hits = Arc::new(AtomicU64::new(0));

        let emitter = {
            let listener = Arc::clone(&listener);
            thread::spawn(move || {
                for _ in 0..1_000 {
                    listener.peer_connected(&test_peer());
                }
            })
        };

        let subscribers: Vec<_> = (0..4)
            .map(|_| {
                let listener = Arc::clone(&listener);
                let hits = Arc::clone(&hits);
                thread::spawn(move || {
                    let mut ids = Vec::new();
                    for _ in 0..50 {
                        let hits = Arc::clone(&hits);
                        ids.push(listener.on_peer_connected(move |_| {
                            hits.fetch_add(1, Ordering::Relaxed);
                        }));
                    }
                    for id in ids.iter().step_by(2) {
                        assert!(listener.unsubscribe(*id));
                    }
                })
            })
            .collect();

        emitter.join().unwrap();
        for handle in subscribers {
            handle.join().unwrap();
        }

        assert_eq!(listener.subscriber_count(EventKind::PeerConnected), 100);

        let before = hits.load(Ordering::Relaxed);
        listener.peer_connected(&test_peer());
        assert_eq!(hits.load(Ordering::Relaxed), before + 100);
    }

    #[test]
    fn test_foreign_subscription_id_is_ignored() {
        let a = EventBasedListener::new();
        let b = EventBasedListener::new();
        let hits = Arc::new(AtomicU64::new(0));

        let id_a = a.on_peer_connected(|_| {});
        let counter = Arc::clone(&hits);
        let id_b = b.on_peer_connected(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        assert!(!b.unsubscribe(id_a));
        assert_eq!(b.subscriber_count(EventKind::PeerConnected), 1);
        b.peer_connected(&test_peer());
        assert_eq!(hits.load(Ordering::Relaxed), 1);

        assert!(!a.unsubscribe(id_b));
        assert!(a.unsubscribe(id_a));
        assert!(b.unsubscribe(id_b));
    }

    #[test]
    fn test_clear_all() {
        let listener = EventBasedListener::new();
        listener.on_peer_connected(|_| {});
        listener.on_network_error(|_, _| {});
        listener.on_network_latency_update(|_, _| {});

        listener.clear_all();

        for kind in EventKind::ALL {
            assert_eq!(listener.subscriber_count(kind), 0);
        }
    }

    #[test]
    fn test_subscription_id_carries_kind() {
        let listener = EventBasedListener::new();
        let a = listener.on_peer_connected(|_| {});
        let b = listener.on_network_receive(|_, _| {});

        assert_eq!(a.kind(), EventKind::PeerConnected);
        assert_eq!(b.kind(), EventKind::NetworkReceive);
        assert_ne!(a, b);
    }

    #[test]
    fn test_callback_list_clear_during_emit() {
        let list: CallbackList<PeerConnectedFn> = CallbackList::new();
        list.push(0, Arc::new(|_: &Peer| {}));
        list.push(1, Arc::new(|_: &Peer| {}));

        let mut calls = 0;
        list.emit(|_| {
            calls += 1;
            list.clear();
        });

        assert_eq!(calls, 2);
        assert_eq!(list.len(), 0);
    }
}
