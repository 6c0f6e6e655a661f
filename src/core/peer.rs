//! Peer and connection identifiers.

use std::fmt;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide counter backing [`ConnectionId::next`].
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identifier of one pending inbound connection attempt.
///
/// Opaque to this crate; the transport core assigns it and guarantees
/// uniqueness among pending attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Wrap a core-assigned id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Allocate a fresh id from a process-wide monotonic counter.
    ///
    /// For cores that do not carry their own id scheme.
    pub fn next() -> Self {
        // Relaxed is enough: only uniqueness matters.
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw id value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl From<u64> for ConnectionId {
    fn from(raw: u64) -> Self {
        Self::new(raw)
    }
}

impl From<ConnectionId> for u64 {
    fn from(id: ConnectionId) -> u64 {
        id.0
    }
}

/// Core-assigned identifier of an established peer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeerId(u64);

impl PeerId {
    /// Wrap a core-assigned id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw id value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "peer-{}", self.0)
    }
}

/// Handle to a remote endpoint with an established, core-managed session.
///
/// The session itself lives in the transport core; this is only the
/// identity that crosses the notification boundary. Cheap to clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Peer {
    id: PeerId,
    endpoint: SocketAddr,
}

impl Peer {
    /// Create a peer handle.
    pub const fn new(id: PeerId, endpoint: SocketAddr) -> Self {
        Self { id, endpoint }
    }

    /// Session identifier.
    pub const fn id(&self) -> PeerId {
        self.id
    }

    /// Remote address and port.
    pub const fn endpoint(&self) -> SocketAddr {
        self.endpoint
    }
}

impl fmt::Display for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.endpoint)
    }
}
