//! Pending inbound connection attempts.

use std::fmt;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU8, Ordering};

use tracing::{debug, trace};

use crate::core::{ConnectionId, DataReader};

/// The user's decision on a connection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
    /// Establish the peer session.
    Accept,
    /// Discard the attempt.
    Reject,
}

/// Resolution state of a connection request.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    /// No decision yet.
    Unresolved = 0,
    /// Accepted; terminal.
    Accepted = 1,
    /// Rejected; terminal.
    Rejected = 2,
}

impl From<u8> for RequestState {
    fn from(val: u8) -> Self {
        match val {
            1 => RequestState::Accepted,
            2 => RequestState::Rejected,
            _ => RequestState::Unresolved,
        }
    }
}

impl From<RequestOutcome> for RequestState {
    fn from(outcome: RequestOutcome) -> Self {
        match outcome {
            RequestOutcome::Accept => RequestState::Accepted,
            RequestOutcome::Reject => RequestState::Rejected,
        }
    }
}

/// Callback the transport core supplies to act on the user's decision.
pub type ResolutionFn = dyn Fn(&ConnectionRequest, RequestOutcome) + Send + Sync;

/// One pending inbound connection attempt.
///
/// The core builds it when a handshake datagram arrives and hands it to user
/// code, which decides once with [`accept`](Self::accept) or
/// [`reject`](Self::reject). Only the first decision counts, even when
/// several threads race; later calls are silent no-ops.
///
/// Expiry of a request nobody resolves is up to the core.
///
/// # Example
///
/// ```
/// use netgate::core::ConnectionId;
/// use netgate::request::ConnectionRequest;
///
/// let request = ConnectionRequest::new(
///     ConnectionId::new(42),
///     "203.0.113.5:9000".parse().unwrap(),
///     Vec::new(),
///     |req, outcome| println!("{} -> {:?}", req.connection_id(), outcome),
/// );
///
/// assert!(request.reject());
/// assert!(!request.accept());
/// ```
pub struct ConnectionRequest {
    connection_id: ConnectionId,
    remote_endpoint: SocketAddr,
    payload: Vec<u8>,
    state: AtomicU8,
    on_resolved: Box<ResolutionFn>,
}

impl ConnectionRequest {
    /// Create an unresolved request.
    pub fn new<F>(
        connection_id: ConnectionId,
        remote_endpoint: SocketAddr,
        payload: Vec<u8>,
        on_resolved: F,
    ) -> Self
    where
        F: Fn(&ConnectionRequest, RequestOutcome) + Send + Sync + 'static,
    {
        Self {
            connection_id,
            remote_endpoint,
            payload,
            state: AtomicU8::new(RequestState::Unresolved as u8),
            on_resolved: Box::new(on_resolved),
        }
    }

    /// Core-assigned identifier of this attempt.
    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    /// Address and port the attempt came from.
    pub fn remote_endpoint(&self) -> SocketAddr {
        self.remote_endpoint
    }

    /// Raw bytes the remote side attached to its handshake.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// A fresh reader over the attached payload.
    pub fn data(&self) -> DataReader<'_> {
        DataReader::new(&self.payload)
    }

    /// Current resolution state.
    pub fn state(&self) -> RequestState {
        RequestState::from(self.state.load(Ordering::Acquire))
    }

    /// Check if a decision has been made.
    pub fn is_resolved(&self) -> bool {
        self.state() != RequestState::Unresolved
    }

    /// Accept the attempt, asking the core to establish the session.
    ///
    /// Returns `true` if this call made the decision, `false` if the request
    /// was already resolved.
    pub fn accept(&self) -> bool {
        self.resolve(RequestOutcome::Accept)
    }

    /// Reject the attempt, asking the core to discard it.
    ///
    /// Returns `true` if this call made the decision, `false` if the request
    /// was already resolved.
    pub fn reject(&self) -> bool {
        self.resolve(RequestOutcome::Reject)
    }

    /// Accept if `predicate` approves the attached payload, reject otherwise.
    ///
    /// The predicate runs even if the request is already resolved, but the
    /// outcome is then ignored like any other late decision.
    pub fn accept_if<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&mut DataReader<'_>) -> bool,
    {
        let approved = predicate(&mut self.data());
        if approved {
            self.accept()
        } else {
            self.reject()
        }
    }

    fn resolve(&self, outcome: RequestOutcome) -> bool {
        let target = RequestState::from(outcome) as u8;
        // Only the thread that wins the swap runs the callback.
        if let Err(current) = self.state.compare_exchange(
            RequestState::Unresolved as u8,
            target,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            trace!(
                connection_id = %self.connection_id,
                state = ?RequestState::from(current),
                ?outcome,
                "connection request already resolved"
            );
            return false;
        }

        debug!(
            connection_id = %self.connection_id,
            remote = %self.remote_endpoint,
            ?outcome,
            "connection request resolved"
        );
        (self.on_resolved)(self, outcome);
        true
    }
}

impl fmt::Debug for ConnectionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionRequest")
            .field("connection_id", &self.connection_id)
            .field("remote_endpoint", &self.remote_endpoint)
            .field("payload_len", &self.payload.len())
            .field("state", &self.state())
            .finish()
    }
}
