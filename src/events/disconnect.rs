//! Disconnect and unconnected-message taxonomies.
//!
//! Closed sets classified by the transport core and passed through to
//! listeners unmodified.

use std::fmt;

use crate::core::DataReader;

/// Why a peer session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisconnectReason {
    /// Socket receive failed; see the accompanying socket error code.
    SocketReceiveError,
    /// Outbound connection attempt failed.
    ConnectionFailed,
    /// Peer stopped responding.
    Timeout,
    /// Socket send failed; see the accompanying socket error code.
    SocketSendError,
    /// The remote side closed the connection.
    RemoteConnectionClose,
    /// The local application disconnected the peer.
    DisconnectPeerCalled,
}

impl DisconnectReason {
    /// Every reason, in declaration order.
    pub const ALL: [DisconnectReason; 6] = [
        DisconnectReason::SocketReceiveError,
        DisconnectReason::ConnectionFailed,
        DisconnectReason::Timeout,
        DisconnectReason::SocketSendError,
        DisconnectReason::RemoteConnectionClose,
        DisconnectReason::DisconnectPeerCalled,
    ];

    /// Check if the socket error code is meaningful for this reason.
    pub fn is_socket_error(&self) -> bool {
        matches!(
            self,
            DisconnectReason::SocketReceiveError | DisconnectReason::SocketSendError
        )
    }
}

impl fmt::Display for DisconnectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DisconnectReason::SocketReceiveError => "socket receive error",
            DisconnectReason::ConnectionFailed => "connection failed",
            DisconnectReason::Timeout => "timeout",
            DisconnectReason::SocketSendError => "socket send error",
            DisconnectReason::RemoteConnectionClose => "remote connection close",
            DisconnectReason::DisconnectPeerCalled => "disconnect peer called",
        };
        f.write_str(s)
    }
}

/// Kind of a datagram received outside any session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnconnectedMessageType {
    /// Plain unconnected message.
    #[default]
    Default,
    /// Discovery broadcast from a peer looking for hosts.
    DiscoveryRequest,
    /// Reply to a discovery request.
    DiscoveryResponse,
}

impl UnconnectedMessageType {
    /// Every message type, in declaration order.
    pub const ALL: [UnconnectedMessageType; 3] = [
        UnconnectedMessageType::Default,
        UnconnectedMessageType::DiscoveryRequest,
        UnconnectedMessageType::DiscoveryResponse,
    ];
}

impl fmt::Display for UnconnectedMessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnconnectedMessageType::Default => "default",
            UnconnectedMessageType::DiscoveryRequest => "discovery request",
            UnconnectedMessageType::DiscoveryResponse => "discovery response",
        };
        f.write_str(s)
    }
}

/// Details accompanying a peer disconnect.
///
/// Built by the core per disconnect event and handed to listeners by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisconnectInfo {
    /// Why the session ended.
    pub reason: DisconnectReason,
    /// Raw platform socket error code. Only meaningful when
    /// [`DisconnectReason::is_socket_error`] holds.
    pub socket_error_code: i32,
    /// Bytes the remote peer attached to its disconnect notice (may be empty).
    pub additional_data: Vec<u8>,
}

impl DisconnectInfo {
    /// Create info with no socket error and no additional data.
    pub fn new(reason: DisconnectReason) -> Self {
        Self {
            reason,
            socket_error_code: 0,
            additional_data: Vec::new(),
        }
    }

    /// Set the raw socket error code.
    pub fn with_socket_error(mut self, code: i32) -> Self {
        self.socket_error_code = code;
        self
    }

    /// Attach the remote peer's disconnect payload.
    pub fn with_additional_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.additional_data = data.into();
        self
    }

    /// The socket error code, if the reason is a socket error.
    pub fn socket_error(&self) -> Option<i32> {
        self.reason
            .is_socket_error()
            .then_some(self.socket_error_code)
    }

    /// The remote peer's disconnect payload.
    pub fn additional_data(&self) -> &[u8] {
        &self.additional_data
    }

    /// A reader over the remote peer's disconnect payload.
    pub fn additional_data_reader(&self) -> DataReader<'_> {
        DataReader::new(&self.additional_data)
    }
}
