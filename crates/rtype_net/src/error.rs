//! Network-layer error types.

use std::net::SocketAddr;

/// Errors that can occur during socket operations.
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    /// The local endpoint could not be bound.
    #[error("failed to bind UDP socket on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// A datagram could not be sent, or its destination was not a valid address.
    #[error("failed to send datagram to {target}: {source}")]
    Send {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading from the socket failed.
    #[error("failed to receive datagram: {0}")]
    Receive(#[source] std::io::Error),

    /// The bound address of the socket could not be queried.
    #[error("failed to query local address: {0}")]
    LocalAddr(#[source] std::io::Error),
}
