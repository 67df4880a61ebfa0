//! Unconnected UDP endpoint.
//!
//! Wraps a `tokio` UDP socket bound to one local port. Any number of
//! datagrams can be sent to arbitrary peers; receiving waits for the next
//! inbound datagram. Dropping the [`UdpEndpoint`] releases the port.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use tokio::net::UdpSocket;
use tracing::{debug, info, warn};

use crate::error::NetError;

/// Size of the receive buffer. Longer datagrams are truncated by the OS.
pub const RECV_BUFFER_SIZE: usize = 1024;

/// One inbound datagram and the peer it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datagram {
    /// Payload decoded as UTF-8; invalid sequences are replaced with U+FFFD.
    pub message: String,
    /// Address of the sender.
    pub from: SocketAddr,
}

impl Datagram {
    /// The sender's IP address.
    #[must_use]
    pub fn ip(&self) -> IpAddr {
        self.from.ip()
    }

    /// The sender's port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.from.port()
    }
}

/// A UDP socket bound to a local address.
#[derive(Debug)]
pub struct UdpEndpoint {
    socket: UdpSocket,
}

impl UdpEndpoint {
    /// Bind on all IPv4 interfaces (`0.0.0.0`) at `port`. Port `0` picks an
    /// ephemeral port; see [`UdpEndpoint::local_addr`].
    ///
    /// # Errors
    ///
    /// Returns [`NetError::Bind`] if the port is unavailable.
    pub async fn bind(port: u16) -> Result<Self, NetError> {
        Self::bind_addr(SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port)).await
    }

    /// Bind to an explicit local address.
    ///
    /// # Errors
    ///
    /// Returns [`NetError::Bind`] if the address cannot be bound.
    pub async fn bind_addr(addr: SocketAddr) -> Result<Self, NetError> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| NetError::Bind { addr, source })?;
        info!(%addr, "UDP socket bound");
        Ok(Self { socket })
    }

    /// Returns the address this endpoint is bound to.
    ///
    /// # Errors
    ///
    /// Returns [`NetError::LocalAddr`] if the OS cannot report it.
    pub fn local_addr(&self) -> Result<SocketAddr, NetError> {
        self.socket.local_addr().map_err(NetError::LocalAddr)
    }

    /// Send `message` as one datagram to `ip:port`. Returns the number of
    /// bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`NetError::Send`] if `ip` does not parse as an IP address or
    /// the write fails.
    pub async fn send_to(&self, message: &str, ip: &str, port: u16) -> Result<usize, NetError> {
        let ip: IpAddr = ip.parse().map_err(|e| NetError::Send {
            target: format!("{ip}:{port}"),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, e),
        })?;
        let target = SocketAddr::new(ip, port);

        let sent = self
            .socket
            .send_to(message.as_bytes(), target)
            .await
            .map_err(|source| NetError::Send {
                target: target.to_string(),
                source,
            })?;
        debug!(%target, bytes = sent, "datagram sent");
        Ok(sent)
    }

    /// Wait until one datagram arrives and return it.
    ///
    /// At most [`RECV_BUFFER_SIZE`] bytes are read; the rest of a longer
    /// datagram is discarded by the OS without error.
    ///
    /// # Errors
    ///
    /// Returns [`NetError::Receive`] on a transport failure.
    pub async fn receive_from(&self) -> Result<Datagram, NetError> {
        let mut buffer = [0u8; RECV_BUFFER_SIZE];
        let (len, from) = self
            .socket
            .recv_from(&mut buffer)
            .await
            .map_err(NetError::Receive)?;

        if len == RECV_BUFFER_SIZE {
            // An exact fit and a truncated datagram look the same from here.
            warn!(%from, len, "datagram filled the receive buffer and may be truncated");
        }
        debug!(%from, bytes = len, "datagram received");

        Ok(Datagram {
            message: String::from_utf8_lossy(&buffer[..len]).into_owned(),
            from,
        })
    }

    /// Like [`UdpEndpoint::receive_from`], but resolves to `None` if nothing
    /// arrives within `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`NetError::Receive`] on a transport failure.
    pub async fn receive_from_timeout(
        &self,
        timeout: Duration,
    ) -> Result<Option<Datagram>, NetError> {
        match tokio::time::timeout(timeout, self.receive_from()).await {
            Ok(result) => result.map(Some),
            Err(_elapsed) => {
                debug!(?timeout, "no datagram before timeout");
                Ok(None)
            }
        }
    }

    /// Close the socket, releasing its port.
    pub fn close(self) {
        drop(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn loopback_endpoint() -> (UdpEndpoint, u16) {
        let endpoint = UdpEndpoint::bind(0).await.unwrap();
        let port = endpoint.local_addr().unwrap().port();
        (endpoint, port)
    }

    #[tokio::test]
    async fn test_send_to_self_roundtrip() {
        let (endpoint, port) = loopback_endpoint().await;

        let sent = endpoint
            .send_to("Hello from R-Type!", "127.0.0.1", port)
            .await
            .unwrap();
        assert_eq!(sent, "Hello from R-Type!".len());

        let datagram = endpoint.receive_from().await.unwrap();
        assert_eq!(datagram.message, "Hello from R-Type!");
        assert_eq!(datagram.ip(), IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(datagram.port(), port);
    }

    #[tokio::test]
    async fn test_bind_uses_all_interfaces() {
        let (endpoint, _) = loopback_endpoint().await;
        let addr = endpoint.local_addr().unwrap();
        assert_eq!(addr.ip(), IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_ne!(addr.port(), 0);
    }

    #[tokio::test]
    async fn test_bind_port_in_use_fails() {
        let (_first, port) = loopback_endpoint().await;
        let err = UdpEndpoint::bind(port).await.unwrap_err();
        assert!(matches!(err, NetError::Bind { addr, .. } if addr.port() == port));
    }

    #[tokio::test]
    async fn test_send_to_unparsable_ip_fails() {
        let (endpoint, port) = loopback_endpoint().await;
        let err = endpoint.send_to("hi", "not-an-ip", port).await.unwrap_err();
        match err {
            NetError::Send { target, source } => {
                assert_eq!(target, format!("not-an-ip:{port}"));
                assert_eq!(source.kind(), std::io::ErrorKind::InvalidInput);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_messages_between_two_endpoints() {
        let (a, a_port) = loopback_endpoint().await;
        let (b, b_port) = loopback_endpoint().await;

        a.send_to("ping", "127.0.0.1", b_port).await.unwrap();
        let got = b.receive_from().await.unwrap();
        assert_eq!(got.message, "ping");
        assert_eq!(got.port(), a_port);

        b.send_to("pong", "127.0.0.1", got.port()).await.unwrap();
        let got = a.receive_from().await.unwrap();
        assert_eq!(got.message, "pong");
        assert_eq!(got.port(), b_port);
    }

    #[tokio::test]
    async fn test_oversized_datagram_is_truncated() {
        let (endpoint, port) = loopback_endpoint().await;
        let payload = "x".repeat(RECV_BUFFER_SIZE + 500);

        endpoint.send_to(&payload, "127.0.0.1", port).await.unwrap();
        let datagram = endpoint.receive_from().await.unwrap();
        assert_eq!(datagram.message.len(), RECV_BUFFER_SIZE);
    }

    #[tokio::test]
    async fn test_receive_timeout_without_traffic() {
        let (endpoint, _) = loopback_endpoint().await;
        let got = endpoint
            .receive_from_timeout(Duration::from_millis(50))
            .await
            .unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn test_receive_timeout_with_traffic() {
        let (endpoint, port) = loopback_endpoint().await;
        endpoint.send_to("quick", "127.0.0.1", port).await.unwrap();
        let got = endpoint
            .receive_from_timeout(Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(got.map(|d| d.message).as_deref(), Some("quick"));
    }

    #[tokio::test]
    async fn test_close_releases_port() {
        let (endpoint, port) = loopback_endpoint().await;
        endpoint.close();
        let rebound = UdpEndpoint::bind(port).await.unwrap();
        assert_eq!(rebound.local_addr().unwrap().port(), port);
    }

    #[test]
    fn test_error_display_includes_target() {
        let err = NetError::Send {
            target: "127.0.0.1:9".to_string(),
            source: std::io::Error::other("boom"),
        };
        assert_eq!(err.to_string(), "failed to send datagram to 127.0.0.1:9: boom");
    }
}
