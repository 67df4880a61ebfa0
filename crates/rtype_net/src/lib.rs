//! # rtype_net
//!
//! UDP transport for the R-Type proof of concept. There is no framing or
//! protocol: one `send_to` is one datagram, one `receive_from` is one
//! datagram.
//!
//! This crate provides:
//!
//! - [`socket`]: the [`UdpEndpoint`] wrapper and the [`Datagram`] it yields.
//! - [`error`]: Network-layer error types.

pub mod error;
pub mod socket;

pub use error::NetError;
pub use socket::{Datagram, RECV_BUFFER_SIZE, UdpEndpoint};
