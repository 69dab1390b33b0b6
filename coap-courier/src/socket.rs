// Copyright 2026 the coap-courier authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Datagram socket abstraction.
//!
//! The transport talks to the network exclusively through these two traits,
//! so it can run over whatever datagram-shaped layer a host supplies — plain
//! UDP, DTLS, or something stranger. The bundled [`UdpSocketFactory`] covers
//! the standard case.

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::net::UdpSocket;

use crate::{Endpoint, Security, TransportConfig};

/// One connected datagram socket, bound to a single peer.
///
/// `send` transmits one datagram; `recv` blocks until one arrives. Both must
/// be cancel-safe: the transport aborts its receive task when a connection is
/// cancelled.
pub trait TransportSocket: Send + Sync + std::fmt::Debug {
    /// Transmits `buf` as one datagram to the connected peer.
    fn send<'a>(&'a self, buf: &'a [u8]) -> BoxFuture<'a, io::Result<()>>;

    /// Receives one datagram into `buf`, returning its length.
    fn recv<'a>(&'a self, buf: &'a mut [u8]) -> BoxFuture<'a, io::Result<usize>>;
}

/// Factory for [`TransportSocket`]s, consulted once per peer connection.
///
/// Implementations resolve the endpoint, perform whatever setup their layer
/// needs (for DTLS-PSK: the handshake, keyed from
/// [`TransportConfig::security`]), and hand back a connected socket. The
/// transport imposes its setup timeout around the whole call.
pub trait SocketFactory: Send + Sync + std::fmt::Debug {
    /// Establishes a connected socket to `endpoint`.
    fn connect<'a>(
        &'a self,
        endpoint: &'a Endpoint,
        config: &'a TransportConfig,
    ) -> BoxFuture<'a, io::Result<Arc<dyn TransportSocket>>>;
}

/// The standard [`SocketFactory`]: plain CoAP-over-UDP via tokio.
///
/// Refuses configurations that ask for a pre-shared key, since a plain UDP
/// socket cannot honor one; supply a DTLS-capable factory for those.
#[derive(Debug, Default)]
pub struct UdpSocketFactory;

impl SocketFactory for UdpSocketFactory {
    fn connect<'a>(
        &'a self,
        endpoint: &'a Endpoint,
        config: &'a TransportConfig,
    ) -> BoxFuture<'a, io::Result<Arc<dyn TransportSocket>>> {
        async move {
            if let Security::PreSharedKey(_) = config.security {
                return Err(io::Error::new(
                    io::ErrorKind::Unsupported,
                    "plain UDP cannot honor a pre-shared key; supply a DTLS-capable SocketFactory",
                ));
            }

            let mut addrs = tokio::net::lookup_host((endpoint.host(), endpoint.port())).await?;
            let addr = addrs.next().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    "hostname resolved to no addresses",
                )
            })?;

            let bind_addr = match addr {
                SocketAddr::V4(_) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
                SocketAddr::V6(_) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
            };
            let socket = UdpSocket::bind(bind_addr).await?;
            socket.connect(addr).await?;

            Ok(Arc::new(ConnectedUdpSocket { socket }) as Arc<dyn TransportSocket>)
        }
        .boxed()
    }
}

#[derive(Debug)]
struct ConnectedUdpSocket {
    socket: UdpSocket,
}

impl TransportSocket for ConnectedUdpSocket {
    fn send<'a>(&'a self, buf: &'a [u8]) -> BoxFuture<'a, io::Result<()>> {
        async move {
            let sent = self.socket.send(buf).await?;
            if sent != buf.len() {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    "datagram written only partially",
                ));
            }
            Ok(())
        }
        .boxed()
    }

    fn recv<'a>(&'a self, buf: &'a mut [u8]) -> BoxFuture<'a, io::Result<usize>> {
        async move { self.socket.recv(buf).await }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn udp_factory_refuses_psk() {
        let factory = UdpSocketFactory;
        let endpoint = Endpoint::dtls("127.0.0.1", 5684);
        let config = TransportConfig::dtls_psk(b"key".to_vec());

        let err = factory.connect(&endpoint, &config).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }

    #[tokio::test]
    async fn udp_sockets_talk_to_each_other() {
        // A real loopback exchange through the factory-produced socket.
        let peer = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let peer_addr = peer.local_addr().unwrap();

        let endpoint = Endpoint::udp(peer_addr.ip().to_string(), peer_addr.port());
        let socket = UdpSocketFactory
            .connect(&endpoint, &TransportConfig::udp())
            .await
            .unwrap();

        socket.send(b"hello").await.unwrap();

        let mut buf = [0u8; 16];
        let (len, from) = peer.recv_from(&mut buf).await.unwrap();
        assert_eq!(&buf[..len], b"hello");

        peer.send_to(b"world", from).await.unwrap();
        let len = socket.recv(&mut buf).await.unwrap();
        assert_eq!(&buf[..len], b"world");
    }
}
