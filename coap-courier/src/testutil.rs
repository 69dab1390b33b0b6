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

//! In-process stand-ins for the network, used by the behavior tests: a
//! channel-backed socket whose far end is the test itself, a factory that
//! hands out scripted sockets, a factory that never finishes connecting, and
//! a delegate that records everything it is told.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::mpsc;

use crate::{
    Endpoint, SocketFactory, TransportConfig, TransportDelegate, TransportError, TransportSocket,
};

/// A [`TransportSocket`] whose wire is a pair of in-process channels.
#[derive(Debug)]
pub(crate) struct ScriptedSocket {
    outbound: mpsc::UnboundedSender<Vec<u8>>,
    inbound: tokio::sync::Mutex<mpsc::UnboundedReceiver<Vec<u8>>>,
}

/// The test's end of a [`ScriptedSocket`]: inspect what the transport sent,
/// feed it datagrams. Dropping the handle closes both channels, making
/// writes fail and reads error out.
#[derive(Debug)]
pub(crate) struct SocketHandle {
    outbound: mpsc::UnboundedReceiver<Vec<u8>>,
    inbound: mpsc::UnboundedSender<Vec<u8>>,
}

impl SocketHandle {
    /// Returns the next datagram the transport wrote, if one is already
    /// there. Never waits, so a paused-clock test observes exactly the
    /// traffic it arranged.
    pub(crate) fn try_next_outbound(&mut self) -> Option<Vec<u8>> {
        self.outbound.try_recv().ok()
    }

    /// Delivers one datagram to the transport's receive loop.
    pub(crate) fn feed(&self, datagram: &[u8]) {
        self.inbound
            .send(datagram.to_vec())
            .expect("receive loop is gone");
    }
}

/// Creates a connected [`ScriptedSocket`] / [`SocketHandle`] pair.
pub(crate) fn socket_pair() -> (Arc<ScriptedSocket>, SocketHandle) {
    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
    let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
    (
        Arc::new(ScriptedSocket {
            outbound: outbound_tx,
            inbound: tokio::sync::Mutex::new(inbound_rx),
        }),
        SocketHandle {
            outbound: outbound_rx,
            inbound: inbound_tx,
        },
    )
}

impl TransportSocket for ScriptedSocket {
    fn send<'a>(&'a self, buf: &'a [u8]) -> BoxFuture<'a, io::Result<()>> {
        async move {
            self.outbound
                .send(buf.to_vec())
                .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "test closed the socket"))
        }
        .boxed()
    }

    fn recv<'a>(&'a self, buf: &'a mut [u8]) -> BoxFuture<'a, io::Result<usize>> {
        async move {
            let mut inbound = self.inbound.lock().await;
            match inbound.recv().await {
                Some(datagram) => {
                    let len = datagram.len().min(buf.len());
                    buf[..len].copy_from_slice(&datagram[..len]);
                    Ok(len)
                }
                None => Err(io::Error::new(
                    io::ErrorKind::ConnectionAborted,
                    "test closed the socket",
                )),
            }
        }
        .boxed()
    }
}

/// A [`SocketFactory`] that hands out pre-queued [`ScriptedSocket`]s, one
/// per connection attempt, and fails once the queue is empty.
#[derive(Debug, Default)]
pub(crate) struct ScriptedFactory {
    sockets: Mutex<VecDeque<Arc<ScriptedSocket>>>,
}

impl ScriptedFactory {
    pub(crate) fn queue(&self, socket: Arc<ScriptedSocket>) {
        self.sockets.lock().unwrap().push_back(socket);
    }
}

impl SocketFactory for ScriptedFactory {
    fn connect<'a>(
        &'a self,
        _endpoint: &'a Endpoint,
        _config: &'a TransportConfig,
    ) -> BoxFuture<'a, io::Result<Arc<dyn TransportSocket>>> {
        let next = self.sockets.lock().unwrap().pop_front();
        async move {
            match next {
                Some(socket) => Ok(socket as Arc<dyn TransportSocket>),
                None => Err(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    "no scripted socket queued",
                )),
            }
        }
        .boxed()
    }
}

/// A [`SocketFactory`] whose connect never completes, for exercising the
/// setup timeout.
#[derive(Debug, Default)]
pub(crate) struct StalledFactory;

impl SocketFactory for StalledFactory {
    fn connect<'a>(
        &'a self,
        _endpoint: &'a Endpoint,
        _config: &'a TransportConfig,
    ) -> BoxFuture<'a, io::Result<Arc<dyn TransportSocket>>> {
        futures::future::pending().boxed()
    }
}

/// A delegate that stores everything it is handed.
#[derive(Debug, Default)]
pub(crate) struct RecordingDelegate {
    pub(crate) received: Mutex<Vec<(Vec<u8>, Endpoint)>>,
    pub(crate) failures: Mutex<Vec<TransportError>>,
}

impl TransportDelegate for RecordingDelegate {
    fn did_receive(&self, raw: &[u8], endpoint: &Endpoint) {
        self.received
            .lock()
            .unwrap()
            .push((raw.to_vec(), endpoint.clone()));
    }

    fn did_fail(&self, error: &TransportError) {
        self.failures.lock().unwrap().push(error.clone());
    }
}
