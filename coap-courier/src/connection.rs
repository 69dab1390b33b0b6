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

//! Peer connection lifecycle.
//!
//! A connection moves through setup → preparing → ready, or out to
//! cancelled/failed; the terminal states are expressed by eviction from the
//! registry. While one sender is preparing a connection, other senders to the
//! same peer park on the entry's `Notify` rather than racing their own
//! sockets into existence.

use std::io;
use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::Notify;
use tokio::time::{timeout, Instant};

use crate::keepalive::keepalive_loop;
use crate::transport::{Inner, PeerEntry, ReadyPeer};
use crate::{Endpoint, TransportError, TransportSocket};

impl Inner {
    /// Returns a usable socket for `endpoint`, creating the connection if
    /// there is none. Concurrent callers coalesce onto one setup attempt.
    pub(crate) async fn ensure_connection(
        self: &Arc<Self>,
        endpoint: &Endpoint,
    ) -> Result<Arc<dyn TransportSocket>, TransportError> {
        loop {
            enum Step {
                Use(Arc<dyn TransportSocket>),
                Wait(Arc<Notify>),
                Connect,
            }

            let step = {
                let mut state = self.state();
                match state.connections.get(endpoint) {
                    Some(PeerEntry::Ready(peer)) => Step::Use(peer.socket.clone()),
                    Some(PeerEntry::Preparing { ready }) => Step::Wait(ready.clone()),
                    None => {
                        state.connections.insert(
                            endpoint.clone(),
                            PeerEntry::Preparing {
                                ready: Arc::new(Notify::new()),
                            },
                        );
                        Step::Connect
                    }
                }
            };

            match step {
                Step::Use(socket) => return Ok(socket),
                Step::Connect => return self.connect_peer(endpoint).await,
                Step::Wait(ready) => {
                    debug!("waiting for connection to {} to become ready", endpoint);
                    let notified = ready.notified();
                    tokio::pin!(notified);
                    notified.as_mut().enable();

                    // The connector may have finished between the map lookup
                    // and enable(); only park if the entry is still preparing.
                    let still_preparing = matches!(
                        self.state().connections.get(endpoint),
                        Some(PeerEntry::Preparing { .. })
                    );
                    if still_preparing {
                        notified.await;
                    }
                    // Loop around to observe the outcome.
                }
            }
        }
    }

    /// Performs one connection setup, bounded by the configured timeout.
    /// The caller has already installed the `Preparing` entry.
    async fn connect_peer(
        self: &Arc<Self>,
        endpoint: &Endpoint,
    ) -> Result<Arc<dyn TransportSocket>, TransportError> {
        debug!("connecting to {}", endpoint);

        let connected = timeout(
            self.config.connect_timeout,
            self.factory.connect(endpoint, &self.config),
        )
        .await;

        let socket = match connected {
            Ok(Ok(socket)) => socket,
            Ok(Err(err)) => {
                return Err(self.fail_setup(endpoint, format!("socket setup failed: {}", err)))
            }
            Err(_elapsed) => {
                return Err(self.fail_setup(
                    endpoint,
                    format!(
                        "not ready after {:?}",
                        self.config.connect_timeout
                    ),
                ))
            }
        };

        let receive_task = tokio::spawn(receive_loop(
            self.clone(),
            endpoint.clone(),
            socket.clone(),
        ));
        let keepalive_task = tokio::spawn(keepalive_loop(
            self.clone(),
            endpoint.clone(),
            socket.clone(),
        ));

        let previous = {
            let mut state = self.state();
            if !matches!(
                state.connections.get(endpoint),
                Some(PeerEntry::Preparing { .. })
            ) {
                // Cancelled while the socket was being set up; the cancel
                // already cleaned the registries.
                drop(state);
                keepalive_task.abort();
                receive_task.abort();
                return Err(TransportError::Setup(format!(
                    "connection to {} cancelled during setup",
                    endpoint
                )));
            }

            state.connections.insert(
                endpoint.clone(),
                PeerEntry::Ready(ReadyPeer {
                    socket: socket.clone(),
                    last_received: Instant::now(),
                    receive_task,
                    keepalive_task,
                }),
            )
        };

        if let Some(PeerEntry::Preparing { ready }) = previous {
            ready.notify_waiters();
        }

        debug!("connection to {} ready", endpoint);
        Ok(socket)
    }

    /// Records a setup failure: evicts the entry, wakes waiting senders, and
    /// reports the error to every delegate bound to the endpoint.
    fn fail_setup(&self, endpoint: &Endpoint, description: String) -> TransportError {
        warn!("connection to {} failed during setup: {}", endpoint, description);
        let error = TransportError::Setup(description);
        self.fail_connection(endpoint, error.clone());
        error
    }
}

/// Drains one peer's socket for the life of the connection. Datagrams are
/// handed to the delivery router in receive order; a non-cancellation error
/// fails the connection. Runs until the socket errors or the task is aborted
/// by [`Inner::remove_peer`].
pub(crate) async fn receive_loop(
    inner: Arc<Inner>,
    endpoint: Endpoint,
    socket: Arc<dyn TransportSocket>,
) {
    let mut buffer = vec![0u8; inner.config.max_datagram_size];
    loop {
        match socket.recv(&mut buffer).await {
            Ok(len) => inner.handle_inbound(&endpoint, &socket, &buffer[..len]).await,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                warn!("receive loop for {} ended: {}", endpoint, err);
                inner.fail_connection(&endpoint, TransportError::SocketIo(err.to_string()));
                return;
            }
        }
    }
}
