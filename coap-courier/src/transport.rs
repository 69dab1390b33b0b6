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

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use coap_courier_msg::{CoapByteDisplay, Message, Token};
use log::{debug, warn};
use rand::Rng;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::{
    Endpoint, SocketFactory, TransportConfig, TransportDelegate, TransportError, TransportSocket,
    UdpSocketFactory,
};

/// Identity of one outstanding logical transaction: the pair of the
/// request's token and the peer it was sent to.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub(crate) struct TransactionId {
    pub(crate) token: Token,
    pub(crate) endpoint: Endpoint,
}

pub(crate) struct DelegateEntry {
    pub(crate) delegate: Arc<dyn TransportDelegate>,
    pub(crate) is_observation: bool,
}

impl std::fmt::Debug for DelegateEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegateEntry")
            .field("is_observation", &self.is_observation)
            .finish()
    }
}

/// One peer's slot in the connection registry. Terminal states are not
/// represented: a cancelled or failed peer is simply evicted, so presence in
/// the map always means "usable or becoming usable".
#[derive(Debug)]
pub(crate) enum PeerEntry {
    /// The connection is being set up; senders wait on `ready`.
    Preparing { ready: Arc<Notify> },

    /// The connection is live.
    Ready(ReadyPeer),
}

#[derive(Debug)]
pub(crate) struct ReadyPeer {
    pub(crate) socket: Arc<dyn TransportSocket>,
    pub(crate) last_received: Instant,
    pub(crate) receive_task: JoinHandle<()>,
    pub(crate) keepalive_task: JoinHandle<()>,
}

/// Everything the transport mutates, behind one lock.
///
/// The three registries move together — a send must see the connection, the
/// delegate registration, and the message-id counter in one consistent state
/// — so they share a guard rather than being locked piecemeal. The guard is
/// never held across an await; socket writes and delegate callbacks always
/// happen after it drops.
#[derive(Debug, Default)]
pub(crate) struct State {
    pub(crate) connections: HashMap<Endpoint, PeerEntry>,
    pub(crate) delegates: HashMap<TransactionId, DelegateEntry>,
    pub(crate) message_ids: HashMap<Endpoint, u16>,
}

impl State {
    /// Draws the next message-id for a peer. The per-peer counter seeds from
    /// a uniform random draw and every result is `(prev % 0xFFFF) + 1`, so
    /// the visible sequence is strictly increasing modulo 65535 and never
    /// zero.
    pub(crate) fn next_message_id(&mut self, endpoint: &Endpoint) -> u16 {
        let prev = self
            .message_ids
            .entry(endpoint.clone())
            .or_insert_with(|| rand::thread_rng().gen_range(0..=0xFFFE));
        let next = (*prev % 0xFFFF) + 1;
        *prev = next;
        next
    }

    /// Records one inbound datagram: refreshes the peer's liveness stamp and
    /// re-anchors its message-id counter at the received id.
    pub(crate) fn note_received(&mut self, endpoint: &Endpoint, msg_id: u16) {
        self.message_ids.insert(endpoint.clone(), msg_id);
        if let Some(PeerEntry::Ready(peer)) = self.connections.get_mut(endpoint) {
            peer.last_received = Instant::now();
        }
    }
}

#[derive(Debug)]
pub(crate) struct Inner {
    pub(crate) config: TransportConfig,
    pub(crate) factory: Arc<dyn SocketFactory>,
    pub(crate) state: Mutex<State>,
}

impl Inner {
    pub(crate) fn state(&self) -> MutexGuard<'_, State> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                debug!("recovering from mutex poisoning");
                poisoned.into_inner()
            }
        }
    }

    /// Routes one inbound datagram, per RFC 7252 §4.2/§4.3 and RFC 7641
    /// §3.5: malformed input is dropped, a confirmable message nobody asked
    /// for draws an empty RST, a confirmable message somebody asked for
    /// draws an empty ACK, and the registered delegate (if any) gets the raw
    /// bytes. A one-shot delegate is retired when the inbound type is ACK.
    pub(crate) async fn handle_inbound(
        self: &Arc<Self>,
        endpoint: &Endpoint,
        socket: &Arc<dyn TransportSocket>,
        datagram: &[u8],
    ) {
        let message = match Message::decode(datagram) {
            Ok(message) => message,
            Err(err) => {
                debug!(
                    "dropping malformed datagram from {}: {} [{}]",
                    endpoint,
                    err,
                    CoapByteDisplay(datagram)
                );
                return;
            }
        };
        debug!("inbound from {}: {}", endpoint, message);

        let id = TransactionId {
            token: message.token,
            endpoint: endpoint.clone(),
        };

        let (delegate, reply) = {
            let mut state = self.state();
            state.note_received(endpoint, message.msg_id);

            match state.delegates.get(&id) {
                None if message.msg_type.is_con() => {
                    debug!("no delegate for token {:#x}, resetting", message.token.0);
                    (None, Some(Message::reset_for(message.msg_id)))
                }
                None => (None, None),
                Some(entry) => {
                    let delegate = entry.delegate.clone();
                    if !entry.is_observation && message.msg_type.is_ack() {
                        state.delegates.remove(&id);
                    }
                    let reply = message
                        .msg_type
                        .is_con()
                        .then(|| Message::ack_for(message.msg_id));
                    (Some(delegate), reply)
                }
            }
        };

        if let Some(reply) = reply {
            debug!("outbound to {}: {}", endpoint, reply);
            let bytes = reply.encode().expect("empty reply encodes");
            if let Err(err) = socket.send(&bytes).await {
                warn!("reply to {} failed: {}", endpoint, err);
            }
        }

        if let Some(delegate) = delegate {
            delegate.did_receive(datagram, endpoint);
        }
    }

    /// Evicts a peer and notifies everything registered against it.
    pub(crate) fn fail_connection(&self, endpoint: &Endpoint, error: TransportError) {
        let orphaned = self.remove_peer(endpoint);
        for delegate in &orphaned {
            delegate.did_fail(&error);
        }
    }

    /// Evicts a peer: removes its registry entry, aborts its tasks, and
    /// returns the delegates that were registered against it. Idempotent.
    pub(crate) fn remove_peer(&self, endpoint: &Endpoint) -> Vec<Arc<dyn TransportDelegate>> {
        let (entry, orphaned) = {
            let mut state = self.state();
            let entry = state.connections.remove(endpoint);
            let ids: Vec<TransactionId> = state
                .delegates
                .keys()
                .filter(|id| &id.endpoint == endpoint)
                .cloned()
                .collect();
            let orphaned = ids
                .into_iter()
                .filter_map(|id| state.delegates.remove(&id))
                .map(|entry| entry.delegate)
                .collect();
            (entry, orphaned)
        };

        match entry {
            Some(PeerEntry::Ready(peer)) => {
                // The keepalive must die before the socket handle does, so a
                // late fire cannot resurrect the peer.
                peer.keepalive_task.abort();
                peer.receive_task.abort();
            }
            Some(PeerEntry::Preparing { ready }) => ready.notify_waiters(),
            None => {}
        }

        orphaned
    }
}

/// Client-side CoAP transport: one instance serves any number of peers and
/// concurrent transactions.
///
/// Cloning is cheap and shares the underlying registries; see the
/// [crate documentation](crate) for an overview and an example.
#[derive(Debug, Clone)]
pub struct CoapTransport {
    pub(crate) inner: Arc<Inner>,
}

impl CoapTransport {
    /// Creates a transport using the bundled [`UdpSocketFactory`].
    pub fn new(config: TransportConfig) -> CoapTransport {
        CoapTransport::with_factory(config, Arc::new(UdpSocketFactory))
    }

    /// Creates a transport with a host-supplied [`SocketFactory`], the hook
    /// for DTLS or custom network layers.
    pub fn with_factory(config: TransportConfig, factory: Arc<dyn SocketFactory>) -> CoapTransport {
        CoapTransport {
            inner: Arc::new(Inner {
                config,
                factory,
                state: Mutex::new(State::default()),
            }),
        }
    }

    /// Draws the next message-id for `endpoint`, seeding the per-peer
    /// counter on first use. Concurrent callers sharing this transport never
    /// collide: issuance is totally ordered per peer.
    pub fn message_id(&self, endpoint: &Endpoint) -> u16 {
        self.inner.state().next_message_id(endpoint)
    }

    /// Sends `message` to `endpoint`, creating or reusing the peer
    /// connection as needed.
    ///
    /// When both `token` and `delegate` are given, the delegate is
    /// registered under `(token, endpoint)` before any bytes reach the
    /// socket, so a response cannot slip past it; the registration is
    /// one-shot unless the message registers an observation (Observe
    /// option 0). Encoding failures are returned synchronously without
    /// touching the socket; setup and send failures are also reported
    /// through the affected delegates, per [`TransportError`].
    pub async fn send(
        &self,
        message: &Message,
        endpoint: &Endpoint,
        token: Option<Token>,
        delegate: Option<Arc<dyn TransportDelegate>>,
    ) -> Result<(), TransportError> {
        let bytes = message.encode()?;

        if let (Some(token), Some(delegate)) = (token, delegate.clone()) {
            let id = TransactionId {
                token,
                endpoint: endpoint.clone(),
            };
            let entry = DelegateEntry {
                delegate,
                is_observation: message.is_observe_registration(),
            };
            self.inner.state().delegates.insert(id, entry);
        }

        let socket = self.inner.ensure_connection(endpoint).await?;

        debug!("outbound to {}: {}", endpoint, message);
        if let Err(err) = socket.send(&bytes).await {
            warn!("send to {} failed: {}", endpoint, err);
            let error = TransportError::Send(err.to_string());
            if let Some(token) = token {
                self.inner.state().delegates.remove(&TransactionId {
                    token,
                    endpoint: endpoint.clone(),
                });
            }
            if let Some(delegate) = &delegate {
                delegate.did_fail(&error);
            }
            return Err(error);
        }

        Ok(())
    }

    /// Forgets the delegate registered under `(token, endpoint)`, if any.
    /// The connection stays open. Idempotent.
    pub fn cancel_transmission(&self, endpoint: &Endpoint, token: Token) {
        let id = TransactionId {
            token,
            endpoint: endpoint.clone(),
        };
        if self.inner.state().delegates.remove(&id).is_some() {
            debug!("cancelled transaction {:#x} with {}", token.0, endpoint);
        }
    }

    /// Tears down the connection to `endpoint`: the keepalive is
    /// invalidated, the socket dropped, and every delegate registered
    /// against the endpoint forgotten without notification. Idempotent.
    pub fn cancel_connection(&self, endpoint: &Endpoint) {
        let dropped = self.inner.remove_peer(endpoint);
        debug!(
            "cancelled connection to {} ({} delegates dropped)",
            endpoint,
            dropped.len()
        );
    }

    /// [`cancel_connection`][Self::cancel_connection] for every known peer.
    pub fn close_all(&self) {
        let endpoints: Vec<Endpoint> = self.inner.state().connections.keys().cloned().collect();
        for endpoint in endpoints {
            self.cancel_connection(&endpoint);
        }
    }
}
