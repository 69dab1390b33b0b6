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

//! Per-peer liveness probing.
//!
//! CoAP has no session to keep alive, but a client holding delegate
//! registrations against a peer wants to learn promptly when that peer goes
//! away. The probe is a "CoAP ping": an empty confirmable message, to which
//! any conforming peer answers with RST (or ACK). Either answer — any
//! datagram at all — refreshes the peer's liveness stamp.

use std::sync::Arc;
use std::time::Duration;

use coap_courier_msg::Message;
use log::{debug, info, warn};
use tokio::time::{sleep_until, Instant};

use crate::transport::{Inner, PeerEntry};
use crate::{Endpoint, TransportError, TransportSocket};

/// Extra slack after a probe, giving the round trip time to complete before
/// the next fire.
pub(crate) const KEEPALIVE_GRACE: Duration = Duration::from_secs(1);

/// Watches one peer until it is evicted or goes silent.
///
/// Each fire compares the time since the peer last produced a datagram
/// against the period `P`:
/// quiet for `3P` or more — the peer is dead: every delegate bound to it
/// gets a [`TransportError::PingTimeout`] and the connection is cancelled;
/// quiet for less than `P` — the peer is plainly alive: the timer extends to
/// the end of the current quiet window without sending anything;
/// otherwise — one ping goes out and the next fire waits an extra
/// [`KEEPALIVE_GRACE`] for the reply.
///
/// A fire that finds the peer already evicted does nothing and ends the
/// task, so a late timer cannot resurrect a cancelled peer.
pub(crate) async fn keepalive_loop(
    inner: Arc<Inner>,
    endpoint: Endpoint,
    socket: Arc<dyn TransportSocket>,
) {
    let period = inner.config.keepalive_interval;
    let mut deadline = Instant::now() + period;

    loop {
        sleep_until(deadline).await;
        let now = Instant::now();

        enum Fire {
            Probe(u16),
            Extend(Duration),
            GiveUp,
        }

        let fire = {
            let mut state = inner.state();
            let elapsed = match state.connections.get(&endpoint) {
                Some(PeerEntry::Ready(peer)) => now.saturating_duration_since(peer.last_received),
                _ => return,
            };

            if elapsed >= period * 3 {
                Fire::GiveUp
            } else if elapsed < period {
                Fire::Extend(period - elapsed)
            } else {
                Fire::Probe(state.next_message_id(&endpoint))
            }
        };

        match fire {
            Fire::GiveUp => {
                info!(
                    "nothing from {} in {:?}, declaring it dead",
                    endpoint,
                    period * 3
                );
                inner.fail_connection(&endpoint, TransportError::PingTimeout);
                return;
            }
            Fire::Extend(remaining) => {
                deadline = now + remaining;
            }
            Fire::Probe(msg_id) => {
                let mut ping = Message::ping();
                ping.msg_id = msg_id;
                debug!("pinging {} (mid={:#06x})", endpoint, msg_id);
                let bytes = ping.encode().expect("empty ping encodes");
                if let Err(err) = socket.send(&bytes).await {
                    warn!("ping to {} failed: {}", endpoint, err);
                }
                deadline = now + period + KEEPALIVE_GRACE;
            }
        }
    }
}
