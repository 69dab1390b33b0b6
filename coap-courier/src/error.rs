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

use std::fmt::{Display, Formatter};

/// Type for errors surfaced by the transport, either synchronously from
/// [`send`][crate::CoapTransport::send] or through
/// [`TransportDelegate::did_fail`][crate::TransportDelegate::did_fail].
///
/// Errors stop at the delegate boundary: whatever the transport cannot
/// recover from internally (by reconnecting on the next send) it reports
/// here, and nothing propagates further. Cancellations requested by the host
/// are not errors and are reported to nobody.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TransportError {
    /// The message could not be serialized; the socket was never touched.
    Encode(coap_courier_msg::Error),

    /// The connection did not become ready within the configured setup
    /// timeout, or setup failed outright. Reported to every delegate of the
    /// affected endpoint; the connection is then cancelled.
    Setup(String),

    /// The socket write failed. Reported to the sender's delegate; the
    /// sender's registration is removed.
    Send(String),

    /// The peer stayed silent through three keepalive periods. Reported to
    /// every delegate of the affected endpoint; the connection is then
    /// cancelled.
    PingTimeout,

    /// The receive loop hit a non-cancellation I/O error. Reported to every
    /// delegate of the affected endpoint; the connection is then cancelled.
    SocketIo(String),
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Encode(err) => write!(f, "message encoding failed: {}", err),
            TransportError::Setup(description) => write!(f, "connection setup failed: {}", description),
            TransportError::Send(description) => write!(f, "send failed: {}", description),
            TransportError::PingTimeout => f.write_str("peer stopped answering keepalive pings"),
            TransportError::SocketIo(description) => write!(f, "socket i/o failed: {}", description),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Encode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<coap_courier_msg::Error> for TransportError {
    fn from(err: coap_courier_msg::Error) -> Self {
        TransportError::Encode(err)
    }
}
