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

//! Client-side CoAP datagram transport.
//!
//! This crate moves [`coap_courier_msg::Message`]s between a host application
//! and its CoAP peers. It multiplexes any number of logical
//! request/response/observation flows over one connection per peer, and takes
//! care of the transport-level chores of RFC 7252 and RFC 7641:
//!
//! * per-peer connected sockets, created lazily on first send and reused
//!   until cancelled or failed;
//! * per-peer message-id issuance (randomly seeded, then monotone);
//! * automatic empty ACKs for confirmable messages the host asked for, and
//!   automatic RSTs for confirmable messages nobody asked for;
//! * liveness probing with "CoAP ping" (an empty confirmable message) and
//!   eviction of peers that stay silent;
//! * routing of inbound datagrams to host-registered delegates keyed by
//!   `(token, endpoint)`, with one-shot delegates retired on ACK and
//!   observation delegates kept alive until explicitly cancelled.
//!
//! The entry point is [`CoapTransport`]. Hosts implement
//! [`TransportDelegate`] to receive routed datagrams and failures, and may
//! implement [`SocketFactory`] to run the transport over something other than
//! plain UDP — DTLS, or any datagram-shaped layer. Retransmission policy,
//! request construction, and server-side resource handling are deliberately
//! left to the host.
//!
//! ```no_run
//! use std::sync::Arc;
//! use coap_courier::{CoapTransport, Endpoint, TransportConfig, TransportDelegate, TransportError};
//! use coap_courier::msg::{option, Message, MsgCode, MsgType, Token};
//!
//! struct Printer;
//!
//! impl TransportDelegate for Printer {
//!     fn did_receive(&self, raw: &[u8], endpoint: &Endpoint) {
//!         println!("{} sent {} bytes", endpoint, raw.len());
//!     }
//!
//!     fn did_fail(&self, error: &TransportError) {
//!         eprintln!("transport failure: {}", error);
//!     }
//! }
//!
//! # async fn run() -> Result<(), TransportError> {
//! let transport = CoapTransport::new(TransportConfig::udp());
//! let endpoint = Endpoint::udp("coap.me", 0);
//!
//! let mut request = Message::new(MsgType::Con, MsgCode::GET);
//! request.msg_id = transport.message_id(&endpoint);
//! request.token = Token(0xAB);
//! request.options.insert_str(option::URI_PATH, "test");
//!
//! transport
//!     .send(&request, &endpoint, Some(request.token), Some(Arc::new(Printer)))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]

pub use coap_courier_msg as msg;

mod endpoint;
pub use endpoint::Endpoint;
pub use endpoint::Protocol;

mod config;
pub use config::CipherSuite;
pub use config::PskConfig;
pub use config::Security;
pub use config::TransportConfig;

mod error;
pub use error::TransportError;

mod delegate;
pub use delegate::TransportDelegate;

mod socket;
pub use socket::SocketFactory;
pub use socket::TransportSocket;
pub use socket::UdpSocketFactory;

mod transport;
pub use transport::CoapTransport;

mod connection;
mod keepalive;

#[cfg(test)]
mod testutil;
