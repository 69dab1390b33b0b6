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

//! Message model and wire codec for the Constrained Application Protocol
//! ([RFC 7252]).
//!
//! This crate covers the stand-alone, bit-exact half of CoAP: parsing and
//! emitting single UDP datagrams. A [`Message`] is the owned in-memory form
//! (type, code, message-id, token, options, payload); [`Message::encode`] and
//! [`Message::decode`] convert between it and the RFC 7252 §3 wire format,
//! preserving unrecognized options verbatim in both directions.
//!
//! The datagram transport that moves these messages — per-peer connections,
//! acknowledgement handling, keepalive — lives in the `coap-courier` crate.
//!
//! ```
//! use coap_courier_msg::{Message, MsgCode, MsgType, Token, option};
//!
//! let mut msg = Message::new(MsgType::Con, MsgCode::GET);
//! msg.msg_id = 0x1234;
//! msg.token = Token(0xAB);
//! msg.options.insert_str(option::URI_PATH, "a");
//!
//! let wire = msg.encode().unwrap();
//! assert_eq!(wire, [0x44, 0x01, 0x12, 0x34, 0xAB, 0xB1, 0x61]);
//! assert_eq!(Message::decode(&wire).unwrap(), msg);
//! ```
//!
//! [RFC 7252]: https://tools.ietf.org/html/rfc7252

#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]

mod error;
pub use error::Error;

pub mod uint;

mod code;
pub use code::MsgCode;

mod msg_type;
pub use msg_type::MsgType;

mod token;
pub use token::Token;

pub mod option;
pub use option::OptionNumber;

pub mod codec;

mod message;
pub use message::CacheKey;
pub use message::Message;
pub use message::Options;

mod display;
pub use display::CoapByteDisplay;

/// Type for representing a CoAP message id.
pub type MsgId = u16;

#[allow(dead_code)]
pub(crate) const COAP_MSG_VER_MASK: u8 = 0b1100_0000;
pub(crate) const COAP_MSG_VER_OFFS: u8 = 6;
pub(crate) const COAP_MSG_T_MASK: u8 = 0b0011_0000;
pub(crate) const COAP_MSG_T_OFFS: u8 = 4;
pub(crate) const COAP_MSG_TKL_MASK: u8 = 0b0000_1111;

/// The CoAP protocol version carried in the two high bits of every header.
pub(crate) const COAP_VERSION: u8 = 1;

/// Marker byte separating the option list from the payload.
pub(crate) const PAYLOAD_MARKER: u8 = 0xFF;
