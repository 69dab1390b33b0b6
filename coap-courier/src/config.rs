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

use std::time::Duration;

/// How long a connection may stay in setup before its delegates are notified
/// and it is cancelled.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Baseline keepalive period; see [`TransportConfig::keepalive_interval`].
pub const DEFAULT_KEEPALIVE_INTERVAL: Duration = Duration::from_millis(1500);

/// Default receive buffer size, sized for a full-MTU datagram.
pub const DEFAULT_MAX_DATAGRAM_SIZE: usize = 1280;

/// An IANA TLS cipher suite identifier.
#[derive(Debug, Copy, Eq, PartialEq, Hash, Clone)]
pub struct CipherSuite(pub u16);

impl CipherSuite {
    /// TLS_PSK_WITH_AES_128_GCM_SHA256 (RFC 5487), the default suite for
    /// CoAP-over-DTLS with a pre-shared key.
    pub const TLS_PSK_WITH_AES_128_GCM_SHA256: CipherSuite = CipherSuite(0x00A8);
}

impl std::fmt::Display for CipherSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            CipherSuite::TLS_PSK_WITH_AES_128_GCM_SHA256 => {
                f.write_str("TLS_PSK_WITH_AES_128_GCM_SHA256")
            }
            CipherSuite(other) => write!(f, "cipher-suite-{:#06x}", other),
        }
    }
}

/// Pre-shared-key material for DTLS-PSK transports.
#[derive(Clone, Eq, PartialEq)]
pub struct PskConfig {
    /// The shared secret.
    pub key: Vec<u8>,

    /// Cipher suite to offer; defaults to
    /// [`CipherSuite::TLS_PSK_WITH_AES_128_GCM_SHA256`].
    pub cipher_suite: CipherSuite,

    /// PSK identity hint; empty by default.
    pub identity_hint: Vec<u8>,
}

impl PskConfig {
    /// Creates a PSK configuration with the default cipher suite and an
    /// empty identity hint.
    pub fn new(key: Vec<u8>) -> PskConfig {
        PskConfig {
            key,
            cipher_suite: CipherSuite::TLS_PSK_WITH_AES_128_GCM_SHA256,
            identity_hint: Vec::new(),
        }
    }
}

impl std::fmt::Debug for PskConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material stays out of logs.
        f.debug_struct("PskConfig")
            .field("key", &format_args!("<{} bytes>", self.key.len()))
            .field("cipher_suite", &self.cipher_suite)
            .field("identity_hint", &self.identity_hint)
            .finish()
    }
}

/// Transport-layer security selection.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub enum Security {
    /// Plain UDP, no security layer.
    #[default]
    None,

    /// DTLS with a pre-shared key. Honored by DTLS-capable
    /// [`SocketFactory`][crate::SocketFactory] implementations; the bundled
    /// UDP factory refuses it rather than sending plaintext.
    PreSharedKey(PskConfig),
}

/// Construction-time parameters for a [`CoapTransport`][crate::CoapTransport].
///
/// The defaults are the standard CoAP-over-UDP arrangement; hosts with
/// unusual networks assemble their own value (and, if need be, their own
/// [`SocketFactory`][crate::SocketFactory]).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TransportConfig {
    /// Security layer for new connections.
    pub security: Security,

    /// Time allowed for a connection to become ready.
    pub connect_timeout: Duration,

    /// Keepalive period `P`. A peer quiet for `P` is probed with a CoAP
    /// ping; a peer quiet for `3P` is declared dead.
    pub keepalive_interval: Duration,

    /// Receive buffer size; inbound datagrams beyond this are truncated by
    /// the socket layer and will fail to parse.
    pub max_datagram_size: usize,
}

impl TransportConfig {
    /// Standard plain-UDP configuration.
    pub fn udp() -> TransportConfig {
        TransportConfig::default()
    }

    /// DTLS-PSK configuration with the given shared secret, the default
    /// cipher suite, and an empty identity hint.
    pub fn dtls_psk(key: Vec<u8>) -> TransportConfig {
        TransportConfig {
            security: Security::PreSharedKey(PskConfig::new(key)),
            ..TransportConfig::default()
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig {
            security: Security::None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            keepalive_interval: DEFAULT_KEEPALIVE_INTERVAL,
            max_datagram_size: DEFAULT_MAX_DATAGRAM_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn psk_defaults() {
        let config = TransportConfig::dtls_psk(b"secret".to_vec());
        match &config.security {
            Security::PreSharedKey(psk) => {
                assert_eq!(psk.cipher_suite, CipherSuite::TLS_PSK_WITH_AES_128_GCM_SHA256);
                assert!(psk.identity_hint.is_empty());
            }
            other => panic!("unexpected security: {:?}", other),
        }
    }

    #[test]
    fn debug_redacts_key() {
        let psk = PskConfig::new(b"super secret".to_vec());
        let rendered = format!("{:?}", psk);
        assert!(!rendered.contains("super"));
        assert!(rendered.contains("<12 bytes>"));
    }
}
