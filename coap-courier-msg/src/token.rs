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

use crate::uint::{encode_uint, try_decode_uint, uint_len};
use crate::Error;

/// Type for holding the value of a CoAP message token.
///
/// The token is the opaque correlator between a request and its response(s),
/// independent of the message-id. On the wire it occupies the minimum number
/// of big-endian bytes needed for its value; the zero token occupies no bytes
/// at all.
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Ord, PartialOrd, Default)]
pub struct Token(pub u64);

impl Token {
    /// Constant representing an empty (zero) token.
    pub const EMPTY: Token = Token(0);

    /// Returns the number of bytes this token occupies on the wire.
    pub fn len(&self) -> usize {
        uint_len(self.0)
    }

    /// Returns true if this token encodes to zero bytes.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Writes the minimum-length big-endian form of this token into `dst`,
    /// returning the written prefix.
    pub fn to_bytes<'a>(&self, dst: &'a mut [u8; 8]) -> &'a [u8] {
        encode_uint(self.0, dst)
    }

    /// Reads a token back from its wire form. Rejects inputs longer than the
    /// eight bytes the header's token-length field can describe.
    pub fn from_bytes(src: &[u8]) -> Result<Token, Error> {
        try_decode_uint(src).map(Token).ok_or(Error::TokenTooLong)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = [0u8; 8];
        for b in self.to_bytes(&mut buf) {
            write!(f, "{:02X}", b)?;
        }
        Ok(())
    }
}

impl From<u64> for Token {
    fn from(x: u64) -> Self {
        Token(x)
    }
}

impl From<Token> for u64 {
    fn from(token: Token) -> Self {
        token.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_length() {
        assert_eq!(Token(0).len(), 0);
        assert_eq!(Token(0xAB).len(), 1);
        assert_eq!(Token(0x100).len(), 2);
        assert_eq!(Token(u64::MAX).len(), 8);
    }

    #[test]
    fn wire_roundtrip() {
        for value in [0, 1, 0xAB, 0x1234, 0xDEAD_BEEF, u64::MAX] {
            let token = Token(value);
            let mut buf = [0u8; 8];
            let bytes = token.to_bytes(&mut buf);
            assert_eq!(Token::from_bytes(bytes).unwrap(), token);
        }
    }

    #[test]
    fn oversize_rejected() {
        assert_eq!(Token::from_bytes(&[0u8; 9]), Err(Error::TokenTooLong));
    }

    #[test]
    fn hex_display() {
        assert_eq!(Token(0xAB).to_string(), "AB");
        assert_eq!(Token(0).to_string(), "");
        assert_eq!(Token(0x1234).to_string(), "1234");
    }
}
