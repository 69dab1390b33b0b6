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

//! Minimum-length big-endian unsigned integer codec.
//!
//! CoAP encodes tokens and `uint`-format option values in the smallest number
//! of bytes that can represent the value; zero is represented by the empty
//! byte string.

use crate::Error;

/// Returns the number of bytes [`encode_uint`] will use for `value`.
///
/// This is `ceil(log2(value + 1) / 8)`; in particular zero occupies no bytes.
pub fn uint_len(value: u64) -> usize {
    (64 - value.leading_zeros() as usize + 7) / 8
}

/// Encodes an unsigned integer into the given buffer, returning the
/// written prefix. The returned slice is only as large as it needs to be to
/// represent the given value, and is empty when `value` is zero.
pub fn encode_uint(value: u64, dst: &mut [u8; 8]) -> &[u8] {
    let len = uint_len(value);
    for (i, byte) in dst[..len].iter_mut().enumerate() {
        *byte = (value >> (8 * (len - 1 - i))) as u8;
    }
    &dst[..len]
}

/// Attempts to decode the given big-endian byte string to a `u64`.
/// Empty input decodes to zero. Input longer than eight bytes returns `None`.
pub fn try_decode_uint(src: &[u8]) -> Option<u64> {
    if src.len() > 8 {
        return None;
    }
    Some(src.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
}

/// Attempts to decode the given big-endian byte string to a `u32`.
/// Input may be up to four bytes long.
pub fn try_decode_u32(src: &[u8]) -> Option<u32> {
    if src.len() > 4 {
        return None;
    }
    try_decode_uint(src).map(|v| v as u32)
}

/// Attempts to decode the given big-endian byte string to a `u16`.
/// Input may be up to two bytes long.
pub fn try_decode_u16(src: &[u8]) -> Option<u16> {
    if src.len() > 2 {
        return None;
    }
    try_decode_uint(src).map(|v| v as u16)
}

/// Parses an opaque value from its textual form, either `"0xHEX"` or bare
/// `"HEX"` digits.
///
/// A string containing more than one `x` separator is rejected, as is
/// anything other than an (optional) leading zero in front of the separator.
/// An odd number of digits is accepted by implying a leading zero.
pub fn opaque_from_text(text: &str) -> Result<Vec<u8>, Error> {
    let mut parts = text.split('x');
    let digits = match (parts.next(), parts.next(), parts.next()) {
        (Some(digits), None, _) => digits,
        (Some(prefix), Some(digits), None) if prefix.is_empty() || prefix == "0" => digits,
        _ => return Err(Error::InvalidArgument),
    };

    if digits.is_empty() {
        return Err(Error::InvalidArgument);
    }

    let mut nibbles = Vec::with_capacity(digits.len() + 1);
    if digits.len() % 2 != 0 {
        nibbles.push(0);
    }
    for c in digits.chars() {
        nibbles.push(c.to_digit(16).ok_or(Error::InvalidArgument)? as u8);
    }

    Ok(nibbles
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_uint() {
        for i in [
            0x00,
            0x01,
            0xFF,
            0x100,
            0xFFFF,
            0x1_0000,
            0xFF_FFFF,
            0x100_0000,
            0xFFFF_FFFF,
            0x1_0000_0000,
            u64::MAX,
        ] {
            let mut buf = [0u8; 8];
            let enc = encode_uint(i, &mut buf);
            assert_eq!(enc.len(), uint_len(i));
            assert_eq!(try_decode_uint(enc).unwrap(), i, "enc:{:02x?}", enc);
        }

        assert_eq!(try_decode_uint(&[0; 9]), None);
    }

    #[test]
    fn zero_occupies_no_bytes() {
        assert_eq!(uint_len(0), 0);
        assert_eq!(encode_uint(0, &mut [0u8; 8]), &[]);
        assert_eq!(try_decode_uint(&[]), Some(0));
    }

    #[test]
    fn decode_u16_u32_limits() {
        assert_eq!(try_decode_u16(&[0x12, 0x34]), Some(0x1234));
        assert_eq!(try_decode_u16(&[0x12, 0x34, 0x56]), None);
        assert_eq!(try_decode_u32(&[0x12, 0x34, 0x56, 0x78]), Some(0x1234_5678));
        assert_eq!(try_decode_u32(&[0; 5]), None);
    }

    #[test]
    fn opaque_text_forms() {
        assert_eq!(opaque_from_text("0xABCD").unwrap(), vec![0xAB, 0xCD]);
        assert_eq!(opaque_from_text("ABCD").unwrap(), vec![0xAB, 0xCD]);
        assert_eq!(opaque_from_text("x1A").unwrap(), vec![0x1A]);
        assert_eq!(opaque_from_text("0xabc").unwrap(), vec![0x0A, 0xBC]);
        assert_eq!(opaque_from_text("0x0x12"), Err(Error::InvalidArgument));
        assert_eq!(opaque_from_text("0xZZ"), Err(Error::InvalidArgument));
        assert_eq!(opaque_from_text("0x"), Err(Error::InvalidArgument));
        assert_eq!(opaque_from_text("zx1A"), Err(Error::InvalidArgument));
        assert_eq!(opaque_from_text("garbagex1234"), Err(Error::InvalidArgument));
        assert_eq!(opaque_from_text("12x"), Err(Error::InvalidArgument));
    }
}
