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

use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};

use crate::codec::{self, OptionIterator};
use crate::option::OptionNumber;
use crate::uint::{encode_uint, try_decode_uint};
use crate::{
    Error, MsgCode, MsgId, MsgType, Token, COAP_MSG_TKL_MASK, COAP_MSG_T_MASK, COAP_MSG_T_OFFS,
    COAP_MSG_VER_OFFS, COAP_VERSION, PAYLOAD_MARKER,
};

/// Freshness lifetime assumed when a message carries no Max-Age option
/// (RFC 7252 §5.10.5).
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(60);

/// The set of options carried by one message: a mapping from option number to
/// an ordered list of value byte-strings.
///
/// Values of a repeatable option keep their insertion order; the numbers
/// themselves are kept sorted, which is the order the wire format requires.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct Options {
    map: BTreeMap<OptionNumber, Vec<Vec<u8>>>,
}

impl Options {
    /// Creates an empty option set.
    pub fn new() -> Options {
        Options::default()
    }

    /// Returns true if no options are present.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Appends a raw value for the given option number.
    pub fn insert(&mut self, num: OptionNumber, value: Vec<u8>) {
        self.map.entry(num).or_default().push(value);
    }

    /// Appends a UTF-8 string value for the given option number.
    pub fn insert_str(&mut self, num: OptionNumber, value: &str) {
        self.insert(num, value.as_bytes().to_vec());
    }

    /// Appends an unsigned integer value, encoded minimum-length big-endian,
    /// for the given option number.
    pub fn insert_uint(&mut self, num: OptionNumber, value: u64) {
        let mut buf = [0u8; 8];
        self.insert(num, encode_uint(value, &mut buf).to_vec());
    }

    /// Returns every value recorded for the given option number.
    pub fn get(&self, num: OptionNumber) -> &[Vec<u8>] {
        self.map.get(&num).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the first value recorded for the given option number.
    pub fn first(&self, num: OptionNumber) -> Option<&[u8]> {
        self.get(num).first().map(Vec::as_slice)
    }

    /// Returns the first value of the given option decoded as an unsigned
    /// integer, or `None` if the option is absent or wider than eight bytes.
    pub fn uint(&self, num: OptionNumber) -> Option<u64> {
        self.first(num).and_then(try_decode_uint)
    }

    /// Returns true if at least one value is recorded for the number.
    pub fn contains(&self, num: OptionNumber) -> bool {
        self.map.contains_key(&num)
    }

    /// Removes every value recorded for the given option number.
    pub fn remove(&mut self, num: OptionNumber) {
        self.map.remove(&num);
    }

    /// Iterates `(number, value)` pairs in wire order: ascending by number,
    /// insertion order within a number.
    pub fn iter(&self) -> impl Iterator<Item = (OptionNumber, &[u8])> + '_ {
        self.map
            .iter()
            .flat_map(|(num, values)| values.iter().map(move |v| (*num, v.as_slice())))
    }

    fn cache_relevant(&self) -> Vec<(OptionNumber, Vec<Vec<u8>>)> {
        self.map
            .iter()
            .filter(|(num, _)| !num.is_no_cache_key())
            .map(|(num, values)| (*num, values.clone()))
            .collect()
    }
}

/// An owned CoAP message: the decoded form of one UDP datagram.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct Message {
    /// Message type: CON, NON, ACK, or RST.
    pub msg_type: MsgType,

    /// Message code, e.g. [`MsgCode::GET`] or [`MsgCode::CONTENT`].
    pub code: MsgCode,

    /// 16-bit message-id used for deduplication and ACK matching.
    pub msg_id: MsgId,

    /// Request/response correlator, independent of the message-id.
    pub token: Token,

    /// The option set.
    pub options: Options,

    /// Message payload; empty means no payload (and no marker on the wire).
    pub payload: Vec<u8>,
}

impl Message {
    /// Creates a message of the given type and code with no token, options,
    /// or payload.
    pub fn new(msg_type: MsgType, code: MsgCode) -> Message {
        Message {
            msg_type,
            code,
            ..Default::default()
        }
    }

    /// Creates a "CoAP ping": an empty confirmable message whose only purpose
    /// is to elicit a RST (or ACK) from the peer. The caller assigns the
    /// message-id.
    pub fn ping() -> Message {
        Message::new(MsgType::Con, MsgCode::EMPTY)
    }

    /// Creates the empty acknowledgement for a confirmable message with the
    /// given message-id.
    pub fn ack_for(msg_id: MsgId) -> Message {
        let mut msg = Message::new(MsgType::Ack, MsgCode::EMPTY);
        msg.msg_id = msg_id;
        msg
    }

    /// Creates the empty reset reply for a message with the given message-id.
    pub fn reset_for(msg_id: MsgId) -> Message {
        let mut msg = Message::new(MsgType::Rst, MsgCode::EMPTY);
        msg.msg_id = msg_id;
        msg
    }

    /// Serializes this message into RFC 7252 §3 wire form.
    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        let mut token_buf = [0u8; 8];
        let token = self.token.to_bytes(&mut token_buf);

        let mut buffer = Vec::with_capacity(4 + token.len() + self.payload.len() + 16);
        write_header(
            &mut buffer,
            self.msg_type,
            self.code,
            self.msg_id,
            token,
        )?;

        let mut prev = OptionNumber::default();
        for (num, value) in self.options.iter() {
            codec::encode_option(&mut buffer, prev, num, value)?;
            prev = num;
        }

        if !self.payload.is_empty() {
            buffer.push(PAYLOAD_MARKER);
            buffer.extend_from_slice(&self.payload);
        }

        Ok(buffer)
    }

    /// Parses one datagram into an owned message.
    ///
    /// Rejects datagrams shorter than the four-byte header, versions other
    /// than 1, token lengths over eight or past the end of the datagram, and
    /// any option whose delta or length nibble is the reserved value 15.
    /// A payload marker with no bytes after it is tolerated and read as "no
    /// payload", matching deployed encoders that emit the stray marker
    /// (strict RFC 7252 §3 would reject it).
    pub fn decode(buffer: &[u8]) -> Result<Message, Error> {
        if buffer.len() < 4 {
            return Err(Error::ParseFailure);
        }

        if buffer[0] >> COAP_MSG_VER_OFFS != COAP_VERSION {
            return Err(Error::ParseFailure);
        }

        let msg_type = MsgType::try_from_u8((buffer[0] & COAP_MSG_T_MASK) >> COAP_MSG_T_OFFS)
            .ok_or(Error::ParseFailure)?;
        let code = MsgCode(buffer[1]);
        let msg_id = u16::from(buffer[2]) << 8 | u16::from(buffer[3]);

        let token_len = (buffer[0] & COAP_MSG_TKL_MASK) as usize;
        if token_len > 8 || buffer.len() < 4 + token_len {
            return Err(Error::ParseFailure);
        }
        let token = Token::from_bytes(&buffer[4..4 + token_len])?;

        let mut options = Options::new();
        let mut iter = OptionIterator::new(&buffer[4 + token_len..]);
        for result in &mut iter {
            let (num, value) = result?;
            options.insert(num, value.to_vec());
        }

        Ok(Message {
            msg_type,
            code,
            msg_id,
            token,
            options,
            payload: iter.as_slice().to_vec(),
        })
    }

    /// Returns true if this message registers an observation (RFC 7641): it
    /// carries an Observe option whose value decodes to zero.
    pub fn is_observe_registration(&self) -> bool {
        self.options.uint(OptionNumber::OBSERVE) == Some(0)
    }

    /// Returns the freshness lifetime of this message: the Max-Age option if
    /// present, [`DEFAULT_MAX_AGE`] otherwise.
    pub fn max_age(&self) -> Duration {
        self.options
            .uint(OptionNumber::MAX_AGE)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_MAX_AGE)
    }

    /// Returns true if a message received at `received_at` is still fresh at
    /// `now`: `now ≤ received_at + max_age`.
    pub fn is_fresh(&self, received_at: SystemTime, now: SystemTime) -> bool {
        now <= received_at + self.max_age()
    }

    /// Returns the response-cache key for this message: the code plus every
    /// option that is not no-cache-key, values in order.
    ///
    /// Two messages to the same endpoint are cache-equivalent exactly when
    /// their keys compare equal; the endpoint half of the comparison belongs
    /// to whatever map the key is stored in.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey {
            code: self.code,
            options: self.options.cache_relevant(),
        }
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} {} mid={:#06x} tkn={}",
            self.msg_type, self.code, self.msg_id, self.token
        )?;
        for (num, value) in self.options.iter() {
            f.write_str(" [")?;
            num.fmt_with_value(f, value)?;
            f.write_str("]")?;
        }
        if !self.payload.is_empty() {
            write!(f, " +{}b", self.payload.len())?;
        }
        Ok(())
    }
}

/// Hashable cache-equivalence key of a message; see [`Message::cache_key`].
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct CacheKey {
    code: MsgCode,
    options: Vec<(OptionNumber, Vec<Vec<u8>>)>,
}

/// Writes the four-byte header plus token. Split out from
/// [`Message::encode`] so the token-length guard is applied to every raw
/// buffer, not only the minimum-length form a [`Token`] produces.
pub(crate) fn write_header(
    buffer: &mut Vec<u8>,
    msg_type: MsgType,
    code: MsgCode,
    msg_id: MsgId,
    token: &[u8],
) -> Result<(), Error> {
    if token.len() > 8 {
        return Err(Error::TokenTooLong);
    }

    buffer.push(
        (COAP_VERSION << COAP_MSG_VER_OFFS) | ((msg_type as u8) << COAP_MSG_T_OFFS)
            | token.len() as u8,
    );
    buffer.push(code.0);
    buffer.push((msg_id >> 8) as u8);
    buffer.push(msg_id as u8);
    buffer.extend_from_slice(token);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option;

    #[test]
    fn encode_get_with_path() {
        let mut msg = Message::new(MsgType::Con, MsgCode::GET);
        msg.msg_id = 0x1234;
        msg.token = Token(0xAB);
        msg.options.insert_str(option::URI_PATH, "a");

        assert_eq!(
            msg.encode().unwrap(),
            vec![0x44, 0x01, 0x12, 0x34, 0xAB, 0xB1, 0x61]
        );
    }

    #[test]
    fn encode_get_zero_token() {
        let mut msg = Message::new(MsgType::Con, MsgCode::GET);
        msg.msg_id = 0x0001;

        assert_eq!(msg.encode().unwrap(), vec![0x40, 0x01, 0x00, 0x01]);
    }

    #[test]
    fn encode_empty_ack() {
        assert_eq!(
            Message::ack_for(0x7F7F).encode().unwrap(),
            vec![0x60, 0x00, 0x7F, 0x7F]
        );
    }

    #[test]
    fn encode_empty_reset() {
        assert_eq!(
            Message::reset_for(0x0005).encode().unwrap(),
            vec![0x70, 0x00, 0x00, 0x05]
        );
    }

    #[test]
    fn encode_query_uses_extension_nibble() {
        let mut msg = Message::new(MsgType::Con, MsgCode::GET);
        msg.msg_id = 0x0001;
        msg.options.insert_str(option::URI_QUERY, "x");

        assert_eq!(
            msg.encode().unwrap(),
            vec![0x40, 0x01, 0x00, 0x01, 0xD1, 0x02, 0x78]
        );
    }

    #[test]
    fn repeated_option_roundtrip() {
        let mut msg = Message::new(MsgType::Con, MsgCode::GET);
        msg.msg_id = 0x0001;
        msg.options.insert_str(option::URI_PATH, "a");
        msg.options.insert_str(option::URI_PATH, "b");

        let wire = msg.encode().unwrap();
        // Two records: delta 11 then delta 0.
        assert_eq!(wire[4..], [0xB1, 0x61, 0x01, 0x62]);

        let decoded = Message::decode(&wire).unwrap();
        assert_eq!(
            decoded.options.get(option::URI_PATH),
            &[b"a".to_vec(), b"b".to_vec()]
        );
        assert_eq!(decoded, msg);
    }

    #[test]
    fn roundtrip_with_everything() {
        let mut msg = Message::new(MsgType::Non, MsgCode::CONTENT);
        msg.msg_id = 0xBEEF;
        msg.token = Token(0xDEAD_BEEF);
        msg.options.insert_uint(option::OBSERVE, 7);
        msg.options.insert_str(option::URI_PATH, "sensors");
        msg.options.insert_str(option::URI_PATH, "temp");
        msg.options.insert_uint(option::MAX_AGE, 120);
        msg.options.insert(OptionNumber(2049), vec![1, 2, 3]);
        msg.payload = b"22.5".to_vec();

        let decoded = Message::decode(&msg.encode().unwrap()).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn decode_rejects_garbage() {
        // Too short.
        assert_eq!(Message::decode(&[0x40, 0x01, 0x00]), Err(Error::ParseFailure));
        // Version 0 and version 2.
        assert_eq!(
            Message::decode(&[0x00, 0x01, 0x00, 0x01]),
            Err(Error::ParseFailure)
        );
        assert_eq!(
            Message::decode(&[0x80, 0x01, 0x00, 0x01]),
            Err(Error::ParseFailure)
        );
        // Token length 9.
        assert_eq!(
            Message::decode(&[0x49, 0x01, 0x00, 0x01, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
            Err(Error::ParseFailure)
        );
        // Token bytes missing.
        assert_eq!(
            Message::decode(&[0x42, 0x01, 0x00, 0x01, 0xAA]),
            Err(Error::ParseFailure)
        );
        // Reserved option nibble.
        assert_eq!(
            Message::decode(&[0x40, 0x01, 0x00, 0x01, 0xF0]),
            Err(Error::ParseFailure)
        );
    }

    #[test]
    fn decode_accepts_unknown_code_and_options() {
        // Code 1.02 is unassigned; option 2049 is unknown and critical.
        let mut msg = Message::new(MsgType::Non, MsgCode::new(1, 2));
        msg.msg_id = 1;
        msg.options.insert(OptionNumber(2049), b"?".to_vec());

        let decoded = Message::decode(&msg.encode().unwrap()).unwrap();
        assert_eq!(decoded.code, MsgCode::new(1, 2));
        assert_eq!(decoded.options.first(OptionNumber(2049)), Some(&b"?"[..]));
    }

    #[test]
    fn stray_payload_marker_tolerated() {
        let decoded = Message::decode(&[0x40, 0x01, 0x00, 0x01, 0xFF]).unwrap();
        assert!(decoded.payload.is_empty());
    }

    #[test]
    fn oversize_raw_token_rejected() {
        let mut buffer = Vec::new();
        assert_eq!(
            write_header(&mut buffer, MsgType::Con, MsgCode::GET, 1, &[0u8; 9]),
            Err(Error::TokenTooLong)
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn observe_registration_predicate() {
        let mut msg = Message::new(MsgType::Con, MsgCode::GET);
        assert!(!msg.is_observe_registration());

        msg.options.insert_uint(option::OBSERVE, 0);
        assert!(msg.is_observe_registration());

        let mut deregister = Message::new(MsgType::Con, MsgCode::GET);
        deregister.options.insert_uint(option::OBSERVE, 1);
        assert!(!deregister.is_observe_registration());
    }

    #[test]
    fn freshness_window() {
        let mut msg = Message::new(MsgType::Ack, MsgCode::CONTENT);
        let received = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);

        // Default max-age is 60 seconds.
        assert!(msg.is_fresh(received, received + Duration::from_secs(60)));
        assert!(!msg.is_fresh(received, received + Duration::from_secs(61)));

        msg.options.insert_uint(option::MAX_AGE, 5);
        assert!(msg.is_fresh(received, received + Duration::from_secs(5)));
        assert!(!msg.is_fresh(received, received + Duration::from_secs(6)));
    }

    #[test]
    fn cache_key_ignores_no_cache_key_options() {
        let mut a = Message::new(MsgType::Con, MsgCode::GET);
        a.options.insert_str(option::URI_PATH, "a");
        a.options.insert_uint(option::SIZE1, 100);

        let mut b = Message::new(MsgType::Con, MsgCode::GET);
        b.msg_id = 99;
        b.token = Token(7);
        b.options.insert_str(option::URI_PATH, "a");
        b.options.insert_uint(option::SIZE1, 2_000);

        // Size1 is no-cache-key and the identity fields don't participate.
        assert_eq!(a.cache_key(), b.cache_key());

        let mut c = Message::new(MsgType::Con, MsgCode::GET);
        c.options.insert_str(option::URI_PATH, "other");
        assert_ne!(a.cache_key(), c.cache_key());

        let mut d = Message::new(MsgType::Con, MsgCode::POST);
        d.options.insert_str(option::URI_PATH, "a");
        assert_ne!(a.cache_key(), d.cache_key());
    }
}
