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

/// Type representing a CoAP message code: a `(class, detail)` pair packed
/// into one byte as `(class << 5) | detail`.
///
/// Comparison is structural, so codes this library has no name for still
/// round-trip through the codec untouched.
#[derive(Copy, Eq, PartialEq, Hash, Clone, Ord, PartialOrd, Default)]
pub struct MsgCode(pub u8);

impl MsgCode {
    /// Empty message code. Only used for ping requests, resets, and empty
    /// acknowledgements.
    pub const EMPTY: MsgCode = MsgCode::new(0, 0);

    /// CoAP GET method.
    pub const GET: MsgCode = MsgCode::new(0, 1);

    /// CoAP POST method.
    pub const POST: MsgCode = MsgCode::new(0, 2);

    /// CoAP PUT method.
    pub const PUT: MsgCode = MsgCode::new(0, 3);

    /// CoAP DELETE method.
    pub const DELETE: MsgCode = MsgCode::new(0, 4);

    /// CoAP CREATED success code.
    pub const CREATED: MsgCode = MsgCode::new(2, 1);

    /// CoAP DELETED success code.
    pub const DELETED: MsgCode = MsgCode::new(2, 2);

    /// CoAP VALID success code.
    pub const VALID: MsgCode = MsgCode::new(2, 3);

    /// CoAP CHANGED success code.
    pub const CHANGED: MsgCode = MsgCode::new(2, 4);

    /// CoAP CONTENT success code.
    pub const CONTENT: MsgCode = MsgCode::new(2, 5);

    /// CoAP BAD_REQUEST client error.
    pub const BAD_REQUEST: MsgCode = MsgCode::new(4, 0);

    /// CoAP UNAUTHORIZED client error.
    pub const UNAUTHORIZED: MsgCode = MsgCode::new(4, 1);

    /// CoAP BAD_OPTION client error.
    pub const BAD_OPTION: MsgCode = MsgCode::new(4, 2);

    /// CoAP FORBIDDEN client error.
    pub const FORBIDDEN: MsgCode = MsgCode::new(4, 3);

    /// CoAP NOT_FOUND client error.
    pub const NOT_FOUND: MsgCode = MsgCode::new(4, 4);

    /// CoAP METHOD_NOT_ALLOWED client error.
    pub const METHOD_NOT_ALLOWED: MsgCode = MsgCode::new(4, 5);

    /// CoAP NOT_ACCEPTABLE client error.
    pub const NOT_ACCEPTABLE: MsgCode = MsgCode::new(4, 6);

    /// CoAP PRECONDITION_FAILED client error.
    pub const PRECONDITION_FAILED: MsgCode = MsgCode::new(4, 12);

    /// CoAP REQUEST_ENTITY_TOO_LARGE client error.
    pub const REQUEST_ENTITY_TOO_LARGE: MsgCode = MsgCode::new(4, 13);

    /// CoAP UNSUPPORTED_CONTENT_FORMAT client error.
    pub const UNSUPPORTED_CONTENT_FORMAT: MsgCode = MsgCode::new(4, 15);

    /// CoAP INTERNAL_SERVER_ERROR server error.
    pub const INTERNAL_SERVER_ERROR: MsgCode = MsgCode::new(5, 0);

    /// CoAP NOT_IMPLEMENTED server error.
    pub const NOT_IMPLEMENTED: MsgCode = MsgCode::new(5, 1);

    /// CoAP BAD_GATEWAY server error.
    pub const BAD_GATEWAY: MsgCode = MsgCode::new(5, 2);

    /// CoAP SERVICE_UNAVAILABLE server error.
    pub const SERVICE_UNAVAILABLE: MsgCode = MsgCode::new(5, 3);

    /// CoAP GATEWAY_TIMEOUT server error.
    pub const GATEWAY_TIMEOUT: MsgCode = MsgCode::new(5, 4);

    /// CoAP PROXYING_NOT_SUPPORTED server error.
    pub const PROXYING_NOT_SUPPORTED: MsgCode = MsgCode::new(5, 5);

    /// Packs a class (0–7) and detail (0–31) into a message code.
    pub const fn new(class: u8, detail: u8) -> MsgCode {
        MsgCode(((class & 0x7) << 5) | (detail & 0x1F))
    }

    /// Returns the class of this code, the `c` in `c.dd`.
    pub const fn class(self) -> u8 {
        self.0 >> 5
    }

    /// Returns the detail of this code, the `dd` in `c.dd`.
    pub const fn detail(self) -> u8 {
        self.0 & 0x1F
    }

    /// Returns true if this is the empty code (0.00).
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if this code is a request method (class 0, detail > 0).
    pub fn is_method(self) -> bool {
        self.class() == 0 && !self.is_empty()
    }

    /// Returns true if this code indicates success (class 2).
    pub fn is_success(self) -> bool {
        self.class() == 2
    }

    /// Returns true if this code is a client error (class 4).
    pub fn is_client_error(self) -> bool {
        self.class() == 4
    }

    /// Returns true if this code is a server error (class 5).
    pub fn is_server_error(self) -> bool {
        self.class() == 5
    }

    /// Returns true if this code is any sort of error.
    pub fn is_error(self) -> bool {
        self.is_client_error() || self.is_server_error()
    }

    /// Attempts to return the conventional name of this code.
    ///
    /// If the code isn't recognized, this method returns `None`.
    pub fn static_name(self) -> Option<&'static str> {
        match self {
            MsgCode::EMPTY => Some("Empty"),
            MsgCode::GET => Some("GET"),
            MsgCode::POST => Some("POST"),
            MsgCode::PUT => Some("PUT"),
            MsgCode::DELETE => Some("DELETE"),
            MsgCode::CREATED => Some("Created"),
            MsgCode::DELETED => Some("Deleted"),
            MsgCode::VALID => Some("Valid"),
            MsgCode::CHANGED => Some("Changed"),
            MsgCode::CONTENT => Some("Content"),
            MsgCode::BAD_REQUEST => Some("Bad Request"),
            MsgCode::UNAUTHORIZED => Some("Unauthorized"),
            MsgCode::BAD_OPTION => Some("Bad Option"),
            MsgCode::FORBIDDEN => Some("Forbidden"),
            MsgCode::NOT_FOUND => Some("Not Found"),
            MsgCode::METHOD_NOT_ALLOWED => Some("Method Not Allowed"),
            MsgCode::NOT_ACCEPTABLE => Some("Not Acceptable"),
            MsgCode::PRECONDITION_FAILED => Some("Precondition Failed"),
            MsgCode::REQUEST_ENTITY_TOO_LARGE => Some("Request Entity Too Large"),
            MsgCode::UNSUPPORTED_CONTENT_FORMAT => Some("Unsupported Content-Format"),
            MsgCode::INTERNAL_SERVER_ERROR => Some("Internal Server Error"),
            MsgCode::NOT_IMPLEMENTED => Some("Not Implemented"),
            MsgCode::BAD_GATEWAY => Some("Bad Gateway"),
            MsgCode::SERVICE_UNAVAILABLE => Some("Service Unavailable"),
            MsgCode::GATEWAY_TIMEOUT => Some("Gateway Timeout"),
            MsgCode::PROXYING_NOT_SUPPORTED => Some("Proxying Not Supported"),
            _ => None,
        }
    }
}

impl core::fmt::Display for MsgCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.class(), self.detail())
    }
}

impl core::fmt::Debug for MsgCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.static_name() {
            Some(name) => write!(f, "{}({})", self, name),
            None => write!(f, "{}", self),
        }
    }
}

impl From<MsgCode> for u8 {
    fn from(code: MsgCode) -> Self {
        code.0
    }
}

impl From<u8> for MsgCode {
    fn from(byte: u8) -> Self {
        MsgCode(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packing() {
        assert_eq!(MsgCode::GET.0, 0x01);
        assert_eq!(MsgCode::POST.0, 0x02);
        assert_eq!(MsgCode::PUT.0, 0x03);
        assert_eq!(MsgCode::CONTENT.0, 0x45);
        assert_eq!(MsgCode::NOT_FOUND.0, 0x84);
        assert_eq!(MsgCode::GATEWAY_TIMEOUT.0, 0xA4);
    }

    #[test]
    fn class_detail() {
        assert_eq!(MsgCode::CONTENT.class(), 2);
        assert_eq!(MsgCode::CONTENT.detail(), 5);
        assert_eq!(MsgCode::new(7, 31).0, 0xFF);
    }

    #[test]
    fn predicates() {
        assert!(MsgCode::EMPTY.is_empty());
        assert!(MsgCode::GET.is_method());
        assert!(!MsgCode::EMPTY.is_method());
        assert!(MsgCode::CONTENT.is_success());
        assert!(MsgCode::NOT_FOUND.is_client_error());
        assert!(MsgCode::BAD_GATEWAY.is_server_error());
        assert!(MsgCode::NOT_FOUND.is_error());
        assert!(!MsgCode::CONTENT.is_error());
    }

    #[test]
    fn dotted_display() {
        assert_eq!(MsgCode::GET.to_string(), "0.01");
        assert_eq!(MsgCode::CONTENT.to_string(), "2.05");
        assert_eq!(MsgCode::NOT_FOUND.to_string(), "4.04");
    }
}
