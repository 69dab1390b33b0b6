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

use super::OptionFormat;

/// Type representing a CoAP option number.
#[derive(Copy, Eq, PartialEq, Hash, Clone, Ord, PartialOrd)]
pub struct OptionNumber(pub u16);

impl OptionNumber {
    /// IF_MATCH option.
    pub const IF_MATCH: OptionNumber = OptionNumber(1);

    /// URI_HOST option.
    pub const URI_HOST: OptionNumber = OptionNumber(3);

    /// ETAG option.
    pub const ETAG: OptionNumber = OptionNumber(4);

    /// IF_NONE_MATCH option.
    pub const IF_NONE_MATCH: OptionNumber = OptionNumber(5);

    /// OBSERVE option.
    pub const OBSERVE: OptionNumber = OptionNumber(6);

    /// URI_PORT option.
    pub const URI_PORT: OptionNumber = OptionNumber(7);

    /// LOCATION_PATH option.
    pub const LOCATION_PATH: OptionNumber = OptionNumber(8);

    /// URI_PATH option.
    pub const URI_PATH: OptionNumber = OptionNumber(11);

    /// CONTENT_FORMAT option.
    pub const CONTENT_FORMAT: OptionNumber = OptionNumber(12);

    /// MAX_AGE option.
    pub const MAX_AGE: OptionNumber = OptionNumber(14);

    /// URI_QUERY option.
    pub const URI_QUERY: OptionNumber = OptionNumber(15);

    /// ACCEPT option.
    pub const ACCEPT: OptionNumber = OptionNumber(17);

    /// LOCATION_QUERY option.
    pub const LOCATION_QUERY: OptionNumber = OptionNumber(20);

    /// BLOCK2 option.
    pub const BLOCK2: OptionNumber = OptionNumber(23);

    /// BLOCK1 option.
    pub const BLOCK1: OptionNumber = OptionNumber(27);

    /// SIZE2 option.
    pub const SIZE2: OptionNumber = OptionNumber(28);

    /// PROXY_URI option.
    pub const PROXY_URI: OptionNumber = OptionNumber(35);

    /// PROXY_SCHEME option.
    pub const PROXY_SCHEME: OptionNumber = OptionNumber(39);

    /// SIZE1 option.
    pub const SIZE1: OptionNumber = OptionNumber(60);

    /// NO_RESPONSE option (RFC 7967).
    pub const NO_RESPONSE: OptionNumber = OptionNumber(258);

    /// Returns true if this option number is critical, false if it is
    /// elective. A receiver that cannot process a critical option must reject
    /// the message; that reaction belongs to layers above the codec.
    pub fn is_critical(self) -> bool {
        const FLAG_CRITICAL: u16 = 1;
        self.0 & FLAG_CRITICAL == FLAG_CRITICAL
    }

    /// Returns true if this option is "un-safe" to forward through a proxy
    /// that does not understand it.
    pub fn is_un_safe(self) -> bool {
        const FLAG_UN_SAFE: u16 = 2;
        self.0 & FLAG_UN_SAFE == FLAG_UN_SAFE
    }

    /// Returns true if this option is a "no-cache-key" option, excluded from
    /// response cache lookup.
    pub fn is_no_cache_key(self) -> bool {
        const FLAG_NO_CACHE_KEY_MASK: u16 = 0x1e;
        const FLAG_NO_CACHE_KEY_MAGIC: u16 = 0x1c;
        self.0 & FLAG_NO_CACHE_KEY_MASK == FLAG_NO_CACHE_KEY_MAGIC
    }

    /// Returns the value format for this option number. Unrecognized numbers
    /// are treated as opaque.
    pub fn value_format(self) -> OptionFormat {
        match self {
            OptionNumber::IF_MATCH => OptionFormat::Opaque,
            OptionNumber::URI_HOST => OptionFormat::String,
            OptionNumber::ETAG => OptionFormat::Opaque,
            OptionNumber::IF_NONE_MATCH => OptionFormat::Empty,
            OptionNumber::OBSERVE => OptionFormat::UInt,
            OptionNumber::URI_PORT => OptionFormat::UInt,
            OptionNumber::LOCATION_PATH => OptionFormat::String,
            OptionNumber::URI_PATH => OptionFormat::String,
            OptionNumber::CONTENT_FORMAT => OptionFormat::UInt,
            OptionNumber::MAX_AGE => OptionFormat::UInt,
            OptionNumber::URI_QUERY => OptionFormat::String,
            OptionNumber::ACCEPT => OptionFormat::UInt,
            OptionNumber::LOCATION_QUERY => OptionFormat::String,
            OptionNumber::BLOCK2 => OptionFormat::UInt,
            OptionNumber::BLOCK1 => OptionFormat::UInt,
            OptionNumber::SIZE2 => OptionFormat::UInt,
            OptionNumber::PROXY_URI => OptionFormat::String,
            OptionNumber::PROXY_SCHEME => OptionFormat::String,
            OptionNumber::SIZE1 => OptionFormat::UInt,
            OptionNumber::NO_RESPONSE => OptionFormat::UInt,
            OptionNumber(_) => OptionFormat::Opaque,
        }
    }

    /// Returns true if multiple instances of this option are allowed, false
    /// if only one instance is allowed.
    pub fn is_repeatable(self) -> bool {
        matches!(
            self,
            OptionNumber::IF_MATCH
                | OptionNumber::ETAG
                | OptionNumber::LOCATION_PATH
                | OptionNumber::URI_PATH
                | OptionNumber::URI_QUERY
                | OptionNumber::LOCATION_QUERY
        )
    }

    /// Attempts to return a `Some(&'static str)` containing the name of the
    /// option.
    ///
    /// If the option number isn't recognized, this method returns `None`.
    pub fn static_name(self) -> Option<&'static str> {
        match self {
            OptionNumber::IF_MATCH => Some("If-Match"),
            OptionNumber::URI_HOST => Some("Uri-Host"),
            OptionNumber::ETAG => Some("ETag"),
            OptionNumber::IF_NONE_MATCH => Some("If-None-Match"),
            OptionNumber::OBSERVE => Some("Observe"),
            OptionNumber::URI_PORT => Some("Uri-Port"),
            OptionNumber::LOCATION_PATH => Some("Location-Path"),
            OptionNumber::URI_PATH => Some("Uri-Path"),
            OptionNumber::CONTENT_FORMAT => Some("Content-Format"),
            OptionNumber::MAX_AGE => Some("Max-Age"),
            OptionNumber::URI_QUERY => Some("Uri-Query"),
            OptionNumber::ACCEPT => Some("Accept"),
            OptionNumber::LOCATION_QUERY => Some("Location-Query"),
            OptionNumber::BLOCK2 => Some("Block2"),
            OptionNumber::BLOCK1 => Some("Block1"),
            OptionNumber::SIZE2 => Some("Size2"),
            OptionNumber::PROXY_URI => Some("Proxy-Uri"),
            OptionNumber::PROXY_SCHEME => Some("Proxy-Scheme"),
            OptionNumber::SIZE1 => Some("Size1"),
            OptionNumber::NO_RESPONSE => Some("No-Response"),
            _ => None,
        }
    }
}

impl core::fmt::Display for OptionNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if let Some(name) = self.static_name() {
            f.write_str(name)
        } else {
            // Write out a descriptive identifier.
            if self.is_critical() {
                f.write_str("Crit-")?;
            } else {
                f.write_str("Opt-")?;
            }

            if self.is_un_safe() {
                f.write_str("UnSafe-")?;
            }

            if self.is_no_cache_key() {
                f.write_str("NoCacheKey-")?;
            }

            write!(f, "{}", self.0)
        }
    }
}

impl core::fmt::Debug for OptionNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}({})", self.0, self)
    }
}

impl From<u16> for OptionNumber {
    fn from(number: u16) -> Self {
        OptionNumber(number)
    }
}

impl Default for OptionNumber {
    fn default() -> Self {
        OptionNumber(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semantic_bits() {
        assert!(OptionNumber::IF_MATCH.is_critical());
        assert!(!OptionNumber::ETAG.is_critical());
        assert!(OptionNumber::URI_HOST.is_un_safe());
        assert!(!OptionNumber::ETAG.is_un_safe());

        // Size1 (60) and Size2 (28) match the 0x1C no-cache-key pattern.
        assert!(OptionNumber::SIZE1.is_no_cache_key());
        assert!(OptionNumber::SIZE2.is_no_cache_key());
        assert!(!OptionNumber::URI_PATH.is_no_cache_key());
        assert!(!OptionNumber::MAX_AGE.is_no_cache_key());
    }

    #[test]
    fn repeatable_set() {
        let repeatable = [1u16, 4, 8, 11, 15, 20];
        for n in 0..64u16 {
            assert_eq!(
                OptionNumber(n).is_repeatable(),
                repeatable.contains(&n),
                "option {}",
                n
            );
        }
        assert!(!OptionNumber::NO_RESPONSE.is_repeatable());
    }

    #[test]
    fn no_response_is_registered() {
        assert_eq!(OptionNumber::NO_RESPONSE.0, 258);
        assert_eq!(OptionNumber::NO_RESPONSE.static_name(), Some("No-Response"));
        assert_eq!(
            OptionNumber::NO_RESPONSE.value_format(),
            crate::option::OptionFormat::UInt
        );
    }

    #[test]
    fn unknown_numbers_display_their_bits() {
        assert_eq!(OptionNumber(65).to_string(), "Crit-65");
        assert_eq!(OptionNumber(64).to_string(), "Opt-64");
        assert_eq!(OptionNumber(0x1C).to_string(), "Size2");
        assert_eq!(OptionNumber(0x9C).to_string(), "Opt-NoCacheKey-156");
    }
}
