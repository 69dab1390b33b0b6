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

//! CoAP option numbers, formats, and semantic predicates.
//!
//! Options are the extensible attribute mechanism of RFC 7252 §5.10: each is
//! identified by a number that also carries its semantics in its low bits
//! (critical, unsafe-to-forward, no-cache-key). The registry here names the
//! numbers this library knows about; unrecognized numbers still pass through
//! the codec untouched.

mod num;
pub use num::OptionNumber;

mod value;
pub use value::OptionFormat;

/// IF_MATCH option.
pub const IF_MATCH: OptionNumber = OptionNumber::IF_MATCH;
/// URI_HOST option.
pub const URI_HOST: OptionNumber = OptionNumber::URI_HOST;
/// ETAG option.
pub const ETAG: OptionNumber = OptionNumber::ETAG;
/// IF_NONE_MATCH option.
pub const IF_NONE_MATCH: OptionNumber = OptionNumber::IF_NONE_MATCH;
/// OBSERVE option.
pub const OBSERVE: OptionNumber = OptionNumber::OBSERVE;
/// URI_PORT option.
pub const URI_PORT: OptionNumber = OptionNumber::URI_PORT;
/// LOCATION_PATH option.
pub const LOCATION_PATH: OptionNumber = OptionNumber::LOCATION_PATH;
/// URI_PATH option.
pub const URI_PATH: OptionNumber = OptionNumber::URI_PATH;
/// CONTENT_FORMAT option.
pub const CONTENT_FORMAT: OptionNumber = OptionNumber::CONTENT_FORMAT;
/// MAX_AGE option.
pub const MAX_AGE: OptionNumber = OptionNumber::MAX_AGE;
/// URI_QUERY option.
pub const URI_QUERY: OptionNumber = OptionNumber::URI_QUERY;
/// ACCEPT option.
pub const ACCEPT: OptionNumber = OptionNumber::ACCEPT;
/// LOCATION_QUERY option.
pub const LOCATION_QUERY: OptionNumber = OptionNumber::LOCATION_QUERY;
/// BLOCK2 option.
pub const BLOCK2: OptionNumber = OptionNumber::BLOCK2;
/// BLOCK1 option.
pub const BLOCK1: OptionNumber = OptionNumber::BLOCK1;
/// SIZE2 option.
pub const SIZE2: OptionNumber = OptionNumber::SIZE2;
/// PROXY_URI option.
pub const PROXY_URI: OptionNumber = OptionNumber::PROXY_URI;
/// PROXY_SCHEME option.
pub const PROXY_SCHEME: OptionNumber = OptionNumber::PROXY_SCHEME;
/// SIZE1 option.
pub const SIZE1: OptionNumber = OptionNumber::SIZE1;
/// NO_RESPONSE option.
pub const NO_RESPONSE: OptionNumber = OptionNumber::NO_RESPONSE;
