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

/// Type for errors encountered while encoding or decoding CoAP messages.
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub enum Error {
    /// One or more of the supplied arguments are not valid for the given
    /// operation.
    InvalidArgument,

    /// A token longer than the eight bytes the header can describe.
    TokenTooLong,

    /// An error was encountered while attempting to parse the data.
    ParseFailure,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidArgument => f.write_str("invalid argument"),
            Error::TokenTooLong => f.write_str("token longer than eight bytes"),
            Error::ParseFailure => f.write_str("malformed CoAP datagram"),
        }
    }
}

impl std::error::Error for Error {}
