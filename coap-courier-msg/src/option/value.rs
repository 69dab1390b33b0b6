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

use super::OptionNumber;
use crate::uint::try_decode_uint;

/// Type describing the wire format of an option's value.
#[derive(Debug, Copy, Eq, PartialEq, Hash, Clone)]
pub enum OptionFormat {
    /// The value is determined by the presence or absence of the option.
    Empty,

    /// Opaque byte-string value.
    Opaque,

    /// Minimum-length big-endian unsigned integer value.
    UInt,

    /// UTF-8 string value.
    String,
}

impl OptionNumber {
    /// Writes the name of this option along with a textual rendering of the
    /// given value, following the option's registered format.
    pub fn fmt_with_value(
        self,
        f: &mut std::fmt::Formatter<'_>,
        value: &[u8],
    ) -> std::fmt::Result {
        write!(f, "{}", self)?;
        match self.value_format() {
            OptionFormat::Empty => Ok(()),
            OptionFormat::Opaque => {
                if !value.is_empty() {
                    f.write_str(":")?;
                    for b in value {
                        write!(f, "{:02X}", b)?;
                    }
                }
                Ok(())
            }
            OptionFormat::UInt => match try_decode_uint(value) {
                Some(i) => write!(f, ":{}", i),
                None => f.write_str(":ERR"),
            },
            OptionFormat::String => match std::str::from_utf8(value) {
                Ok(s) => write!(f, ":{:?}", s),
                Err(_) => f.write_str(":ERR"),
            },
        }
    }
}
