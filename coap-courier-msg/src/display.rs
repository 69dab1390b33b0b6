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

/// Helper for printing out a raw CoAP datagram as hex bytes, used when
/// logging traffic.
///
/// ```
/// use coap_courier_msg::CoapByteDisplay;
///
/// assert_eq!(
///     CoapByteDisplay(&[0x40, 0x01, 0x00, 0x01]).to_string(),
///     "40 01 00 01"
/// );
/// ```
#[derive(Debug)]
pub struct CoapByteDisplay<'a>(pub &'a [u8]);

impl<'a> std::fmt::Display for CoapByteDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}
