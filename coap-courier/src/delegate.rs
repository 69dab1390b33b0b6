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

use crate::{Endpoint, TransportError};

/// Callback interface through which the transport hands inbound traffic and
/// failures back to its host.
///
/// A delegate is registered per outstanding transaction — passed alongside a
/// token to [`send`][crate::CoapTransport::send] and indexed by
/// `(token, endpoint)` — and stays registered until it is retired by an
/// acknowledgement (for one-shot exchanges), cancelled explicitly, or its
/// connection goes away.
///
/// Callbacks are invoked outside the transport's internal lock, from the
/// transport's own tasks; implementations should hand heavy work off rather
/// than block. Where a delegate-style API would offer a second
/// `host + port` convenience callback, build the [`Endpoint`] instead with
/// [`Endpoint::udp`] — there is exactly one required receive path.
pub trait TransportDelegate: Send + Sync {
    /// One datagram arrived for this delegate's transaction. `raw` is the
    /// undecoded wire form; parse it with
    /// [`Message::decode`][coap_courier_msg::Message::decode] as needed.
    fn did_receive(&self, raw: &[u8], endpoint: &Endpoint);

    /// The transaction or its connection failed; see [`TransportError`] for
    /// the taxonomy and what the transport did about it.
    fn did_fail(&self, error: &TransportError);
}
