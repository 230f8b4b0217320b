//! Header block serializer.
//!
//! Renders [`Fields`] and [`Cookies`] back into wire text. Stored snake keys are turned into
//! dash names here, and only here; synthetic `_` keys never reach the wire, except for the raw
//! start line in the diagnostic [`headers_raw`] form.
//!
//! [`HeaderEncoder`] writes an outbound request's header block into a [`BytesMut`] for a
//! transport that consumes raw bytes.

use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;
use tracing::trace;

use crate::codec::to_dash;
use crate::protocol::fields::START_LINE_KEY;
use crate::protocol::{Cookies, Fields, HttpMessage, MessageError, Request};

const CRLF: &str = "\r\n";
const COOKIE_SEPARATOR: &str = "; ";

/// Initial buffer size allocated for header serialization
const INIT_HEADER_SIZE: usize = 1024;

/// Yields `(dash name, value)` once per value; multi-values expand into repeated entries.
fn wire_fields(fields: &Fields) -> impl Iterator<Item = (String, &str)> {
    fields.wire().flat_map(|(key, value)| {
        let name = to_dash(key);
        value.iter().map(move |value| (name.clone(), value))
    })
}

/// `"<Name>: <value>"` lines of every wire header.
pub(crate) fn header_lines(fields: &Fields) -> impl Iterator<Item = String> {
    wire_fields(fields).map(|(name, value)| format!("{name}: {value}"))
}

/// Joins the wire header lines with CRLF.
pub fn headers_string(fields: &Fields) -> String {
    header_lines(fields).collect::<Vec<_>>().join(CRLF)
}

/// Like [`headers_string`], preceded by the raw request/status line when one was parsed.
pub fn headers_raw(fields: &Fields) -> String {
    let start_line = fields.get_str(START_LINE_KEY);
    start_line.map(str::to_owned).into_iter().chain(header_lines(fields)).collect::<Vec<_>>().join(CRLF)
}

/// Joins `name=value` pairs with `"; "` in insertion order.
pub fn cookies_string(cookies: &Cookies) -> String {
    cookies.iter().map(|(name, value)| format!("{name}={value}")).collect::<Vec<_>>().join(COOKIE_SEPARATOR)
}

/// Encoder for the header block of an outbound [`Request`].
///
/// Every wire header becomes a CRLF-terminated line, followed by a `Cookie` line when the
/// request carries cookies. The start line and the terminating blank line belong to the
/// transport and are not written.
#[derive(Debug, Default)]
pub struct HeaderEncoder;

impl Encoder<&Request> for HeaderEncoder {
    type Error = MessageError;

    fn encode(&mut self, item: &Request, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(INIT_HEADER_SIZE);

        let mut count = 0;
        for (name, value) in wire_fields(item.headers()) {
            dst.put_slice(name.as_bytes());
            dst.put_slice(b": ");
            dst.put_slice(value.as_bytes());
            dst.put_slice(CRLF.as_bytes());
            count += 1;
        }

        if !item.cookies().is_empty() {
            dst.put_slice(b"Cookie: ");
            dst.put_slice(item.cookies_string().as_bytes());
            dst.put_slice(CRLF.as_bytes());
        }

        trace!(header_lines = count, cookies = item.cookies().len(), "encoded request header block");
        Ok(())
    }
}
