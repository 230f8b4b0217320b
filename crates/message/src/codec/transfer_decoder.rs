//! Decoder for the raw output of a completed transfer.
//!
//! The transport hands over everything it received: the status line and headers, a blank line,
//! then the body. When the transfer was configured to leave headers out, the output is only the
//! body. [`split_transfer_output`] separates the two parts and [`TransferDecoder`] turns them
//! into a [`Response`].

use bytes::{Bytes, BytesMut};
use tokio_util::codec::Decoder;
use tracing::{debug, trace};

use crate::protocol::{HEADER_BODY_SEPARATOR, MessageError, Response};

/// Splits raw transfer output at the first CRLFCRLF into `(header block, body)`.
///
/// Output without headers yields an empty header block and the whole input as body. Output
/// without a separator is all header block, with an empty body.
pub fn split_transfer_output(output: Bytes, includes_headers: bool) -> (Bytes, Bytes) {
    if !includes_headers {
        return (Bytes::new(), output);
    }

    match output.windows(HEADER_BODY_SEPARATOR.len()).position(|window| window == HEADER_BODY_SEPARATOR) {
        Some(offset) => (output.slice(..offset), output.slice(offset + HEADER_BODY_SEPARATOR.len()..)),
        None => {
            trace!(size = output.len(), "transfer output has no header/body separator");
            (output, Bytes::new())
        }
    }
}

/// Builds a [`Response`] from complete raw transfer output.
pub fn decode_response(output: Bytes, includes_headers: bool) -> Response {
    let (header_block, body) = split_transfer_output(output, includes_headers);
    let response = Response::from_wire(&String::from_utf8_lossy(&header_block), body);
    debug!(status = response.status_code(), header_size = header_block.len(), "decoded transfer output");
    response
}

/// Decoder that yields one [`Response`] per transfer.
///
/// The body has no framing of its own at this level: the transport already collected it, so
/// nothing is produced until the input ends. [`Decoder::decode_eof`] then consumes the whole
/// buffer. An empty buffer yields no response.
#[derive(Debug, Clone, Copy)]
pub struct TransferDecoder {
    includes_headers: bool,
}

impl TransferDecoder {
    pub fn new(includes_headers: bool) -> Self {
        Self { includes_headers }
    }
}

impl Default for TransferDecoder {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Decoder for TransferDecoder {
    type Item = Response;
    type Error = MessageError;

    fn decode(&mut self, _src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Ok(None)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }
        Ok(Some(decode_response(src.split().freeze(), self.includes_headers)))
    }
}
