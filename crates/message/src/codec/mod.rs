//! Conversion between raw wire text and the structured message model
//!
//! This module turns the bytes a transport received into [`Response`](crate::protocol::Response)s,
//! and renders the outbound [`Request`](crate::protocol::Request) back into header text.
//!
//! # Architecture
//!
//! - Key normalization ([`key`]): [`to_snake`] for storage, [`to_dash`] for the wire
//! - Header handling via the `header` module: parsing, serialization and [`HeaderEncoder`]
//! - Transfer output via [`TransferDecoder`]: splits headers from body and parses both
//!
//! # Example
//!
//! ```
//! use micro_message::codec::TransferDecoder;
//! use micro_message::protocol::HttpMessage;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = TransferDecoder::default();
//! let mut buffer = BytesMut::from(&b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nhello"[..]);
//! let response = decoder.decode_eof(&mut buffer).unwrap().unwrap();
//!
//! assert_eq!(response.status_code(), 200);
//! assert_eq!(response.header_or("content-type", ""), "text/plain");
//! ```

mod header;
pub mod key;
mod transfer_decoder;

pub use header::{
    cookies_string, headers_raw, headers_string, parse_cookies, parse_header_lines, parse_headers, HeaderEncoder,
};
pub(crate) use header::header_lines;
pub use key::{to_dash, to_snake};
pub use transfer_decoder::{decode_response, split_transfer_output, TransferDecoder};
