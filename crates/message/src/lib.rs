//! A micro HTTP message model
//!
//! This crate represents an HTTP request or response as structured data and converts between
//! that structured form and raw wire text. It does no I/O: a transport (a curl handle, a socket
//! loop, a test double) hands it the raw bytes of a completed transfer and asks it for the
//! header text of the next request.
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use micro_message::exchange::{Exchange, TransferInfo};
//! use micro_message::protocol::{HttpMessage, Params};
//!
//! let mut exchange = Exchange::from_notation("post >> example.com/login").unwrap();
//! exchange.request_mut().set_header("Accept", "text/html").unwrap();
//! exchange.request_mut().set_cookie("session", "abc").unwrap();
//!
//! let outbound = exchange.post("user=kerem", Params::new()).unwrap();
//! assert_eq!(outbound.url, "http://example.com/login");
//! assert!(outbound.header_lines.contains(&"Cookie: session=abc".to_owned()));
//!
//! // ... the transport performs the transfer ...
//!
//! let output = Bytes::from_static(b"HTTP/1.1 302 found\r\nLocation: /home\r\nSet-Cookie: id=7; Path=/\r\n\r\n");
//! let response = exchange.complete(output, &TransferInfo::default());
//!
//! assert_eq!(response.status(), Some("302 Found"));
//! assert_eq!(response.status_code(), 302);
//! assert_eq!(response.header_or("location", ""), "/home");
//! assert_eq!(response.cookie("id"), Some("7"));
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`protocol`]: The message entity: [`protocol::Request`], [`protocol::Response`] and the
//!   shared [`protocol::HttpMessage`] accessors
//! - [`codec`]: Key normalization, header/cookie parsing, serialization and the
//!   `tokio-util` codec adapters
//! - [`exchange`]: Pairs one outbound request with one inbound response for a transport
//!
//! # Header keys
//!
//! Header names are stored normalized: lower case, with runs of whitespace and dashes turned
//! into `_` (`Content-Type` is stored as `content_type`). Lookups accept any spelling. The
//! dash form is produced only when headers are written out.
//!
//! Parsed responses carry their status line in synthetic keys that never reach the wire:
//! `_` (raw line), `_status`, `_status_code` and `_status_text`.
//!
//! # Error Handling
//!
//! Parsing never fails; malformed lines are skipped. Misuse is reported through
//! [`protocol::MessageError`]: setting a reserved `_` header, an invalid method, unknown
//! options, or serializing a request without a URI.

pub mod codec;
pub mod exchange;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
