//! HTTP header processing module for parsing and serializing header blocks
//!
//! # Components
//!
//! - [`parse_headers`]: Parses a raw header block into normalized fields
//!   - Recognizes the request line or status line on the first line
//!   - Accumulates repeated header names into sequences
//!   - Skips malformed lines instead of failing
//!
//! - [`parse_cookies`]: Reads the leading `name=value` pair of a cookie value
//!
//! - [`headers_string`], [`headers_raw`], [`cookies_string`]: Render fields and cookies as
//!   wire text
//!
//! - [`HeaderEncoder`]: Writes an outbound request's header block into a buffer

mod cookie_decoder;
mod header_decoder;
mod header_encoder;

pub use cookie_decoder::parse_cookies;
pub use header_decoder::{parse_header_lines, parse_headers};
pub use header_encoder::{cookies_string, headers_raw, headers_string, HeaderEncoder};
pub(crate) use header_encoder::header_lines;
