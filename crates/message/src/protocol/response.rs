//! The inbound response message.
//!
//! A response has no fields of its own: its status lives in the synthetic `_status*` header
//! keys written by the parser. Status codes are looked up in the [`http::StatusCode`] table.

use std::fmt;

use bytes::Bytes;
use http::StatusCode;

use crate::codec::{parse_cookies, parse_headers};
use crate::protocol::fields::{STATUS_KEY, STATUS_TEXT_KEY};
use crate::protocol::{HttpMessage, MessageKind, MessageParts};

/// An HTTP response as structured data.
#[derive(Debug, Clone)]
pub struct Response {
    parts: MessageParts,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    pub fn new() -> Self {
        Self { parts: MessageParts::new(MessageKind::Response) }
    }

    /// Builds a response from a received header block and body.
    ///
    /// Every `Set-Cookie` value contributes its leading `name=value` pair to the cookie
    /// mapping, in the order the headers arrived.
    pub fn from_wire(header_block: &str, body: Bytes) -> Self {
        let mut response = Response::new();
        let headers = parse_headers(header_block, MessageKind::Response);

        if let Some(set_cookie) = headers.get("set_cookie") {
            for value in set_cookie.iter() {
                response.parts.cookies.extend(parse_cookies(value));
            }
        }

        response.parts.headers = headers;
        response.parts.body = Some(body);
        response
    }

    /// `"<code> <text>"`, present only when a status line was parsed.
    pub fn status(&self) -> Option<&str> {
        self.headers().get_str(STATUS_KEY)
    }

    /// The status code, or `0` when no status line was parsed.
    pub fn status_code(&self) -> u16 {
        self.headers().status_code().unwrap_or(0)
    }

    /// The title-cased reason phrase, or `""` when no status line was parsed.
    pub fn status_text(&self) -> &str {
        self.header_or(STATUS_TEXT_KEY, "")
    }

    /// The parsed code as a typed [`StatusCode`].
    pub fn status_kind(&self) -> Option<StatusCode> {
        StatusCode::from_u16(self.status_code()).ok()
    }
}

impl HttpMessage for Response {
    fn parts(&self) -> &MessageParts {
        &self.parts
    }

    fn parts_mut(&mut self) -> &mut MessageParts {
        &mut self.parts
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.to_raw()))
    }
}
