//! One request/response round trip, without the I/O.
//!
//! An [`Exchange`] owns a fresh outbound [`Request`] and the inbound [`Response`] parsed after
//! the transfer. It sits between the caller and the transport:
//!
//! 1. configure the request: [`Exchange::from_notation`], [`Exchange::with_options`], setters
//! 2. [`Exchange::prepare`] (or [`get`](Exchange::get), [`post`](Exchange::post), ...) produces
//!    the [`Outbound`] the transport sends
//! 3. [`Exchange::complete`] parses what the transport received
//!
//! ```
//! use bytes::Bytes;
//! use micro_message::exchange::{Exchange, TransferInfo};
//! use micro_message::protocol::{HttpMessage, Params};
//!
//! let mut exchange = Exchange::from_notation("get >> example.com/users").unwrap();
//! let outbound = exchange.get(Params::new()).unwrap();
//! assert_eq!(outbound.url, "http://example.com/users");
//!
//! let output = Bytes::from_static(b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n[]");
//! let response = exchange.complete(output, &TransferInfo::default());
//! assert_eq!(response.status(), Some("200 OK"));
//! ```

mod options;
mod transfer;

pub use options::{BodyOption, CallOptions, ExchangeOptions};
pub use transfer::{Outbound, TransferInfo, DEFAULT_USER_AGENT, EXPECT_DISABLED, METHOD_OVERRIDE_HEADER};

use bytes::Bytes;
use http::{header, Method};
use tracing::{debug, info};

use crate::codec::{decode_response, header_lines, parse_cookies, parse_headers};
use crate::protocol::{Body, HttpMessage, MessageError, MessageKind, Request, Response};
use crate::utils::is_word_char;

/// A request and the response it produced.
#[derive(Debug, Clone, Default)]
pub struct Exchange {
    request: Request,
    response: Response,
}

impl Exchange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an exchange from `"<method> <uri>"`, `"<method> >> <uri>"`, or a bare URI, which
    /// implies `GET`.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::InvalidArgument`] if the method is not a valid token.
    pub fn from_notation(notation: &str) -> Result<Self, MessageError> {
        let mut exchange = Exchange::new();
        match split_notation(notation.trim()) {
            Some((method, uri)) => {
                exchange.request.set_method(method)?.set_uri(uri);
            }
            None => {
                exchange.request.set_uri(notation);
            }
        }
        Ok(exchange)
    }

    /// Applies options in order: method, uri, uri params, headers, cookies, body.
    ///
    /// # Errors
    ///
    /// Fails on an invalid method, an invalid or reserved header, an invalid cookie or an
    /// unencodable body.
    pub fn with_options(mut self, options: ExchangeOptions) -> Result<Self, MessageError> {
        let request = &mut self.request;
        if let Some(method) = &options.method {
            request.set_method(method)?;
        }
        if let Some(uri) = &options.uri {
            request.set_uri(uri);
        }
        request.set_uri_params(options.uri_params);
        request.set_headers(options.headers)?;
        request.set_cookies(options.cookies)?;
        if let Some(body) = options.body {
            request.set_body(body)?;
        }
        Ok(self)
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn request_mut(&mut self) -> &mut Request {
        &mut self.request
    }

    pub fn response(&self) -> &Response {
        &self.response
    }

    pub fn into_parts(self) -> (Request, Response) {
        (self.request, self.response)
    }

    /// Serializes the request into what the transport sends.
    ///
    /// Header lines come in this order: `Expect:` (no interim `100 Continue`), a default
    /// `User-Agent` unless the request has one, `X-HTTP-Method-Override` for methods other than
    /// `GET` and `POST`, the request headers, then `Cookie`.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::MissingUri`] if the request has no URI.
    pub fn prepare(&self) -> Result<Outbound, MessageError> {
        let request = &self.request;
        let url = request.uri_full()?;

        let mut header_lines_out = vec![EXPECT_DISABLED.to_owned()];
        if request.header(header::USER_AGENT.as_str()).is_none() {
            header_lines_out.push(format!("User-Agent: {DEFAULT_USER_AGENT}"));
        }
        if request.needs_method_override() {
            header_lines_out.push(format!("{METHOD_OVERRIDE_HEADER}: {}", request.method()));
        }
        header_lines_out.extend(header_lines(request.headers()));
        if !request.cookies().is_empty() {
            header_lines_out.push(format!("Cookie: {}", request.cookies_string()));
        }

        info!(
            method = %request.method(),
            url = %url,
            header_lines = header_lines_out.len(),
            "prepared outbound request"
        );
        Ok(Outbound {
            url,
            method: request.method().clone(),
            header_lines: header_lines_out,
            body: request.body().cloned(),
        })
    }

    /// Sets the method, merges the call's uri params, headers and cookies into the request,
    /// optionally sets the body, then [`prepare`](Self::prepare)s.
    ///
    /// The request keeps what was merged, so later calls on the same exchange see it too.
    ///
    /// # Errors
    ///
    /// Fails like [`with_options`](Self::with_options) on invalid input, and with
    /// [`MessageError::MissingUri`] if the request has no URI.
    pub fn send(&mut self, method: Method, call: CallOptions, body: Option<Body>) -> Result<Outbound, MessageError> {
        let CallOptions { uri_params, headers, cookies } = call;
        self.request.set_method(method.as_str())?.set_uri_params(uri_params);
        self.request.set_headers(headers)?.set_cookies(cookies)?;
        if let Some(body) = body {
            self.request.set_body(body)?;
        }
        self.prepare()
    }

    pub fn get<C: Into<CallOptions>>(&mut self, call: C) -> Result<Outbound, MessageError> {
        self.send(Method::GET, call.into(), None)
    }

    pub fn post<B, C>(&mut self, body: B, call: C) -> Result<Outbound, MessageError>
    where
        B: Into<Body>,
        C: Into<CallOptions>,
    {
        self.send(Method::POST, call.into(), Some(body.into()))
    }

    pub fn put<B, C>(&mut self, body: B, call: C) -> Result<Outbound, MessageError>
    where
        B: Into<Body>,
        C: Into<CallOptions>,
    {
        self.send(Method::PUT, call.into(), Some(body.into()))
    }

    pub fn patch<B, C>(&mut self, body: B, call: C) -> Result<Outbound, MessageError>
    where
        B: Into<Body>,
        C: Into<CallOptions>,
    {
        self.send(Method::PATCH, call.into(), Some(body.into()))
    }

    pub fn delete<C: Into<CallOptions>>(&mut self, call: C) -> Result<Outbound, MessageError> {
        self.send(Method::DELETE, call.into(), None)
    }

    /// Records what the transport sent and received.
    ///
    /// An echoed request header block overwrites the request's headers (recording the request
    /// line under `_`) and contributes its `Cookie` pair. The raw output replaces the response.
    pub fn complete(&mut self, output: Bytes, info: &TransferInfo) -> &Response {
        if let Some(sent) = &info.request_header {
            let sent_headers = parse_headers(sent, MessageKind::Request);
            if let Some(cookie) = sent_headers.get("cookie") {
                for value in cookie.iter() {
                    self.request.parts_mut().cookies.extend(parse_cookies(value));
                }
            }
            self.request.parts_mut().headers.merge(sent_headers);
        }

        self.response = decode_response(output, info.includes_headers);
        debug!(status = self.response.status_code(), cookies = self.response.cookies().len(), "exchange completed");
        &self.response
    }
}

/// Splits `^(\w+)\s+(?:>>\s+)?(.+)` into method and uri.
fn split_notation(notation: &str) -> Option<(&str, &str)> {
    let method_end = notation.find(|c: char| !is_word_char(c))?;
    if method_end == 0 {
        return None;
    }

    let (method, rest) = notation.split_at(method_end);
    let after_method = rest.trim_start();
    if after_method.len() == rest.len() || after_method.is_empty() {
        return None;
    }

    let uri = match after_method.strip_prefix(">>") {
        Some(after_arrow) if after_arrow.starts_with(char::is_whitespace) && !after_arrow.trim_start().is_empty() => {
            after_arrow.trim_start()
        }
        _ => after_method,
    };
    Some((method, uri))
}
