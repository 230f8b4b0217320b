//! The outbound request message.
//!
//! Besides the shared [`MessageParts`], a request carries its method, target URI and the URI
//! parameters that become the query string.

use std::fmt;

use http::Method;
use tracing::trace;

use crate::ensure;
use crate::protocol::{encode_params, HttpMessage, MessageError, MessageKind, MessageParts, ParamValue, Params};
use crate::utils::is_word_char;

const DEFAULT_SCHEME: &str = "http://";

/// An HTTP request as structured data.
#[derive(Debug, Clone)]
pub struct Request {
    parts: MessageParts,
    method: Method,
    uri: String,
    uri_params: Params,
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    /// An empty `GET` request without a URI.
    pub fn new() -> Self {
        Self {
            parts: MessageParts::new(MessageKind::Request),
            method: Method::GET,
            uri: String::new(),
            uri_params: Params::new(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Sets the method, upper-casing it first. Extension methods such as `COPY` are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::InvalidArgument`] if the method is not a valid token.
    pub fn set_method(&mut self, method: &str) -> Result<&mut Self, MessageError> {
        let upper = method.trim().to_ascii_uppercase();
        self.method = Method::from_bytes(upper.as_bytes())
            .map_err(|e| MessageError::invalid_argument(format!("method `{method}`: {e}")))?;
        Ok(self)
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Sets the target URI, prefixing `http://` when it carries no `scheme://`.
    ///
    /// An empty string clears the URI.
    pub fn set_uri(&mut self, uri: &str) -> &mut Self {
        let uri = uri.trim();
        self.uri = if uri.is_empty() || has_scheme(uri) { uri.to_owned() } else { format!("{DEFAULT_SCHEME}{uri}") };
        trace!(uri = %self.uri, "set request uri");
        self
    }

    /// The URI with the encoded URI parameters appended as the query string.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::MissingUri`] if no URI was set.
    pub fn uri_full(&self) -> Result<String, MessageError> {
        ensure!(!self.uri.is_empty(), MessageError::MissingUri);

        if self.uri_params.is_empty() {
            return Ok(self.uri.clone());
        }
        Ok(format!("{}?{}", self.uri, encode_params(&self.uri_params)?))
    }

    pub fn uri_param(&self, key: &str) -> Option<&ParamValue> {
        self.uri_params.get(key)
    }

    pub fn uri_params(&self) -> &Params {
        &self.uri_params
    }

    /// Merges parameters into the existing ones; a repeated key takes the new value.
    pub fn set_uri_params<I, K, V>(&mut self, params: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ParamValue>,
    {
        self.uri_params.extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Returns true for methods that the transport can't express natively and must announce
    /// through `X-HTTP-Method-Override`.
    pub fn needs_method_override(&self) -> bool {
        !matches!(self.method, Method::GET | Method::POST)
    }
}

impl HttpMessage for Request {
    fn parts(&self) -> &MessageParts {
        &self.parts
    }

    fn parts_mut(&mut self) -> &mut MessageParts {
        &mut self.parts
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.to_raw()))
    }
}

/// Matches `^\w+://`.
fn has_scheme(uri: &str) -> bool {
    match uri.find("://") {
        Some(end) if end > 0 => uri[..end].chars().all(is_word_char),
        _ => false,
    }
}
