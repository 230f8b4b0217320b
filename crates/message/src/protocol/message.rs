use bytes::{Bytes, BytesMut, BufMut};
use http::{HeaderName, HeaderValue};

use crate::codec::{cookies_string, headers_raw, headers_string, to_dash, to_snake};
use crate::ensure;
use crate::protocol::fields::{is_synthetic, START_LINE_KEY};
use crate::protocol::{encode_params, Cookies, FieldValue, Fields, MessageError, Params};

/// Separates the header block from the body in a raw message.
pub(crate) const HEADER_BODY_SEPARATOR: &[u8] = b"\r\n\r\n";

/// Whether a message is the outbound request or the inbound response.
///
/// Fixed when the message is constructed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MessageKind {
    Request,
    Response,
}

/// A body as supplied by the caller.
///
/// Structured bodies are form-url-encoded once, when they are set; a message only ever stores
/// flat bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Raw(Bytes),
    Structured(Params),
}

impl Body {
    /// Encodes the body into the bytes a message stores.
    pub fn into_bytes(self) -> Result<Bytes, MessageError> {
        match self {
            Body::Raw(bytes) => Ok(bytes),
            Body::Structured(params) => Ok(Bytes::from(encode_params(&params)?)),
        }
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Raw(bytes)
    }
}

impl From<&str> for Body {
    fn from(str: &str) -> Self {
        Body::Raw(Bytes::copy_from_slice(str.as_bytes()))
    }
}

impl From<String> for Body {
    fn from(string: String) -> Self {
        Body::Raw(Bytes::from(string))
    }
}

impl From<Vec<u8>> for Body {
    fn from(vec: Vec<u8>) -> Self {
        Body::Raw(Bytes::from(vec))
    }
}

impl From<Params> for Body {
    fn from(params: Params) -> Self {
        Body::Structured(params)
    }
}

/// State shared by requests and responses.
#[derive(Debug, Clone)]
pub struct MessageParts {
    pub(crate) kind: MessageKind,
    pub(crate) body: Option<Bytes>,
    pub(crate) headers: Fields,
    pub(crate) cookies: Cookies,
}

impl MessageParts {
    pub fn new(kind: MessageKind) -> Self {
        Self { kind, body: None, headers: Fields::new(), cookies: Cookies::new() }
    }
}

/// Accessors common to [`Request`](crate::protocol::Request) and
/// [`Response`](crate::protocol::Response).
///
/// Implementors only provide access to their [`MessageParts`]; everything else is shared.
pub trait HttpMessage {
    fn parts(&self) -> &MessageParts;

    fn parts_mut(&mut self) -> &mut MessageParts;

    fn kind(&self) -> MessageKind {
        self.parts().kind
    }

    fn body(&self) -> Option<&Bytes> {
        self.parts().body.as_ref()
    }

    /// Stores the body, form-url-encoding a [`Body::Structured`] first.
    fn set_body<B: Into<Body>>(&mut self, body: B) -> Result<&mut Self, MessageError> {
        self.parts_mut().body = Some(body.into().into_bytes()?);
        Ok(self)
    }

    fn headers(&self) -> &Fields {
        &self.parts().headers
    }

    /// Looks up a header by any spelling of its name.
    fn header(&self, key: &str) -> Option<&FieldValue> {
        self.parts().headers.get(key)
    }

    /// Returns the first value of a header, or `default` when it is absent.
    fn header_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.parts().headers.get_str(key).unwrap_or(default)
    }

    /// Sets a header, overwriting any previous value under the same normalized key.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::ReservedKey`] if the key normalizes to a synthetic `_` key and
    /// [`MessageError::InvalidArgument`] if it holds nothing but separators, is not a valid
    /// header name, or a value holds control characters such as CR or LF.
    fn set_header<V: Into<FieldValue>>(&mut self, key: &str, value: V) -> Result<&mut Self, MessageError> {
        let key = key.trim();
        ensure!(
            !key.trim_matches(|c: char| c == '-' || c.is_whitespace()).is_empty(),
            MessageError::invalid_argument("empty header key")
        );
        let normalized = to_snake(key);
        ensure!(!is_synthetic(&normalized), MessageError::reserved_key(normalized));

        let value = value.into();
        check_header(&normalized, &value)?;

        self.parts_mut().headers.insert(&normalized, value);
        Ok(self)
    }

    fn set_headers<I, K, V>(&mut self, headers: I) -> Result<&mut Self, MessageError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FieldValue>,
    {
        for (key, value) in headers {
            self.set_header(key.as_ref(), value)?;
        }
        Ok(self)
    }

    /// The raw request line or status line recorded by the parser.
    fn start_line(&self) -> Option<&str> {
        self.parts().headers.get_str(START_LINE_KEY)
    }

    fn cookie(&self, name: &str) -> Option<&str> {
        self.parts().cookies.get(name).map(String::as_str)
    }

    fn cookie_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.cookie(name).unwrap_or(default)
    }

    fn cookies(&self) -> &Cookies {
        &self.parts().cookies
    }

    /// Sets a cookie; the value is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::InvalidArgument`] for an empty name, a name holding `=` or `;`,
    /// a value holding `;`, or control characters in either.
    fn set_cookie<V: AsRef<str>>(&mut self, name: &str, value: V) -> Result<&mut Self, MessageError> {
        let name = name.trim();
        let value = value.as_ref().trim();
        check_cookie(name, value)?;

        self.parts_mut().cookies.insert(name.to_owned(), value.to_owned());
        Ok(self)
    }

    fn set_cookies<I, K, V>(&mut self, cookies: I) -> Result<&mut Self, MessageError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in cookies {
            self.set_cookie(name.as_ref(), value)?;
        }
        Ok(self)
    }

    /// Header lines for the wire, synthetic keys excluded.
    fn headers_string(&self) -> String {
        headers_string(&self.parts().headers)
    }

    /// Header lines preceded by the raw start line, if one was parsed.
    fn headers_raw(&self) -> String {
        headers_raw(&self.parts().headers)
    }

    /// The value of a `Cookie` header built from the cookie mapping.
    fn cookies_string(&self) -> String {
        cookies_string(&self.parts().cookies)
    }

    /// Header block, blank line and body; meant for diagnostics.
    fn to_raw(&self) -> Bytes {
        let headers = self.headers_raw();
        let body = self.body().map_or(&[][..], |body| &body[..]);

        let mut raw = BytesMut::with_capacity(headers.len() + HEADER_BODY_SEPARATOR.len() + body.len());
        raw.put_slice(headers.as_bytes());
        raw.put_slice(HEADER_BODY_SEPARATOR);
        raw.put_slice(body);
        raw.freeze()
    }
}

fn check_header(normalized: &str, value: &FieldValue) -> Result<(), MessageError> {
    let name = to_dash(normalized);
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| MessageError::invalid_argument(format!("header name `{name}`: {e}")))?;

    for item in value.iter() {
        HeaderValue::from_bytes(item.trim().as_bytes())
            .map_err(|e| MessageError::invalid_argument(format!("value of header `{name}`: {e}")))?;
    }
    Ok(())
}

fn check_cookie(name: &str, value: &str) -> Result<(), MessageError> {
    ensure!(!name.is_empty(), MessageError::invalid_argument("empty cookie name"));
    ensure!(
        !name.contains(['=', ';']) && !name.contains(char::is_control),
        MessageError::invalid_argument(format!("cookie name `{}`", name.escape_debug()))
    );
    ensure!(
        !value.contains(';') && !value.contains(char::is_control),
        MessageError::invalid_argument(format!("value of cookie `{name}`: `{}`", value.escape_debug()))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Request, Response};
    use indoc::indoc;

    #[test]
    fn set_header_rejects_blank_keys() {
        let mut request = Request::new();

        for key in ["", "   ", "  - ", "--"] {
            let error = request.set_header(key, "v").unwrap_err();
            assert!(matches!(error, MessageError::InvalidArgument { .. }), "key {key:?}");
        }
        assert!(request.headers().is_empty());
    }

    #[test]
    fn set_header_rejects_synthetic_keys() {
        let mut request = Request::new();
        let mut response = Response::new();

        for key in ["_", "_status", "_Status_Code", " _status_text"] {
            assert!(matches!(request.set_header(key, "200 OK"), Err(MessageError::ReservedKey { .. })), "key {key:?}");
            assert!(matches!(response.set_header(key, "200 OK"), Err(MessageError::ReservedKey { .. })), "key {key:?}");
        }
        assert!(request.headers().is_empty());
        assert!(response.headers().is_empty());
    }

    #[test]
    fn set_header_trims_key_and_value() {
        let mut request = Request::new();
        request.set_header("  Accept ", " */* ").unwrap();

        assert_eq!(request.header_or("accept", ""), "*/*");
        assert_eq!(request.headers_string(), "Accept: */*");
    }

    #[test]
    fn set_header_rejects_line_breaks_in_values() {
        let mut request = Request::new();

        let error = request.set_header("X-A", "1\r\nHost: evil.example").unwrap_err();
        assert!(matches!(error, MessageError::InvalidArgument { .. }));

        let error = request.set_header("Via", ["1.1 a", "1.1 b\nX-Evil: 1"]).unwrap_err();
        assert!(matches!(error, MessageError::InvalidArgument { .. }));

        assert!(request.headers().is_empty());
        assert_eq!(request.headers_string(), "");
    }

    #[test]
    fn set_header_rejects_invalid_names() {
        let mut request = Request::new();

        for key in ["a:b", "x(y)", "caf\u{e9}"] {
            let error = request.set_header(key, "v").unwrap_err();
            assert!(matches!(error, MessageError::InvalidArgument { .. }), "key {key:?}");
        }
        assert!(request.headers().is_empty());
    }

    #[test]
    fn set_header_overwrites_parsed_sequence() {
        let mut response = Response::from_wire(
            indoc! {"
                HTTP/1.1 200 OK
                Via: 1.1 a
                Via: 1.1 b
            "},
            Bytes::new(),
        );
        assert_eq!(response.header("via"), Some(&FieldValue::from(vec!["1.1 a", "1.1 b"])));

        response.set_header("Via", "1.1 c").unwrap();

        assert_eq!(response.header("via"), Some(&FieldValue::from("1.1 c")));
        assert_eq!(response.status(), Some("200 OK"));
    }

    #[test]
    fn set_cookies_trims_names_and_values() {
        let mut request = Request::new();
        request.set_cookies([(" a ", " 1 "), ("b", "2\t")]).unwrap();

        assert_eq!(request.cookie("a"), Some("1"));
        assert_eq!(request.cookie_or("b", "-"), "2");
        assert_eq!(request.cookie_or("c", "-"), "-");
        assert_eq!(request.cookies_string(), "a=1; b=2");
    }

    #[test]
    fn set_cookie_rejects_separators_and_control_characters() {
        let mut request = Request::new();

        for (name, value) in [("", "1"), ("a=b", "1"), ("a;b", "1"), ("a", "1; Path=/"), ("a", "1\r\nX-Evil: 1")] {
            let error = request.set_cookie(name, value).unwrap_err();
            assert!(matches!(error, MessageError::InvalidArgument { .. }), "cookie {name:?}={value:?}");
        }
        assert!(request.cookies().is_empty());
    }

    #[test]
    fn cookie_value_may_hold_equals() {
        let mut request = Request::new();
        request.set_cookie("token", "a=b==").unwrap();

        assert_eq!(request.cookies_string(), "token=a=b==");
    }

    #[test]
    fn to_raw_without_body() {
        let mut request = Request::new();
        assert_eq!(&request.to_raw()[..], b"\r\n\r\n");

        request.set_header("Accept", "*/*").unwrap();
        assert_eq!(&request.to_raw()[..], b"Accept: */*\r\n\r\n");
    }

    #[test]
    fn to_raw_with_start_line_and_body() {
        let response = Response::from_wire("HTTP/1.1 404 not found\r\nContent-Length: 2", Bytes::from_static(b"no"));

        assert_eq!(&response.to_raw()[..], b"HTTP/1.1 404 not found\r\nContent-Length: 2\r\n\r\nno");
    }
}
