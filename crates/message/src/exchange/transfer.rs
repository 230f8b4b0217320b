//! Values passed across the boundary with the transport.

use bytes::Bytes;
use http::Method;

/// Disables the interim `100 Continue` round trip, so a transfer yields one header block.
pub const EXPECT_DISABLED: &str = "Expect:";

/// `User-Agent` sent when the request sets none.
pub const DEFAULT_USER_AGENT: &str = concat!("micro-message/", env!("CARGO_PKG_VERSION"));

/// Header announcing the real method for transports that only speak `GET` and `POST`.
pub const METHOD_OVERRIDE_HEADER: &str = "X-HTTP-Method-Override";

/// Everything a transport needs to issue the outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    /// Full URL, query string included.
    pub url: String,
    pub method: Method,
    /// `"<Name>: <value>"` lines, in the order they should be sent.
    pub header_lines: Vec<String>,
    pub body: Option<Bytes>,
}

impl Outbound {
    /// Returns the value of the first header line with the given name, compared
    /// case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.header_lines.iter().find_map(|line| {
            let (line_name, value) = line.split_once(':')?;
            line_name.eq_ignore_ascii_case(name).then(|| value.trim())
        })
    }
}

/// What the transport reports once a transfer has completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferInfo {
    /// Whether the raw output starts with the status line and headers.
    pub includes_headers: bool,
    /// The request header block the transport actually sent, when it echoes it.
    pub request_header: Option<String>,
}

impl Default for TransferInfo {
    fn default() -> Self {
        Self { includes_headers: true, request_header: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_names_the_crate() {
        assert!(DEFAULT_USER_AGENT.starts_with("micro-message/"));
    }

    #[test]
    fn outbound_header_lookup() {
        let outbound = Outbound {
            url: "http://example.com".to_owned(),
            method: Method::GET,
            header_lines: vec![EXPECT_DISABLED.to_owned(), "Accept: */*".to_owned(), "accept: text/html".to_owned()],
            body: None,
        };

        assert_eq!(outbound.header("expect"), Some(""));
        assert_eq!(outbound.header("ACCEPT"), Some("*/*"));
        assert_eq!(outbound.header("cookie"), None);
    }
}
