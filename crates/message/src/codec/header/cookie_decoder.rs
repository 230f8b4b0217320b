//! `Cookie` / `Set-Cookie` value parser.
//!
//! Only the leading `name=value` pair of a value is kept. Attributes such as `Path`, `Expires`
//! or `HttpOnly` are dropped; this is a minimal cookie jar, not a cookie attribute model.

use tracing::trace;

use crate::protocol::Cookies;

/// Parses the first `name=value` pair of a `Cookie` or `Set-Cookie` value.
///
/// ```
/// use micro_message::codec::parse_cookies;
///
/// let cookies = parse_cookies("a=1; Path=/; HttpOnly");
/// assert_eq!(cookies.get("a").map(String::as_str), Some("1"));
/// assert_eq!(cookies.len(), 1);
/// ```
pub fn parse_cookies(raw: &str) -> Cookies {
    let mut cookies = Cookies::new();

    let pair = raw.split(';').next().unwrap_or_default();
    let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
    let name = name.trim();

    if name.is_empty() {
        trace!(raw, "skip cookie without name");
        return cookies;
    }

    cookies.insert(name.to_owned(), value.trim().to_owned());
    cookies.sort_keys();
    cookies
}
