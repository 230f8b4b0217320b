//! Header key normalization.
//!
//! Header names are stored in a canonical *snake* form (`content_type`) so lookups ignore
//! case, whitespace and dashes. The *dash* form (`Content-Type`) is derived only when a
//! header is written back to the wire.

use crate::utils::is_word_char;

/// Converts a header name into its stored form.
///
/// Every run of whitespace or dashes becomes a single `_` and the result is lower-cased.
/// Existing underscores are kept as they are, so the conversion is idempotent.
///
/// ```
/// use micro_message::codec::to_snake;
///
/// assert_eq!(to_snake("Content-Type"), "content_type");
/// assert_eq!(to_snake("X -  Forwarded\tFor"), "x_forwarded_for");
/// ```
pub fn to_snake(key: &str) -> String {
    let mut snake = String::with_capacity(key.len());
    let mut in_separator = false;

    for c in key.chars() {
        if c.is_whitespace() || c == '-' {
            if !in_separator {
                snake.push('_');
                in_separator = true;
            }
        } else {
            in_separator = false;
            snake.push(c.to_ascii_lowercase());
        }
    }

    snake
}

/// Converts a stored header key into the name written on the wire.
///
/// Upper-cases the first character and replaces each `_<c>` (`c` a word character) with
/// `-<C>`. This is a best-effort inverse of [`to_snake`]: `content_type` becomes
/// `Content-Type`, but the original spelling of mixed separators is not recovered.
///
/// ```
/// use micro_message::codec::to_dash;
///
/// assert_eq!(to_dash("content_type"), "Content-Type");
/// assert_eq!(to_dash("x_request_id"), "X-Request-Id");
/// ```
pub fn to_dash(key: &str) -> String {
    let mut dash = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();

    if let Some(first) = chars.peek().copied() {
        if first != '_' {
            dash.push(first.to_ascii_uppercase());
            chars.next();
        }
    }

    while let Some(c) = chars.next() {
        match (c, chars.peek().copied()) {
            ('_', Some(next)) if is_word_char(next) => {
                dash.push('-');
                dash.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => dash.push(c),
        }
    }

    dash
}
