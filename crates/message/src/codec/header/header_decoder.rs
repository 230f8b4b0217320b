//! Header block parser.
//!
//! Turns a raw, CRLF-delimited header block into [`Fields`]. The first line gets special
//! treatment depending on the [`MessageKind`]:
//!
//! - `Request`: a line like `GET /path?x=1 HTTP/1.1` is stored verbatim under `_`
//! - `Response`: a line like `HTTP/1.1 404 Not Found` is stored under `_`, and its code and
//!   reason phrase under `_status`, `_status_code` and `_status_text`
//!
//! A first line that matches neither grammar is parsed like every other line. Parsing never
//! fails: lines without a `:` are skipped, and repeated names accumulate into a sequence.

use tracing::{debug, trace};

use crate::protocol::fields::{START_LINE_KEY, STATUS_CODE_KEY, STATUS_KEY, STATUS_TEXT_KEY};
use crate::protocol::{Fields, MessageKind};
use crate::utils::is_word_char;

/// Parses a raw header block.
///
/// The block is trimmed and split into lines; both `\r\n` and bare `\n` terminate a line.
///
/// ```
/// use micro_message::codec::parse_headers;
/// use micro_message::protocol::MessageKind;
///
/// let fields = parse_headers("HTTP/1.1 200 OK\r\nContent-Type: text/plain", MessageKind::Response);
/// assert_eq!(fields.get_str("_status"), Some("200 OK"));
/// assert_eq!(fields.get_str("content_type"), Some("text/plain"));
/// ```
pub fn parse_headers(raw: &str, kind: MessageKind) -> Fields {
    let raw = raw.trim();
    if raw.is_empty() {
        return Fields::new();
    }
    parse_header_lines(raw.lines(), kind)
}

/// Parses a header block that was already split into lines.
pub fn parse_header_lines<'a, I>(lines: I, kind: MessageKind) -> Fields
where
    I: IntoIterator<Item = &'a str>,
{
    let mut fields = Fields::new();
    let mut lines = lines.into_iter();

    if let Some(first) = lines.next() {
        let recorded = match kind {
            MessageKind::Request => record_request_line(first, &mut fields),
            MessageKind::Response => record_status_line(first, &mut fields),
        };
        if !recorded {
            debug!(line = first, ?kind, "first line has no start line grammar, parse as header");
            parse_field_line(first, &mut fields);
        }
    }

    for line in lines {
        parse_field_line(line, &mut fields);
    }

    fields
}

fn parse_field_line(line: &str, fields: &mut Fields) {
    let Some((name, value)) = line.split_once(':') else {
        if !line.trim().is_empty() {
            trace!(line, "skip header line without colon");
        }
        return;
    };

    let name = name.trim();
    if name.is_empty() {
        trace!(line, "skip header line without name");
        return;
    }

    fields.append(name, value);
}

fn record_request_line(line: &str, fields: &mut Fields) -> bool {
    if !is_request_line(line) {
        return false;
    }
    fields.insert_synthetic(START_LINE_KEY, line.to_owned());
    true
}

/// Matches `<METHOD> <target> HTTP/<d>.<d>`.
fn is_request_line(line: &str) -> bool {
    let mut parts = line.split(' ');
    let (Some(method), Some(target), Some(version), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    !method.is_empty()
        && method.chars().all(|c| is_word_char(c) || c == '-')
        && !target.is_empty()
        && !target.chars().any(char::is_whitespace)
        && strip_version(version).is_some_and(str::is_empty)
}

fn record_status_line(line: &str, fields: &mut Fields) -> bool {
    let Some(status) = StatusLine::parse(line) else {
        return false;
    };

    let text = status.title_cased_reason();
    fields.insert_synthetic(START_LINE_KEY, line.to_owned());
    fields.insert_synthetic(STATUS_KEY, format!("{} {}", status.code, text));
    fields.insert_synthetic(STATUS_CODE_KEY, status.code.to_string());
    fields.insert_synthetic(STATUS_TEXT_KEY, text);
    true
}

/// Strips a leading `HTTP/<d>.<d>` (case-insensitive), returning the rest of the input.
fn strip_version(input: &str) -> Option<&str> {
    const PREFIX: &str = "HTTP/";

    let head = input.get(..PREFIX.len())?;
    if !head.eq_ignore_ascii_case(PREFIX) {
        return None;
    }

    match input.as_bytes()[PREFIX.len()..] {
        [major, b'.', minor, ..] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Some(&input[PREFIX.len() + 3..])
        }
        _ => None,
    }
}

/// A status line: `HTTP/<d>.<d> <3-digit code> <reason phrase>`.
#[derive(Debug, PartialEq, Eq)]
struct StatusLine<'a> {
    code: u16,
    reason: &'a str,
}

impl<'a> StatusLine<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let rest = strip_version(line)?;

        let after_version = rest.trim_start();
        if after_version.len() == rest.len() {
            return None;
        }

        let code = after_version.get(..3)?;
        if !code.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let rest = &after_version[3..];
        let after_code = rest.trim_start();
        if after_code.len() == rest.len() {
            return None;
        }

        // the reason phrase is the leading run of word characters, dashes and spaces
        let end = after_code.find(|c: char| !(is_word_char(c) || c == '-' || c == ' ')).unwrap_or(after_code.len());
        let reason = after_code[..end].trim();
        if reason.is_empty() {
            return None;
        }

        Some(StatusLine { code: code.parse().ok()?, reason })
    }

    /// Title-cases every word; a word equal to `ok` in any case becomes `OK`.
    fn title_cased_reason(&self) -> String {
        self.reason
            .split(' ')
            .map(|word| if word.eq_ignore_ascii_case("ok") { "OK".to_owned() } else { title_case(word) })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Upper-cases the first letter of each dash-separated segment and lower-cases the rest.
fn title_case(word: &str) -> String {
    word.split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::FieldValue;
    use indoc::indoc;

    #[test]
    fn status_line_with_header() {
        let fields = parse_headers("HTTP/1.1 200 OK\r\nContent-Type: text/plain", MessageKind::Response);

        assert_eq!(fields.get_str("_"), Some("HTTP/1.1 200 OK"));
        assert_eq!(fields.get_str("_status"), Some("200 OK"));
        assert_eq!(fields.get_str("_status_code"), Some("200"));
        assert_eq!(fields.get_str("_status_text"), Some("OK"));
        assert_eq!(fields.get_str("content_type"), Some("text/plain"));
        assert_eq!(fields.len(), 5);
    }

    #[test]
    fn status_text_is_title_cased() {
        let fields = parse_headers("HTTP/1.1 404 Not Found", MessageKind::Response);
        assert_eq!(fields.get_str("_status_text"), Some("Not Found"));

        let fields = parse_headers("HTTP/1.0 500 INTERNAL SERVER ERROR", MessageKind::Response);
        assert_eq!(fields.get_str("_status"), Some("500 Internal Server Error"));

        let fields = parse_headers("HTTP/1.1 203 non-authoritative information", MessageKind::Response);
        assert_eq!(fields.get_str("_status_text"), Some("Non-Authoritative Information"));
    }

    #[test]
    fn status_text_ok_stays_upper_case() {
        for line in ["HTTP/1.1 200 ok", "HTTP/1.1 200 Ok", "http/1.1 200 OK"] {
            let fields = parse_headers(line, MessageKind::Response);
            assert_eq!(fields.get_str("_status_text"), Some("OK"), "line: {line}");
            assert_eq!(fields.get_str("_status"), Some("200 OK"), "line: {line}");
        }
    }

    #[test]
    fn status_reason_stops_at_other_characters() {
        let fields = parse_headers("HTTP/1.1 418 I'm a teapot", MessageKind::Response);

        assert_eq!(fields.get_str("_status_code"), Some("418"));
        assert_eq!(fields.get_str("_status_text"), Some("I"));
    }

    #[test]
    fn status_line_grammar() {
        assert_eq!(
            StatusLine::parse("HTTP/1.1 301 Moved Permanently"),
            Some(StatusLine { code: 301, reason: "Moved Permanently" })
        );
        assert_eq!(StatusLine::parse("HTTP/1.1  200   OK  "), Some(StatusLine { code: 200, reason: "OK" }));
        assert_eq!(StatusLine::parse("HTTP/2 200 OK"), None);
        assert_eq!(StatusLine::parse("HTTP/1.1 200"), None);
        assert_eq!(StatusLine::parse("HTTP/1.1 20 OK"), None);
        assert_eq!(StatusLine::parse("HTTP/1.1200 OK"), None);
        assert_eq!(StatusLine::parse("HTTP/1.1 2000 OK"), None);
        assert_eq!(StatusLine::parse("HTTP/1.1 200 ;"), None);
        assert_eq!(StatusLine::parse("HTTPS/1.1 200 OK"), None);
        assert_eq!(StatusLine::parse(""), None);
    }

    #[test]
    fn malformed_first_line_is_tolerated() {
        let fields = parse_headers("garbage\r\nX: 1", MessageKind::Response);

        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("x"), Some(&FieldValue::from("1")));
        assert_eq!(fields.get("_"), None);
        assert_eq!(fields.get("_status"), None);
    }

    #[test]
    fn non_status_first_line_is_parsed_as_header() {
        let fields = parse_headers("Content-Type: text/plain\r\nAge: 1", MessageKind::Response);

        assert_eq!(fields.get_str("content_type"), Some("text/plain"));
        assert_eq!(fields.get_str("age"), Some("1"));
        assert_eq!(fields.get("_status_code"), None);
    }

    #[test]
    fn request_line_is_recorded() {
        let fields = parse_headers(
            indoc! {"
                GET /index/?a=1&b=2 HTTP/1.1
                Host: 127.0.0.1:8080
                User-Agent: curl/7.79.1
                Accept: */*

            "},
            MessageKind::Request,
        );

        assert_eq!(fields.get_str("_"), Some("GET /index/?a=1&b=2 HTTP/1.1"));
        assert_eq!(fields.get_str("host"), Some("127.0.0.1:8080"));
        assert_eq!(fields.get_str("user_agent"), Some("curl/7.79.1"));
        assert_eq!(fields.get_str("accept"), Some("*/*"));
        assert_eq!(fields.get("_status"), None);
        assert_eq!(fields.len(), 4);
    }

    #[test]
    fn request_line_grammar() {
        assert!(is_request_line("GET / HTTP/1.1"));
        assert!(is_request_line("M-SEARCH * HTTP/1.1"));
        assert!(is_request_line("POST http://example.com/a?b=c HTTP/1.0"));
        assert!(!is_request_line("GET / HTTP/1.1 extra"));
        assert!(!is_request_line("GET /"));
        assert!(!is_request_line("Host: example.com HTTP/1.1"));
        assert!(!is_request_line("GET  / HTTP/1.1"));
        assert!(!is_request_line("GET / HTTP/11"));
    }

    #[test]
    fn kind_and_grammar_mismatch_yields_no_synthetic_keys() {
        let fields = parse_headers("HTTP/1.1 200 OK\r\nAge: 1", MessageKind::Request);
        assert_eq!(fields.get("_"), None);
        assert_eq!(fields.get("_status"), None);
        assert_eq!(fields.get_str("age"), Some("1"));

        let fields = parse_headers("GET / HTTP/1.1\r\nAge: 1", MessageKind::Response);
        assert_eq!(fields.get("_"), None);
        assert_eq!(fields.get_str("age"), Some("1"));
    }

    #[test]
    fn repeated_headers_accumulate() {
        let fields = parse_headers("Set-Cookie: a=1\r\nSet-Cookie: b=2", MessageKind::Response);

        assert_eq!(fields.get("set_cookie"), Some(&FieldValue::from(vec!["a=1", "b=2"])));
    }

    #[test]
    fn names_normalize_and_values_trim() {
        let fields = parse_headers(
            "HTTP/1.1 200 OK\r\nX-Custom:   spaced value  \r\nx-custom: second\r\nLocation: http://example.com:8080/a",
            MessageKind::Response,
        );

        assert_eq!(fields.get("X Custom"), Some(&FieldValue::from(vec!["spaced value", "second"])));
        assert_eq!(fields.get_str("location"), Some("http://example.com:8080/a"));
    }

    #[test]
    fn lines_without_colon_or_name_are_skipped() {
        let fields = parse_headers("HTTP/1.1 200 OK\r\nno colon here\r\n: no name\r\nAge: 2", MessageKind::Response);

        let keys: Vec<_> = fields.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["_", "_status", "_status_code", "_status_text", "age"]);
    }

    #[test]
    fn keys_enumerate_sorted() {
        let fields = parse_headers("HTTP/1.1 200 OK\r\nVary: a\r\nAge: 1\r\nDate: x", MessageKind::Response);

        let keys: Vec<_> = fields.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["_", "_status", "_status_code", "_status_text", "age", "date", "vary"]);
    }

    #[test]
    fn empty_block_is_empty() {
        assert!(parse_headers("", MessageKind::Response).is_empty());
        assert!(parse_headers("\r\n\r\n", MessageKind::Request).is_empty());
    }

    #[test]
    fn pre_split_lines() {
        let fields = parse_header_lines(["HTTP/1.1 204 No Content", "Age: 1"], MessageKind::Response);

        assert_eq!(fields.get_str("_status"), Some("204 No Content"));
        assert_eq!(fields.get_str("age"), Some("1"));
    }
}
