use std::hint::black_box;

use bytes::{Bytes, BytesMut};
use criterion::{criterion_group, criterion_main, Criterion};
use micro_message::codec::{decode_response, headers_string, parse_headers, HeaderEncoder};
use micro_message::protocol::{HttpMessage, MessageKind, Request};
use tokio_util::codec::Encoder;

const RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\n\
Content-Type: text/html; charset=UTF-8\r\n\
Content-Length: 12\r\n\
Cache-Control: max-age=0, private\r\n\
Set-Cookie: session=abc123; Path=/; HttpOnly\r\n\
Set-Cookie: theme=dark; Max-Age=3600\r\n\
Vary: Accept-Encoding\r\n\
X-Request-Id: 5f2b7c1e\r\n\
\r\n\
Hello World!";

fn bench_parse_headers(c: &mut Criterion) {
    let header_block = std::str::from_utf8(&RESPONSE[..RESPONSE.len() - 16]).unwrap();

    c.bench_function("parse_response_headers", |b| {
        b.iter(|| black_box(parse_headers(black_box(header_block), MessageKind::Response)));
    });
}

fn bench_decode_response(c: &mut Criterion) {
    c.bench_function("decode_transfer_output", |b| {
        b.iter(|| black_box(decode_response(Bytes::from_static(RESPONSE), true)));
    });
}

fn bench_serialize_headers(c: &mut Criterion) {
    let fields = parse_headers(std::str::from_utf8(RESPONSE).unwrap(), MessageKind::Response);

    c.bench_function("headers_string", |b| {
        b.iter(|| black_box(headers_string(black_box(&fields))));
    });
}

fn bench_header_encoder(c: &mut Criterion) {
    let mut request = Request::new();
    request.set_uri("example.com");
    request.set_header("Accept", "text/html,application/xhtml+xml").unwrap();
    request.set_header("Accept-Language", "zh-CN,zh;q=0.9,en-US;q=0.8").unwrap();
    request.set_header("X-Forwarded-For", ["10.0.0.1", "10.0.0.2"]).unwrap();
    request.set_cookie("session", "abc123").unwrap().set_cookie("theme", "dark").unwrap();

    c.bench_function("encode_request_headers", |b| {
        b.iter(|| {
            let mut bytes = BytesMut::new();
            HeaderEncoder.encode(&request, &mut bytes).unwrap();
            black_box(bytes);
        });
    });
}

criterion_group!(benches, bench_parse_headers, bench_decode_response, bench_serialize_headers, bench_header_encoder);
criterion_main!(benches);
