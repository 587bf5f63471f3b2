use httpfromtcp::http::headers::Headers;
use httpfromtcp::http::response::StatusCode;
use httpfromtcp::http::writer::{
    add_default_headers, write_chunk, write_chunked_trailer_end, write_fixed, write_status_line,
};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::OK.as_u16(), 200);
    assert_eq!(StatusCode::BAD_REQUEST.as_u16(), 400);
    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR.as_u16(), 500);
    assert_eq!(StatusCode::from(418).as_u16(), 418);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::OK.reason_phrase(), Some("OK"));
    assert_eq!(StatusCode::BAD_REQUEST.reason_phrase(), Some("Bad Request"));
    assert_eq!(
        StatusCode::INTERNAL_SERVER_ERROR.reason_phrase(),
        Some("Internal Server Error")
    );
    assert_eq!(StatusCode::new(404).reason_phrase(), None);
}

#[test]
fn test_status_line_known_codes() {
    let cases = [
        (StatusCode::OK, "HTTP/1.1 200 OK\r\n"),
        (StatusCode::BAD_REQUEST, "HTTP/1.1 400 Bad Request\r\n"),
        (StatusCode::INTERNAL_SERVER_ERROR, "HTTP/1.1 500 Internal Server Error\r\n"),
    ];

    for (code, expected) in cases {
        let mut out: Vec<u8> = Vec::new();
        write_status_line(&mut out, code);
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}

#[test]
fn test_status_line_unknown_code_has_no_reason() {
    let mut out: Vec<u8> = Vec::new();
    write_status_line(&mut out, StatusCode::new(404));

    assert_eq!(out, b"HTTP/1.1 404\r\n".to_vec());
}

#[test]
fn test_write_fixed_response() {
    let body = b"Hello World!\n";
    let mut headers = Headers::new();
    headers.add("Content-Type", "text/plain");
    add_default_headers(&mut headers, body.len());

    let mut out: Vec<u8> = Vec::new();
    write_fixed(&mut out, StatusCode::OK, &headers, body);

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "HTTP/1.1 200 OK\r\n\
         Content-Type: text/plain\r\n\
         Content-Length: 13\r\n\
         Connection: close\r\n\
         \r\n\
         Hello World!\n"
    );
}

#[test]
fn test_add_default_headers_replaces_existing() {
    let mut headers = Headers::new();
    add_default_headers(&mut headers, 5);
    add_default_headers(&mut headers, 7);

    assert_eq!(headers.get("content-length").unwrap(), "7");
    assert_eq!(headers.get("connection").unwrap(), "close");
    assert_eq!(headers.len(), 2);
}

#[test]
fn test_chunk_length_is_lower_hex() {
    let mut out: Vec<u8> = Vec::new();
    write_chunk(&mut out, b"abcdefghijklmnopqrstuvwxyz");

    assert_eq!(out, b"1a\r\nabcdefghijklmnopqrstuvwxyz\r\n".to_vec());
}

#[test]
fn test_empty_chunk_writes_nothing() {
    let mut out: Vec<u8> = Vec::new();
    write_chunk(&mut out, b"");

    assert!(out.is_empty());
}

#[test]
fn test_chunks_with_trailers() {
    let mut trailers = Headers::new();
    trailers.add("X-Foo", "bar");

    let mut out: Vec<u8> = Vec::new();
    write_chunk(&mut out, b"hello ");
    write_chunk(&mut out, b"world, chunked!");
    write_chunked_trailer_end(&mut out, Some(&trailers));

    assert_eq!(
        out,
        b"6\r\nhello \r\nf\r\nworld, chunked!\r\n0\r\nX-Foo: bar\r\n\r\n".to_vec()
    );
}

#[test]
fn test_chunked_end_without_trailers() {
    let mut out: Vec<u8> = Vec::new();
    write_chunked_trailer_end(&mut out, None);

    assert_eq!(out, b"0\r\n\r\n".to_vec());
}
