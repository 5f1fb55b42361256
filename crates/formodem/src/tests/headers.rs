use alloc::{format, string::String, vec::Vec};

use super::util::{parse, B};
use crate::{parse_boundary, MultipartError, PartHeaders};

fn block(raw: &str) -> PartHeaders {
    PartHeaders::parse(raw.as_bytes())
}

#[test]
fn splits_on_first_colon_and_trims() {
    let headers = block("Content-Disposition: form-data; name=\"a\"\r\nX-Time:  12:30:00  ");
    assert_eq!(
        headers.get("content-disposition"),
        Some("form-data; name=\"a\"")
    );
    assert_eq!(headers.get("x-time"), Some("12:30:00"));
}

#[test]
fn lookup_is_case_insensitive() {
    let headers = block("Content-Type: text/plain");
    assert_eq!(headers.get("CONTENT-TYPE"), Some("text/plain"));
    assert_eq!(headers.get("content-type"), Some("text/plain"));
}

#[test]
fn keeps_duplicate_headers_in_order() {
    let headers = block("X-Tag: one\r\nX-Tag: two");
    assert_eq!(headers.get("x-tag"), Some("one"));
    let all: Vec<_> = headers.get_all("x-tag").collect();
    assert_eq!(all, ["one", "two"]);
    assert_eq!(headers.len(), 2);
}

#[test]
fn tolerates_bare_lf_line_endings() {
    let headers = block("A: 1\nB: 2\r\nC: 3");
    assert_eq!(headers.get("a"), Some("1"));
    assert_eq!(headers.get("b"), Some("2"));
    assert_eq!(headers.get("c"), Some("3"));
}

#[test]
fn skips_lines_without_a_colon() {
    let headers = block("not a header\r\nA: 1\r\n: empty name");
    assert_eq!(headers.len(), 1);
    assert_eq!(headers.get("a"), Some("1"));
}

#[test]
fn empty_block_has_no_entries() {
    assert!(block("").is_empty());
    assert!(block("\r\n").is_empty());
}

// ----------------------------------------------------------------------
// Disposition parameters, exercised through the parser
// ----------------------------------------------------------------------

fn one_field_with_disposition(disposition: &str, body: &[u8]) -> Vec<u8> {
    format!("--{B}\r\nContent-Disposition: {disposition}\r\n\r\n")
        .into_bytes()
        .into_iter()
        .chain(body.iter().copied())
        .chain(format!("\r\n--{B}--\r\n").into_bytes())
        .collect()
}

#[test]
fn unquoted_parameter_token() {
    let wire = one_field_with_disposition("form-data; name=user", b"x");
    let fields = parse(&wire, 1).unwrap();
    assert_eq!(fields[0].name.as_deref(), Some("user"));
}

#[test]
fn quoted_parameter_may_contain_separators() {
    let wire =
        one_field_with_disposition("form-data; filename=\"a;b.txt\"; name=\"up\"", b"x");
    let fields = parse(&wire, 1).unwrap();
    assert_eq!(fields[0].filename.as_deref(), Some("a;b.txt"));
    assert_eq!(fields[0].name.as_deref(), Some("up"));
}

#[test]
fn percent_encoded_parameters_are_decoded() {
    let wire = one_field_with_disposition("form-data; name=\"a%20b\"", b"x");
    let fields = parse(&wire, 1).unwrap();
    assert_eq!(fields[0].name.as_deref(), Some("a b"));
}

#[test]
fn failed_percent_decoding_falls_back_to_raw() {
    let wire = one_field_with_disposition("form-data; name=\"100%zz\"", b"x");
    let fields = parse(&wire, 1).unwrap();
    assert_eq!(fields[0].name.as_deref(), Some("100%zz"));
}

#[test]
fn valueless_parameter_is_skipped() {
    let wire = one_field_with_disposition("form-data; stray; name=ok", b"x");
    let fields = parse(&wire, 1).unwrap();
    assert_eq!(fields[0].name.as_deref(), Some("ok"));
}

#[test]
fn missing_parameter_yields_none() {
    let wire = one_field_with_disposition("form-data", b"x");
    let fields = parse(&wire, 1).unwrap();
    assert_eq!(fields[0].name, None);
    assert_eq!(fields[0].filename, None);
}

#[test]
fn content_type_is_cut_at_the_first_semicolon() {
    let wire = format!(
        "--{B}\r\nContent-Type: text/plain; charset=utf-8\r\n\r\nhi\r\n--{B}--\r\n"
    )
    .into_bytes();
    let fields = parse(&wire, 1).unwrap();
    assert_eq!(fields[0].content_type.as_deref(), Some("text/plain"));
}

// ----------------------------------------------------------------------
// Boundary extraction from a request Content-Type
// ----------------------------------------------------------------------

#[test]
fn parse_boundary_plain_and_quoted() {
    assert_eq!(
        parse_boundary("multipart/form-data; boundary=----X").unwrap(),
        "----X"
    );
    assert_eq!(
        parse_boundary("multipart/form-data; boundary=\"token with space\"").unwrap(),
        "token with space"
    );
}

#[test]
fn parse_boundary_is_case_insensitive_on_the_media_type() {
    assert_eq!(
        parse_boundary("MultiPart/Mixed; BOUNDARY=abc").unwrap(),
        String::from("abc")
    );
}

#[test]
fn parse_boundary_rejects_non_multipart() {
    assert_eq!(
        parse_boundary("text/plain; boundary=abc").unwrap_err(),
        MultipartError::InvalidContentType
    );
}

#[test]
fn parse_boundary_rejects_missing_parameter() {
    assert_eq!(
        parse_boundary("multipart/form-data").unwrap_err(),
        MultipartError::InvalidContentType
    );
}

#[test]
fn parse_boundary_rejects_malformed_token() {
    assert_eq!(
        parse_boundary("multipart/form-data; boundary=\"bad\ttoken\"").unwrap_err(),
        MultipartError::InvalidBoundary
    );
    assert_eq!(
        parse_boundary("multipart/form-data; boundary=\"\"").unwrap_err(),
        MultipartError::InvalidBoundary
    );
}
