use alloc::{format, vec::Vec};

use crate::{produce_chunks, FormField, Multipart, MultipartError, ParserOptions};

/// Boundary used by most fixtures.
pub(crate) const B: &str = "----X";

/// Serializes simple text/byte fields into a canonical multipart document.
pub(crate) fn form(fields: &[(&str, &[u8])]) -> Vec<u8> {
    let mut wire = Vec::new();
    for (name, body) in fields {
        wire.extend_from_slice(
            format!("--{B}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        wire.extend_from_slice(body);
        wire.extend_from_slice(b"\r\n");
    }
    wire.extend_from_slice(format!("--{B}--\r\n").as_bytes());
    wire
}

pub(crate) fn owned_chunks(wire: &[u8], parts: usize) -> Vec<Vec<u8>> {
    produce_chunks(wire, parts)
        .into_iter()
        .map(<[u8]>::to_vec)
        .collect()
}

pub(crate) fn parse(wire: &[u8], parts: usize) -> Result<Vec<FormField>, MultipartError> {
    parse_with(wire, parts, ParserOptions::default())
}

pub(crate) fn parse_with(
    wire: &[u8],
    parts: usize,
    options: ParserOptions,
) -> Result<Vec<FormField>, MultipartError> {
    Multipart::with_options(owned_chunks(wire, parts).into_iter(), B, options)?.into_fields()
}
