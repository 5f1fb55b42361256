use alloc::string::String;

use crate::{
    error::MultipartError,
    headers::{header_param, media_type},
};

/// RFC 2046 §5.1.1 limits a boundary to 70 characters.
const MAX_BOUNDARY_LEN: usize = 70;

/// Extracts and validates the boundary token from a `Content-Type` value.
///
/// The value must name a `multipart/*` media type carrying a `boundary`
/// parameter (optionally quoted); the token itself must be 1–70 characters
/// from the RFC 2046 set, not ending in a space.
///
/// # Errors
///
/// [`MultipartError::InvalidContentType`] when the media type is not
/// `multipart/*` or the parameter is missing;
/// [`MultipartError::InvalidBoundary`] when the token is malformed.
pub fn parse_boundary(content_type: &str) -> Result<String, MultipartError> {
    let mime = media_type(content_type);
    let is_multipart = mime
        .get(.."multipart/".len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("multipart/"));
    if !is_multipart {
        return Err(MultipartError::InvalidContentType);
    }
    let boundary =
        header_param(content_type, "boundary").ok_or(MultipartError::InvalidContentType)?;
    if !is_valid_boundary(&boundary) {
        return Err(MultipartError::InvalidBoundary);
    }
    Ok(boundary)
}

pub(crate) fn is_valid_boundary(boundary: &str) -> bool {
    (1..=MAX_BOUNDARY_LEN).contains(&boundary.len())
        && !boundary.ends_with(' ')
        && boundary.bytes().all(is_bchar)
}

// bchars = DIGIT / ALPHA / "'" / "(" / ")" / "+" / "_" / "," / "-" / "." /
//          "/" / ":" / "=" / "?" / " "
fn is_bchar(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'\'' | b'(' | b')' | b'+' | b'_' | b',' | b'-' | b'.' | b'/' | b':' | b'=' | b'?' | b' '
        )
}
