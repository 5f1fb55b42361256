use thiserror::Error;

/// Failures raised while constructing the parser or consuming a body.
///
/// Every error is terminal: the parser latches it, releases the source, and
/// returns the same error from any later advance or body pull.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MultipartError {
    #[error("content-type is not a multipart media type with a boundary")]
    InvalidContentType,
    #[error("multipart boundary is empty or not a valid RFC 2046 token")]
    InvalidBoundary,
    #[error("request has no body")]
    NoRequestBody,
    #[error("part data exceeds the memory ceiling of {0} bytes")]
    MemoryLimit(usize),
    #[error("request body exceeds the payload ceiling of {0} bytes")]
    PayloadLimit(usize),
    #[error("part count exceeds the limit of {0}")]
    PartLimit(usize),
    #[error("unexpected end of multipart stream")]
    UnexpectedEof,
    #[error("malformed part header block")]
    InvalidHeader,
}
