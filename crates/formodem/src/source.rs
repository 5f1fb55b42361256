use alloc::vec::Vec;

/// A pull source of body chunks.
///
/// `read` returns the next chunk, or `None` once the body is exhausted.
/// Reading is the parser's only suspension point against the transport; in a
/// blocking server this blocks, in a cooperative runtime the implementation
/// parks until a chunk arrives.
pub trait ChunkSource {
    fn read(&mut self) -> Option<Vec<u8>>;
}

/// Any iterator of byte chunks is a source, which covers buffered bodies and
/// test fixtures alike.
impl<I> ChunkSource for I
where
    I: Iterator<Item = Vec<u8>>,
{
    fn read(&mut self) -> Option<Vec<u8>> {
        self.next()
    }
}

/// The slice of an HTTP request the parser needs: a case-insensitive header
/// lookup and one-shot ownership of the body stream.
pub trait BodyRequest {
    type Body: ChunkSource;

    /// Returns the value of `name`, compared ASCII-case-insensitively.
    fn header(&self, name: &str) -> Option<&str>;

    /// Takes the body stream out of the request. Returns `None` when the
    /// request has no body or the body was already consumed.
    fn take_body(&mut self) -> Option<Self::Body>;
}
