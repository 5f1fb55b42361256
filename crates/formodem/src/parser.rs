//! The multipart state machine and the lazy part handle.
//!
//! `Multipart` owns the chunk source and the scan buffer and drives the
//! framing: preamble skip, header scan, body streaming, terminator check,
//! epilogue drain. A `Part` mutably borrows the parser for its lifetime, so
//! at most one part is ever live and its body bytes are pulled straight out
//! of the shared buffer.

use alloc::{string::String, vec::Vec};

use crate::{
    boundary::{is_valid_boundary, parse_boundary},
    buffer::RingBuffer,
    error::MultipartError,
    headers::{header_param, media_type, PartHeaders},
    needle::Needle,
    options::ParserOptions,
    source::{BodyRequest, ChunkSource},
};

const CRLF: &[u8] = b"\r\n";
const DASHES: &[u8] = b"--";

#[derive(Debug, Clone, PartialEq)]
enum State {
    /// Searching for the opening delimiter; bytes before it are discarded.
    Preamble,
    /// Searching for the CRLF-CRLF header terminator of the next part.
    Headers,
    /// A part body is live; bytes stream out until the closing delimiter.
    Body,
    /// A delimiter was just consumed; the next two bytes decide terminal
    /// (`--`) versus another part (CRLF).
    AfterBoundary,
    Done,
    Failed(MultipartError),
}

/// A streaming `multipart/form-data` parser over a pull source of chunks.
///
/// Parts are yielded in wire order, one at a time; each holds a lazy body
/// stream backed by the parser's buffer. An unread body is drained
/// automatically before the next part is scanned.
///
/// # Examples
///
/// ```rust
/// use formodem::Multipart;
///
/// let body =
///     b"--b1\r\ncontent-disposition: form-data; name=\"greeting\"\r\n\r\nhello\r\n--b1--\r\n";
/// let mut form = Multipart::new(vec![body.to_vec()].into_iter(), "b1").unwrap();
///
/// let part = form.next_part().unwrap().expect("one part");
/// assert_eq!(part.name(), Some("greeting"));
/// assert_eq!(part.text().unwrap(), "hello");
/// assert!(form.next_part().unwrap().is_none());
/// ```
#[derive(Debug)]
pub struct Multipart<S> {
    source: Option<S>,
    ring: RingBuffer,
    /// `--<boundary>\r\n`: the delimiter that opens the first part.
    opening: Needle,
    /// `\r\n--<boundary>`: the delimiter that closes every part. The leading
    /// CRLF keeps it from matching inside a body's first two bytes and
    /// absorbs the newline that precedes every boundary line.
    closing: Needle,
    /// `\r\n\r\n`: the header block terminator.
    header_end: Needle,
    options: ParserOptions,
    state: State,
    bytes_read: usize,
    parts_seen: usize,
}

impl<S: ChunkSource> Multipart<S> {
    /// Creates a parser with default [`ParserOptions`].
    ///
    /// # Errors
    ///
    /// [`MultipartError::InvalidBoundary`] when `boundary` is empty or not an
    /// RFC 2046 token.
    pub fn new(source: S, boundary: &str) -> Result<Self, MultipartError> {
        Self::with_options(source, boundary, ParserOptions::default())
    }

    pub fn with_options(
        source: S,
        boundary: &str,
        options: ParserOptions,
    ) -> Result<Self, MultipartError> {
        if !is_valid_boundary(boundary) {
            return Err(MultipartError::InvalidBoundary);
        }
        let mut opening = Vec::with_capacity(boundary.len() + 4);
        opening.extend_from_slice(DASHES);
        opening.extend_from_slice(boundary.as_bytes());
        opening.extend_from_slice(CRLF);

        let mut closing = Vec::with_capacity(boundary.len() + 4);
        closing.extend_from_slice(CRLF);
        closing.extend_from_slice(DASHES);
        closing.extend_from_slice(boundary.as_bytes());

        Ok(Self {
            source: Some(source),
            ring: RingBuffer::with_ceiling(options.memory_ceiling),
            opening: Needle::new(&opening),
            closing: Needle::new(&closing),
            header_end: Needle::new(b"\r\n\r\n"),
            options,
            state: State::Preamble,
            bytes_read: 0,
            parts_seen: 0,
        })
    }

    /// Creates a parser from a request's `Content-Type` header and body.
    ///
    /// # Errors
    ///
    /// [`MultipartError::InvalidContentType`] when the header is absent or
    /// not `multipart/*; boundary=…`; [`MultipartError::InvalidBoundary`]
    /// when the boundary token is malformed;
    /// [`MultipartError::NoRequestBody`] when the body is absent.
    pub fn from_request<R>(req: &mut R, options: ParserOptions) -> Result<Self, MultipartError>
    where
        R: BodyRequest<Body = S>,
    {
        let boundary = {
            let content_type = req
                .header("content-type")
                .ok_or(MultipartError::InvalidContentType)?;
            parse_boundary(content_type)?
        };
        let source = req.take_body().ok_or(MultipartError::NoRequestBody)?;
        Self::with_options(source, &boundary, options)
    }

    /// Advances to the next part, draining any unread body of the current
    /// one first.
    ///
    /// Returns `Ok(None)` once the terminal delimiter has been consumed and
    /// the epilogue drained. All errors are terminal and re-surface on every
    /// later call.
    pub fn next_part(&mut self) -> Result<Option<Part<'_, S>>, MultipartError> {
        loop {
            match self.state {
                State::Failed(ref err) => return Err(err.clone()),
                State::Done => return Ok(None),
                State::Preamble => self.skip_preamble()?,
                // Unread body of the previous part: drain to its delimiter.
                State::Body => {
                    self.pump_body()?;
                }
                State::AfterBoundary => {
                    if self.at_terminal()? {
                        self.drain_epilogue()?;
                    } else {
                        self.state = State::Headers;
                    }
                }
                State::Headers => break,
            }
        }

        if let Some(max) = self.options.max_parts {
            if self.parts_seen >= max {
                return Err(self.fail(MultipartError::PartLimit(max)));
            }
        }

        let block = self.read_header_block()?;
        let headers = PartHeaders::parse(&block);
        let disposition = headers.get("content-disposition");
        let name = disposition.and_then(|v| header_param(v, "name"));
        let filename = disposition.and_then(|v| header_param(v, "filename"));
        let content_type = headers
            .get("content-type")
            .map(|v| String::from(media_type(v)));

        self.parts_seen += 1;
        self.state = State::Body;
        Ok(Some(Part {
            headers,
            name,
            filename,
            content_type,
            parser: self,
        }))
    }

    /// Collects every remaining part eagerly, subject to the same limits.
    pub fn into_fields(mut self) -> Result<Vec<FormField>, MultipartError> {
        let mut fields = Vec::new();
        while let Some(part) = self.next_part()? {
            let headers = part.headers.clone();
            let name = part.name.clone();
            let filename = part.filename.clone();
            let content_type = part.content_type.clone();
            let data = part.bytes()?;
            fields.push(FormField {
                headers,
                name,
                filename,
                content_type,
                data,
            });
        }
        Ok(fields)
    }

    /// Cumulative bytes pulled from the source so far.
    #[must_use]
    pub fn bytes_read(&self) -> usize {
        self.bytes_read
    }

    /// Whether the terminal delimiter was seen and the source fully drained.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.state, State::Done)
    }

    // ------------------------------------------------------------------
    // State machine internals
    // ------------------------------------------------------------------

    /// Discards bytes up to and including the opening delimiter.
    fn skip_preamble(&mut self) -> Result<(), MultipartError> {
        loop {
            if crate::scanner::find(&mut self.ring, &self.opening) {
                let end = self.ring.end;
                self.ring.discard_to(end);
                self.state = State::Headers;
                return Ok(());
            }
            // Preamble bytes that can no longer begin the delimiter are
            // dropped so the preamble never accumulates in memory.
            if self.ring.start > 0 {
                let start = self.ring.start;
                self.ring.discard_to(start);
            }
            if !self.pull()? {
                return Err(self.fail(MultipartError::UnexpectedEof));
            }
        }
    }

    /// Accumulates the next header block up to its CRLF-CRLF terminator.
    fn read_header_block(&mut self) -> Result<Vec<u8>, MultipartError> {
        loop {
            if crate::scanner::find(&mut self.ring, &self.header_end) {
                let end = self.ring.end;
                return Ok(self.ring.shift_to(end));
            }
            if !self.pull()? {
                return Err(self.fail(MultipartError::UnexpectedEof));
            }
        }
    }

    /// One pull of the current part's body stream.
    ///
    /// Yields the next run of body bytes, or `None` once the closing
    /// delimiter has been consumed. Never yields an empty chunk.
    fn pump_body(&mut self) -> Result<Option<Vec<u8>>, MultipartError> {
        loop {
            if crate::scanner::find(&mut self.ring, &self.closing) {
                let end = self.ring.end;
                let prefix = self.ring.shift_to(end);
                self.state = State::AfterBoundary;
                return Ok(if prefix.is_empty() { None } else { Some(prefix) });
            }
            crate::scanner::probe(&mut self.ring, &self.closing);
            if self.ring.start > 0 {
                let end = self.ring.end;
                return Ok(Some(self.ring.shift_to(end)));
            }
            if !self.pull()? {
                return Err(self.fail(MultipartError::UnexpectedEof));
            }
        }
    }

    /// Peeks the two bytes after a consumed delimiter: `--` is terminal, a
    /// CRLF announces another part.
    fn at_terminal(&mut self) -> Result<bool, MultipartError> {
        while self.ring.len() < 2 {
            if !self.pull()? {
                return Err(self.fail(MultipartError::UnexpectedEof));
            }
        }
        let peeked = [self.ring.live()[0], self.ring.live()[1]];
        match peeked {
            [b'-', b'-'] => Ok(true),
            [b'\r', b'\n'] => Ok(false),
            _ => Err(self.fail(MultipartError::InvalidHeader)),
        }
    }

    /// Consumes the rest of the source after the terminal delimiter,
    /// counting it against the payload ceiling but keeping nothing.
    fn drain_epilogue(&mut self) -> Result<(), MultipartError> {
        self.ring.clear();
        if let Some(mut source) = self.source.take() {
            while let Some(chunk) = source.read() {
                self.bytes_read += chunk.len();
                if self.bytes_read > self.options.payload_ceiling {
                    let limit = self.options.payload_ceiling;
                    return Err(self.fail(MultipartError::PayloadLimit(limit)));
                }
            }
        }
        self.state = State::Done;
        Ok(())
    }

    /// Appends the next non-empty source chunk to the buffer. Returns
    /// `Ok(false)` on end of source.
    fn pull(&mut self) -> Result<bool, MultipartError> {
        let chunk = loop {
            let Some(source) = self.source.as_mut() else {
                return Ok(false);
            };
            match source.read() {
                Some(chunk) if chunk.is_empty() => continue,
                Some(chunk) => break chunk,
                None => return Ok(false),
            }
        };
        self.bytes_read += chunk.len();
        if self.bytes_read > self.options.payload_ceiling {
            let limit = self.options.payload_ceiling;
            return Err(self.fail(MultipartError::PayloadLimit(limit)));
        }
        if let Err(err) = self.ring.append(&chunk) {
            return Err(self.fail(err));
        }
        Ok(true)
    }

    /// Latches a terminal error and releases the source.
    fn fail(&mut self, err: MultipartError) -> MultipartError {
        self.source = None;
        self.state = State::Failed(err.clone());
        err
    }
}

/// One part of a multipart body: its headers plus a lazy byte stream.
///
/// The part mutably borrows the parser, so it must be read (or dropped)
/// before the next part can be requested; a dropped part's body is drained
/// by the parser on the next advance.
#[derive(Debug)]
pub struct Part<'mp, S> {
    parser: &'mp mut Multipart<S>,
    headers: PartHeaders,
    name: Option<String>,
    filename: Option<String>,
    content_type: Option<String>,
}

impl<S: ChunkSource> Part<'_, S> {
    #[must_use]
    pub fn headers(&self) -> &PartHeaders {
        &self.headers
    }

    /// The `name` parameter of `content-disposition`, if present.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The `filename` parameter of `content-disposition`, if present.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// The base value of the part's `content-type` header, if present.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Pulls the next run of body bytes.
    ///
    /// Returns `Ok(None)` once the body is complete. Chunks are never empty
    /// and arrive in source order.
    pub fn chunk(&mut self) -> Result<Option<Vec<u8>>, MultipartError> {
        match self.parser.state {
            State::Body => self.parser.pump_body(),
            State::Failed(ref err) => Err(err.clone()),
            _ => Ok(None),
        }
    }

    /// Drains the body into one contiguous byte vector.
    ///
    /// # Errors
    ///
    /// [`MultipartError::MemoryLimit`] when the body exceeds the configured
    /// memory ceiling, besides any streaming error.
    pub fn bytes(mut self) -> Result<Vec<u8>, MultipartError> {
        let limit = self.parser.options.memory_ceiling;
        let mut out = Vec::new();
        while let Some(chunk) = self.chunk()? {
            if out.len() + chunk.len() > limit {
                return Err(self.parser.fail(MultipartError::MemoryLimit(limit)));
            }
            out.extend_from_slice(&chunk);
        }
        Ok(out)
    }

    /// Drains the body and decodes it as UTF-8, lossily.
    pub fn text(self) -> Result<String, MultipartError> {
        let bytes = self.bytes()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// An eagerly collected part, produced by [`Multipart::into_fields`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub headers: PartHeaders,
    pub name: Option<String>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl FormField {
    /// The field data decoded as UTF-8, lossily.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}
