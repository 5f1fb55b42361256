/// Default hard ceiling on the scan buffer's capacity (4 MiB).
pub const DEFAULT_MEMORY_CEILING: usize = 4 * 1024 * 1024;

/// Default limit on cumulative bytes read from the source (16 MiB).
pub const DEFAULT_PAYLOAD_CEILING: usize = 16 * 1024 * 1024;

/// Configuration options for the multipart parser.
///
/// # Examples
///
/// ```rust
/// use formodem::ParserOptions;
///
/// let options = ParserOptions {
///     payload_ceiling: 1024 * 1024,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum capacity the internal scan buffer may grow to.
    ///
    /// The buffer holds the unconsumed window of the body: a part's header
    /// block, or body bytes awaiting the next boundary scan. A single header
    /// block or boundary straddle larger than this fails the parse with
    /// [`MemoryLimit`](crate::MultipartError::MemoryLimit).
    ///
    /// # Default
    ///
    /// 4 MiB.
    pub memory_ceiling: usize,

    /// Maximum cumulative bytes read from the source.
    ///
    /// Every byte the source produces counts against this ceiling, including
    /// the preamble, boundary lines, and the epilogue. Exceeding it fails the
    /// parse with [`PayloadLimit`](crate::MultipartError::PayloadLimit).
    ///
    /// # Default
    ///
    /// 16 MiB.
    pub payload_ceiling: usize,

    /// Maximum number of parts the parser will yield.
    ///
    /// Once the limit is reached, the next attempt to emit a part fails with
    /// [`PartLimit`](crate::MultipartError::PartLimit). `None` means
    /// unlimited.
    ///
    /// # Default
    ///
    /// `None`.
    pub max_parts: Option<usize>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            memory_ceiling: DEFAULT_MEMORY_CEILING,
            payload_ceiling: DEFAULT_PAYLOAD_CEILING,
            max_parts: None,
        }
    }
}
