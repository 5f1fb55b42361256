//! A streaming `multipart/form-data` body parser.
//!
//! The parser consumes an arbitrarily large request body as a sequence of
//! opaque byte chunks and yields the logical parts contained in it one at a
//! time. Each part is itself a lazy, bounded byte stream, so a multi-gigabyte
//! upload can be forwarded without ever holding a full part in memory.

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod boundary;
mod buffer;
mod chunk_utils;
mod error;
mod headers;
mod needle;
mod options;
mod parser;
mod scanner;
mod source;

pub use boundary::parse_boundary;
pub use chunk_utils::{produce_chunks, produce_prefixes};
pub use error::MultipartError;
pub use headers::PartHeaders;
pub use options::{ParserOptions, DEFAULT_MEMORY_CEILING, DEFAULT_PAYLOAD_CEILING};
pub use parser::{FormField, Multipart, Part};
pub use source::{BodyRequest, ChunkSource};

#[cfg(test)]
mod tests;
