use alloc::{vec, vec::Vec};

use crate::error::MultipartError;

/// Initial capacity: one typical 64 KiB transport chunk plus headroom, so the
/// common case never reallocates.
const INITIAL_CAPACITY: usize = 64 * 1024 + 1024;

/// A contiguous, compacting byte buffer with a hard capacity ceiling.
///
/// The live region is `[0, valid)`. `start` and `end` are scratch indices the
/// scanner uses to report a match (or the extent of a safely consumable
/// prefix) back to the parser; the buffer itself never interprets them beyond
/// the compaction in [`shift_to`](Self::shift_to).
///
/// Invariant: `start <= end <= valid <= capacity <= ceiling`.
#[derive(Debug)]
pub(crate) struct RingBuffer {
    data: Vec<u8>,
    valid: usize,
    pub(crate) start: usize,
    pub(crate) end: usize,
    ceiling: usize,
}

impl RingBuffer {
    pub(crate) fn with_ceiling(ceiling: usize) -> Self {
        Self {
            data: vec![0; INITIAL_CAPACITY.min(ceiling)],
            valid: 0,
            start: 0,
            end: 0,
            ceiling,
        }
    }

    /// Bytes currently holding live data.
    #[inline]
    pub(crate) fn live(&self) -> &[u8] {
        &self.data[..self.valid]
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.valid
    }

    /// Appends `chunk` after the live region, doubling the capacity as needed
    /// up to the ceiling.
    pub(crate) fn append(&mut self, chunk: &[u8]) -> Result<(), MultipartError> {
        let required = self.valid + chunk.len();
        if required > self.ceiling {
            return Err(MultipartError::MemoryLimit(self.ceiling));
        }
        if required > self.data.len() {
            let mut capacity = self.data.len().max(1);
            while capacity < required {
                capacity *= 2;
            }
            self.data.resize(capacity.min(self.ceiling), 0);
        }
        self.data[self.valid..required].copy_from_slice(chunk);
        self.valid = required;
        Ok(())
    }

    /// Returns a copy of the prefix `[0, start)` and compacts the buffer so
    /// that the bytes formerly at `[end, valid)` begin at position 0. The
    /// bytes in `[start, end)`, a matched delimiter, are dropped.
    pub(crate) fn shift_to(&mut self, end: usize) -> Vec<u8> {
        debug_assert!(self.start <= end && end <= self.valid);
        let prefix = self.data[..self.start].to_vec();
        self.data.copy_within(end..self.valid, 0);
        self.valid -= end;
        self.start = 0;
        self.end = 0;
        prefix
    }

    /// [`shift_to`](Self::shift_to) without the prefix copy, for callers that
    /// discard the consumed bytes (preamble skip, auto-drain).
    pub(crate) fn discard_to(&mut self, end: usize) {
        debug_assert!(end <= self.valid);
        self.data.copy_within(end..self.valid, 0);
        self.valid -= end;
        self.start = 0;
        self.end = 0;
    }

    pub(crate) fn clear(&mut self) {
        self.valid = 0;
        self.start = 0;
        self.end = 0;
    }
}
