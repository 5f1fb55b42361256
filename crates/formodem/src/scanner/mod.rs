//! Scanner: delimiter search over the live region of the ring buffer.
//!
//! Two operations, both reporting their result through the buffer's
//! `start`/`end` scratch indices rather than mutating the data:
//!
//! - [`find`] runs a Boyer-Moore-Horspool search for a full needle match.
//!   On a hit, `start..end` spans the match. On a miss, `start == end` is
//!   set to the earliest index at which a match straddling the pending chunk
//!   boundary could still begin, so everything before it is safe to consume.
//! - [`probe`] refines a miss during part-body streaming: it tests whether
//!   the tail of the buffer equals a prefix of the needle. If so, emitting
//!   those tail bytes would be unsafe, and `start == end` pins the candidate
//!   match's first byte; otherwise the whole live region may be emitted.
//!
//! Invariants
//! - Neither operation reads outside `[0, valid)` or mutates buffer data.
//! - After `find` misses, no full match exists that begins before `start`.
//! - `probe` is only meaningful immediately after a `find` miss; a full match
//!   ending inside the window has already been excluded by then.

use crate::{buffer::RingBuffer, needle::Needle};


/// Searches the live region for a full match of `needle`, resuming from the
/// buffer's recorded `start`.
///
/// Returns `true` and sets `start..end` to the match extent, or returns
/// `false` and parks `start == end` at `valid - (len - 1)` clamped to zero,
/// the first position a straddling match could occupy.
pub(crate) fn find(buf: &mut RingBuffer, needle: &Needle) -> bool {
    let hit = {
        let live = buf.live();
        let pat = needle.bytes();
        let last = needle.last();
        let mut i = buf.start + last;
        let mut hit = None;
        while i < live.len() {
            let mut k = 0;
            while k <= last && live[i - k] == pat[last - k] {
                k += 1;
            }
            if k > last {
                hit = Some(i);
                break;
            }
            i += needle.skip(live[i]);
        }
        hit
    };
    match hit {
        Some(i) => {
            buf.start = i - needle.last();
            buf.end = i + 1;
            true
        }
        None => {
            let resume = buf.len().saturating_sub(needle.last());
            buf.start = resume;
            buf.end = resume;
            false
        }
    }
}

/// Partial-suffix probe, used only while streaming a part body.
///
/// Tests the needle prefixes that end in the buffer's final byte, longest
/// first. A match pins `start == end` at the candidate's first byte so the
/// pump emits only the bytes before it; no match parks `start == end` at
/// `valid`, marking the entire live region safe to emit.
pub(crate) fn probe(buf: &mut RingBuffer, needle: &Needle) {
    let pin = {
        let live = buf.live();
        let valid = live.len();
        let pat = needle.bytes();
        let mut pin = valid;
        if valid > 0 {
            let tail = live[valid - 1];
            for &p in needle.loc(tail).iter().rev() {
                if p + 1 > valid {
                    continue;
                }
                let candidate = valid - 1 - p;
                if live[candidate..] == pat[..=p] {
                    pin = candidate;
                    break;
                }
            }
        }
        pin
    };
    buf.start = pin;
    buf.end = pin;
}
