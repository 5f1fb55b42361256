#![no_main]
use formodem::{Multipart, ParserOptions};
use libfuzzer_sys::fuzz_target;

const HEADER: usize = 5; // 1 flag + 4-byte split seed
const BOUNDARY: &str = "----fuzz";

fn parser(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let split_seed = u32::from_le_bytes(data[1..5].try_into().unwrap()) as u64;
    let data = &data[HEADER..];

    if data.is_empty() {
        return;
    }

    // Half the corpus wraps the fuzz bytes in a well-formed envelope (so deep
    // body-scanning paths get exercised and the roundtrip can be asserted);
    // the other half feeds them raw as hostile framing.
    let enveloped = flags & 1 != 0;
    let wire = if enveloped {
        let mut wire = Vec::with_capacity(data.len() + 96);
        wire.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        wire.extend_from_slice(b"Content-Disposition: form-data; name=\"f\"\r\n\r\n");
        wire.extend_from_slice(data);
        wire.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        wire
    } else {
        data.to_vec()
    };

    let options = ParserOptions {
        memory_ceiling: 1 << 20,
        payload_ceiling: 1 << 22,
        max_parts: Some(64),
    };

    let chunks = split_into_chunks(&wire, split_seed);
    let mut form = match Multipart::with_options(chunks.into_iter(), BOUNDARY, options) {
        Ok(form) => form,
        Err(_) => return,
    };

    let mut bodies = Vec::new();
    loop {
        match form.next_part() {
            Ok(Some(part)) => match part.bytes() {
                Ok(bytes) => bodies.push(bytes),
                Err(_) => return,
            },
            Ok(None) => break,
            Err(_) => return,
        }
    }

    if enveloped && !contains_closing_delimiter(data) {
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0], data);
    }
}

fn contains_closing_delimiter(data: &[u8]) -> bool {
    let needle = format!("\r\n--{BOUNDARY}").into_bytes();
    data.windows(needle.len()).any(|w| w == needle)
}

fuzz_target!(|data: &[u8]| parser(data));

/// Split `wire` into chunks using a deterministic value derived from the
/// input, so every chunking is reachable and reproducible.
///
/// * Each chunk is at least one byte.
fn split_into_chunks(wire: &[u8], split_seed: u64) -> Vec<Vec<u8>> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let len = wire.len();

    while start < len {
        let remaining = len - start;
        let size = (split_seed as usize % remaining) + 1;
        chunks.push(wire[start..start + size].to_vec());
        start += size;
    }

    chunks
}
