use alloc::vec;

use crate::{produce_chunks, produce_prefixes};

#[test]
fn produce_helpers_example() {
    let payload = b"abcdefghij";
    let chunks = produce_chunks(payload, 3);
    assert_eq!(chunks, vec![&b"abcd"[..], b"efgh", b"ij"]);
    let prefixes = produce_prefixes(payload, 3);
    assert_eq!(
        prefixes,
        vec![&b"abcd"[..], b"abcdefgh", b"abcdefghij"]
    );
}

#[test]
fn produce_chunks_covers_the_payload() {
    let payload: alloc::vec::Vec<u8> = (0..257u16).map(|i| (i % 256) as u8).collect();
    for parts in [1, 2, 5, 32, 257, 1000] {
        let chunks = produce_chunks(&payload, parts);
        assert!(chunks.len() <= parts.max(1));
        assert_eq!(chunks.concat(), payload);
        assert!(chunks.iter().all(|c| !c.is_empty()));
    }
}

#[test]
fn produce_prefixes_converge() {
    let payload = b"0123456789abcdef";
    let prefixes = produce_prefixes(payload, 4);
    for prefix in &prefixes {
        assert_eq!(&payload[..prefix.len()], *prefix);
    }
    assert_eq!(*prefixes.last().unwrap(), payload);
}
