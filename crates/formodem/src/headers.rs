use alloc::{
    borrow::ToOwned,
    string::{String, ToString},
    vec::Vec,
};

/// Case-insensitive, multi-valued header map for a single part.
///
/// Entries keep their wire order and spelling; lookups compare names
/// ASCII-case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartHeaders {
    entries: Vec<(String, String)>,
}

impl PartHeaders {
    /// Parses a raw header block delimited by the CRLF-CRLF match.
    ///
    /// The block is decoded lossily, split into lines tolerating CRLF or bare
    /// LF, and each line is split at its first `:` with both sides trimmed.
    /// Lines lacking a `:` (or naming nothing before it) are skipped.
    pub(crate) fn parse(raw: &[u8]) -> Self {
        let text = String::from_utf8_lossy(raw);
        let mut entries = Vec::new();
        for line in text.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() {
                continue;
            }
            let Some(colon) = line.find(':') else {
                continue;
            };
            let name = line[..colon].trim();
            if name.is_empty() {
                continue;
            }
            let value = line[colon + 1..].trim();
            entries.push((name.to_owned(), value.to_owned()));
        }
        Self { entries }
    }

    /// First value recorded under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All values recorded under `name`, in wire order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.entries
            .iter()
            .filter(move |(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The base media type of a header value: everything before the first `;`,
/// trimmed.
pub(crate) fn media_type(value: &str) -> &str {
    match value.find(';') {
        Some(semi) => value[..semi].trim(),
        None => value.trim(),
    }
}

/// Extracts the `key` parameter from a structured header value such as
/// `form-data; name="avatar"; filename="a.png"`.
///
/// Handles unquoted tokens, double-quoted strings (quotes stripped, the value
/// may then contain `;`), and best-effort percent decoding. A pair whose `=`
/// lies beyond the next `;` names no value; scanning skips to that `;` and
/// resumes.
pub(crate) fn header_param(value: &str, key: &str) -> Option<String> {
    let mut rest = value;
    loop {
        let eq = rest.find('=')?;
        if let Some(semi) = rest.find(';') {
            if semi < eq {
                rest = &rest[semi + 1..];
                continue;
            }
        }
        let name = rest[..eq].trim();
        let after = rest[eq + 1..].trim_start();
        let (raw, next) = if let Some(quoted) = after.strip_prefix('"') {
            match quoted.find('"') {
                Some(close) => (&quoted[..close], &quoted[close + 1..]),
                // Unterminated quote: take the remainder.
                None => (quoted, ""),
            }
        } else {
            match after.find(';') {
                Some(semi) => (after[..semi].trim_end(), &after[semi + 1..]),
                None => (after.trim_end(), ""),
            }
        };
        if name.eq_ignore_ascii_case(key) {
            return Some(percent_decode(raw));
        }
        rest = next;
    }
}

/// Decodes `%XX` octets in `raw`. Sequences that are not two hex digits are
/// kept literally; if the decoded bytes are not valid UTF-8 the raw substring
/// is returned unchanged.
fn percent_decode(raw: &str) -> String {
    if !raw.contains('%') {
        return raw.to_string();
    }
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    match String::from_utf8(out) {
        Ok(decoded) => decoded,
        Err(_) => raw.to_string(),
    }
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
