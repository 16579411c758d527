//! Content fingerprints and record identities
//!
//! Both are SHA-1 digests rendered as lowercase hex.

use sha1::{Digest, Sha1};

/// Only this many leading characters of a payload feed its fingerprint
pub const FINGERPRINT_PREFIX_CHARS: usize = 1000;

/// Hex-encoded content digest
pub type Fingerprint = String;

fn sha1_hex(data: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data.as_bytes());
    hex::encode(hasher.finalize())
}

/// Fingerprint the first 1000 characters of `text`.
///
/// Payloads sharing that prefix collide and are treated as duplicates.
pub fn fingerprint(text: &str) -> Fingerprint {
    let prefix = match text.char_indices().nth(FINGERPRINT_PREFIX_CHARS) {
        Some((byte_offset, _)) => &text[..byte_offset],
        None => text,
    };
    sha1_hex(prefix)
}

/// Deterministic record identity for chunk `chunk_index` of `document_name`
pub fn record_id(document_name: &str, chunk_index: usize) -> String {
    sha1_hex(&format!("{}{}", document_name, chunk_index))
}
