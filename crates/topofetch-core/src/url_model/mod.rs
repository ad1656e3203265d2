//! URL modeling and filename derivation.
//!
//! Local names come from the last URL path segment, sanitized for Linux
//! filesystems. Two distinct URLs can share a final segment (different parent
//! path or query string), so a batch tracks the names it has already handed
//! out and disambiguates later collisions with a short digest of the full URL.

mod path;
mod sanitize;

pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename;

use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Default filename when the URL path yields nothing usable.
const DEFAULT_FILENAME: &str = "download.bin";

/// Derives a safe base filename for saving a download of `url`.
///
/// Uses the last path segment, sanitized; falls back to `download.bin` when
/// the path is empty, root, or sanitizes away entirely.
pub fn derive_filename(url: &str) -> String {
    let raw = match filename_from_url_path(url) {
        Some(segment) => segment,
        None => return DEFAULT_FILENAME.to_string(),
    };

    let sanitized = sanitize_filename(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}

/// Names already assigned within one download batch.
///
/// The first URL to claim a base name keeps it; later URLs deriving the same
/// name get a tag (8 hex chars of the URL's SHA-256) inserted before the
/// extension, so no file in a run silently overwrites another.
#[derive(Debug, Default)]
pub struct UniqueNames {
    used: HashSet<String>,
}

impl UniqueNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the local filename to use for `url`, unique within this batch.
    pub fn assign(&mut self, url: &str) -> String {
        let base = derive_filename(url);
        if self.used.insert(base.clone()) {
            return base;
        }
        let tagged = tag_with_url_digest(&base, url);
        self.used.insert(tagged.clone());
        tagged
    }
}

fn tag_with_url_digest(name: &str, url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    let tag = hex::encode(&digest[..4]);
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}-{tag}.{ext}"),
        _ => format!("{name}-{tag}"),
    }
}
