//! File names for new changesets.

use unicode_normalization::UnicodeNormalization;

const MAX_SLUG_LEN: usize = 48;

/// Build a file stem from a changeset title and the rendered file contents.
///
/// The title is decomposed (NFKD) and reduced to lowercase ASCII words joined by
/// `-`; an 8-hex-digit blake3 prefix of `contents` keeps distinct changesets with
/// the same title apart.
pub fn changeset_slug(title: &str, contents: &str) -> String {
    let mut words = String::new();
    let mut pending_dash = false;
    for c in title.nfkd().filter(|c| c.is_ascii()) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !words.is_empty() {
                words.push('-');
            }
            pending_dash = false;
            words.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
        if words.len() >= MAX_SLUG_LEN {
            break;
        }
    }
    let words = words.trim_end_matches('-');
    let words = if words.is_empty() { "changeset" } else { words };

    let hash = blake3::hash(contents.as_bytes());
    format!("{}-{}", words, &hex::encode(hash.as_bytes())[..8])
}
