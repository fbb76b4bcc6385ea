//! Slug/name normalization.
//!
//! The same function feeds builder field names and public routing tags,
//! so it must stay a pure function with no environment-dependent state:
//! the live preview and the persisted value have to match bit for bit.

/// Normalize free text into an identifier slug.
///
/// Lowercases, strips everything outside alphanumerics, whitespace,
/// underscores, and hyphens, then collapses separator runs into a single
/// hyphen and trims leading/trailing hyphens. An empty result is valid;
/// callers fall back to a supplied default (usually the form id).
pub fn normalize(input: &str) -> String {
    let lowered = input.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_sep = false;
    for c in lowered.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep {
                out.push('-');
                pending_sep = false;
            }
            out.push(c);
        } else if c.is_whitespace() || c == '_' || c == '-' {
            // Separators only count once something precedes them, which
            // also trims leading runs for free.
            if !out.is_empty() {
                pending_sep = true;
            }
        }
        // Anything else is stripped.
    }
    out
}
