//! Percent-encoding for experience ids interpolated into request paths.
//!
//! Experience ids are opaque strings supplied by the caller. Without encoding,
//! a `/` would create a nested path, `?` or `#` would start a query or
//! fragment, and a literal `%` could be decoded twice by the backend.
//!
//! # Example
//!
//! ```
//! use tutorial_client::endpoints::url_encoding::encode_path_segment;
//!
//! assert_eq!(encode_path_segment("exp/1"), "exp%2F1");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters that must be percent-encoded in a single path segment.
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'~')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b',')
    .add(b';')
    .add(b'[')
    .add(b']');

/// Percent-encode a string for use as exactly one URL path segment.
///
/// ```
/// use tutorial_client::endpoints::url_encoding::encode_path_segment;
///
/// assert_eq!(encode_path_segment("abc123"), "abc123");
/// assert_eq!(encode_path_segment("my exp"), "my%20exp");
/// assert_eq!(encode_path_segment("100%"), "100%25");
/// ```
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}

/// Whether a segment would be collapsed by URL normalization (`.` or `..`).
pub fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}
