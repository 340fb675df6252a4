//! Byte layout of the plain-text object shared by composition and splicing.
//!
//! The first object of a typewritten PDF is an uncompressed stream:
//!
//! ```text
//! 1 0 obj
//! << /Length L >>
//! stream
//! <text><EPILOGUE>
//! endstream
//! endobj
//! ```
//!
//! During composition the whole region between `1 0 obj\n` and the engine's
//! `endobj` is filled with [`FILLER`] bytes. Its size is
//! [`reserved_span_len`], so the spliced stream fits it exactly.

/// Marker preceding the first object body in the engine's output.
pub const FIRST_OBJECT_MARKER: &[u8] = b"\n1 0 obj\n";

/// Byte used to pad the placeholder object.
pub const FILLER: u8 = b'x';

/// Appended after the text inside the stream data.
pub const EPILOGUE: &[u8] = b"\n\n\
% This is the end of the file content's plain text version. What follows\n\
% are mostly binary blobs used for displaying this file as pdf.\n";

/// Closes the stream; the engine's own `endobj` follows.
pub const STREAM_TRAILER: &[u8] = b"\nendstream\n";

/// Keyword that must follow the reserved span.
pub const OBJECT_TERMINATOR: &[u8] = b"endobj";

/// Stream dictionary and keyword declaring `length` data bytes.
pub fn stream_header(length: usize) -> String {
    format!("<< /Length {} >>\nstream\n", length)
}

/// Number of stream data bytes needed for `text`.
pub fn content_len(text: &str) -> usize {
    text.len() + EPILOGUE.len()
}

/// Total bytes occupied by header, `reserved` data bytes and trailer.
pub fn reserved_span_len(reserved: usize) -> usize {
    stream_header(reserved).len() + reserved + STREAM_TRAILER.len()
}

/// Position of the first occurrence of `needle` in `haystack`.
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Offset of the first object body, right after [`FIRST_OBJECT_MARKER`].
pub fn first_object_offset(doc: &[u8]) -> Option<usize> {
    find(doc, FIRST_OBJECT_MARKER).map(|pos| pos + FIRST_OBJECT_MARKER.len())
}

/// Whether `rest` begins with an optional end-of-line and `endobj`.
pub fn starts_with_terminator(rest: &[u8]) -> bool {
    let rest = rest
        .strip_prefix(b"\r\n")
        .or_else(|| rest.strip_prefix(b"\n"))
        .or_else(|| rest.strip_prefix(b"\r"))
        .unwrap_or(rest);
    rest.starts_with(OBJECT_TERMINATOR)
}
