//! Splicing the original text into the engine's PDF output.
//!
//! The generated document contains the placeholder object written during
//! composition. Splicing overwrites its filler with a stream holding the
//! text and the epilogue. The replacement has exactly the size of the
//! filler run, so the cross-reference table and every later offset in the
//! file stay valid without running the engine again.

mod extract;

pub use extract::extract_text;

use std::ops::Range;

use crate::detect::detect_format_from_bytes;
use crate::error::{Error, Result};
use crate::frame::{self, EPILOGUE, FILLER, STREAM_TRAILER};

/// Replace the placeholder in `doc` with `text`.
///
/// `reserved` is the data length reserved during composition
/// (see [`crate::ComposedDocument::reserved`]).
///
/// # Errors
///
/// Fails without producing output if the document is not a PDF, the
/// first-object marker is missing, `text` does not fit the reservation
/// exactly, or the filler span and its terminating `endobj` are not where
/// the reservation says they must be.
pub fn splice(doc: &[u8], text: &str, reserved: usize) -> Result<Vec<u8>> {
    let format = detect_format_from_bytes(doc)?;

    let actual = frame::content_len(text);
    if actual != reserved {
        return Err(Error::LengthMismatch { actual, reserved });
    }

    let text_offset = frame::first_object_offset(doc).ok_or(Error::MarkerNotFound)?;
    let span = locate_reserved_span(doc, text_offset, reserved)?;
    log::debug!(
        "splicing {} bytes into {} at {}..{}",
        text.len(),
        format,
        span.start,
        span.end
    );

    let header = frame::stream_header(reserved);
    let mut out = Vec::with_capacity(doc.len());
    out.extend_from_slice(&doc[..span.start]);
    out.extend_from_slice(header.as_bytes());
    out.extend_from_slice(text.as_bytes());
    out.extend_from_slice(EPILOGUE);
    out.extend_from_slice(STREAM_TRAILER);

    if out.len() != span.end {
        return Err(Error::ReservedSpanMismatch {
            offset: span.start,
            expected: span.len(),
            found: out.len() - span.start,
        });
    }

    out.extend_from_slice(&doc[span.end..]);
    Ok(out)
}

/// Find the filler span for `reserved` data bytes starting at `offset`.
///
/// The run of filler bytes must have exactly the expected length and be
/// followed by the object terminator.
pub fn locate_reserved_span(doc: &[u8], offset: usize, reserved: usize) -> Result<Range<usize>> {
    let expected = frame::reserved_span_len(reserved);
    let found = doc
        .get(offset..)
        .unwrap_or_default()
        .iter()
        .take_while(|&&b| b == FILLER)
        .count();

    if found != expected {
        return Err(Error::ReservedSpanMismatch {
            offset,
            expected,
            found,
        });
    }

    let end = offset + expected;
    if !frame::starts_with_terminator(&doc[end..]) {
        return Err(Error::AnchorMissing(end));
    }

    Ok(offset..end)
}
