//! Reading the embedded plain text back out of a typewritten PDF.

use std::sync::OnceLock;

use regex::bytes::Regex;

use crate::error::{Error, Result};
use crate::frame::{self, EPILOGUE};

fn stream_header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Exact bytes written by frame::stream_header
        Regex::new(r"\A<< /Length (\d{1,20}) >>\nstream\n").expect("valid header regex")
    })
}

/// Extract the original text from a typewritten PDF.
///
/// # Example
///
/// ```no_run
/// let pdf = std::fs::read("letter.pdf").unwrap();
/// let text = typewrite::extract_text(&pdf).unwrap();
/// print!("{}", text);
/// ```
pub fn extract_text(doc: &[u8]) -> Result<String> {
    let offset = frame::first_object_offset(doc).ok_or(Error::MarkerNotFound)?;
    let rest = &doc[offset..];

    let caps = stream_header_regex()
        .captures(rest)
        .ok_or_else(|| Error::NoEmbeddedText("first object is not a plain stream".into()))?;
    let data_start = caps.get(0).map_or(0, |m| m.end());
    let length: usize = std::str::from_utf8(&caps[1])
        .ok()
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| Error::NoEmbeddedText("unreadable stream length".into()))?;

    let data = data_start
        .checked_add(length)
        .and_then(|data_end| rest.get(data_start..data_end))
        .ok_or_else(|| Error::NoEmbeddedText(format!("stream length {} exceeds file", length)))?;
    let text = data
        .strip_suffix(EPILOGUE)
        .ok_or_else(|| Error::NoEmbeddedText("epilogue not found after text".into()))?;

    String::from_utf8(text.to_vec()).map_err(|e| Error::InvalidEncoding(e.to_string()))
}
