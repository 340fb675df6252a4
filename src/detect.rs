//! Sanity check that the engine actually produced a PDF.

use std::fmt;

use crate::error::{Error, Result};

/// Header version of a generated PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFormat {
    /// Version from the `%PDF-x.y` line (e.g. "1.5")
    pub version: String,
}

impl fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// Read the `%PDF-x.y` header at the start of `data`.
///
/// Engine logs and other non-PDF output give [`Error::UnknownFormat`]; a
/// header whose version is not `digit.digit` gives
/// [`Error::UnsupportedVersion`].
pub fn detect_format_from_bytes(data: &[u8]) -> Result<PdfFormat> {
    let version = match data.strip_prefix(b"%PDF-").and_then(|rest| rest.get(..3)) {
        Some(version) => version,
        None => return Err(Error::UnknownFormat),
    };

    match version {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => Ok(PdfFormat {
            version: format!("{}.{}", *major as char, *minor as char),
        }),
        _ => Err(Error::UnsupportedVersion(
            String::from_utf8_lossy(version).into_owned(),
        )),
    }
}

/// Whether `data` starts with a PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
