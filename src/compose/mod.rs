//! LaTeX source composition.
//!
//! The composed source declares, before anything else, an immediate raw
//! PDF object whose body is nothing but filler. Because it is the first
//! object the engine writes, it becomes `1 0 obj` in the output and the
//! splicer can later overwrite the filler with the real text. The rest of
//! the source is an ordinary `verbatim` rendition of the text.

mod stylesheet;

pub use stylesheet::{Margins, Stylesheet, TypewriterParams, FORM_FEED};

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::frame;

const PLACEHOLDER_HEAD: &str = "\\bgroup\n  \\pdfvariable objcompresslevel=0\n  \\immediate\\pdfextension obj {";
const PLACEHOLDER_FOOT: &str = "}\n\\egroup\n";
const VERBATIM_HEAD: &str = "\\begin{verbatim}\n";
const DOCUMENT_FOOT: &str = "\\end{verbatim}\n\\end{document}\n";

/// Replaces each page-break character in the verbatim block.
pub const PAGE_BREAK: &str = "\\end{verbatim}\n\\newpage\n\\begin{verbatim}\n";

/// A LaTeX source ready for the typesetting engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedDocument {
    /// The LaTeX source text
    pub source: String,

    /// Stream data bytes reserved for the text and epilogue
    pub reserved: usize,
}

impl ComposedDocument {
    /// Bytes of filler in the placeholder object.
    pub fn reserved_span_len(&self) -> usize {
        frame::reserved_span_len(self.reserved)
    }

    /// Write the source to `path`.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, &self.source)?;
        Ok(())
    }
}

/// Compose the LaTeX source for `text`.
///
/// # Example
///
/// ```
/// use typewrite::{compose, Stylesheet};
///
/// let doc = compose("hello", &Stylesheet::default());
/// assert_eq!(doc.reserved, 5 + typewrite::frame::EPILOGUE.len());
/// assert!(doc.source.contains("\\begin{verbatim}\nhello\\end{verbatim}"));
/// ```
pub fn compose(text: &str, style: &Stylesheet) -> ComposedDocument {
    let reserved = frame::content_len(text);
    let span = frame::reserved_span_len(reserved);
    log::debug!(
        "composing {} text bytes: reserving {} data bytes in a {} byte span",
        text.len(),
        reserved,
        span
    );

    let preamble = style.preamble();
    let mut source = String::with_capacity(
        PLACEHOLDER_HEAD.len() + span + PLACEHOLDER_FOOT.len() + preamble.len() + text.len() * 2,
    );

    source.push_str(PLACEHOLDER_HEAD);
    source.extend(std::iter::repeat(char::from(frame::FILLER)).take(span));
    source.push_str(PLACEHOLDER_FOOT);

    source.push_str(&preamble);
    source.push_str(VERBATIM_HEAD);
    source.push_str(&text.replace(style.page_break, PAGE_BREAK));
    source.push_str(DOCUMENT_FOOT);

    ComposedDocument { source, reserved }
}
