//! Shared helpers: a fake engine that emits a small, valid PDF.

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use typewrite::error::{Error, Result};
use typewrite::TypesetEngine;

/// Build a minimal PDF whose first object body is `body`.
///
/// Object offsets in the cross-reference table are exact.
pub fn build_pdf(first_marker: &str, body: &[u8]) -> Vec<u8> {
    let mut pdf = b"%PDF-1.5\n%\xd0\xd4\xc5\xd8\n".to_vec();
    let mut offsets = Vec::new();

    offsets.push(pdf.len());
    pdf.extend_from_slice(first_marker.as_bytes());
    pdf.extend_from_slice(body);
    pdf.extend_from_slice(b"\nendobj\n");

    offsets.push(pdf.len());
    pdf.extend_from_slice(b"2 0 obj\n<< /Type /Catalog /Pages 3 0 R >>\nendobj\n");

    offsets.push(pdf.len());
    pdf.extend_from_slice(b"3 0 obj\n<< /Type /Pages /Kids [] /Count 0 >>\nendobj\n");

    let xref = pdf.len();
    pdf.extend_from_slice(format!("xref\n0 {}\n", offsets.len() + 1).as_bytes());
    pdf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        pdf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 2 0 R >>\nstartxref\n{}\n%%EOF\n",
            offsets.len() + 1,
            xref
        )
        .as_bytes(),
    );
    pdf
}

/// Body of the `\pdfextension obj {...}` declaration in a composed source.
pub fn placeholder_body(source: &str) -> &str {
    let start = source
        .find("\\pdfextension obj {")
        .map(|i| i + "\\pdfextension obj {".len())
        .expect("placeholder declaration");
    let len = source[start..].find('}').expect("placeholder end");
    &source[start..start + len]
}

/// How the fake engine lays out its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Faithful: placeholder becomes `1 0 obj`
    Faithful,
    /// Placeholder numbered differently, as a changed engine might do
    Renumbered,
    /// One filler byte lost
    Truncated,
    /// Output is not a PDF at all
    NotPdf,
    /// Engine exits with an error after writing into its work directory
    Failing,
}

/// Engine that reads the placeholder from the source and writes a PDF
/// without invoking LaTeX. Remembers what it generated.
#[derive(Clone)]
pub struct FakeEngine {
    layout: Layout,
    generated: Rc<RefCell<Option<Vec<u8>>>>,
    out_dir: Rc<RefCell<Option<PathBuf>>>,
}

impl FakeEngine {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            generated: Rc::new(RefCell::new(None)),
            out_dir: Rc::new(RefCell::new(None)),
        }
    }

    /// Work directory the engine was last run in.
    pub fn out_dir(&self) -> PathBuf {
        self.out_dir.borrow().clone().expect("engine was run")
    }

    /// Bytes of the last generated document.
    pub fn generated(&self) -> Vec<u8> {
        self.generated.borrow().clone().expect("engine was run")
    }
}

impl TypesetEngine for FakeEngine {
    fn name(&self) -> &str {
        "fake"
    }

    fn typeset(&self, source: &Path, out_dir: &Path) -> Result<PathBuf> {
        *self.out_dir.borrow_mut() = Some(out_dir.to_path_buf());
        let tex = std::fs::read_to_string(source)?;
        let body = placeholder_body(&tex).as_bytes();

        let pdf = match self.layout {
            Layout::Faithful => build_pdf("1 0 obj\n", body),
            Layout::Renumbered => build_pdf("4 0 obj\n", body),
            Layout::Truncated => build_pdf("1 0 obj\n", &body[1..]),
            Layout::NotPdf => b"This is LuaHBTeX, Version 1.17.0".to_vec(),
            Layout::Failing => {
                std::fs::write(out_dir.join("document.log"), "! Emergency stop.\n")?;
                return Err(Error::EngineFailed {
                    status: "exit status: 1".to_string(),
                    diagnostics: "! Emergency stop.".to_string(),
                });
            }
        };

        let path = out_dir.join("document.pdf");
        std::fs::write(&path, &pdf)?;
        *self.generated.borrow_mut() = Some(pdf);
        Ok(path)
    }
}
