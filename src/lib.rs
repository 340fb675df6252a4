//! # typewrite
//!
//! Typeset plain text files as typewritten PDFs that still carry the
//! original text, byte for byte, at the top of the file.
//!
//! Opening the result in a PDF viewer shows the typewritten pages. Opening
//! it in a text editor shows the source text as the first PDF object,
//! followed by a short comment and the binary PDF content.
//!
//! ## Quick Start
//!
//! ```no_run
//! use typewrite::{typewrite_file, TypewriteOptions};
//!
//! fn main() -> typewrite::Result<()> {
//!     typewrite_file("letter.txt", "letter.pdf", &TypewriteOptions::default())?;
//!     Ok(())
//! }
//! ```
//!
//! ## How it works
//!
//! 1. [`compose`] builds a LaTeX source whose first PDF object is a
//!    placeholder filled with padding sized for the text.
//! 2. A [`TypesetEngine`] (by default [`LuaLatex`]) turns it into a PDF.
//! 3. [`splice`] overwrites the placeholder with the text. The replacement
//!    has the exact size of the padding, so nothing else in the file moves.

pub mod compose;
pub mod detect;
pub mod engine;
pub mod error;
pub mod frame;
pub mod splice;

// Re-export commonly used types
pub use compose::{compose, ComposedDocument, Margins, Stylesheet, TypewriterParams};
pub use detect::{detect_format_from_bytes, is_pdf_bytes, PdfFormat};
pub use engine::{EngineOptions, LuaLatex, TypesetEngine};
pub use error::{Error, Result};
pub use splice::{extract_text, splice};

use std::fs;
use std::io::Write;
use std::path::Path;

/// Name of the composed source inside the working directory.
const SOURCE_FILE_NAME: &str = "document.tex";

/// Complete configuration of a typewrite run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypewriteOptions {
    /// Layout and typewriter settings
    pub stylesheet: Stylesheet,

    /// External engine settings
    pub engine: EngineOptions,
}

impl TypewriteOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stylesheet.
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Set the engine options.
    pub fn with_engine(mut self, engine: EngineOptions) -> Self {
        self.engine = engine;
        self
    }
}

/// Typeset `text` and return the final PDF bytes.
pub fn typewrite(text: &str, options: &TypewriteOptions) -> Result<Vec<u8>> {
    Typewriter::with_options(options.clone()).render(text)
}

/// Typeset the text file at `input` and write the PDF to `output`.
///
/// Nothing is written to `output` unless the whole pipeline succeeds.
pub fn typewrite_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &TypewriteOptions,
) -> Result<()> {
    Typewriter::with_options(options.clone()).render_file(input, output)
}

/// Read the embedded text of the PDF at `input` and write it to `output`.
pub fn extract_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<()> {
    let doc = fs::read(input)?;
    let text = extract_text(&doc)?;
    write_atomically(output.as_ref(), text.as_bytes())
}

/// Builder running the compose, typeset and splice pipeline.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use typewrite::{EngineOptions, Stylesheet, Typewriter};
///
/// let pdf = Typewriter::new()
///     .with_stylesheet(Stylesheet::new().with_paper("letterpaper"))
///     .with_engine_options(EngineOptions::new().with_timeout(Duration::from_secs(30)))
///     .render("Hello, world.\n")?;
/// # Ok::<(), typewrite::Error>(())
/// ```
pub struct Typewriter {
    stylesheet: Stylesheet,
    engine: Box<dyn TypesetEngine>,
}

impl Typewriter {
    /// Create a typewriter with the default stylesheet and `lualatex`.
    pub fn new() -> Self {
        Self::with_options(TypewriteOptions::default())
    }

    /// Create a typewriter from options.
    pub fn with_options(options: TypewriteOptions) -> Self {
        Self {
            stylesheet: options.stylesheet,
            engine: Box::new(LuaLatex::with_options(options.engine)),
        }
    }

    /// Set the stylesheet.
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Run [`LuaLatex`] with the given options.
    pub fn with_engine_options(self, options: EngineOptions) -> Self {
        self.with_engine(LuaLatex::with_options(options))
    }

    /// Use a custom engine.
    pub fn with_engine<E: TypesetEngine + 'static>(mut self, engine: E) -> Self {
        self.engine = Box::new(engine);
        self
    }

    /// The stylesheet in use.
    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    /// Typeset `text` and return the final PDF bytes.
    pub fn render(&self, text: &str) -> Result<Vec<u8>> {
        let composed = compose(text, &self.stylesheet);

        // Removed on drop, whichever way this function returns
        let workdir = tempfile::Builder::new().prefix("typewrite").tempdir()?;
        let source = workdir.path().join(SOURCE_FILE_NAME);
        composed.write_to(&source)?;

        let pdf_path = self.engine.typeset(&source, workdir.path())?;
        let generated = fs::read(&pdf_path)?;
        log::debug!(
            "{} produced {} bytes",
            self.engine.name(),
            generated.len()
        );

        splice(&generated, text, composed.reserved)
    }

    /// Typeset the text file at `input` and write the PDF to `output`.
    pub fn render_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, input: P, output: Q) -> Result<()> {
        let input = input.as_ref();
        let raw = fs::read(input)?;
        let text = String::from_utf8(raw).map_err(|e| {
            Error::InvalidEncoding(format!("{}: {}", input.display(), e))
        })?;

        let pdf = self.render(&text)?;
        write_atomically(output.as_ref(), &pdf)
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `data` next to `path` and move it into place once complete.
fn write_atomically(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".typewrite")
        .tempfile_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    log::info!("wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}
