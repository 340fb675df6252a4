//! Styling parameters for the typewritten rendition.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Form feed, the conventional page-break character of plain text.
pub const FORM_FEED: char = '\u{000C}';

/// Page layout and typewriter effect settings.
///
/// Every field has a default, so a stylesheet file only needs the keys it
/// changes:
///
/// ```
/// use typewrite::Stylesheet;
///
/// let style = Stylesheet::from_json(r#"{ "paper": "letterpaper" }"#).unwrap();
/// assert_eq!(style.paper, "letterpaper");
/// assert_eq!(style.margins.left, "2.3cm");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stylesheet {
    /// LaTeX paper option (e.g. "a4paper")
    pub paper: String,

    /// Page margins
    pub margins: Margins,

    /// Parameters of the `typewriter` package
    pub typewriter: TypewriterParams,

    /// Character that forces a page break
    pub page_break: char,
}

impl Stylesheet {
    /// Create a stylesheet with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) stylesheet from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a stylesheet from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Set the paper option.
    pub fn with_paper(mut self, paper: impl Into<String>) -> Self {
        self.paper = paper.into();
        self
    }

    /// Set the page margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Set the typewriter parameters.
    pub fn with_typewriter(mut self, params: TypewriterParams) -> Self {
        self.typewriter = params;
        self
    }

    /// Set the page-break character.
    pub fn with_page_break(mut self, marker: char) -> Self {
        self.page_break = marker;
        self
    }

    /// LaTeX preamble up to and including `\begin{document}`.
    pub fn preamble(&self) -> String {
        let m = &self.margins;
        let t = &self.typewriter;
        let mut out = String::new();
        out.push_str(&format!("\\documentclass[{}]{{minimal}}\n", self.paper));
        out.push_str("\\usepackage[\n");
        out.push_str(&format!(
            "    lmargin={},rmargin={},\n    tmargin={},bmargin={},\n",
            m.left, m.right, m.top, m.bottom
        ));
        out.push_str("]{geometry}\n");
        out.push_str("%!TEX program=lualatex\n");
        for (name, value) in t.commands() {
            out.push_str(&format!("\\providecommand\\{}{{{}}}\n", name, value));
        }
        out.push_str("\\usepackage{typewriter}\n\n");
        out.push_str("\\begin{document}\n");
        out.push_str("\\pagestyle{empty}\n");
        out
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self {
            paper: "a4paper".to_string(),
            margins: Margins::default(),
            typewriter: TypewriterParams::default(),
            page_break: FORM_FEED,
        }
    }
}

/// Page margins as TeX dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    /// Left margin (`lmargin`)
    pub left: String,

    /// Right margin (`rmargin`)
    pub right: String,

    /// Top margin (`tmargin`)
    pub top: String,

    /// Bottom margin (`bmargin`)
    pub bottom: String,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: "2.3cm".to_string(),
            right: "0.3cm".to_string(),
            top: "2.7cm".to_string(),
            bottom: "2.7cm".to_string(),
        }
    }
}

/// Ink and jitter settings understood by the `typewriter` package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterParams {
    /// Grey level of the first ink layer (`\ttgreyone`)
    pub grey_one: String,

    /// Grey level of the second ink layer (`\ttgreytwo`)
    pub grey_two: String,

    /// Rotation jitter of bold glyphs (`\ttrotatebold`)
    pub rotate_bold: String,

    /// Vertical jitter of bold glyphs (`\ttdownbold`)
    pub down_bold: String,

    /// Horizontal jitter of bold glyphs (`\ttrightbold`)
    pub right_bold: String,

    /// Vertical offset of the second ink layer (`\ttdownshifttwo`)
    pub down_shift_two: String,

    /// Rotation jitter of regular glyphs (`\ttrotatenormal`)
    pub rotate_normal: String,

    /// Horizontal jitter of regular glyphs (`\ttrightnormal`)
    pub right_normal: String,

    /// Vertical jitter of regular glyphs (`\ttdownnormal`)
    pub down_normal: String,
}

impl TypewriterParams {
    /// Package macro names paired with their values.
    fn commands(&self) -> [(&'static str, &str); 9] {
        [
            ("ttgreyone", self.grey_one.as_str()),
            ("ttgreytwo", self.grey_two.as_str()),
            ("ttrotatebold", self.rotate_bold.as_str()),
            ("ttdownbold", self.down_bold.as_str()),
            ("ttrightbold", self.right_bold.as_str()),
            ("ttdownshifttwo", self.down_shift_two.as_str()),
            ("ttrotatenormal", self.rotate_normal.as_str()),
            ("ttrightnormal", self.right_normal.as_str()),
            ("ttdownnormal", self.down_normal.as_str()),
        ]
    }
}

impl Default for TypewriterParams {
    fn default() -> Self {
        Self {
            grey_one: ".2".to_string(),
            grey_two: ".2".to_string(),
            rotate_bold: "0".to_string(),
            down_bold: "0".to_string(),
            right_bold: "0".to_string(),
            down_shift_two: "0".to_string(),
            rotate_normal: "0".to_string(),
            right_normal: "0".to_string(),
            down_normal: "0".to_string(),
        }
    }
}
