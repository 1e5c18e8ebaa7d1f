use crate::colour::Colour;
use crate::metrics::SpanFont;
use crate::units::Pt;
use std::fmt;

/// A run of text set in a single font and colour
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
}

impl TextRun {
    /// Create a run, normalizing `\r\n` and `\r` line endings to `\n`
    pub fn new<S: AsRef<str>>(text: S, font: SpanFont, colour: Colour) -> TextRun {
        let text = text.as_ref().replace("\r\n", "\n").replace('\r', "\n");
        TextRun { text, font, colour }
    }
}

/// An image placed on the baseline, like a very large glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InlineImage {
    pub image_id: usize,
    pub width: Pt,
    pub height: Pt,
}

/// The inline items a paragraph is made of
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(TextRun),
    Image(InlineImage),
    /// Fixed horizontal space that is never stretched or broken
    Space(Pt),
    /// Advance to the next tab stop
    Tab,
    /// Explicit end of line
    LineBreak,
}

impl Inline {
    /// Shorthand for a black text run
    pub fn text<S: AsRef<str>>(text: S, font: SpanFont) -> Inline {
        Inline::Text(TextRun::new(text, font, Colour::default()))
    }

    pub fn image(image_id: usize, width: Pt, height: Pt) -> Inline {
        Inline::Image(InlineImage {
            image_id,
            width,
            height,
        })
    }
}

impl fmt::Display for Inline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inline::Text(run) => f.write_str(&run.text),
            Inline::Image(image) => write!(f, "[image {}]", image.image_id),
            Inline::Space(_) => f.write_str(" "),
            Inline::Tab => f.write_str("\t"),
            Inline::LineBreak => f.write_str("\n"),
        }
    }
}
