//! Font measurement used by the line engine.
//!
//! Glyph shaping is out of scope: text advance is the plain sum of per-character
//! horizontal advances, which is what the default [`Line`](crate::layout::Line)
//! engine needs to decide how much of a run fits.

use crate::units::Pt;
use crate::LayoutError;
use owned_ttf_parser::{AsFaceRef, OwnedFace};

/// The font a span of text is set in: a font index (rendered as `/F{id}` in
/// the content stream) and a size
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: usize,
    pub size: Pt,
}

/// Font measurement queries
pub trait Metrics: Send + Sync {
    /// Horizontal advance of `text` set in `font`
    fn text_width(&self, text: &str, font: SpanFont) -> Pt;

    /// Distance from the baseline to the top of the font (positive)
    fn ascent(&self, font: SpanFont) -> Pt;

    /// Distance from the baseline to the bottom of the font. Note: this is
    /// negative for every real font
    fn descent(&self, font: SpanFont) -> Pt;
}

/// Monospaced metrics where every character advances by a fixed fraction of
/// the font size. Useful for diagnostics and for testing layout without
/// loading font files.
#[derive(Debug, Clone, Copy)]
pub struct MonoMetrics {
    /// advance of a single character, as a fraction of the font size
    pub advance: f32,
    /// ascent as a fraction of the font size
    pub ascent: f32,
    /// descent as a fraction of the font size (negative)
    pub descent: f32,
}

impl Default for MonoMetrics {
    fn default() -> Self {
        MonoMetrics {
            advance: 0.5,
            ascent: 0.8,
            descent: -0.2,
        }
    }
}

impl Metrics for MonoMetrics {
    fn text_width(&self, text: &str, font: SpanFont) -> Pt {
        font.size * (self.advance * text.chars().count() as f32)
    }

    fn ascent(&self, font: SpanFont) -> Pt {
        font.size * self.ascent
    }

    fn descent(&self, font: SpanFont) -> Pt {
        font.size * self.descent
    }
}

/// Metrics read from TrueType / OpenType faces. Faces are indexed by the
/// order they were added, which is the `id` used in [`SpanFont`].
#[derive(Default)]
pub struct TtfMetrics {
    faces: Vec<OwnedFace>,
}

impl TtfMetrics {
    pub fn new() -> TtfMetrics {
        TtfMetrics::default()
    }

    /// Parse a font from raw bytes and register it, returning its font id
    pub fn load(&mut self, bytes: Vec<u8>) -> Result<usize, LayoutError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        self.faces.push(face);
        Ok(self.faces.len() - 1)
    }

    fn scaled(&self, font: SpanFont, units: i16) -> Pt {
        match self.faces.get(font.id) {
            Some(face) => {
                let scaling = font.size / face.as_face_ref().units_per_em() as f32;
                scaling * units as f32
            }
            None => Pt::ZERO,
        }
    }
}

impl Metrics for TtfMetrics {
    fn text_width(&self, text: &str, font: SpanFont) -> Pt {
        let Some(face) = self.faces.get(font.id) else {
            return Pt::ZERO;
        };
        let face = face.as_face_ref();
        let scaling = font.size / face.units_per_em() as f32;
        text.chars()
            .filter_map(|ch| face.glyph_index(ch).or_else(|| face.glyph_index('\u{FFFD}')))
            .map(|gid| scaling * face.glyph_hor_advance(gid).unwrap_or_default() as f32)
            .sum()
    }

    fn ascent(&self, font: SpanFont) -> Pt {
        let units = self
            .faces
            .get(font.id)
            .map(|face| face.as_face_ref().ascender())
            .unwrap_or_default();
        self.scaled(font, units)
    }

    fn descent(&self, font: SpanFont) -> Pt {
        let units = self
            .faces
            .get(font.id)
            .map(|face| face.as_face_ref().descender())
            .unwrap_or_default();
        self.scaled(font, units)
    }
}
