use super::margins::Margins;
use crate::units::Pt;
use crate::LayoutError;

/// Horizontal placement of lines within a paragraph
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
    /// Stretch every line that wrapped because it ran out of width; lines
    /// ended by an explicit break and the last line stay left-aligned
    Justified,
    /// Stretch every line, including the last one
    JustifiedAll,
}

/// Placement of lines inside a paragraph taller than its content
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Spacing between consecutive baselines
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Leading {
    /// A fixed distance
    Fixed(Pt),
    /// A multiple of each line's own height
    Multiplied(f32),
}

/// A length that may depend on the width available to the paragraph
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Pt(Pt),
    /// Percentage (0–100) of the available width
    Percent(f32),
}

impl Length {
    pub fn resolve(&self, available: Pt) -> Pt {
        match *self {
            Length::Pt(pt) => pt,
            Length::Percent(percent) => available * (percent / 100.0),
        }
    }
}

/// Absolute position of a paragraph's occupied area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: Pt,
    pub y: Pt,
}

/// An explicit tab stop, measured from the start of the line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabStop {
    pub position: Pt,
}

/// Tab configuration handed to every line of a paragraph
#[derive(Debug, Clone, PartialEq)]
pub struct TabSettings {
    /// Interval of the implicit stops used after the explicit ones run out
    pub default_interval: Pt,
    pub stops: Vec<TabStop>,
}

impl Default for TabSettings {
    fn default() -> Self {
        TabSettings {
            default_interval: Pt(50.0),
            stops: Vec::new(),
        }
    }
}

impl TabSettings {
    /// The next stop strictly after `offset` (measured from the line start)
    pub fn next_stop(&self, offset: Pt) -> Pt {
        if let Some(stop) = self.stops.iter().find(|stop| stop.position > offset) {
            return stop.position;
        }
        if self.default_interval <= Pt::ZERO {
            return offset;
        }
        let interval = self.default_interval;
        interval * ((offset.0 / interval.0).floor() + 1.0)
    }
}

/// Everything that controls how a paragraph is placed. Resolved once when a
/// fragment is created and shared with its continuations.
///
/// ```
/// use pdf_flow::layout::{Leading, ParagraphConfig, TextAlignment};
/// use pdf_flow::Pt;
///
/// let mut config = ParagraphConfig::new();
/// config
///     .text_alignment(TextAlignment::Justified)
///     .leading(Leading::Multiplied(1.2))
///     .first_line_indent(Pt(18.0));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParagraphConfig {
    pub text_alignment: TextAlignment,
    pub vertical_alignment: VerticalAlignment,
    pub leading: Option<Leading>,
    pub first_line_indent: Pt,
    pub keep_together: bool,
    /// Rotation in radians, counter-clockwise
    pub rotation: Option<f32>,
    /// When set, the paragraph is absolutely positioned
    pub position: Option<Position>,
    pub width: Option<Length>,
    pub height: Option<Pt>,
    /// Absolute positions are page coordinates rather than offsets from the
    /// area's origin
    pub fixed_layout: bool,
    pub tabs: TabSettings,
    pub margins: Margins,
    pub borders: Margins,
    pub padding: Margins,
}

impl ParagraphConfig {
    pub fn new() -> ParagraphConfig {
        ParagraphConfig::default()
    }

    pub fn text_alignment(&mut self, alignment: TextAlignment) -> &mut Self {
        self.text_alignment = alignment;
        self
    }

    pub fn vertical_alignment(&mut self, alignment: VerticalAlignment) -> &mut Self {
        self.vertical_alignment = alignment;
        self
    }

    pub fn leading(&mut self, leading: Leading) -> &mut Self {
        self.leading = Some(leading);
        self
    }

    pub fn first_line_indent<P: Into<Pt>>(&mut self, indent: P) -> &mut Self {
        self.first_line_indent = indent.into();
        self
    }

    pub fn keep_together(&mut self, keep_together: bool) -> &mut Self {
        self.keep_together = keep_together;
        self
    }

    pub fn rotation(&mut self, radians: f32) -> &mut Self {
        self.rotation = Some(radians);
        self
    }

    /// Position the paragraph absolutely. Coordinates are relative to the
    /// area unless [`fixed_layout`](ParagraphConfig::fixed_layout) is set.
    pub fn position<P: Into<Pt>>(&mut self, x: P, y: P) -> &mut Self {
        self.position = Some(Position {
            x: x.into(),
            y: y.into(),
        });
        self
    }

    pub fn fixed_layout(&mut self, fixed: bool) -> &mut Self {
        self.fixed_layout = fixed;
        self
    }

    pub fn width(&mut self, width: Length) -> &mut Self {
        self.width = Some(width);
        self
    }

    pub fn height<P: Into<Pt>>(&mut self, height: P) -> &mut Self {
        self.height = Some(height.into());
        self
    }

    pub fn tabs(&mut self, tabs: TabSettings) -> &mut Self {
        self.tabs = tabs;
        self
    }

    pub fn margins(&mut self, margins: Margins) -> &mut Self {
        self.margins = margins;
        self
    }

    pub fn borders(&mut self, borders: Margins) -> &mut Self {
        self.borders = borders;
        self
    }

    pub fn padding(&mut self, padding: Margins) -> &mut Self {
        self.padding = padding;
        self
    }

    pub fn is_positioned(&self) -> bool {
        self.position.is_some()
    }

    /// Reject lengths and angles the layout engine cannot work with
    pub fn validate(&self) -> Result<(), LayoutError> {
        fn check(property: &'static str, value: Pt) -> Result<(), LayoutError> {
            if value.is_finite() && value >= Pt::ZERO {
                Ok(())
            } else {
                Err(LayoutError::InvalidLength { property, value })
            }
        }

        if !self.first_line_indent.is_finite() {
            return Err(LayoutError::InvalidLength {
                property: "first line indent",
                value: self.first_line_indent,
            });
        }
        if let Some(height) = self.height {
            check("height", height)?;
        }
        match self.width {
            Some(Length::Pt(width)) => check("width", width)?,
            Some(Length::Percent(percent)) => check("width", Pt(percent))?,
            None => {}
        }
        if let Some(Leading::Fixed(leading)) = self.leading {
            check("leading", leading)?;
        }
        if let Some(Leading::Multiplied(factor)) = self.leading {
            check("leading", Pt(factor))?;
        }
        check("tab interval", self.tabs.default_interval)?;
        for (property, insets) in [
            ("margin", self.margins),
            ("border", self.borders),
            ("padding", self.padding),
        ] {
            for side in insets.sides() {
                check(property, side)?;
            }
        }
        if let Some(Position { x, y }) = self.position {
            if !x.is_finite() || !y.is_finite() {
                return Err(LayoutError::InvalidLength {
                    property: "position",
                    value: if x.is_finite() { y } else { x },
                });
            }
        }
        match self.rotation {
            Some(angle) if !angle.is_finite() => Err(LayoutError::InvalidRotation(angle)),
            _ => Ok(()),
        }
    }
}
