//! Sparse paint-style descriptions.
//!
//! A [`Style`] only carries the paint attributes it wants to change. Applying
//! it via [`Style::prepare`] is read-modify: unset fields leave the surface's
//! current paint state untouched, so callers scope applications with
//! save/restore when attributes must not leak between siblings.

use serde::{Deserialize, Serialize};

use crate::{Color, Surface};

/// Font size used when only a font family is configured.
const DEFAULT_FONT_SIZE: f64 = 10.0;
/// Font family used when only a font size is configured.
const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Shape of stroke endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    /// Flat edge at the endpoint.
    Butt,
    /// Semicircle around the endpoint.
    Round,
    /// Square extending past the endpoint.
    Square,
}

/// Shape of stroke corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    /// Sharp corner.
    Miter,
    /// Rounded corner.
    Round,
    /// Flattened corner.
    Bevel,
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Align to the writing-direction start.
    Start,
    /// Align to the writing-direction end.
    End,
    /// Align left.
    Left,
    /// Align right.
    Right,
    /// Center on the anchor.
    Center,
}

/// Text writing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    /// Left to right.
    Ltr,
    /// Right to left.
    Rtl,
}

/// An immutable, sparse paint-style description.
///
/// Every field is optional; a default `Style` changes nothing when prepared.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Style {
    /// Fill color, if filling is desired.
    pub fill: Option<Color>,
    /// Stroke color, if stroking is desired.
    pub stroke: Option<Color>,
    /// Stroke width in local units.
    pub line_width: Option<f64>,
    /// Stroke endpoint shape.
    pub line_cap: Option<LineCap>,
    /// Stroke corner shape.
    pub line_join: Option<LineJoin>,
    /// Dash pattern (on/off lengths).
    pub line_dash: Option<Vec<f64>>,
    /// Horizontal shadow offset.
    pub shadow_offset_x: Option<f64>,
    /// Vertical shadow offset.
    pub shadow_offset_y: Option<f64>,
    /// Shadow blur radius.
    pub shadow_blur: Option<f64>,
    /// Shadow color.
    pub shadow_color: Option<Color>,
    /// Font size in local units.
    pub font_size: Option<f64>,
    /// Font family name.
    pub font_family: Option<String>,
    /// Horizontal text alignment.
    pub text_align: Option<TextAlign>,
    /// Text writing direction.
    pub direction: Option<TextDirection>,
}

impl Style {
    /// Create an empty style that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fill color.
    #[must_use]
    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    /// Set the stroke color.
    #[must_use]
    pub fn with_stroke(mut self, color: Color) -> Self {
        self.stroke = Some(color);
        self
    }

    /// Set the stroke width.
    #[must_use]
    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = Some(width);
        self
    }

    /// Set the stroke endpoint shape.
    #[must_use]
    pub fn with_line_cap(mut self, cap: LineCap) -> Self {
        self.line_cap = Some(cap);
        self
    }

    /// Set the stroke corner shape.
    #[must_use]
    pub fn with_line_join(mut self, join: LineJoin) -> Self {
        self.line_join = Some(join);
        self
    }

    /// Set the dash pattern.
    #[must_use]
    pub fn with_line_dash(mut self, dash: Vec<f64>) -> Self {
        self.line_dash = Some(dash);
        self
    }

    /// Set the shadow offset.
    #[must_use]
    pub fn with_shadow_offset(mut self, x: f64, y: f64) -> Self {
        self.shadow_offset_x = Some(x);
        self.shadow_offset_y = Some(y);
        self
    }

    /// Set the shadow blur radius.
    #[must_use]
    pub fn with_shadow_blur(mut self, blur: f64) -> Self {
        self.shadow_blur = Some(blur);
        self
    }

    /// Set the shadow color.
    #[must_use]
    pub fn with_shadow_color(mut self, color: Color) -> Self {
        self.shadow_color = Some(color);
        self
    }

    /// Set the font size.
    #[must_use]
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Set the font family.
    #[must_use]
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// Set the text alignment.
    #[must_use]
    pub fn with_text_align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }

    /// Set the text direction.
    #[must_use]
    pub fn with_direction(mut self, direction: TextDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Whether this style requests filling.
    #[must_use]
    pub fn has_fill(&self) -> bool {
        self.fill.is_some()
    }

    /// Whether this style requests stroking.
    #[must_use]
    pub fn has_stroke(&self) -> bool {
        self.stroke.is_some()
    }

    /// Apply the set fields to the surface's paint state.
    ///
    /// Unset fields are left untouched; this never resets the surface.
    pub fn prepare(&self, surface: &mut dyn Surface) {
        if let Some(fill) = self.fill {
            surface.set_fill_color(fill);
        }

        if let Some(stroke) = self.stroke {
            surface.set_stroke_color(stroke);
        }

        if let Some(width) = self.line_width {
            surface.set_line_width(width);
        }

        if let Some(ref dash) = self.line_dash {
            surface.set_line_dash(dash);
        }

        if let Some(cap) = self.line_cap {
            surface.set_line_cap(cap);
        }

        if let Some(join) = self.line_join {
            surface.set_line_join(join);
        }

        if let Some(x) = self.shadow_offset_x {
            surface.set_shadow_offset_x(x);
        }

        if let Some(y) = self.shadow_offset_y {
            surface.set_shadow_offset_y(y);
        }

        if let Some(blur) = self.shadow_blur {
            surface.set_shadow_blur(blur);
        }

        if let Some(color) = self.shadow_color {
            surface.set_shadow_color(color);
        }

        if self.font_size.is_some() || self.font_family.is_some() {
            surface.set_font(
                self.font_size.unwrap_or(DEFAULT_FONT_SIZE),
                self.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY),
            );
        }

        if let Some(align) = self.text_align {
            surface.set_text_align(align);
        }

        if let Some(direction) = self.direction {
            surface.set_text_direction(direction);
        }
    }
}
