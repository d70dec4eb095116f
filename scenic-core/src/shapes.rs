//! Built-in paintables: styled paths, text labels and images.

use serde::{Deserialize, Serialize};

use crate::{Color, CoreResult, Dimension, Path, Point, Style, Surface};

/// A path painted with a style.
///
/// Filled when the style carries a fill, stroked when it carries a stroke;
/// both when it carries both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathShape {
    /// The path geometry in the local frame.
    pub path: Path,
    /// How to paint the path.
    pub style: Style,
}

impl PathShape {
    /// Create a shape from a path and style.
    #[must_use]
    pub fn new(path: Path, style: Style) -> Self {
        Self { path, style }
    }

    /// A styled axis-aligned rectangle anchored at the local origin.
    #[must_use]
    pub fn rectangle(size: Dimension, style: Style) -> Self {
        Self::new(Path::rectangle(Point::ORIGIN, size), style)
    }

    /// A styled full ellipse inscribed into a box of the given size.
    #[must_use]
    pub fn ellipse(size: Dimension, style: Style) -> Self {
        Self::new(
            Path::ellipse(size, 0.0, 0.0, 2.0 * std::f64::consts::PI),
            style,
        )
    }
}

impl crate::Paintable for PathShape {
    fn paint(&self, surface: &mut dyn Surface) -> CoreResult<()> {
        self.style.prepare(surface);

        if self.style.has_fill() {
            surface.fill_path(&self.path);
        }

        if self.style.has_stroke() {
            surface.stroke_path(&self.path);
        }

        Ok(())
    }
}

/// A text label anchored at the local origin.
///
/// Filled when the style carries a fill (the default is black fill),
/// otherwise stroked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    /// The text content.
    pub text: String,
    /// How to paint the text.
    pub style: Style,
}

impl Text {
    /// Create a label, defaulting to a black fill when the style requests
    /// neither fill nor stroke.
    #[must_use]
    pub fn new(text: impl Into<String>, mut style: Style) -> Self {
        if style.fill.is_none() && style.stroke.is_none() {
            style.fill = Some(Color::from_rgb_bytes(0, 0, 0));
        }

        Self {
            text: text.into(),
            style,
        }
    }
}

impl crate::Paintable for Text {
    fn paint(&self, surface: &mut dyn Surface) -> CoreResult<()> {
        self.style.prepare(surface);

        if self.style.has_fill() {
            surface.fill_text(&self.text, Point::ORIGIN);
        } else {
            surface.stroke_text(&self.text, Point::ORIGIN);
        }

        Ok(())
    }
}

/// Reference to a host-managed image resource.
///
/// The engine never decodes pixels; the surface resolves the key to actual
/// image data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Host-side resource key (URI, cache key, ...).
    pub key: String,
    /// Natural size of the image in local units.
    pub size: Dimension,
}

impl ImageRef {
    /// Create an image reference.
    #[must_use]
    pub fn new(key: impl Into<String>, size: Dimension) -> Self {
        Self {
            key: key.into(),
            size,
        }
    }
}

impl crate::Paintable for ImageRef {
    fn paint(&self, surface: &mut dyn Surface) -> CoreResult<()> {
        surface.draw_image(self);
        Ok(())
    }
}
