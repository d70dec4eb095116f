//! The raster surface seam.
//!
//! [`Surface`] abstracts the 2D raster target the scene graph paints onto:
//! path fill/stroke, text, sparse paint-state setters and pixel-space sizing.
//! Hosts adapt their actual canvas (GPU surface, browser canvas, pixmap) to
//! this trait; [`RecordingSurface`] is a headless implementation that records
//! a typed op log, useful for server-side scene validation and for tests.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shapes::ImageRef;
use crate::{Color, Dimension, LineCap, LineJoin, Path, Point, TextAlign, TextDirection};

/// Unique identity of a raster surface, used to track engine bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(Uuid);

impl SurfaceId {
    /// Create a new unique surface ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for SurfaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 2D raster target offering path fill/stroke and text primitives.
///
/// Paint state (fill, stroke, line, shadow, font) and the coordinate
/// transform are part of a save/restore stack: [`Surface::save`] pushes the
/// current state, [`Surface::restore`] pops it. Paintables rely on this to
/// keep attributes from leaking between siblings.
pub trait Surface {
    /// Stable identity of this surface.
    fn id(&self) -> SurfaceId;

    /// Current backing size in device pixels.
    fn size(&self) -> Dimension;

    /// Size of the host layout box the surface should track.
    fn layout_size(&self) -> Dimension;

    /// Resize the backing store.
    fn resize(&mut self, size: Dimension);

    /// Clear all pixels.
    fn clear(&mut self);

    /// Push the current paint state and transform.
    fn save(&mut self);

    /// Pop the most recently saved paint state and transform.
    fn restore(&mut self);

    /// Translate the coordinate frame.
    fn translate(&mut self, offset: Dimension);

    /// Scale the coordinate frame uniformly.
    fn scale(&mut self, factor: f64);

    /// Set the fill color.
    fn set_fill_color(&mut self, color: Color);

    /// Set the stroke color.
    fn set_stroke_color(&mut self, color: Color);

    /// Set the stroke width.
    fn set_line_width(&mut self, width: f64);

    /// Set the stroke endpoint shape.
    fn set_line_cap(&mut self, cap: LineCap);

    /// Set the stroke corner shape.
    fn set_line_join(&mut self, join: LineJoin);

    /// Set the dash pattern.
    fn set_line_dash(&mut self, dash: &[f64]);

    /// Set the horizontal shadow offset.
    fn set_shadow_offset_x(&mut self, offset: f64);

    /// Set the vertical shadow offset.
    fn set_shadow_offset_y(&mut self, offset: f64);

    /// Set the shadow blur radius.
    fn set_shadow_blur(&mut self, blur: f64);

    /// Set the shadow color.
    fn set_shadow_color(&mut self, color: Color);

    /// Set font size and family.
    fn set_font(&mut self, size: f64, family: &str);

    /// Set the horizontal text alignment.
    fn set_text_align(&mut self, align: TextAlign);

    /// Set the text writing direction.
    fn set_text_direction(&mut self, direction: TextDirection);

    /// Fill an axis-aligned rectangle with the current fill color.
    fn fill_rect(&mut self, at: Point, size: Dimension);

    /// Fill a path area with the current fill color.
    fn fill_path(&mut self, path: &Path);

    /// Stroke a path outline with the current stroke state.
    fn stroke_path(&mut self, path: &Path);

    /// Fill text anchored at the given point.
    fn fill_text(&mut self, text: &str, at: Point);

    /// Stroke text anchored at the given point.
    fn stroke_text(&mut self, text: &str, at: Point);

    /// Draw an image with its upper-left corner at the local origin.
    fn draw_image(&mut self, image: &ImageRef);
}

/// A single operation recorded by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)] // Variants mirror the Surface methods one to one.
pub enum SurfaceOp {
    Resize(Dimension),
    Clear,
    Save,
    Restore,
    Translate(Dimension),
    Scale(f64),
    SetFillColor(Color),
    SetStrokeColor(Color),
    SetLineWidth(f64),
    SetLineCap(LineCap),
    SetLineJoin(LineJoin),
    SetLineDash(Vec<f64>),
    SetShadowOffsetX(f64),
    SetShadowOffsetY(f64),
    SetShadowBlur(f64),
    SetShadowColor(Color),
    SetFont { size: f64, family: String },
    SetTextAlign(TextAlign),
    SetTextDirection(TextDirection),
    FillRect { at: Point, size: Dimension },
    FillPath(Path),
    StrokePath(Path),
    FillText { text: String, at: Point },
    StrokeText { text: String, at: Point },
    DrawImage(ImageRef),
}

/// A headless [`Surface`] that records every operation.
///
/// Produces no pixels; the recorded op log lets callers verify exactly what
/// was painted and in which order.
#[derive(Debug)]
pub struct RecordingSurface {
    id: SurfaceId,
    size: Dimension,
    layout_size: Dimension,
    ops: Vec<SurfaceOp>,
    save_depth: usize,
}

impl RecordingSurface {
    /// Create a recording surface whose backing and layout size both start at
    /// the given dimension.
    #[must_use]
    pub fn new(size: Dimension) -> Self {
        Self {
            id: SurfaceId::new(),
            size,
            layout_size: size,
            ops: Vec::new(),
            save_depth: 0,
        }
    }

    /// Change the host layout box, simulating a window resize.
    pub fn set_layout_size(&mut self, size: Dimension) {
        self.layout_size = size;
    }

    /// All recorded operations in order.
    #[must_use]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Drop all recorded operations.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Current depth of the save/restore stack.
    ///
    /// Zero after every balanced paint.
    #[must_use]
    pub fn save_depth(&self) -> usize {
        self.save_depth
    }
}

impl Surface for RecordingSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn size(&self) -> Dimension {
        self.size
    }

    fn layout_size(&self) -> Dimension {
        self.layout_size
    }

    fn resize(&mut self, size: Dimension) {
        self.size = size;
        self.ops.push(SurfaceOp::Resize(size));
    }

    fn clear(&mut self) {
        self.ops.push(SurfaceOp::Clear);
    }

    fn save(&mut self) {
        self.save_depth += 1;
        self.ops.push(SurfaceOp::Save);
    }

    fn restore(&mut self) {
        self.save_depth = self.save_depth.saturating_sub(1);
        self.ops.push(SurfaceOp::Restore);
    }

    fn translate(&mut self, offset: Dimension) {
        self.ops.push(SurfaceOp::Translate(offset));
    }

    fn scale(&mut self, factor: f64) {
        self.ops.push(SurfaceOp::Scale(factor));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.ops.push(SurfaceOp::SetFillColor(color));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.ops.push(SurfaceOp::SetStrokeColor(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(SurfaceOp::SetLineWidth(width));
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ops.push(SurfaceOp::SetLineCap(cap));
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.ops.push(SurfaceOp::SetLineJoin(join));
    }

    fn set_line_dash(&mut self, dash: &[f64]) {
        self.ops.push(SurfaceOp::SetLineDash(dash.to_vec()));
    }

    fn set_shadow_offset_x(&mut self, offset: f64) {
        self.ops.push(SurfaceOp::SetShadowOffsetX(offset));
    }

    fn set_shadow_offset_y(&mut self, offset: f64) {
        self.ops.push(SurfaceOp::SetShadowOffsetY(offset));
    }

    fn set_shadow_blur(&mut self, blur: f64) {
        self.ops.push(SurfaceOp::SetShadowBlur(blur));
    }

    fn set_shadow_color(&mut self, color: Color) {
        self.ops.push(SurfaceOp::SetShadowColor(color));
    }

    fn set_font(&mut self, size: f64, family: &str) {
        self.ops.push(SurfaceOp::SetFont {
            size,
            family: family.to_string(),
        });
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ops.push(SurfaceOp::SetTextAlign(align));
    }

    fn set_text_direction(&mut self, direction: TextDirection) {
        self.ops.push(SurfaceOp::SetTextDirection(direction));
    }

    fn fill_rect(&mut self, at: Point, size: Dimension) {
        self.ops.push(SurfaceOp::FillRect { at, size });
    }

    fn fill_path(&mut self, path: &Path) {
        self.ops.push(SurfaceOp::FillPath(path.clone()));
    }

    fn stroke_path(&mut self, path: &Path) {
        self.ops.push(SurfaceOp::StrokePath(path.clone()));
    }

    fn fill_text(&mut self, text: &str, at: Point) {
        self.ops.push(SurfaceOp::FillText {
            text: text.to_string(),
            at,
        });
    }

    fn stroke_text(&mut self, text: &str, at: Point) {
        self.ops.push(SurfaceOp::StrokeText {
            text: text.to_string(),
            at,
        });
    }

    fn draw_image(&mut self, image: &ImageRef) {
        self.ops.push(SurfaceOp::DrawImage(image.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_surface_tracks_save_depth() {
        let mut surface = RecordingSurface::new(Dimension::new(100.0, 100.0));
        surface.save();
        surface.save();
        assert_eq!(surface.save_depth(), 2);
        surface.restore();
        surface.restore();
        assert_eq!(surface.save_depth(), 0);
        // Unbalanced restores saturate instead of underflowing.
        surface.restore();
        assert_eq!(surface.save_depth(), 0);
    }

    #[test]
    fn test_resize_updates_size() {
        let mut surface = RecordingSurface::new(Dimension::new(100.0, 100.0));
        surface.resize(Dimension::new(640.0, 480.0));
        assert_eq!(surface.size(), Dimension::new(640.0, 480.0));
        assert_eq!(surface.ops(), &[SurfaceOp::Resize(Dimension::new(640.0, 480.0))]);
    }
}
