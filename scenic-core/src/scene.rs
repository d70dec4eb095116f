//! The scene graph: paintable elements organized into layers.
//!
//! Array order is paint order (back to front). Hit-testing walks the same
//! arrays in reverse so the front-most painted element wins, keeping hit
//! order consistent with visual stacking.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CoreResult, Dimension, Path, Point, Style, Surface};

/// Margin by which a selection frame is inflated around an element outline.
const SELECTION_FRAME_MARGIN: Dimension = Dimension::square(8.0);

/// Identity of a scene element, stable for the element's lifetime.
///
/// Either caller-supplied or generated randomly. IDs must be unique across
/// the whole scene; hit-testing and [`Scene::find_element`] assume one flat
/// namespace spanning all layers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(String);

impl ElementId {
    /// Create an element ID from a caller-supplied string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a random element ID.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// The ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A shape that can render itself onto a [`Surface`].
///
/// Paintables draw in a local coordinate frame with `(0, 0)` as their
/// reference; any translation and scaling has been applied before.
pub trait Paintable: std::fmt::Debug {
    /// Paint this shape onto the surface.
    ///
    /// # Errors
    ///
    /// Implementations may fail, e.g. when a backing resource is gone; the
    /// surrounding paint traversal restores surface state regardless.
    fn paint(&self, surface: &mut dyn Surface) -> CoreResult<()>;
}

/// A paintable with an offset inside its element's frame.
#[derive(Debug)]
pub struct PositionedPaintable {
    /// Offset of the paintable within the element frame.
    pub at: Point,
    /// The shape to paint.
    pub paintable: Box<dyn Paintable>,
}

impl PositionedPaintable {
    /// Place a paintable at the given offset.
    #[must_use]
    pub fn new(at: Point, paintable: Box<dyn Paintable>) -> Self {
        Self { at, paintable }
    }

    /// Place a paintable at the local origin.
    #[must_use]
    pub fn at_origin(paintable: Box<dyn Paintable>) -> Self {
        Self::new(Point::ORIGIN, paintable)
    }

    /// Paint inside a scoped save/translate/restore block.
    ///
    /// The surface state is restored even if painting fails.
    pub fn paint(&self, surface: &mut dyn Surface) -> CoreResult<()> {
        surface.save();
        surface.translate(Dimension::from_origin(self.at));
        let result = self.paintable.paint(surface);
        surface.restore();
        result
    }
}

/// An identified, positioned, optionally selectable and movable drawable
/// unit.
///
/// Owned exclusively by the [`Layer`] that holds it. Only `at` (drags) and
/// `selected` (taps) are mutated after construction.
#[derive(Debug)]
pub struct SceneElement {
    /// Stable identity, unique across the scene.
    pub id: ElementId,
    /// Element origin in scene space.
    pub at: Point,
    /// Whether hit-testing considers this element.
    pub selectable: bool,
    /// Whether drags may move this element.
    pub movable: bool,
    /// Whether the element is currently selected.
    pub selected: bool,
    /// Closed hit-test region in the element's local frame.
    pub outline: Option<Path>,
    /// The shapes painted for this element, in order.
    pub paintables: Vec<PositionedPaintable>,
}

impl SceneElement {
    /// Create an element with a random ID at the scene origin.
    #[must_use]
    pub fn new(paintables: Vec<PositionedPaintable>) -> Self {
        Self {
            id: ElementId::random(),
            at: Point::ORIGIN,
            selectable: false,
            movable: false,
            selected: false,
            outline: None,
            paintables,
        }
    }

    /// Set a caller-supplied ID.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the element origin in scene space.
    #[must_use]
    pub fn with_at(mut self, at: Point) -> Self {
        self.at = at;
        self
    }

    /// Set the hit-test outline, making the element selectable.
    #[must_use]
    pub fn with_outline(mut self, outline: Path) -> Self {
        self.outline = Some(outline);
        self.selectable = true;
        self
    }

    /// Set whether drags may move this element.
    #[must_use]
    pub fn with_movable(mut self, movable: bool) -> Self {
        self.movable = movable;
        self
    }

    /// Whether the given scene-space point lies within the element outline.
    ///
    /// Elements without an outline never contain any point.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        let local = p.translate(-self.at.x, -self.at.y);
        self.outline.as_ref().is_some_and(|o| o.contains(local))
    }

    /// Paint the element: translate to its origin, paint each positioned
    /// paintable, then the selection frame if selected.
    ///
    /// The surface state is restored unconditionally, even on paint failure.
    ///
    /// # Errors
    ///
    /// Propagates the first paintable failure.
    pub fn paint(&self, surface: &mut dyn Surface, selection_style: &Style) -> CoreResult<()> {
        surface.save();
        let result = self.paint_content(surface, selection_style);
        surface.restore();
        result
    }

    fn paint_content(
        &self,
        surface: &mut dyn Surface,
        selection_style: &Style,
    ) -> CoreResult<()> {
        surface.translate(Dimension::from_origin(self.at));

        for p in &self.paintables {
            p.paint(surface)?;
        }

        if self.selected {
            self.paint_selection_frame(surface, selection_style);
        }

        Ok(())
    }

    /// Stroke the outline bounds, inflated by a fixed margin.
    ///
    /// A selected element without an outline is a collaborator
    /// inconsistency: log and skip the frame instead of failing the paint.
    fn paint_selection_frame(&self, surface: &mut dyn Surface, selection_style: &Style) {
        let Some(bounds) = self.outline.as_ref().and_then(Path::bounds) else {
            tracing::warn!(element = %self.id, "selected element has no outline, skipping selection frame");
            return;
        };

        let frame = bounds.resize(SELECTION_FRAME_MARGIN);
        selection_style.prepare(surface);
        surface.stroke_path(&Path::rectangle(
            frame.upper_left,
            Dimension::new(frame.width(), frame.height()),
        ));
    }
}

/// A named, ordered sequence of elements sharing one paint-order tier.
#[derive(Debug)]
pub struct Layer {
    /// Layer name, unique within the scene.
    pub id: String,
    /// Elements in paint order (back to front).
    pub elements: Vec<SceneElement>,
}

impl Layer {
    /// Create a layer holding the given elements.
    #[must_use]
    pub fn new(id: impl Into<String>, elements: Vec<SceneElement>) -> Self {
        Self {
            id: id.into(),
            elements,
        }
    }

    /// Paint all elements in order.
    ///
    /// # Errors
    ///
    /// Propagates the first element paint failure.
    pub fn paint(&self, surface: &mut dyn Surface, selection_style: &Style) -> CoreResult<()> {
        for element in &self.elements {
            element.paint(surface, selection_style)?;
        }
        Ok(())
    }

    /// The front-most selectable element whose outline contains the point.
    ///
    /// Iterates in reverse paint order so the last-painted element wins.
    #[must_use]
    pub fn first_hit(&self, p: Point) -> Option<&SceneElement> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.selectable && e.contains(p))
    }

    /// All selected elements in paint order.
    #[must_use]
    pub fn selected(&self) -> Vec<&SceneElement> {
        self.elements.iter().filter(|e| e.selected).collect()
    }

    /// Clear the selected flag on every element.
    pub fn unselect_all(&mut self) {
        for e in &mut self.elements {
            e.selected = false;
        }
    }

    /// Find an element by ID.
    #[must_use]
    pub fn find_element(&self, id: &ElementId) -> Option<&SceneElement> {
        self.elements.iter().find(|e| &e.id == id)
    }

    /// Find an element by ID, mutably.
    pub fn find_element_mut(&mut self, id: &ElementId) -> Option<&mut SceneElement> {
        self.elements.iter_mut().find(|e| &e.id == id)
    }
}

/// The drawable world: an ordered sequence of layers.
///
/// Layers share a single viewport; they are not independently transformable.
#[derive(Debug, Default)]
pub struct Scene {
    /// Layers in paint order (bottom to top).
    pub layers: Vec<Layer>,
}

impl Scene {
    /// Create a scene from layers in paint order.
    #[must_use]
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    /// Paint all layers bottom to top.
    ///
    /// # Errors
    ///
    /// Propagates the first layer paint failure.
    pub fn paint(&self, surface: &mut dyn Surface, selection_style: &Style) -> CoreResult<()> {
        for layer in &self.layers {
            layer.paint(surface, selection_style)?;
        }
        Ok(())
    }

    /// The top-most selectable element whose outline contains the point.
    ///
    /// Checks the top layer first, matching visual stacking.
    #[must_use]
    pub fn first_hit(&self, p: Point) -> Option<&SceneElement> {
        self.layers.iter().rev().find_map(|l| l.first_hit(p))
    }

    /// All selected elements, concatenated in layer order.
    ///
    /// Iteration order is stable and deterministic for reproducible event
    /// payloads.
    #[must_use]
    pub fn selected(&self) -> Vec<&SceneElement> {
        self.layers.iter().flat_map(Layer::selected).collect()
    }

    /// Mutable access to all selected elements, in layer order.
    pub fn selected_mut(&mut self) -> impl Iterator<Item = &mut SceneElement> {
        self.layers
            .iter_mut()
            .flat_map(|l| l.elements.iter_mut())
            .filter(|e| e.selected)
    }

    /// Whether any element is selected.
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.layers
            .iter()
            .any(|l| l.elements.iter().any(|e| e.selected))
    }

    /// Clear the selected flag on every element across all layers.
    pub fn unselect_all(&mut self) {
        for layer in &mut self.layers {
            layer.unselect_all();
        }
    }

    /// Find an element anywhere in the scene by ID.
    #[must_use]
    pub fn find_element(&self, id: &ElementId) -> Option<&SceneElement> {
        self.layers.iter().find_map(|l| l.find_element(id))
    }

    /// Find an element anywhere in the scene by ID, mutably.
    pub fn find_element_mut(&mut self, id: &ElementId) -> Option<&mut SceneElement> {
        self.layers.iter_mut().find_map(|l| l.find_element_mut(id))
    }

    /// Find a layer by name.
    #[must_use]
    pub fn find_layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }
}
