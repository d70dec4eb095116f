//! The interaction engine: one surface, one scene, one viewport, one gesture
//! at a time.

use scenic_core::{
    Color, Dimension, Path, Point, Scene, Style, Surface, SurfaceId, Viewport,
};

use crate::bus::EventBus;
use crate::error::{EngineError, EngineResult};
use crate::event::{DrawingMode, EngineEvent, EventKind, PointerEvent, PointerPhase};
use crate::registry::{BindingRegistry, EngineId};

/// Device-space inset of the default viewport origin.
const DEFAULT_VIEWPORT_INSET: f64 = 5.0;

/// Default grid cell size in scene units.
const DEFAULT_GRID_SIZE: Dimension = Dimension::square(10.0);

/// Translucent blue used for selection and drawing strokes (`#0069dba0`).
const ACCENT_BLUE: Color = Color {
    red: 0.0,
    green: 105.0 / 255.0,
    blue: 219.0 / 255.0,
    alpha: 160.0 / 255.0,
};

/// Shadow glow behind selection and drawing strokes (`#0083ff`).
const GLOW_BLUE: Color = Color {
    red: 0.0,
    green: 131.0 / 255.0,
    blue: 1.0,
    alpha: 1.0,
};

/// Default style used to stroke selection frames.
fn default_selection_style() -> Style {
    Style::new()
        .with_stroke(ACCENT_BLUE)
        .with_line_width(2.0)
        .with_shadow_color(GLOW_BLUE)
        .with_shadow_blur(5.0)
}

/// Default style used to paint the in-progress drawing path.
fn default_drawing_style() -> Style {
    Style::new()
        .with_stroke(ACCENT_BLUE)
        .with_line_width(2.0)
        .with_line_dash(vec![15.0, 5.0])
        .with_shadow_color(GLOW_BLUE)
        .with_shadow_blur(5.0)
}

/// Default style used to stroke grid lines.
fn default_grid_style() -> Style {
    Style::new()
        .with_stroke(Color::from_rgb_bytes(150, 150, 150))
        .with_line_width(1.0)
}

/// Default style used to fill the canvas background.
fn default_background_style() -> Style {
    Style::new().with_fill(Color::from_rgb_bytes(200, 200, 200))
}

/// Construction options for a [`Scenic`] engine.
///
/// All interaction capabilities are off by default; hosts opt into exactly
/// the gestures their view should respond to.
#[derive(Debug, Default)]
#[allow(clippy::struct_excessive_bools)] // Independent capability switches.
pub struct ScenicConfig {
    /// Initial viewport. Defaults to an origin inset of (5, 5) at scale 1.0.
    pub viewport: Option<Viewport>,
    /// Track host layout size changes and resize the backing surface.
    pub resize: bool,
    /// Enable wheel-driven zoom.
    pub zoom: bool,
    /// Enable click-to-select.
    pub select: bool,
    /// Enable panning the scene and dragging selected elements.
    pub movement: bool,
    /// Drawing mode; enables drawing gestures and gates zoom off.
    pub drawing_mode: Option<DrawingMode>,
    /// Style for selection frames.
    pub selection_style: Option<Style>,
    /// Style for the in-progress drawing path.
    pub drawing_style: Option<Style>,
    /// Style for the background fill.
    pub background_style: Option<Style>,
    /// Render a grid beneath the scene.
    pub grid: bool,
    /// Grid cell size in scene units. Defaults to 10x10.
    pub grid_size: Option<Dimension>,
    /// Style for grid lines.
    pub grid_style: Option<Style>,
}

/// Transient state of one pointer gesture, from down to up/cancel.
///
/// Fully reset on every termination path; stale values would make a
/// subsequent tap look like the continuation of an old drag.
#[derive(Debug, Clone, Copy)]
struct GestureState {
    /// Device-space position of the pointer-down.
    origin: Point,
    /// Device-space position of the last processed move.
    last_checkpoint: Point,
}

/// The in-progress drawing: a device-space preview path plus the
/// scene-space vertices visited so far (poly mode only).
#[derive(Debug)]
struct PendingDrawing {
    path: Path,
    points: Vec<Point>,
}

/// The interaction engine.
///
/// Binds to one raster surface, owns one [`Scene`] and one [`Viewport`],
/// interprets pointer/wheel input through a gesture state machine, and
/// coalesces all resulting mutations into at most one repaint per frame.
///
/// [`Scenic::repaint`] only schedules; the host drives actual painting by
/// calling [`Scenic::run_frame`] from its frame-presentation callback.
#[allow(clippy::struct_excessive_bools)] // Mirrors the config switches.
pub struct Scenic<S: Surface> {
    id: EngineId,
    surface: S,
    scene: Scene,
    viewport: Viewport,
    resize: bool,
    zoom: bool,
    select: bool,
    movement: bool,
    drawing_mode: Option<DrawingMode>,
    selection_style: Style,
    drawing_style: Style,
    background_style: Style,
    grid: bool,
    grid_size: Dimension,
    grid_style: Style,
    bus: EventBus,
    gesture: Option<GestureState>,
    pending_drawing: Option<PendingDrawing>,
    repaint_pending: bool,
}

impl<S: Surface> Scenic<S> {
    /// Bind a new engine to a surface.
    ///
    /// Any engine previously bound to the same surface is silently displaced
    /// and stops responding to input. The initial repaint is scheduled; the
    /// host paints it with the next [`Scenic::run_frame`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTarget`] if the surface reports a
    /// degenerate layout box.
    pub fn bind(surface: S, scene: Scene, config: ScenicConfig) -> EngineResult<Self> {
        let layout = surface.layout_size();
        if !layout.x.is_finite() || !layout.y.is_finite() || layout.x < 0.0 || layout.y < 0.0 {
            return Err(EngineError::InvalidTarget(format!(
                "surface {} reports layout box {layout}",
                surface.id()
            )));
        }

        let id = EngineId::next();
        if let Some(previous) = BindingRegistry::global().bind(surface.id(), id) {
            tracing::debug!(surface = %surface.id(), %previous, "displaced previously bound engine");
        }

        let mut engine = Self {
            id,
            surface,
            scene,
            viewport: config.viewport.unwrap_or_else(|| {
                Viewport::new(
                    Point::new(DEFAULT_VIEWPORT_INSET, DEFAULT_VIEWPORT_INSET),
                    1.0,
                )
            }),
            resize: config.resize,
            zoom: config.zoom,
            select: config.select,
            movement: config.movement,
            drawing_mode: config.drawing_mode,
            selection_style: config.selection_style.unwrap_or_else(default_selection_style),
            drawing_style: config.drawing_style.unwrap_or_else(default_drawing_style),
            background_style: config
                .background_style
                .unwrap_or_else(default_background_style),
            grid: config.grid,
            grid_size: config.grid_size.unwrap_or(DEFAULT_GRID_SIZE),
            grid_style: config.grid_style.unwrap_or_else(default_grid_style),
            bus: EventBus::new(),
            gesture: None,
            pending_drawing: None,
            repaint_pending: false,
        };

        engine.repaint();
        Ok(engine)
    }

    /// The engine currently bound to the given surface, if any.
    #[must_use]
    pub fn for_surface(surface: SurfaceId) -> Option<EngineId> {
        BindingRegistry::global().bound(surface)
    }

    /// This engine's process-wide identity.
    #[must_use]
    pub fn engine_id(&self) -> EngineId {
        self.id
    }

    /// Whether this engine still holds the binding for its surface.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        BindingRegistry::global().bound(self.surface.id()) == Some(self.id)
    }

    /// Release the surface binding and reset any in-progress gesture.
    ///
    /// A detached engine ignores all further input.
    pub fn detach(&mut self) {
        BindingRegistry::global().release(self.surface.id(), self.id);
        self.gesture = None;
        self.pending_drawing = None;
    }

    /// Subscribe a listener for one event kind.
    pub fn on(&mut self, kind: EventKind, listener: impl FnMut(&EngineEvent) + 'static) -> &mut Self {
        self.bus.on(kind, listener);
        self
    }

    /// The current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Replace the viewport, scheduling a repaint.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.repaint();
    }

    /// The current scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access to the scene.
    ///
    /// Mutations made this way do not schedule a repaint; call
    /// [`Scenic::repaint`] when done.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Replace the scene wholesale, scheduling a repaint.
    ///
    /// This is an atomic swap, not an incremental diff; selection state of
    /// elements no longer present disappears with the old scene.
    pub fn set_scene(&mut self, scene: Scene) {
        self.scene = scene;
        self.repaint();
    }

    /// The bound surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the bound surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Replace the background style, scheduling a repaint.
    pub fn set_background_style(&mut self, style: Style) {
        self.background_style = style;
        self.repaint();
    }

    /// Toggle the grid, scheduling a repaint.
    pub fn set_grid(&mut self, grid: bool) {
        self.grid = grid;
        self.repaint();
    }

    /// Change the grid cell size, scheduling a repaint.
    pub fn set_grid_size(&mut self, size: Dimension) {
        self.grid_size = size;
        self.repaint();
    }

    /// Replace the grid line style, scheduling a repaint.
    pub fn set_grid_style(&mut self, style: Style) {
        self.grid_style = style;
        self.repaint();
    }

    /// Enable or disable click-to-select.
    pub fn set_select(&mut self, select: bool) {
        self.select = select;
    }

    /// Enable or disable panning and element drags.
    pub fn set_movement(&mut self, movement: bool) {
        self.movement = movement;
    }

    /// Enable or disable wheel-driven zoom.
    pub fn set_zoom(&mut self, zoom: bool) {
        self.zoom = zoom;
    }

    /// Change the drawing mode, dropping any in-progress drawing.
    pub fn set_drawing_mode(&mut self, mode: Option<DrawingMode>) {
        self.drawing_mode = mode;
        if self.pending_drawing.take().is_some() {
            self.repaint();
        }
    }

    /// Handle a unified pointer event.
    ///
    /// Ignored when this engine has been displaced from its surface.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if !self.is_attached() {
            return;
        }

        match event.phase {
            PointerPhase::Down => self.interact_start(event.position),
            PointerPhase::Move => self.interact_move(event.position),
            PointerPhase::Up => self.interact_end(event.position, event.modifier),
            PointerPhase::Cancel => self.interact_cancel(),
        }
    }

    /// Handle a wheel event.
    ///
    /// Zooms the viewport unless zoom is disabled or a drawing mode is
    /// active; `delta_y > 0` zooms out.
    pub fn handle_wheel(&mut self, delta_y: f64) {
        if !self.is_attached() || !self.zoom || self.drawing_mode.is_some() {
            return;
        }

        self.viewport = if delta_y > 0.0 {
            self.viewport.zoom_out()
        } else {
            self.viewport.zoom_in()
        };

        self.repaint();
        self.emit(&EngineEvent::ViewportChanged);
    }

    /// Handle a host window resize.
    ///
    /// Schedules a repaint (which resizes the backing surface to its layout
    /// box) when resize tracking is enabled. Emits no event.
    pub fn handle_resize(&mut self) {
        if !self.is_attached() || !self.resize {
            return;
        }

        self.repaint();
    }

    /// Schedule a repaint for the next frame.
    ///
    /// Idempotent: any number of calls before the next [`Scenic::run_frame`]
    /// coalesce into a single paint of the latest state.
    pub fn repaint(&mut self) {
        self.repaint_pending = true;
    }

    /// The host's frame-presentation callback: paint if a repaint is due.
    ///
    /// Returns whether a paint happened. At most one paint occurs per call
    /// regardless of how many mutations were scheduled since the last one,
    /// and the paint observes the latest state. A detached or displaced
    /// engine paints nothing; the surface belongs to its successor.
    ///
    /// # Errors
    ///
    /// Propagates paint failures from custom paintables; surface state is
    /// restored regardless.
    pub fn run_frame(&mut self) -> EngineResult<bool> {
        if !self.repaint_pending || !self.is_attached() {
            return Ok(false);
        }

        self.repaint_pending = false;
        self.paint()?;
        Ok(true)
    }

    fn interact_start(&mut self, position: Point) {
        tracing::trace!(%position, "gesture start");
        self.gesture = Some(GestureState {
            origin: position,
            last_checkpoint: position,
        });
    }

    fn interact_move(&mut self, position: Point) {
        let Some(mut gesture) = self.gesture else {
            return;
        };

        let drag = gesture.last_checkpoint.diff(position);
        gesture.last_checkpoint = position;
        self.gesture = Some(gesture);

        if let Some(mode) = self.drawing_mode {
            self.update_drawing(mode, gesture.origin, position);
            self.repaint();
            return;
        }

        if !self.movement {
            return;
        }

        if self.scene.has_selection() {
            // Device-space delta, normalized into scene space by the zoom.
            let delta = drag.div(self.viewport.scale);
            for element in self.scene.selected_mut().filter(|e| e.movable) {
                element.at = element.at.move_by(delta);
            }
            self.repaint();
            return;
        }

        self.viewport = self.viewport.move_by(drag);
        self.repaint();
        self.emit(&EngineEvent::ViewportChanged);
    }

    fn interact_end(&mut self, position: Point, modifier: bool) {
        let Some(gesture) = self.gesture.take() else {
            return;
        };

        if let Some(mode) = self.drawing_mode {
            self.finish_drawing(mode, gesture.origin, position);
        }

        if self.select {
            if gesture.origin.is_same(position) {
                self.handle_selection(position, modifier);
            } else if self.scene.has_selection() {
                // Commit the drag with one coalesced event.
                self.emit(&EngineEvent::SceneUpdated);
            }
        }
    }

    fn interact_cancel(&mut self) {
        tracing::trace!("gesture cancelled");
        self.gesture = None;
        if self.pending_drawing.take().is_some() {
            self.repaint();
        }
    }

    /// Extend the pending drawing for the current move point.
    fn update_drawing(&mut self, mode: DrawingMode, origin: Point, current: Point) {
        match mode {
            DrawingMode::Rect => {
                // Recomputed from scratch on every move.
                self.pending_drawing = Some(PendingDrawing {
                    path: Path::rectangle(origin, origin.diff(current)),
                    points: Vec::new(),
                });
            }
            DrawingMode::Poly => {
                let scene_point = self.viewport.to_coordinate_space(current);
                let pending = self.pending_drawing.get_or_insert_with(|| {
                    let mut path = Path::new();
                    path.move_to(origin);
                    PendingDrawing {
                        path,
                        points: Vec::new(),
                    }
                });
                pending.path.line_to(current);
                pending.points.push(scene_point);
            }
        }
    }

    /// Finalize the pending drawing and report its scene-space points.
    fn finish_drawing(&mut self, mode: DrawingMode, origin: Point, release: Point) {
        let points = match mode {
            DrawingMode::Rect => vec![
                self.viewport.to_coordinate_space(origin),
                self.viewport.to_coordinate_space(release),
            ],
            DrawingMode::Poly => {
                let mut points = self
                    .pending_drawing
                    .take()
                    .map(|p| p.points)
                    .unwrap_or_default();
                points.push(self.viewport.to_coordinate_space(release));
                points
            }
        };

        self.pending_drawing = None;
        self.emit(&EngineEvent::DrawingFinished { points, mode });
        self.repaint();
    }

    /// Apply the tap selection policy.
    ///
    /// Without the modifier the hit element becomes the sole selection
    /// (clear, then toggle - a tap on an already selected element keeps it
    /// selected). With the modifier the hit element toggles additively. A
    /// miss clears the selection unless the modifier is held.
    fn handle_selection(&mut self, position: Point, additive: bool) {
        let scene_point = self.viewport.to_coordinate_space(position);
        let hit = self.scene.first_hit(scene_point).map(|e| e.id.clone());

        match hit {
            None => {
                if !additive {
                    self.scene.unselect_all();
                }
            }
            Some(id) => {
                if !additive {
                    self.scene.unselect_all();
                }
                if let Some(element) = self.scene.find_element_mut(&id) {
                    element.selected = !element.selected;
                }
            }
        }

        self.repaint();
        self.emit(&EngineEvent::SelectionChanged);
    }

    fn emit(&mut self, event: &EngineEvent) {
        tracing::debug!(event = ?event.kind(), "emitting engine event");
        self.bus.emit(event);
    }

    /// Paint the full frame: background, grid, scene, pending drawing.
    fn paint(&mut self) -> EngineResult<()> {
        if self.resize {
            let layout = self.surface.layout_size();
            if layout != self.surface.size() {
                self.surface.resize(layout);
            }
        }

        let size = self.surface.size();

        self.surface.clear();

        self.background_style.prepare(&mut self.surface);
        self.surface.fill_rect(Point::ORIGIN, size);

        if self.grid {
            self.paint_grid(size);
        }

        self.surface.save();
        self.viewport.apply_transform(&mut self.surface);
        let result = self.scene.paint(&mut self.surface, &self.selection_style);
        self.surface.restore();
        result?;

        if let Some(pending) = &self.pending_drawing {
            // The pending path is device space; it is painted outside the
            // viewport transform until committed to scene coordinates.
            self.surface.save();
            self.drawing_style.prepare(&mut self.surface);
            if self.drawing_style.has_fill() {
                self.surface.fill_path(&pending.path);
            }
            if self.drawing_style.has_stroke() {
                self.surface.stroke_path(&pending.path);
            }
            self.surface.restore();
        }

        tracing::trace!(%size, "frame painted");
        Ok(())
    }

    /// Stroke grid lines aligned to the viewport origin modulo the scaled
    /// cell size. Lines span the full surface in both directions.
    fn paint_grid(&mut self, size: Dimension) {
        let step_x = self.grid_size.x * self.viewport.scale;
        let step_y = self.grid_size.y * self.viewport.scale;
        if !step_x.is_finite() || !step_y.is_finite() || step_x <= f64::EPSILON || step_y <= f64::EPSILON {
            return;
        }

        let mut lines = Path::new();

        let mut x = self.viewport.origin.x % step_x;
        while x < size.x {
            if x > 0.0 {
                lines.move_to(Point::new(x, 0.0));
                lines.line_to(Point::new(x, size.y));
            }
            x += step_x;
        }

        let mut y = self.viewport.origin.y % step_y;
        while y < size.y {
            if y > 0.0 {
                lines.move_to(Point::new(0.0, y));
                lines.line_to(Point::new(size.x, y));
            }
            y += step_y;
        }

        self.surface.save();
        self.grid_style.prepare(&mut self.surface);
        self.surface.stroke_path(&lines);
        self.surface.restore();
    }
}

impl<S: Surface> Drop for Scenic<S> {
    fn drop(&mut self) {
        BindingRegistry::global().release(self.surface.id(), self.id);
    }
}

impl<S: Surface> std::fmt::Debug for Scenic<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenic")
            .field("id", &self.id)
            .field("surface", &self.surface.id())
            .field("viewport", &self.viewport)
            .field("layers", &self.scene.layers.len())
            .finish_non_exhaustive()
    }
}
