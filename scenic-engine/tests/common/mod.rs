//! Shared fixtures for engine integration tests.
#![allow(dead_code)] // Each test binary uses a subset of the fixtures.

use std::cell::RefCell;
use std::rc::Rc;

use scenic_core::{
    Color, Dimension, Layer, Path, Point, RecordingSurface, Scene, SceneElement,
    PathShape, PositionedPaintable, Style,
};
use scenic_engine::{EngineEvent, EventKind, Scenic, ScenicConfig};

/// A standard 800x600 recording surface.
#[must_use]
pub fn surface() -> RecordingSurface {
    RecordingSurface::new(Dimension::new(800.0, 600.0))
}

/// A selectable, movable filled square of the given side length.
#[must_use]
pub fn square(id: &str, at: Point, side: f64) -> SceneElement {
    let outline = Path::rectangle(Point::ORIGIN, Dimension::square(side));
    SceneElement::new(vec![PositionedPaintable::at_origin(Box::new(
        PathShape::new(
            outline.clone(),
            Style::new().with_fill(Color::from_rgb_bytes(180, 40, 40)),
        ),
    ))])
    .with_id(id)
    .with_at(at)
    .with_outline(outline)
    .with_movable(true)
}

/// A single-layer scene holding the given elements.
#[must_use]
pub fn scene_of(elements: Vec<SceneElement>) -> Scene {
    Scene::new(vec![Layer::new("tokens", elements)])
}

/// Bind an engine and drain the initial bind-time repaint so tests observe
/// only the ops they trigger themselves.
#[must_use]
pub fn engine(scene: Scene, config: ScenicConfig) -> Scenic<RecordingSurface> {
    let mut engine = Scenic::bind(surface(), scene, config).expect("bind");
    engine.run_frame().expect("initial frame");
    engine.surface_mut().clear_ops();
    engine
}

/// Subscribe a collecting listener for one event kind.
///
/// Returns the shared log the listener appends to.
pub fn capture(
    engine: &mut Scenic<RecordingSurface>,
    kind: EventKind,
) -> Rc<RefCell<Vec<EngineEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    engine.on(kind, move |event| sink.borrow_mut().push(event.clone()));
    log
}
