//! The repaint pipeline: coalescing, paint order, grid, background and
//! resize tracking.

mod common;

use scenic_core::{
    Dimension, PathSegment, Point, Scene, Surface, SurfaceOp, Viewport,
};
use scenic_engine::{DrawingMode, PointerEvent, Scenic, ScenicConfig};

use common::{engine, scene_of, square, surface};

#[test]
fn test_mutations_coalesce_into_one_paint() {
    let mut engine = engine(Scene::default(), ScenicConfig::default());

    engine.set_grid(true);
    engine.set_viewport(Viewport::new(Point::new(20.0, 20.0), 1.0));
    engine.set_scene(scene_of(vec![square("a", Point::ORIGIN, 10.0)]));

    assert!(engine.run_frame().expect("frame"));
    let clears = engine
        .surface()
        .ops()
        .iter()
        .filter(|op| matches!(op, SurfaceOp::Clear))
        .count();
    assert_eq!(clears, 1);

    // Nothing pending afterwards.
    assert!(!engine.run_frame().expect("idle frame"));
}

#[test]
fn test_paint_observes_latest_state() {
    let mut engine = engine(Scene::default(), ScenicConfig::default());

    engine.set_viewport(Viewport::new(Point::new(1.0, 1.0), 1.0));
    engine.set_viewport(Viewport::new(Point::new(99.0, 99.0), 1.0));
    assert!(engine.run_frame().expect("frame"));

    // The single paint used the final viewport, not the intermediate one.
    assert!(engine
        .surface()
        .ops()
        .iter()
        .any(|op| matches!(op, SurfaceOp::Translate(d) if *d == Dimension::new(99.0, 99.0))));
    assert!(!engine
        .surface()
        .ops()
        .iter()
        .any(|op| matches!(op, SurfaceOp::Translate(d) if *d == Dimension::new(1.0, 1.0))));
}

#[test]
fn test_frame_starts_with_clear_and_background_fill() {
    let mut engine = engine(Scene::default(), ScenicConfig::default());
    engine.repaint();
    assert!(engine.run_frame().expect("frame"));

    let ops = engine.surface().ops();
    assert!(matches!(ops[0], SurfaceOp::Clear));
    assert!(matches!(ops[1], SurfaceOp::SetFillColor(_)));
    assert!(matches!(
        ops[2],
        SurfaceOp::FillRect { at, size }
            if at == Point::ORIGIN && size == Dimension::new(800.0, 600.0)
    ));
}

#[test]
fn test_grid_lines_span_the_full_surface() {
    let mut engine = engine(
        Scene::default(),
        ScenicConfig {
            grid: true,
            ..ScenicConfig::default()
        },
    );
    engine.repaint();
    assert!(engine.run_frame().expect("frame"));

    // The grid is the only stroked path in an empty scene.
    let grid = engine
        .surface()
        .ops()
        .iter()
        .find_map(|op| match op {
            SurfaceOp::StrokePath(p) => Some(p.clone()),
            _ => None,
        })
        .expect("grid path");
    let segments = grid.segments();

    // Default viewport origin (5, 5), grid 10: lines offset by 5.
    let vertical = segments
        .windows(2)
        .any(|w| {
            matches!(w, [PathSegment::MoveTo(a), PathSegment::LineTo(b)]
                if *a == Point::new(5.0, 0.0) && *b == Point::new(5.0, 600.0))
        });
    assert!(vertical, "vertical line at x=5 spanning the full height");

    let horizontal = segments
        .windows(2)
        .any(|w| {
            matches!(w, [PathSegment::MoveTo(a), PathSegment::LineTo(b)]
                if *a == Point::new(0.0, 5.0) && *b == Point::new(800.0, 5.0))
        });
    assert!(horizontal, "horizontal line at y=5 spanning the full width");

    // Every vertical stroke reaches the bottom edge, none stops short.
    for w in segments.windows(2) {
        if let [PathSegment::MoveTo(a), PathSegment::LineTo(b)] = w {
            if (a.x - b.x).abs() < f64::EPSILON {
                assert_eq!((a.y, b.y), (0.0, 600.0));
            }
        }
    }
}

#[test]
fn test_grid_steps_scale_with_the_viewport() {
    let mut engine = engine(
        Scene::default(),
        ScenicConfig {
            viewport: Some(Viewport::new(Point::ORIGIN, 2.0)),
            grid: true,
            grid_size: Some(Dimension::square(50.0)),
            ..ScenicConfig::default()
        },
    );
    engine.repaint();
    assert!(engine.run_frame().expect("frame"));

    let grid = engine
        .surface()
        .ops()
        .iter()
        .find_map(|op| match op {
            SurfaceOp::StrokePath(p) => Some(p.clone()),
            _ => None,
        })
        .expect("grid path");

    // 50 scene units at scale 2.0 is a 100px device step.
    assert!(grid
        .segments()
        .iter()
        .any(|s| matches!(s, PathSegment::MoveTo(p) if *p == Point::new(100.0, 0.0))));
    assert!(!grid
        .segments()
        .iter()
        .any(|s| matches!(s, PathSegment::MoveTo(p) if *p == Point::new(50.0, 0.0))));
}

#[test]
fn test_scene_paints_under_viewport_transform() {
    let mut engine = engine(
        scene_of(vec![square("a", Point::new(10.0, 10.0), 20.0)]),
        ScenicConfig {
            viewport: Some(Viewport::new(Point::new(40.0, 30.0), 2.0)),
            ..ScenicConfig::default()
        },
    );
    engine.repaint();
    assert!(engine.run_frame().expect("frame"));

    let ops = engine.surface().ops();
    let translate = ops
        .iter()
        .position(|op| matches!(op, SurfaceOp::Translate(d) if *d == Dimension::new(40.0, 30.0)))
        .expect("viewport translate");
    assert!(matches!(ops[translate + 1], SurfaceOp::Scale(s) if (s - 2.0).abs() < 1e-9));
    // The element's fill happens inside the transformed frame.
    assert!(ops[translate..]
        .iter()
        .any(|op| matches!(op, SurfaceOp::FillPath(_))));
}

#[test]
fn test_pending_drawing_is_stroked_each_frame() {
    let mut engine = engine(
        Scene::default(),
        ScenicConfig {
            viewport: Some(Viewport::new(Point::ORIGIN, 1.0)),
            drawing_mode: Some(DrawingMode::Rect),
            ..ScenicConfig::default()
        },
    );

    engine.handle_pointer(PointerEvent::down(Point::new(10.0, 10.0)));
    engine.handle_pointer(PointerEvent::moved(Point::new(60.0, 40.0)));
    assert!(engine.run_frame().expect("frame"));

    // The preview is dashed and stroked after the scene pass.
    let ops = engine.surface().ops();
    assert!(ops
        .iter()
        .any(|op| matches!(op, SurfaceOp::SetLineDash(d) if d == &vec![15.0, 5.0])));
    assert!(ops.iter().any(|op| matches!(op, SurfaceOp::StrokePath(_))));

    // Releasing clears the preview; the next frame has no stroke left.
    engine.handle_pointer(PointerEvent::up(Point::new(60.0, 40.0)));
    engine.surface_mut().clear_ops();
    assert!(engine.run_frame().expect("frame"));
    assert!(!engine
        .surface()
        .ops()
        .iter()
        .any(|op| matches!(op, SurfaceOp::StrokePath(_))));
}

#[test]
fn test_resize_tracking_matches_backing_to_layout() {
    let mut engine = engine(
        Scene::default(),
        ScenicConfig {
            resize: true,
            ..ScenicConfig::default()
        },
    );

    engine.surface_mut().set_layout_size(Dimension::new(1024.0, 768.0));
    engine.handle_resize();
    assert!(engine.run_frame().expect("frame"));

    assert_eq!(engine.surface().size(), Dimension::new(1024.0, 768.0));
    assert!(engine
        .surface()
        .ops()
        .iter()
        .any(|op| matches!(op, SurfaceOp::Resize(d) if *d == Dimension::new(1024.0, 768.0))));
}

#[test]
fn test_resize_disabled_ignores_layout_changes() {
    let mut engine = engine(Scene::default(), ScenicConfig::default());

    engine.surface_mut().set_layout_size(Dimension::new(1024.0, 768.0));
    engine.handle_resize();

    assert!(!engine.run_frame().expect("idle frame"));
    assert_eq!(engine.surface().size(), Dimension::new(800.0, 600.0));
}

#[test]
fn test_detached_engine_never_paints() {
    // The initial repaint is still pending, but the surface is no longer
    // this engine's to paint.
    let mut engine = Scenic::bind(surface(), Scene::default(), ScenicConfig::default())
        .expect("bind");
    engine.detach();

    assert!(!engine.run_frame().expect("frame"));
    assert!(engine.surface().ops().is_empty());
}
