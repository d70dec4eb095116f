//! Input and output events of the interaction engine.
//!
//! Input is a single unified pointer interface (position + phase) plus wheel
//! deltas; device-specific adapters (mouse, touch) translate native input
//! into [`PointerEvent`]s so the gesture state machine has exactly one
//! implementation.
//!
//! Output is the [`EngineEvent`] tagged union: strongly typed payloads
//! dispatched through the [`crate::EventBus`] instead of stringly-keyed
//! listener lists.

use serde::{Deserialize, Serialize};

use scenic_core::Point;

/// Shape-capture policy active during a drawing gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingMode {
    /// The pending path is always the rectangle spanned by gesture origin
    /// and current point; two points are reported on finish.
    Rect,
    /// The pending path follows the pointer; every visited vertex is
    /// reported on finish.
    #[serde(alias = "line")]
    Poly,
}

/// Phase of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Pointer pressed.
    Down,
    /// Pointer moved while pressed.
    Move,
    /// Pointer released.
    Up,
    /// Gesture aborted by the host (e.g. pointer capture lost).
    Cancel,
}

/// A unified pointer event in device-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Position in device space.
    pub position: Point,
    /// Gesture phase.
    pub phase: PointerPhase,
    /// Whether the alternate selection modifier is held (e.g. Ctrl).
    pub modifier: bool,
}

impl PointerEvent {
    /// A pointer-down event.
    #[must_use]
    pub const fn down(position: Point) -> Self {
        Self {
            position,
            phase: PointerPhase::Down,
            modifier: false,
        }
    }

    /// A pointer-move event.
    #[must_use]
    pub const fn moved(position: Point) -> Self {
        Self {
            position,
            phase: PointerPhase::Move,
            modifier: false,
        }
    }

    /// A pointer-up event.
    #[must_use]
    pub const fn up(position: Point) -> Self {
        Self {
            position,
            phase: PointerPhase::Up,
            modifier: false,
        }
    }

    /// A gesture-cancel event.
    #[must_use]
    pub const fn cancel(position: Point) -> Self {
        Self {
            position,
            phase: PointerPhase::Cancel,
            modifier: false,
        }
    }

    /// Set the alternate selection modifier flag.
    #[must_use]
    pub const fn with_modifier(mut self, modifier: bool) -> Self {
        self.modifier = modifier;
        self
    }
}

/// Discriminant of an [`EngineEvent`], used to subscribe on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    /// Selection state changed after a tap.
    SelectionChanged,
    /// The viewport was panned or zoomed.
    ViewportChanged,
    /// Element positions changed after a drag was committed.
    SceneUpdated,
    /// A drawing gesture finished.
    DrawingFinished,
}

/// High-level events emitted by the engine.
///
/// Events carry payloads only; subscribers read further engine state (the
/// current viewport, moved element positions) from the engine after the
/// dispatch returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum EngineEvent {
    /// Selection state changed after a tap.
    SelectionChanged,
    /// The viewport was panned or zoomed.
    ViewportChanged,
    /// Element positions changed after a drag was committed.
    SceneUpdated,
    /// A drawing gesture finished.
    DrawingFinished {
        /// Visited points converted to scene space. Exactly two (origin and
        /// release) for [`DrawingMode::Rect`], every visited vertex for
        /// [`DrawingMode::Poly`].
        points: Vec<Point>,
        /// The drawing mode that was active.
        mode: DrawingMode,
    },
}

impl EngineEvent {
    /// The discriminant of this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::SelectionChanged => EventKind::SelectionChanged,
            Self::ViewportChanged => EventKind::ViewportChanged,
            Self::SceneUpdated => EventKind::SceneUpdated,
            Self::DrawingFinished { .. } => EventKind::DrawingFinished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_matches_variant() {
        assert_eq!(
            EngineEvent::SelectionChanged.kind(),
            EventKind::SelectionChanged
        );
        assert_eq!(
            EngineEvent::DrawingFinished {
                points: Vec::new(),
                mode: DrawingMode::Rect,
            }
            .kind(),
            EventKind::DrawingFinished
        );
    }

    #[test]
    fn test_drawing_mode_accepts_line_alias() {
        let mode: DrawingMode = serde_json::from_str("\"line\"").expect("alias");
        assert_eq!(mode, DrawingMode::Poly);
        let mode: DrawingMode = serde_json::from_str("\"poly\"").expect("canonical");
        assert_eq!(mode, DrawingMode::Poly);
    }

    #[test]
    fn test_drawing_finished_serializes_with_payload() {
        let evt = EngineEvent::DrawingFinished {
            points: vec![Point::new(1.0, 2.0)],
            mode: DrawingMode::Rect,
        };
        let json = serde_json::to_string(&evt).expect("serialize");
        assert!(json.contains("\"drawingFinished\""));
        assert!(json.contains("\"rect\""));
    }
}
