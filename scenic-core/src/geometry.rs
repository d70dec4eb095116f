//! Immutable geometric value types: points, dimensions, bounds and the
//! viewport transform between scene space and device space.

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, Surface};

/// A 2D vector or size. Constructible from a scalar (isotropic) or a pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimension {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Dimension {
    /// Create a dimension from both components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create an isotropic dimension with both components equal.
    #[must_use]
    pub const fn square(v: f64) -> Self {
        Self { x: v, y: v }
    }

    /// Create a dimension from a point's offset from the origin.
    #[must_use]
    pub const fn from_origin(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }

    /// Create a dimension from a coordinate slice.
    ///
    /// A single value is treated as isotropic.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinates`] if the slice is empty.
    pub fn from_coords(coords: &[f64]) -> CoreResult<Self> {
        match coords {
            [] => Err(CoreError::InvalidCoordinates(
                "empty coordinate list".to_string(),
            )),
            [v] => Ok(Self::square(*v)),
            [x, y, ..] => Ok(Self::new(*x, *y)),
        }
    }

    /// The Euclidean length of this vector.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Divide both components by a scalar.
    ///
    /// Used to normalize a device-space drag delta by the viewport scale
    /// before applying it to scene-space element positions.
    #[must_use]
    pub fn div(&self, d: f64) -> Self {
        Self::new(self.x / d, self.y / d)
    }
}

impl From<f64> for Dimension {
    fn from(v: f64) -> Self {
        Self::square(v)
    }
}

impl From<(f64, f64)> for Dimension {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Dimension {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "|{}, {}|", self.x, self.y)
    }
}

/// A real-valued 2D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// The origin `(0, 0)`.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a point from both coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create a point from a coordinate slice.
    ///
    /// A single value is used for both coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinates`] if the slice is empty.
    pub fn from_coords(coords: &[f64]) -> CoreResult<Self> {
        match coords {
            [] => Err(CoreError::InvalidCoordinates(
                "empty coordinate list".to_string(),
            )),
            [v] => Ok(Self::new(*v, *v)),
            [x, y, ..] => Ok(Self::new(*x, *y)),
        }
    }

    /// The vector from this point to `other` (`other - self`).
    #[must_use]
    pub fn diff(&self, other: Self) -> Dimension {
        Dimension::new(other.x - self.x, other.y - self.y)
    }

    /// Translate by the given deltas, returning a new point.
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Move by a vector, returning a new point.
    #[must_use]
    pub fn move_by(&self, v: Dimension) -> Self {
        self.translate(v.x, v.y)
    }

    /// Exact coordinate equality, used to distinguish a tap from a drag.
    #[must_use]
    pub fn is_same(&self, other: Self) -> bool {
        *self == other
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned rectangle in local coordinates.
///
/// Used for hit-testing and selection frames, never for paint clipping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Upper-left corner.
    pub upper_left: Point,
    /// Lower-right corner.
    pub lower_right: Point,
}

impl Bounds {
    /// Create bounds from two corner points.
    #[must_use]
    pub const fn new(upper_left: Point, lower_right: Point) -> Self {
        Self {
            upper_left,
            lower_right,
        }
    }

    /// Width of the rectangle.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.lower_right.x - self.upper_left.x
    }

    /// Height of the rectangle.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.lower_right.y - self.upper_left.y
    }

    /// Whether the given point lies inside (or on the edge of) the rectangle.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        self.upper_left.x <= p.x
            && self.upper_left.y <= p.y
            && self.lower_right.x >= p.x
            && self.lower_right.y >= p.y
    }

    /// Symmetrically inflate (positive margin) or deflate (negative margin),
    /// distributing half the margin to each side.
    #[must_use]
    pub fn resize(&self, margin: Dimension) -> Self {
        Self::new(
            self.upper_left
                .move_by(Dimension::new(-margin.x / 2.0, -margin.y / 2.0)),
            self.lower_right
                .move_by(Dimension::new(margin.x / 2.0, margin.y / 2.0)),
        )
    }

    /// Move both corners by a vector.
    #[must_use]
    pub fn move_by(&self, v: Dimension) -> Self {
        Self::new(self.upper_left.move_by(v), self.lower_right.move_by(v))
    }

    /// The smallest bounds enclosing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: Self) -> Self {
        Self::new(
            Point::new(
                self.upper_left.x.min(other.upper_left.x),
                self.upper_left.y.min(other.upper_left.y),
            ),
            Point::new(
                self.lower_right.x.max(other.lower_right.x),
                self.lower_right.y.max(other.lower_right.y),
            ),
        )
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} => {}]", self.upper_left, self.lower_right)
    }
}

/// Step applied by a single zoom in/out.
const SCALE_DELTA: f64 = 0.1;
/// Lower bound for the viewport scale.
const MIN_SCALE: f64 = 0.01;
/// Upper bound for the viewport scale.
const MAX_SCALE: f64 = 10.0;

/// The affine map from scene (world) space to device space:
/// `device = origin + world * scale`.
///
/// Immutable; every pan or zoom produces a new value. The scale is always
/// kept within `[0.01, 10.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Device-space position of the scene origin.
    pub origin: Point,
    /// Uniform scale factor.
    pub scale: f64,
}

impl Viewport {
    /// The identity viewport: origin at `(0, 0)`, scale 1.0.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            origin: Point::ORIGIN,
            scale: 1.0,
        }
    }

    /// Create a viewport with the given origin and scale.
    ///
    /// The scale is clamped into `[0.01, 10.0]`.
    #[must_use]
    pub fn new(origin: Point, scale: f64) -> Self {
        Self {
            origin,
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
        }
    }

    /// Zoom in by one step, clamping at the upper bound.
    ///
    /// A no-op once the maximum scale is reached.
    #[must_use]
    pub fn zoom_in(&self) -> Self {
        Self {
            origin: self.origin,
            scale: (self.scale + SCALE_DELTA).min(MAX_SCALE),
        }
    }

    /// Zoom out by one step, clamping at the lower bound.
    ///
    /// A no-op once the minimum scale is reached.
    #[must_use]
    pub fn zoom_out(&self) -> Self {
        Self {
            origin: self.origin,
            scale: (self.scale - SCALE_DELTA).max(MIN_SCALE),
        }
    }

    /// Pan by a device-space vector.
    #[must_use]
    pub fn move_by(&self, v: Dimension) -> Self {
        Self {
            origin: self.origin.move_by(v),
            scale: self.scale,
        }
    }

    /// Map a scene-space point to device space.
    #[must_use]
    pub fn to_device_space(&self, p: Point) -> Point {
        Point::new(
            self.origin.x + p.x * self.scale,
            self.origin.y + p.y * self.scale,
        )
    }

    /// Map a device-space point back to scene space.
    ///
    /// Exact inverse of [`Viewport::to_device_space`] up to floating-point
    /// rounding.
    #[must_use]
    pub fn to_coordinate_space(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.origin.x) / self.scale,
            (p.y - self.origin.y) / self.scale,
        )
    }

    /// Apply this transform to a surface: translate to the origin, then scale.
    pub fn apply_transform(&self, surface: &mut dyn Surface) {
        surface.translate(Dimension::from_origin(self.origin));
        surface.scale(self.scale);
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_point_diff_yields_vector_to_other() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, -2.0);
        assert_eq!(a.diff(b), Dimension::new(3.0, -4.0));
    }

    #[test]
    fn test_point_from_coords_rejects_empty() {
        assert!(matches!(
            Point::from_coords(&[]),
            Err(CoreError::InvalidCoordinates(_))
        ));
    }

    #[test]
    fn test_point_from_coords_single_value_is_isotropic() {
        let p = Point::from_coords(&[3.0]).expect("single coordinate");
        assert_eq!(p, Point::new(3.0, 3.0));
    }

    #[test]
    fn test_dimension_from_coords_rejects_empty() {
        assert!(matches!(
            Dimension::from_coords(&[]),
            Err(CoreError::InvalidCoordinates(_))
        ));
    }

    #[test]
    fn test_dimension_div_normalizes_componentwise() {
        let d = Dimension::new(10.0, 4.0).div(2.0);
        assert_eq!(d, Dimension::new(5.0, 2.0));
    }

    #[test]
    fn test_dimension_length() {
        assert!((Dimension::new(3.0, 4.0).length() - 5.0).abs() < EPS);
    }

    #[test]
    fn test_bounds_contains_edges_inclusive() {
        let b = Bounds::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert!(b.contains(Point::new(0.0, 0.0)));
        assert!(b.contains(Point::new(10.0, 10.0)));
        assert!(b.contains(Point::new(5.0, 5.0)));
        assert!(!b.contains(Point::new(10.1, 5.0)));
        assert!(!b.contains(Point::new(-0.1, 5.0)));
    }

    #[test]
    fn test_bounds_resize_is_symmetric() {
        let b = Bounds::new(Point::new(2.0, 2.0), Point::new(8.0, 8.0));
        let inflated = b.resize(Dimension::square(4.0));
        assert_eq!(
            inflated,
            Bounds::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0))
        );
        let deflated = inflated.resize(Dimension::square(-4.0));
        assert_eq!(deflated, b);
    }

    #[test]
    fn test_bounds_union() {
        let a = Bounds::new(Point::new(0.0, 0.0), Point::new(4.0, 4.0));
        let b = Bounds::new(Point::new(2.0, -1.0), Point::new(6.0, 3.0));
        assert_eq!(
            a.union(b),
            Bounds::new(Point::new(0.0, -1.0), Point::new(6.0, 4.0))
        );
    }

    #[test]
    fn test_viewport_round_trip() {
        let v = Viewport::new(Point::new(17.5, -4.0), 2.5);
        for p in [
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(-300.25, 42.75),
        ] {
            let rt = v.to_coordinate_space(v.to_device_space(p));
            assert!((rt.x - p.x).abs() < EPS, "{rt} != {p}");
            assert!((rt.y - p.y).abs() < EPS, "{rt} != {p}");
        }
    }

    #[test]
    fn test_zoom_in_clamps_at_maximum() {
        let mut v = Viewport::initial();
        for _ in 0..200 {
            v = v.zoom_in();
        }
        assert!((v.scale - MAX_SCALE).abs() < EPS);
        // Idempotent once clamped.
        assert_eq!(v.zoom_in(), v);
    }

    #[test]
    fn test_zoom_out_clamps_at_minimum() {
        let mut v = Viewport::initial();
        for _ in 0..200 {
            v = v.zoom_out();
            assert!(v.scale >= MIN_SCALE);
        }
        assert!((v.scale - MIN_SCALE).abs() < EPS);
        assert_eq!(v.zoom_out(), v);
    }

    #[test]
    fn test_viewport_new_clamps_scale() {
        assert!((Viewport::new(Point::ORIGIN, 100.0).scale - MAX_SCALE).abs() < EPS);
        assert!((Viewport::new(Point::ORIGIN, 0.0).scale - MIN_SCALE).abs() < EPS);
    }
}
