//! Retained vector paths.
//!
//! A [`Path`] is an ordered list of segments that can be filled or stroked by
//! a [`crate::Surface`] and hit-tested without one: containment is computed
//! geometrically (even-odd rule, subpaths implicitly closed), so scene
//! hit-testing never needs to touch the raster seam.

use serde::{Deserialize, Serialize};

use crate::{Bounds, Dimension, Point};

/// Number of line segments used to flatten a full ellipse.
const ELLIPSE_SEGMENTS: usize = 64;

/// A single path segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "to", rename_all = "lowercase")]
pub enum PathSegment {
    /// Start a new subpath at the given point.
    MoveTo(Point),
    /// Straight line to the given point.
    LineTo(Point),
    /// Close the current subpath.
    Close,
}

/// A retained path in a local coordinate frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// Create an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a path visiting the given points in order.
    ///
    /// The first point starts the subpath; `closed` appends a closing
    /// segment. An empty point list yields an empty path.
    #[must_use]
    pub fn polygon(points: &[Point], closed: bool) -> Self {
        let mut path = Self::new();

        if let Some((first, rest)) = points.split_first() {
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
            if closed {
                path.close();
            }
        }

        path
    }

    /// Create a closed axis-aligned rectangle.
    #[must_use]
    pub fn rectangle(at: Point, size: Dimension) -> Self {
        Self::polygon(
            &[
                at,
                at.translate(0.0, size.y),
                at.translate(size.x, size.y),
                at.translate(size.x, 0.0),
            ],
            true,
        )
    }

    /// Create an ellipse arc inscribed into a box of the given size, with its
    /// center at `size / 2`.
    ///
    /// `rotation` tilts the ellipse; `start_angle`/`end_angle` (radians)
    /// bound the swept arc. The arc is flattened into line segments at
    /// construction time and closed if it spans the full ellipse.
    #[must_use]
    pub fn ellipse(size: Dimension, rotation: f64, start_angle: f64, end_angle: f64) -> Self {
        let center = Point::new(size.x / 2.0, size.y / 2.0);
        let (rx, ry) = (size.x / 2.0, size.y / 2.0);
        let (sin_rot, cos_rot) = rotation.sin_cos();

        let span = end_angle - start_angle;
        let full = span.abs() >= 2.0 * std::f64::consts::PI - 1e-9;

        #[allow(clippy::cast_precision_loss)]
        let points: Vec<Point> = (0..=ELLIPSE_SEGMENTS)
            .map(|i| {
                let theta = start_angle + span * (i as f64) / (ELLIPSE_SEGMENTS as f64);
                let (dx, dy) = (rx * theta.cos(), ry * theta.sin());
                Point::new(
                    center.x + dx * cos_rot - dy * sin_rot,
                    center.y + dx * sin_rot + dy * cos_rot,
                )
            })
            .collect();

        Self::polygon(&points, full)
    }

    /// Start a new subpath.
    pub fn move_to(&mut self, p: Point) {
        self.segments.push(PathSegment::MoveTo(p));
    }

    /// Append a straight line to the current subpath.
    pub fn line_to(&mut self, p: Point) {
        self.segments.push(PathSegment::LineTo(p));
    }

    /// Close the current subpath.
    pub fn close(&mut self) {
        self.segments.push(PathSegment::Close);
    }

    /// The segments of this path in order.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Whether the path contains no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The axis-aligned bounding box of all visited points, or `None` for an
    /// empty path.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => {
                    Some(Bounds::new(*p, *p))
                }
                PathSegment::Close => None,
            })
            .reduce(|acc, b| acc.union(b))
    }

    /// Whether the given point lies inside the path area.
    ///
    /// Uses the even-odd rule; subpaths are treated as implicitly closed.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        let mut inside = false;

        for subpath in self.subpaths() {
            let n = subpath.len();
            if n < 3 {
                continue;
            }

            for i in 0..n {
                let a = subpath[i];
                let b = subpath[(i + 1) % n];

                if (a.y > p.y) != (b.y > p.y) {
                    let x_at_ray = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                    if p.x < x_at_ray {
                        inside = !inside;
                    }
                }
            }
        }

        inside
    }

    /// Split the segment list into subpath point lists.
    fn subpaths(&self) -> Vec<Vec<Point>> {
        let mut subpaths = Vec::new();
        let mut current: Vec<Point> = Vec::new();

        for segment in &self.segments {
            match segment {
                PathSegment::MoveTo(p) => {
                    if !current.is_empty() {
                        subpaths.push(std::mem::take(&mut current));
                    }
                    current.push(*p);
                }
                PathSegment::LineTo(p) => current.push(*p),
                PathSegment::Close => {
                    if !current.is_empty() {
                        subpaths.push(std::mem::take(&mut current));
                    }
                }
            }
        }

        if !current.is_empty() {
            subpaths.push(current);
        }

        subpaths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_contains() {
        let r = Path::rectangle(Point::new(10.0, 10.0), Dimension::new(20.0, 10.0));
        assert!(r.contains(Point::new(20.0, 15.0)));
        assert!(!r.contains(Point::new(5.0, 15.0)));
        assert!(!r.contains(Point::new(20.0, 25.0)));
    }

    #[test]
    fn test_rectangle_with_negative_size_contains() {
        // A drag from lower-right to upper-left produces negative extents.
        let r = Path::rectangle(Point::new(30.0, 20.0), Dimension::new(-20.0, -10.0));
        assert!(r.contains(Point::new(20.0, 15.0)));
        assert!(!r.contains(Point::new(35.0, 15.0)));
    }

    #[test]
    fn test_ellipse_contains() {
        let e = Path::ellipse(
            Dimension::new(40.0, 20.0),
            0.0,
            0.0,
            2.0 * std::f64::consts::PI,
        );
        assert!(e.contains(Point::new(20.0, 10.0)));
        assert!(e.contains(Point::new(38.0, 10.0)));
        // Inside the bounding box but outside the ellipse.
        assert!(!e.contains(Point::new(1.0, 1.0)));
    }

    #[test]
    fn test_concave_polygon_contains() {
        // A "U" shape: the notch is not inside.
        let u = Path::polygon(
            &[
                Point::new(0.0, 0.0),
                Point::new(0.0, 30.0),
                Point::new(30.0, 30.0),
                Point::new(30.0, 0.0),
                Point::new(20.0, 0.0),
                Point::new(20.0, 20.0),
                Point::new(10.0, 20.0),
                Point::new(10.0, 0.0),
            ],
            true,
        );
        assert!(u.contains(Point::new(5.0, 10.0)));
        assert!(u.contains(Point::new(25.0, 10.0)));
        assert!(!u.contains(Point::new(15.0, 10.0)));
        assert!(u.contains(Point::new(15.0, 25.0)));
    }

    #[test]
    fn test_open_subpath_is_implicitly_closed() {
        let tri = Path::polygon(
            &[
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(5.0, 10.0),
            ],
            false,
        );
        assert!(tri.contains(Point::new(5.0, 3.0)));
    }

    #[test]
    fn test_bounds() {
        let r = Path::rectangle(Point::new(-5.0, 2.0), Dimension::new(10.0, 4.0));
        assert_eq!(
            r.bounds(),
            Some(Bounds::new(Point::new(-5.0, 2.0), Point::new(5.0, 6.0)))
        );
        assert_eq!(Path::new().bounds(), None);
    }

    #[test]
    fn test_empty_path_contains_nothing() {
        assert!(!Path::new().contains(Point::ORIGIN));
    }
}
