use super::curve::ParametricCurve2d;
use super::{Point2d, Vector2d};
use crate::util::Interval;
use cgmath::prelude::*;

/// A straight line segment, parameterised by distance from its start point.
#[derive(Copy, Clone, Debug)]
pub struct LineSegment2d {
    start: Point2d,
    dir: Vector2d,
    length: f64,
}

impl LineSegment2d {
    /// Creates a line segment between two points.
    pub fn from_ends(start: Point2d, end: Point2d) -> Self {
        let delta = end - start;
        let length = delta.magnitude();
        let dir = if length > 0.0 {
            delta / length
        } else {
            Vector2d::new(1.0, 0.0)
        };
        Self { start, dir, length }
    }

    /// The length of the segment.
    pub fn length(&self) -> f64 {
        self.length
    }
}

impl ParametricCurve2d for LineSegment2d {
    fn sample(&self, t: f64) -> Point2d {
        self.start + t * self.dir
    }

    fn bounds(&self) -> Interval<f64> {
        Interval::new(0.0, self.length)
    }

    fn sample_dt(&self, _t: f64) -> Vector2d {
        self.dir
    }
}
