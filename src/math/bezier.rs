use super::curve::ParametricCurve2d;
use super::{Point2d, Vector2d};
use crate::util::Interval;

/// A quadratic bezier curve, a convenient source of gently curving paths.
#[derive(Copy, Clone, Debug)]
pub struct QuadraticBezier2d {
    points: [Point2d; 3],
}

impl QuadraticBezier2d {
    /// Creates a curve from its start point, control point and end point.
    pub const fn new(points: &[Point2d; 3]) -> Self {
        Self { points: *points }
    }
}

impl ParametricCurve2d for QuadraticBezier2d {
    fn sample(&self, t: f64) -> Point2d {
        let [p0, p1, p2] = self.points;
        let a = p0 + (p1 - p0) * t;
        let b = p1 + (p2 - p1) * t;
        a + (b - a) * t
    }

    fn bounds(&self) -> Interval<f64> {
        Interval::new(0.0, 1.0)
    }

    fn sample_dt(&self, t: f64) -> Vector2d {
        let [p0, p1, p2] = self.points;
        2.0 * (1.0 - t) * (p1 - p0) + 2.0 * t * (p2 - p1)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn passes_through_end_points() {
        let curve = QuadraticBezier2d::new(&[
            Point2d::new(0.0, 0.0),
            Point2d::new(10.0, 0.0),
            Point2d::new(10.0, 10.0),
        ]);
        let start = curve.sample(0.0);
        let mid = curve.sample(0.5);
        let end = curve.sample(1.0);
        assert_approx_eq!(start.x, 0.0);
        assert_approx_eq!(mid.x, 7.5);
        assert_approx_eq!(mid.y, 2.5);
        assert_approx_eq!(end.y, 10.0);
        assert_approx_eq!(curve.sample_dt(0.0).x, 20.0);
    }
}
