use super::{Point2d, Vector2d};
use cgmath::prelude::*;

/// Projects a point onto a local coordinate system.
///
/// # Parameters
/// * `point` - The point to project
/// * `origin` - The origin of the coordinate system
/// * `x_axis` - The basis vector pointing in the positive x-axis.
/// * `y_axis` - The basis vector pointing in the positive y-axis.
pub fn project_local(
    point: Point2d,
    origin: Point2d,
    x_axis: Vector2d,
    y_axis: Vector2d,
) -> Point2d {
    let point = point - origin;
    Point2d::new(point.dot(x_axis), point.dot(y_axis))
}

/// Rotates a vector 90 degrees anti-clockwise.
pub fn rot90(vec: Vector2d) -> Vector2d {
    Vector2d::new(-vec.y, vec.x)
}

/// The heading of a vector in radians, measured anti-clockwise from the x-axis.
pub fn heading_of(vec: Vector2d) -> f64 {
    vec.y.atan2(vec.x)
}

/// A unit vector with the given heading.
pub fn unit_from_heading(heading: f64) -> Vector2d {
    Vector2d::new(heading.cos(), heading.sin())
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn heading_round_trips_through_unit_vector() {
        for heading in [-3.0, -1.2, 0.0, 0.7, 2.5] {
            assert_approx_eq!(heading_of(unit_from_heading(heading)), heading);
        }
    }

    #[test]
    fn local_projection() {
        let origin = Point2d::new(1.0, 1.0);
        let y_axis = Vector2d::new(1.0, 0.0);
        let p = project_local(Point2d::new(3.0, 2.0), origin, rot90(y_axis), y_axis);
        assert_approx_eq!(p.x, 1.0);
        assert_approx_eq!(p.y, 2.0);
    }
}
