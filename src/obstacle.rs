pub use st_boundary::{StBoundary, StPoint};

use crate::math::{rot90, Point2d};
use crate::reference_line::ReferenceLine;
use smallvec::{smallvec, SmallVec};

mod st_boundary;

/// Represents a vehicle, pedestrian, stop wall or other object
/// the ego vehicle may need to yield to or stop before reaching.
#[derive(Clone, Debug)]
pub struct Obstacle {
    /// The obstacle's identifier, unique within a decision context.
    id: String,
    /// Whether the obstacle is synthetic rather than perceived.
    is_virtual: bool,
    /// Whether the obstacle is not moving.
    is_static: bool,
    /// The world space outline of the obstacle.
    footprint: SmallVec<[Point2d; 4]>,
    /// The obstacle's predicted interaction with the ego path, if it has one.
    st_boundary: Option<StBoundary>,
}

impl Obstacle {
    /// Creates a perceived, moving obstacle.
    pub fn dynamic(
        id: impl Into<String>,
        footprint: &[Point2d],
        st_boundary: Option<StBoundary>,
    ) -> Self {
        Self {
            id: id.into(),
            is_virtual: false,
            is_static: false,
            footprint: footprint.into(),
            st_boundary,
        }
    }

    /// Creates a perceived obstacle which is not moving.
    pub fn stationary(id: impl Into<String>, footprint: &[Point2d]) -> Self {
        Self {
            id: id.into(),
            is_virtual: false,
            is_static: true,
            footprint: footprint.into(),
            st_boundary: None,
        }
    }

    /// Creates a virtual wall across the reference line at `s`.
    ///
    /// The wall is a line segment `width` metres long, centred on the path
    /// and perpendicular to it.
    pub fn virtual_stop_wall(
        id: impl Into<String>,
        s: f64,
        reference_line: &ReferenceLine,
        width: f64,
    ) -> Self {
        let point = reference_line.get_reference_point(s);
        let half = 0.5 * width * rot90(point.tangent());
        Self {
            id: id.into(),
            is_virtual: true,
            is_static: true,
            footprint: smallvec![point.pos() - half, point.pos() + half],
            st_boundary: None,
        }
    }

    /// Gets the obstacle's ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the obstacle is synthetic rather than perceived.
    pub fn is_virtual(&self) -> bool {
        self.is_virtual
    }

    /// Whether the obstacle is not moving.
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// The world space outline of the obstacle.
    pub fn footprint(&self) -> &[Point2d] {
        &self.footprint
    }

    /// The obstacle's predicted interaction with the ego path.
    pub fn st_boundary(&self) -> Option<&StBoundary> {
        self.st_boundary.as_ref()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::LineSegment2d;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn stop_wall_spans_the_path() {
        let line = ReferenceLine::new(&LineSegment2d::from_ends(
            Point2d::new(0.0, 0.0),
            Point2d::new(50.0, 0.0),
        ));
        let wall = Obstacle::virtual_stop_wall("wall", 20.0, &line, 4.0);
        assert!(wall.is_virtual());
        assert!(wall.is_static());
        assert!(wall.st_boundary().is_none());

        let [a, b] = [wall.footprint()[0], wall.footprint()[1]];
        assert_approx_eq!(a.x, 20.0, 1e-6);
        assert_approx_eq!(b.x, 20.0, 1e-6);
        assert_approx_eq!(a.y, -2.0);
        assert_approx_eq!(b.y, 2.0);
    }
}
