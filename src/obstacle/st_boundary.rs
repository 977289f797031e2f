use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A point in time vs. arc-length space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StPoint {
    /// Arc length along the reference line in m.
    pub s: f64,
    /// Time from now in s.
    pub t: f64,
}

impl StPoint {
    pub const fn new(s: f64, t: f64) -> Self {
        Self { s, t }
    }
}

/// The predicted footprint of an obstacle on the ego path in time vs. arc-length space.
///
/// Stored as pairs of lower and upper points with increasing `t`.
/// The lower points trace the nearest edge of the obstacle along the path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StBoundary {
    lower: SmallVec<[StPoint; 8]>,
    upper: SmallVec<[StPoint; 8]>,
}

impl StBoundary {
    /// Creates a boundary from `(lower, upper)` point pairs.
    ///
    /// Returns `None` if there are fewer than two pairs, if the pairs are not
    /// ordered by time, or if a lower point lies above its upper point.
    pub fn new(pairs: impl IntoIterator<Item = (StPoint, StPoint)>) -> Option<Self> {
        let (lower, upper): (SmallVec<[StPoint; 8]>, SmallVec<[StPoint; 8]>) =
            pairs.into_iter().unzip();
        if lower.len() < 2 {
            return None;
        }
        if lower.windows(2).any(|w| w[1].t < w[0].t) {
            return None;
        }
        if lower.iter().zip(&upper).any(|(lo, up)| lo.s > up.s) {
            return None;
        }
        Some(Self { lower, upper })
    }

    /// Creates a rectangular boundary spanning the given ranges of `s` and `t`.
    pub fn rect(s: (f64, f64), t: (f64, f64)) -> Option<Self> {
        Self::new([
            (StPoint::new(s.0, t.0), StPoint::new(s.1, t.0)),
            (StPoint::new(s.0, t.1), StPoint::new(s.1, t.1)),
        ])
    }

    /// The earliest time the obstacle occupies the path.
    pub fn min_t(&self) -> f64 {
        self.lower[0].t
    }

    /// The smallest arc length the obstacle occupies.
    pub fn min_s(&self) -> f64 {
        self.lower.iter().map(|p| p.s).fold(f64::INFINITY, f64::min)
    }

    /// The lower point at the earliest time.
    pub fn bottom_left_point(&self) -> StPoint {
        self.lower[0]
    }

    /// The lower point at the latest time.
    pub fn bottom_right_point(&self) -> StPoint {
        self.lower[self.lower.len() - 1]
    }

    /// How far the near edge moves back along the path over the boundary's lifetime.
    /// Zero or negative when the obstacle moves in the same direction as the ego vehicle.
    pub fn traveled_s(&self) -> f64 {
        self.bottom_left_point().s - self.bottom_right_point().s
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn accessors() {
        let b = StBoundary::new([
            (StPoint::new(20.0, 0.5), StPoint::new(25.0, 0.5)),
            (StPoint::new(14.0, 1.5), StPoint::new(19.0, 1.5)),
            (StPoint::new(8.0, 2.5), StPoint::new(13.0, 2.5)),
        ])
        .unwrap();
        assert_approx_eq!(b.min_t(), 0.5);
        assert_approx_eq!(b.min_s(), 8.0);
        assert_eq!(b.bottom_left_point(), StPoint::new(20.0, 0.5));
        assert_eq!(b.bottom_right_point(), StPoint::new(8.0, 2.5));
        assert_approx_eq!(b.traveled_s(), 12.0);
    }

    #[test]
    fn rejects_malformed_boundaries() {
        let p = (StPoint::new(1.0, 0.0), StPoint::new(2.0, 0.0));
        assert!(StBoundary::new([p]).is_none());
        assert!(StBoundary::new([
            (StPoint::new(1.0, 1.0), StPoint::new(2.0, 1.0)),
            (StPoint::new(1.0, 0.5), StPoint::new(2.0, 0.5)),
        ])
        .is_none());
        assert!(StBoundary::rect((5.0, 3.0), (0.0, 1.0)).is_none());
    }

    #[test]
    fn obstacle_moving_with_ego_has_no_travel() {
        let b = StBoundary::new([
            (StPoint::new(16.0, 0.0), StPoint::new(21.0, 0.0)),
            (StPoint::new(22.0, 1.0), StPoint::new(27.0, 1.0)),
        ])
        .unwrap();
        assert!(b.traveled_s() < 0.0);
    }
}
