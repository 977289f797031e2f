use crate::math::{
    equidistant_points_along_curve, heading_of, project_local, project_point_onto_curve, rot90,
    unit_from_heading, ParametricCurve2d, Point2d, Vector2d,
};
use crate::util::Interval;
use cgmath::prelude::*;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// The spacing between resampled points along a reference line, in m.
const REFERENCE_POINT_SPACING: f64 = 0.5;

/// The path the ego vehicle intends to follow,
/// parameterised by arc length `s` from its start.
#[derive(Clone, Debug)]
pub struct ReferenceLine {
    /// Points along the centre line.
    points: Vec<Point2d>,
    /// The arc length at each point.
    accumulated_s: Vec<f64>,
    /// The heading of each segment between consecutive points.
    headings: Vec<f64>,
}

/// A point sampled from a [ReferenceLine].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferencePoint {
    pub x: f64,
    pub y: f64,
    /// The heading of the path in radians.
    pub heading: f64,
}

/// A position relative to a [ReferenceLine].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlPoint {
    /// Arc length along the line in m.
    pub s: f64,
    /// Lateral offset in m, positive to the left.
    pub l: f64,
}

/// The kind of map feature a [PathOverlap] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OverlapType {
    StopSign,
    TrafficLight,
}

/// A region where the path intersects a map feature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathOverlap {
    /// The ID of the map feature.
    pub object_id: String,
    /// Where the overlap begins along the path, in m.
    pub start_s: f64,
    /// Where the overlap ends along the path, in m.
    pub end_s: f64,
}

impl PathOverlap {
    pub fn new(object_id: impl Into<String>, start_s: f64, end_s: f64) -> Self {
        Self {
            object_id: object_id.into(),
            start_s,
            end_s,
        }
    }
}

impl ReferencePoint {
    /// The position of the point.
    pub fn pos(&self) -> Point2d {
        Point2d::new(self.x, self.y)
    }

    /// A unit vector along the path.
    pub fn tangent(&self) -> Vector2d {
        unit_from_heading(self.heading)
    }
}

impl ReferenceLine {
    /// Creates a reference line that follows the given curve.
    pub fn new(curve: &impl ParametricCurve2d) -> Self {
        let (mut points, _) = equidistant_points_along_curve(curve, REFERENCE_POINT_SPACING);
        if points.len() < 2 {
            // Degenerate curve; give it a direction so that it can still be sampled
            let start = points[0];
            points.push(start + curve.sample_dt(curve.bounds().min).normalize_to(1e-3));
        }

        let accumulated_s = std::iter::once(0.0)
            .chain(points.iter().tuple_windows().scan(0.0, |s, (a, b)| {
                *s += a.distance(*b);
                Some(*s)
            }))
            .collect();

        let headings = points
            .iter()
            .tuple_windows()
            .map(|(a, b)| heading_of(*b - *a))
            .collect();

        Self {
            points,
            accumulated_s,
            headings,
        }
    }

    /// The length of the line in m.
    pub fn length(&self) -> f64 {
        *self.accumulated_s.last().unwrap_or(&0.0)
    }

    /// The range of valid `s` values.
    pub fn s_range(&self) -> Interval<f64> {
        Interval::new(0.0, self.length())
    }

    /// Whether `s` lies on the line.
    pub fn is_on_line(&self, s: f64) -> bool {
        self.s_range().contains(s)
    }

    /// Samples the line at the given arc length.
    ///
    /// Values of `s` beyond either end are clamped to that end.
    pub fn get_reference_point(&self, s: f64) -> ReferencePoint {
        let (idx, frac) = self.locate(s);
        let a = self.points[idx];
        let b = self.points[idx + 1];
        let pos = a + (b - a) * frac;
        ReferencePoint {
            x: pos.x,
            y: pos.y,
            heading: self.headings[idx],
        }
    }

    /// Projects a world-space point onto the line.
    pub fn project(&self, point: Point2d) -> Option<SlPoint> {
        let s = project_point_onto_curve(self, point, 0.001, None)?;
        let sample = self.get_reference_point(s);
        let tangent = sample.tangent();
        let local = project_local(point, sample.pos(), rot90(tangent), tangent);
        Some(SlPoint { s, l: local.x })
    }

    /// Finds the segment containing `s` and the fraction of the way along it.
    fn locate(&self, s: f64) -> (usize, f64) {
        let s = self.s_range().clamp(s);
        let last = self.points.len() - 2;
        let idx = usize::min(
            self.accumulated_s.partition_point(|x| *x <= s).saturating_sub(1),
            last,
        );
        let seg = Interval::new(self.accumulated_s[idx], self.accumulated_s[idx + 1]);
        let frac = if seg.length() > 0.0 {
            seg.inv_lerp(s)
        } else {
            0.0
        };
        (idx, frac)
    }
}

impl ParametricCurve2d for ReferenceLine {
    fn sample(&self, t: f64) -> Point2d {
        self.get_reference_point(t).pos()
    }

    fn bounds(&self) -> Interval<f64> {
        self.s_range()
    }

    fn sample_dt(&self, t: f64) -> Vector2d {
        self.get_reference_point(t).tangent()
    }
}
