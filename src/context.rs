//! The per-cycle planning state a decider reads and writes.

use crate::decision::PathDecision;
use crate::error::DeciderError;
use crate::math::{rot90, unit_from_heading, Point2d};
use crate::obstacle::Obstacle;
use crate::reference_line::{OverlapType, PathOverlap, ReferenceLine};
use crate::util::Interval;
use crate::ObstacleId;
use std::collections::BTreeMap;

/// The extent of an object along and across a reference line.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SlBoundary {
    /// Longitudinal extent in m.
    pub s: Interval<f64>,
    /// Lateral extent in m.
    pub l: Interval<f64>,
}

impl SlBoundary {
    pub fn new(s: Interval<f64>, l: Interval<f64>) -> Self {
        Self { s, l }
    }

    /// Projects an outline onto the reference line and takes its extents.
    pub fn from_footprint(reference_line: &ReferenceLine, footprint: &[Point2d]) -> Option<Self> {
        let points = footprint
            .iter()
            .map(|p| reference_line.project(*p))
            .collect::<Option<Vec<_>>>()?;
        Some(Self {
            s: Interval::enclosing(points.iter().map(|p| p.s))?,
            l: Interval::enclosing(points.iter().map(|p| p.l))?,
        })
    }

    /// The boundary of a box-shaped vehicle.
    ///
    /// # Parameters
    /// * `centre` - The world space centre of the vehicle
    /// * `heading` - The vehicle's heading in radians
    /// * `length` - The vehicle length in m
    /// * `width` - The vehicle width in m
    pub fn from_box(
        reference_line: &ReferenceLine,
        centre: Point2d,
        heading: f64,
        length: f64,
        width: f64,
    ) -> Option<Self> {
        let fwd = 0.5 * length * unit_from_heading(heading);
        let left = 0.5 * width * rot90(unit_from_heading(heading));
        let corners = [
            centre + fwd + left,
            centre + fwd - left,
            centre - fwd - left,
            centre - fwd + left,
        ];
        Self::from_footprint(reference_line, &corners)
    }

    pub fn start_s(&self) -> f64 {
        self.s.min
    }

    pub fn end_s(&self) -> f64 {
        self.s.max
    }
}

/// Everything the planner knows about one candidate reference line this cycle.
#[derive(Clone, Debug)]
pub struct ReferenceLineContext {
    reference_line: ReferenceLine,
    path_decision: PathDecision,
    /// The extent of the ego vehicle along the reference line.
    adc_sl_boundary: SlBoundary,
    /// Map features crossed by the reference line, ordered by `start_s`.
    overlaps: BTreeMap<OverlapType, Vec<PathOverlap>>,
}

impl ReferenceLineContext {
    /// Creates a context with no obstacles or overlaps.
    pub fn new(reference_line: ReferenceLine, adc_sl_boundary: SlBoundary) -> Self {
        Self {
            reference_line,
            path_decision: PathDecision::new(),
            adc_sl_boundary,
            overlaps: BTreeMap::new(),
        }
    }

    /// Records a map feature crossed by the reference line.
    pub fn add_overlap(&mut self, kind: OverlapType, overlap: PathOverlap) {
        let overlaps = self.overlaps.entry(kind).or_default();
        let idx = overlaps.partition_point(|o| o.start_s <= overlap.start_s);
        overlaps.insert(idx, overlap);
    }

    /// The map features of the given kind crossed by the reference line.
    pub fn overlaps(&self, kind: OverlapType) -> &[PathOverlap] {
        self.overlaps.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Finds where the given map feature currently crosses the reference line.
    ///
    /// Overlaps move whenever the reference line is rebuilt,
    /// so identifiers carried between cycles must be looked up again.
    pub fn refresh_overlap(&self, object_id: &str, kind: OverlapType) -> Option<&PathOverlap> {
        self.overlaps(kind).iter().find(|o| o.object_id == object_id)
    }

    pub fn reference_line(&self) -> &ReferenceLine {
        &self.reference_line
    }

    pub fn adc_sl_boundary(&self) -> &SlBoundary {
        &self.adc_sl_boundary
    }

    pub fn path_decision(&self) -> &PathDecision {
        &self.path_decision
    }

    pub fn path_decision_mut(&mut self) -> &mut PathDecision {
        &mut self.path_decision
    }

    /// Adds an obstacle to this reference line's obstacle set.
    pub fn add_obstacle(&mut self, obstacle: Obstacle) -> Result<ObstacleId, DeciderError> {
        self.path_decision.add_obstacle(obstacle)
    }
}

/// Stop sign state carried between planning cycles.
#[derive(Clone, Debug, Default)]
pub struct StopSignStatus {
    /// The stop sign currently being handled, or empty if there is none.
    pub current_stop_sign_overlap_id: String,
}

/// Planning state carried between cycles.
#[derive(Clone, Debug, Default)]
pub struct PlanningStatus {
    pub stop_sign: StopSignStatus,
}

/// State owned by the active scenario.
#[derive(Clone, Debug, Default)]
pub struct ScenarioInfo {
    /// The traffic lights currently being handled, nearest first.
    pub current_traffic_light_overlaps: Vec<PathOverlap>,
}

/// A single planning cycle.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub planning_status: PlanningStatus,
    pub scenario_info: ScenarioInfo,
}

impl Frame {
    /// Creates a virtual obstacle across the reference line at `s`.
    ///
    /// Fails if `s` does not lie on the reference line.
    pub fn create_stop_obstacle(
        &self,
        context: &ReferenceLineContext,
        id: &str,
        s: f64,
        width: f64,
    ) -> Result<Obstacle, DeciderError> {
        let reference_line = context.reference_line();
        if !reference_line.is_on_line(s) {
            return Err(DeciderError::ObstacleCreation {
                id: id.to_owned(),
                s,
                length: reference_line.length(),
            });
        }
        Ok(Obstacle::virtual_stop_wall(id, s, reference_line, width))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::LineSegment2d;
    use assert_approx_eq::assert_approx_eq;

    fn context() -> ReferenceLineContext {
        let line = ReferenceLine::new(&LineSegment2d::from_ends(
            Point2d::new(0.0, 0.0),
            Point2d::new(100.0, 0.0),
        ));
        ReferenceLineContext::new(line, SlBoundary::default())
    }

    #[test]
    fn ego_box_boundary() {
        let ctx = context();
        let sl = SlBoundary::from_box(ctx.reference_line(), Point2d::new(20.0, 0.5), 0.0, 4.0, 2.0)
            .unwrap();
        assert_approx_eq!(sl.start_s(), 18.0, 0.01);
        assert_approx_eq!(sl.end_s(), 22.0, 0.01);
        assert_approx_eq!(sl.l.min, -0.5, 0.01);
        assert_approx_eq!(sl.l.max, 1.5, 0.01);
    }

    #[test]
    fn overlaps_are_refreshed_by_id() {
        let mut ctx = context();
        ctx.add_overlap(OverlapType::StopSign, PathOverlap::new("ss2", 60.0, 62.0));
        ctx.add_overlap(OverlapType::StopSign, PathOverlap::new("ss1", 30.0, 31.0));
        ctx.add_overlap(OverlapType::TrafficLight, PathOverlap::new("tl1", 40.0, 41.0));

        let ids = ctx
            .overlaps(OverlapType::StopSign)
            .iter()
            .map(|o| o.object_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["ss1", "ss2"]);

        assert_eq!(
            ctx.refresh_overlap("ss2", OverlapType::StopSign).map(|o| o.end_s),
            Some(62.0)
        );
        assert!(ctx.refresh_overlap("tl1", OverlapType::StopSign).is_none());
    }

    #[test]
    fn stop_obstacle_must_lie_on_line() {
        let ctx = context();
        let frame = Frame::default();
        assert!(frame.create_stop_obstacle(&ctx, "w", 50.0, 4.0).is_ok());
        assert!(matches!(
            frame.create_stop_obstacle(&ctx, "w", 120.0, 4.0),
            Err(DeciderError::ObstacleCreation { .. })
        ));
    }
}
