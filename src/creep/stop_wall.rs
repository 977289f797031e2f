use crate::config::CreepConfig;
use crate::context::{Frame, ReferenceLineContext};
use crate::decision::{ObjectDecision, StopDecision, StopReasonCode};
use crate::error::DeciderError;
use crate::math::Point3d;
use crate::ObstacleId;

/// The name under which creep stop decisions are recorded.
pub const DECIDER_TAG: &str = "Creeper";

/// A stop wall placed for creeping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StopWall {
    /// The key of the virtual obstacle in the context's obstacle set.
    pub obstacle: ObstacleId,
    /// Where the wall stands, in m along the reference line.
    pub creep_stop_s: f64,
    /// Where the vehicle should stop, in m along the reference line.
    /// Never before the start of the line.
    pub stop_s: f64,
    pub decision: StopDecision,
}

/// Places a virtual wall `creep_distance` past the stop line
/// and asks the vehicle to stop `stop_distance` before it.
///
/// On failure nothing is added to the context.
pub fn build_stop_wall(
    config: &CreepConfig,
    creep_distance: f64,
    stop_line_s: f64,
    frame: &Frame,
    context: &mut ReferenceLineContext,
) -> Result<StopWall, DeciderError> {
    let creep_stop_s = stop_line_s + creep_distance;

    let id = config.stop_wall_id();
    let wall = frame.create_stop_obstacle(context, &id, creep_stop_s, config.stop_wall_width)?;
    #[cfg(feature = "debug")]
    crate::debug::debug_footprint("stop wall", wall.footprint());
    let obstacle = context.add_obstacle(wall)?;

    let reference_line = context.reference_line();
    let stop_s = reference_line.s_range().clamp(creep_stop_s - config.stop_distance);
    let stop_point = reference_line.get_reference_point(stop_s);
    let decision = StopDecision {
        reason: StopReasonCode::Creeper,
        distance_s: -config.stop_distance,
        stop_heading: stop_point.heading,
        stop_point: Point3d::new(stop_point.x, stop_point.y, 0.0),
    };
    context.path_decision_mut().add_longitudinal_decision(
        DECIDER_TAG,
        obstacle,
        ObjectDecision::Stop(decision),
    )?;

    Ok(StopWall {
        obstacle,
        creep_stop_s,
        stop_s,
        decision,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::context::SlBoundary;
    use crate::math::{LineSegment2d, Point2d};
    use crate::reference_line::ReferenceLine;
    use assert_approx_eq::assert_approx_eq;

    fn context() -> ReferenceLineContext {
        let line = ReferenceLine::new(&LineSegment2d::from_ends(
            Point2d::new(0.0, 0.0),
            Point2d::new(0.0, 150.0),
        ));
        ReferenceLineContext::new(line, SlBoundary::default())
    }

    #[test]
    fn wall_and_stop_point() {
        let config = CreepConfig {
            stop_distance: 1.0,
            ..Default::default()
        };
        let mut ctx = context();
        let wall = build_stop_wall(&config, 0.5, 100.0, &Frame::default(), &mut ctx).unwrap();

        assert_approx_eq!(wall.creep_stop_s, 100.5);
        assert_approx_eq!(wall.stop_s, 99.5);
        assert_eq!(wall.decision.reason, StopReasonCode::Creeper);
        assert_approx_eq!(wall.decision.distance_s, -1.0);
        assert_approx_eq!(wall.decision.stop_point.x, 0.0);
        assert_approx_eq!(wall.decision.stop_point.y, 99.5, 1e-6);
        assert_approx_eq!(wall.decision.stop_point.z, 0.0);
        assert_approx_eq!(wall.decision.stop_heading, std::f64::consts::FRAC_PI_2);

        let (id, obstacle) = ctx.path_decision().find("CREEP_SS").unwrap();
        assert_eq!(id, wall.obstacle);
        assert!(obstacle.is_virtual());
        assert_eq!(
            ctx.path_decision().stop_decision(DECIDER_TAG),
            Some((wall.obstacle, &wall.decision))
        );
    }

    #[test]
    fn wall_off_the_path_adds_nothing() {
        let mut ctx = context();
        let result = build_stop_wall(&CreepConfig::default(), 0.5, 150.0, &Frame::default(), &mut ctx);
        assert!(matches!(result, Err(DeciderError::ObstacleCreation { .. })));
        assert!(ctx.path_decision().is_empty());
    }

    #[test]
    fn stop_point_is_clamped_to_line_start() {
        let config = CreepConfig {
            stop_distance: 1.0,
            ..Default::default()
        };
        let mut ctx = context();
        let wall = build_stop_wall(&config, 0.5, 0.2, &Frame::default(), &mut ctx).unwrap();

        assert_approx_eq!(wall.creep_stop_s, 0.7);
        assert_approx_eq!(wall.stop_s, 0.0);
        assert_approx_eq!(wall.decision.stop_point.y, 0.0, 1e-6);
    }

    #[test]
    fn second_wall_in_same_context_is_rejected() {
        let config = CreepConfig::default();
        let mut ctx = context();
        build_stop_wall(&config, 0.5, 40.0, &Frame::default(), &mut ctx).unwrap();
        let result = build_stop_wall(&config, 0.5, 40.0, &Frame::default(), &mut ctx);
        assert!(matches!(result, Err(DeciderError::ObstacleRegistration { .. })));
        assert_eq!(ctx.path_decision().len(), 1);
    }
}
