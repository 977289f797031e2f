use crate::error::DeciderError;
use crate::math::Point3d;
use crate::obstacle::Obstacle;
use crate::{ObstacleId, ObstacleSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

/// Why the ego vehicle is being asked to stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReasonCode {
    /// Holding at the edge of a stop-controlled intersection while creeping.
    Creeper,
}

/// A longitudinal decision to stop before an obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StopDecision {
    pub reason: StopReasonCode,
    /// Signed distance from the obstacle to the stop point along the path, in m.
    pub distance_s: f64,
    /// The path heading at the stop point, in radians.
    pub stop_heading: f64,
    /// The world space location to stop at.
    pub stop_point: Point3d,
}

/// A decision made about a single obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ObjectDecision {
    Stop(StopDecision),
    Ignore,
}

/// A decision along with the name of the decider that made it.
#[derive(Clone, Debug, PartialEq)]
pub struct TaggedDecision {
    pub tag: String,
    pub decision: ObjectDecision,
}

/// The obstacles relevant to a reference line,
/// and the longitudinal decisions made about them.
#[derive(Default, Clone, Debug)]
pub struct PathDecision {
    /// The obstacles.
    obstacles: ObstacleSet,
    /// Maps obstacle identifiers to their keys.
    index: HashMap<String, ObstacleId>,
    /// Longitudinal decisions, in the order they were made.
    decisions: HashMap<ObstacleId, SmallVec<[TaggedDecision; 2]>>,
}

impl PathDecision {
    /// Creates an empty set of obstacles.
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds an obstacle to the set.
    ///
    /// Fails if an obstacle with the same identifier is already present,
    /// in which case the set is left unchanged.
    pub fn add_obstacle(&mut self, obstacle: Obstacle) -> Result<ObstacleId, DeciderError> {
        if self.index.contains_key(obstacle.id()) {
            return Err(DeciderError::ObstacleRegistration {
                id: obstacle.id().to_owned(),
            });
        }
        let name = obstacle.id().to_owned();
        let id = self.obstacles.insert(obstacle);
        self.index.insert(name, id);
        Ok(id)
    }

    /// Records a longitudinal decision about an obstacle.
    pub fn add_longitudinal_decision(
        &mut self,
        tag: &str,
        id: ObstacleId,
        decision: ObjectDecision,
    ) -> Result<(), DeciderError> {
        if !self.obstacles.contains_key(id) {
            return Err(DeciderError::UnknownObstacle);
        }
        self.decisions.entry(id).or_default().push(TaggedDecision {
            tag: tag.to_owned(),
            decision,
        });
        Ok(())
    }

    /// Finds an obstacle by its identifier.
    pub fn find(&self, name: &str) -> Option<(ObstacleId, &Obstacle)> {
        let id = *self.index.get(name)?;
        Some((id, &self.obstacles[id]))
    }

    /// Returns an iterator over all the obstacles.
    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.values()
    }

    /// The number of obstacles.
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    /// Whether there are no obstacles.
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// The longitudinal decisions made about an obstacle.
    pub fn longitudinal_decisions(&self, id: ObstacleId) -> &[TaggedDecision] {
        self.decisions.get(&id).map(|d| d.as_slice()).unwrap_or(&[])
    }

    /// Finds the stop decision made by the given decider, if any.
    pub fn stop_decision(&self, tag: &str) -> Option<(ObstacleId, &StopDecision)> {
        self.decisions.iter().find_map(|(id, decisions)| {
            decisions.iter().find_map(|d| match &d.decision {
                ObjectDecision::Stop(stop) if d.tag == tag => Some((*id, stop)),
                _ => None,
            })
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Point2d;

    fn car(id: &str) -> Obstacle {
        Obstacle::stationary(id, &[Point2d::new(0.0, 0.0), Point2d::new(1.0, 0.0)])
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut decision = PathDecision::new();
        let first = decision.add_obstacle(car("a")).unwrap();
        assert!(matches!(
            decision.add_obstacle(car("a")),
            Err(DeciderError::ObstacleRegistration { ref id }) if id == "a"
        ));
        assert_eq!(decision.len(), 1);
        assert_eq!(decision.find("a").map(|(id, _)| id), Some(first));
    }

    #[test]
    fn decisions_are_tagged() {
        let mut decision = PathDecision::new();
        let id = decision.add_obstacle(car("a")).unwrap();
        decision
            .add_longitudinal_decision("Other", id, ObjectDecision::Ignore)
            .unwrap();
        assert!(decision.stop_decision("Other").is_none());
        assert_eq!(decision.longitudinal_decisions(id).len(), 1);

        // A key from a larger set does not exist in this one
        let mut other = PathDecision::new();
        other.add_obstacle(car("x")).unwrap();
        let unknown = other.add_obstacle(car("y")).unwrap();
        assert!(matches!(
            decision.add_longitudinal_decision("Other", unknown, ObjectDecision::Ignore),
            Err(DeciderError::UnknownObstacle)
        ));
    }
}
