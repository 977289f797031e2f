pub use cgmath;
pub use config::CreepConfig;
pub use context::{Frame, PlanningStatus, ReferenceLineContext, ScenarioInfo, SlBoundary, StopSignStatus};
pub use creep::{
    ClearanceSignal, CreepDecider, CreepDistance, CycleOutcome, FixedCreepDistance, StopLineKey,
    DECIDER_TAG,
};
pub use decision::{ObjectDecision, PathDecision, StopDecision, StopReasonCode, TaggedDecision};
pub use error::{ConfigError, DeciderError};
pub use obstacle::{Obstacle, StBoundary, StPoint};
pub use reference_line::{OverlapType, PathOverlap, ReferenceLine, ReferencePoint, SlPoint};
use slotmap::{new_key_type, SlotMap};
pub use slotmap::{Key, KeyData};
pub use util::Interval;

mod config;
mod context;
pub mod creep;
#[cfg(feature = "debug")]
mod debug;
mod decision;
mod error;
pub mod math;
mod obstacle;
mod reference_line;
mod util;

new_key_type! {
    /// Unique key of an [Obstacle] within a [PathDecision].
    pub struct ObstacleId;
}

type ObstacleSet = SlotMap<ObstacleId, Obstacle>;
