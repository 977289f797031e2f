//! Decides how a stopped vehicle edges forward past a stop line to see
//! into an intersection, and when it has seen enough.

pub use clearance::{evaluate_clearance, find_blocking_obstacle, gate_satisfied, is_blocking};
pub use debounce::{ClearanceSignal, DebounceGate, StopLineDebounce, StopLineKey};
pub use stop_line::{locate_stop_line, stop_line_key, stop_line_s, StopLine, StopLineSource};
pub use stop_wall::{build_stop_wall, StopWall, DECIDER_TAG};

use crate::config::CreepConfig;
use crate::context::{Frame, ReferenceLineContext};
use crate::error::{ConfigError, DeciderError};
use crate::ObstacleId;

mod clearance;
mod debounce;
mod stop_line;
mod stop_wall;

/// The creep distance used until a more careful model is needed, in m.
const DEFAULT_CREEP_DISTANCE: f64 = 0.5;

/// Computes how far past the stop line the vehicle should creep.
pub trait CreepDistance {
    fn creep_distance(&self, frame: &Frame, context: &ReferenceLineContext) -> f64;
}

/// Always creeps the same distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedCreepDistance(pub f64);

impl Default for FixedCreepDistance {
    fn default() -> Self {
        Self(DEFAULT_CREEP_DISTANCE)
    }
}

impl CreepDistance for FixedCreepDistance {
    fn creep_distance(&self, _frame: &Frame, _context: &ReferenceLineContext) -> f64 {
        self.0
    }
}

impl<F> CreepDistance for F
where
    F: Fn(&Frame, &ReferenceLineContext) -> f64,
{
    fn creep_distance(&self, frame: &Frame, context: &ReferenceLineContext) -> f64 {
        self(frame, context)
    }
}

/// The result of one planning cycle of the creep decider.
#[derive(Clone, Debug, PartialEq)]
pub enum CycleOutcome {
    /// No stop sign or traffic light requires a stop.
    NoStopLine,
    /// A stop wall was placed and a stop decision recorded.
    StopAsserted { obstacle: ObstacleId, stop_s: f64 },
    /// A stop was required but could not be placed this cycle.
    StopSkipped(DeciderError),
}

/// Places creep stop walls and decides when creeping is complete.
pub struct CreepDecider {
    config: CreepConfig,
    creep_distance: Box<dyn CreepDistance + Send + Sync>,
    /// Consecutive clear cycles for the stop line being approached.
    clear_counter: StopLineDebounce,
    /// Debugging information from the previous call.
    #[cfg(feature = "debug")]
    debug: serde_json::Value,
}

impl CreepDecider {
    /// Creates a decider with the given configuration and creep distance model.
    pub fn new(
        config: CreepConfig,
        creep_distance: impl CreepDistance + Send + Sync + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            clear_counter: StopLineDebounce::new(config.clear_threshold),
            config,
            creep_distance: Box::new(creep_distance),
            #[cfg(feature = "debug")]
            debug: serde_json::Value::Null,
        })
    }

    /// Creates a decider which creeps a fixed distance past the stop line.
    pub fn with_defaults(config: CreepConfig) -> Result<Self, ConfigError> {
        Self::new(config, FixedCreepDistance::default())
    }

    /// Gets the configuration.
    pub fn config(&self) -> &CreepConfig {
        &self.config
    }

    /// How far past the stop line the vehicle should creep. Never negative.
    pub fn creep_distance(&self, frame: &Frame, context: &ReferenceLineContext) -> f64 {
        f64::max(self.creep_distance.creep_distance(frame, context), 0.0)
    }

    /// Runs one planning cycle, placing a stop wall at the creep stop point
    /// if a stop sign or traffic light requires one.
    pub fn process(&mut self, frame: &Frame, context: &mut ReferenceLineContext) -> CycleOutcome {
        let stop_line_s = stop_line_s(frame, context);
        let outcome = if stop_line_s > 0.0 {
            match self.build_stop_decision(stop_line_s, frame, context) {
                Ok(wall) => CycleOutcome::StopAsserted {
                    obstacle: wall.obstacle,
                    stop_s: wall.stop_s,
                },
                Err(err) => CycleOutcome::StopSkipped(err),
            }
        } else {
            CycleOutcome::NoStopLine
        };

        #[cfg(feature = "debug")]
        {
            self.debug = crate::debug::take_debug_frame();
        }

        outcome
    }

    /// Places a stop wall past the given stop line and records a stop decision for it.
    pub fn build_stop_decision(
        &self,
        stop_line_s: f64,
        frame: &Frame,
        context: &mut ReferenceLineContext,
    ) -> Result<StopWall, DeciderError> {
        let creep_distance = self.creep_distance(frame, context);
        build_stop_wall(&self.config, creep_distance, stop_line_s, frame, context).map_err(|err| {
            log::error!("{}", err);
            err
        })
    }

    /// Checks whether the vehicle has finished creeping towards the stop line
    /// ending at `stop_sign_overlap_end_s`.
    ///
    /// Returns `true` once no obstacle has blocked the vehicle for
    /// `clear_threshold` consecutive checks made while the vehicle was near
    /// the creep stop point or had waited at least `timeout_sec`. Checks
    /// against a different stop line from the previous call start a new count.
    pub fn check_creep_done(
        &mut self,
        frame: &Frame,
        context: &ReferenceLineContext,
        stop_sign_overlap_end_s: f64,
        wait_time_sec: f64,
        timeout_sec: f64,
    ) -> bool {
        let creep_stop_s = stop_sign_overlap_end_s + self.creep_distance(frame, context);
        let signal =
            evaluate_clearance(&self.config, context, creep_stop_s, wait_time_sec, timeout_sec);

        let key = stop_line_key(frame);
        let done = self.clear_counter.observe(&key, signal);
        if done {
            log::info!("creeping towards {:?} is complete", key);
        }

        #[cfg(feature = "debug")]
        {
            self.debug = crate::debug::take_debug_frame();
        }

        done
    }

    /// The number of consecutive clear checks for the given stop line.
    pub fn clear_count(&self, key: &StopLineKey) -> u32 {
        self.clear_counter.count(key)
    }

    /// Discards the clear count for a stop line the vehicle is no longer approaching.
    /// Approaching a different stop line does this implicitly.
    pub fn forget_stop_line(&mut self, key: &StopLineKey) {
        self.clear_counter.forget(key);
    }

    /// Gets the debugging information for the previous call as a JSON array.
    #[cfg(feature = "debug")]
    pub fn debug(&self) -> serde_json::Value {
        self.debug.clone()
    }
}
