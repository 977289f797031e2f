use super::debounce::ClearanceSignal;
use crate::config::CreepConfig;
use crate::context::ReferenceLineContext;
use crate::obstacle::Obstacle;

/// Below this, an obstacle's near edge is considered not to have moved back along the path.
const TRAVELED_S_EPSILON: f64 = 1e-6;

/// Whether clearance should be checked this cycle.
///
/// True once the vehicle is within `max_valid_stop_distance` of the creep stop
/// point, or once it has waited at least `timeout_sec`, whichever comes first.
pub fn gate_satisfied(
    config: &CreepConfig,
    distance_to_go: f64,
    wait_time_sec: f64,
    timeout_sec: f64,
) -> bool {
    distance_to_go < config.max_valid_stop_distance || wait_time_sec >= timeout_sec
}

/// Checks whether an obstacle may conflict with the vehicle soon.
///
/// Virtual and static obstacles, and obstacles that never reach the path, never block.
pub fn is_blocking(config: &CreepConfig, obstacle: &Obstacle) -> bool {
    if obstacle.is_virtual() || obstacle.is_static() {
        return false;
    }
    let Some(boundary) = obstacle.st_boundary() else {
        return false;
    };
    if boundary.min_t() >= config.min_boundary_t {
        return false;
    }

    let traveled_s = boundary.traveled_s();
    log::debug!(
        "obstacle[{}] st_min_t[{}] st_min_s[{}] traveled_s[{}]",
        obstacle.id(),
        boundary.min_t(),
        boundary.min_s(),
        traveled_s
    );

    // Already on the path ahead and moving along with the vehicle
    let moving_with_ego = traveled_s < TRAVELED_S_EPSILON
        && boundary.min_t() < config.ignore_max_st_min_t
        && boundary.min_s() > config.ignore_min_st_min_s;
    !moving_with_ego
}

/// Finds the first obstacle in the context which blocks creeping from finishing.
pub fn find_blocking_obstacle<'a>(
    config: &CreepConfig,
    context: &'a ReferenceLineContext,
) -> Option<&'a Obstacle> {
    context
        .path_decision()
        .obstacles()
        .find(|obstacle| is_blocking(config, obstacle))
}

/// Produces this cycle's clearance signal.
///
/// # Parameters
/// * `creep_stop_s` - Where the vehicle will stop creeping, in m along the reference line
/// * `wait_time_sec` - How long the vehicle has been waiting
/// * `timeout_sec` - How long the vehicle may wait before clearance is checked regardless of distance
pub fn evaluate_clearance(
    config: &CreepConfig,
    context: &ReferenceLineContext,
    creep_stop_s: f64,
    wait_time_sec: f64,
    timeout_sec: f64,
) -> ClearanceSignal {
    let distance_to_go = creep_stop_s - context.adc_sl_boundary().end_s();
    if !gate_satisfied(config, distance_to_go, wait_time_sec, timeout_sec) {
        return ClearanceSignal::GateNotSatisfied;
    }

    match find_blocking_obstacle(config, context) {
        Some(obstacle) => {
            #[cfg(feature = "debug")]
            crate::debug::debug_footprint("blocking obstacle", obstacle.footprint());
            log::debug!("creeping blocked by obstacle[{}]", obstacle.id());
            ClearanceSignal::Blocked
        }
        None => ClearanceSignal::Clear,
    }
}
