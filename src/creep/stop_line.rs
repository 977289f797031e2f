use super::debounce::StopLineKey;
use crate::context::{Frame, ReferenceLineContext};
use crate::reference_line::OverlapType;

/// The regulation that placed a stop line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopLineSource {
    StopSign,
    TrafficLight,
}

/// The stop line the vehicle must hold at this cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct StopLine {
    /// The ID of the overlap that defines the line.
    pub overlap_id: String,
    /// Where the overlap ends along the reference line, in m.
    pub end_s: f64,
    pub source: StopLineSource,
}

/// Finds the active stop line.
///
/// A current stop sign takes absolute priority: if its overlap can no longer be
/// found on the reference line, there is no stop line this cycle and traffic
/// lights are not consulted. Otherwise, the first current traffic light is used.
pub fn locate_stop_line(frame: &Frame, context: &ReferenceLineContext) -> Option<StopLine> {
    let stop_sign_id = &frame.planning_status.stop_sign.current_stop_sign_overlap_id;
    if !stop_sign_id.is_empty() {
        let overlap = context.refresh_overlap(stop_sign_id, OverlapType::StopSign);
        if overlap.is_none() {
            log::debug!("stop sign overlap [{}] is not on the reference line", stop_sign_id);
        }
        return overlap.map(|o| StopLine {
            overlap_id: o.object_id.clone(),
            end_s: o.end_s,
            source: StopLineSource::StopSign,
        });
    }

    frame
        .scenario_info
        .current_traffic_light_overlaps
        .first()
        .map(|o| StopLine {
            overlap_id: o.object_id.clone(),
            end_s: o.end_s,
            source: StopLineSource::TrafficLight,
        })
}

/// The arc length of the active stop line, or zero if there is none.
pub fn stop_line_s(frame: &Frame, context: &ReferenceLineContext) -> f64 {
    locate_stop_line(frame, context)
        .map(|line| line.end_s)
        .unwrap_or(0.0)
}

/// Identifies the regulation the vehicle is creeping towards,
/// without requiring it to be on the current reference line.
pub fn stop_line_key(frame: &Frame) -> StopLineKey {
    let stop_sign_id = &frame.planning_status.stop_sign.current_stop_sign_overlap_id;
    if !stop_sign_id.is_empty() {
        return StopLineKey::Overlap(stop_sign_id.clone());
    }
    frame
        .scenario_info
        .current_traffic_light_overlaps
        .first()
        .map(|o| StopLineKey::Overlap(o.object_id.clone()))
        .unwrap_or(StopLineKey::Unnamed)
}
