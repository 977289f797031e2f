use creep_decider::math::{Point2d, QuadraticBezier2d};
use creep_decider::{
    CreepConfig, CreepDecider, CycleOutcome, Frame, Obstacle, OverlapType, PathOverlap,
    ReferenceLine, ReferenceLineContext, SlBoundary, StBoundary,
};
use rand_distr::Distribution;
use std::error::Error;

/// The planning cycle period, in s.
const CYCLE_SEC: f64 = 0.1;

/// The ego vehicle's approach speed, in m/s.
const EGO_SPEED: f64 = 2.0;

/// How long the vehicle may wait before clearance is checked regardless of distance, in s.
const TIMEOUT_SEC: f64 = 15.0;

/// Drives a vehicle up to a stop sign while another vehicle crosses the intersection,
/// and reports when the creep stop is placed and when creeping finishes.
fn main() -> Result<(), Box<dyn Error>> {
    let mut decider = CreepDecider::with_defaults(CreepConfig::default())?;

    let reference_line = ReferenceLine::new(&QuadraticBezier2d::new(&[
        Point2d::new(0.0, 0.0),
        Point2d::new(70.0, 0.0),
        Point2d::new(110.0, 40.0),
    ]));
    let stop_sign = PathOverlap::new("stop_sign_1", 59.0, 60.0);

    let mut frame = Frame::default();
    frame.planning_status.stop_sign.current_stop_sign_overlap_id = stop_sign.object_id.clone();

    let mut rand = rand::thread_rng();
    let noise = rand_distr::Normal::new(0.0, 0.3)?;

    let (ego_length, ego_width) = (4.5, 1.9);
    let mut ego_end_s = 30.0;
    let mut wait_time = 0.0;
    let mut stop_s = None;

    println!("Approaching {}...", stop_sign.object_id);
    for cycle in 0..1000 {
        let now = cycle as f64 * CYCLE_SEC;

        // Drive up to the stop point, then wait there
        match stop_s {
            Some(stop_s) if ego_end_s >= stop_s => wait_time += CYCLE_SEC,
            Some(stop_s) => ego_end_s = f64::min(ego_end_s + EGO_SPEED * CYCLE_SEC, stop_s),
            None => ego_end_s += EGO_SPEED * CYCLE_SEC,
        }

        let centre = reference_line.get_reference_point(ego_end_s - 0.5 * ego_length);
        let adc = SlBoundary::from_box(
            &reference_line,
            centre.pos(),
            centre.heading,
            ego_length,
            ego_width,
        )
        .ok_or("ego vehicle is not on the reference line")?;
        let mut context = ReferenceLineContext::new(reference_line.clone(), adc);
        context.add_overlap(OverlapType::StopSign, stop_sign.clone());

        // A vehicle crossing the intersection, 80 m away at 10 m/s when it is first seen
        let distance_to_conflict = 80.0 - 10.0 * (now - 10.0);
        if now >= 10.0 && distance_to_conflict > -6.0 {
            let min_t = f64::max(distance_to_conflict / 10.0 + noise.sample(&mut rand), 0.0);
            let boundary = StBoundary::rect((61.0, 64.0), (min_t, min_t + 0.6));
            let cross = Point2d::new(60.0 + distance_to_conflict, 10.0);
            context.add_obstacle(Obstacle::dynamic("crossing_car", &[cross], boundary))?;
        }

        match decider.process(&frame, &mut context) {
            CycleOutcome::StopAsserted { stop_s: s, .. } if stop_s.is_none() => {
                println!("[{:5.1}s] creep stop placed at s = {:.2}", now, s);
                stop_s = Some(s);
            }
            CycleOutcome::StopSkipped(err) => println!("[{:5.1}s] no creep stop: {}", now, err),
            _ => {}
        }

        let done = decider.check_creep_done(
            &frame,
            &context,
            stop_sign.end_s,
            wait_time,
            TIMEOUT_SEC,
        );
        if done {
            println!(
                "[{:5.1}s] creeping complete at s = {:.2} after waiting {:.1}s",
                now, ego_end_s, wait_time
            );
            return Ok(());
        }
    }

    println!("Creeping did not complete");
    Ok(())
}
