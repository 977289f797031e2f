use super::ParametricCurve2d;
use crate::{math::Point2d, util::Interval};
use cgmath::prelude::*;

/// Projects a point onto a parametric curve.
///
/// Returns the `t` value of the closest point, refined until the step is
/// smaller than `max_error`, or `None` if the refinement does not converge.
/// The result may lie slightly outside the curve's bounds when the point is
/// beyond either end.
pub fn project_point_onto_curve(
    curve: &impl ParametricCurve2d,
    point: Point2d,
    max_error: f64,
    t0: Option<f64>,
) -> Option<f64> {
    let bounds = curve.bounds();

    // Get initial guess for `t`
    let mut t = match t0 {
        Some(t) => t,
        None => (0..=16)
            .map(|i| bounds.lerp(i as f64 / 16.0))
            .map(|t| (t, (point - curve.sample(t)).magnitude()))
            .min_by(|a, b| a.1.total_cmp(&b.1))?
            .0,
    };
    let (mut p, mut p_dt) = (curve.sample(t), curve.sample_dt(t));

    // Refine `t` with Newton's method
    for _ in 0..64 {
        let speed = p_dt.magnitude();
        if speed < 1e-12 {
            return None;
        }
        let error = p_dt.dot(point - p) / (speed * speed);
        t += error;
        if (error * speed).abs() < max_error || !bounds.contains(t) {
            return Some(t);
        }
        (p, p_dt) = (curve.sample(t), curve.sample_dt(t));
    }

    None
}

/// Finds a set of evenly spaced points along the given parametric curve,
/// together with the total arc length of the curve.
///
/// The final point is placed at the curve's end, so the last gap may be
/// shorter than `dist`.
pub fn equidistant_points_along_curve(
    curve: &impl ParametricCurve2d,
    dist: f64,
) -> (Vec<Point2d>, f64) {
    let end_ts = curve.bounds();
    let end_ps = [curve.sample(end_ts.min), curve.sample(end_ts.max)];

    let mut ts = end_ts;
    let mut ps = end_ps;
    let mut dists = Interval::new(0.0, (ps[1] - ps[0]).magnitude());

    let mut points = vec![end_ps[0]];
    let mut last_p = end_ps[0];

    while dists.max > dist {
        let mut found = false;
        for _ in 0..100 {
            let new_t = ts.lerp(dists.inv_lerp(dist));
            let new_p = curve.sample(new_t);
            let new_dist = (new_p - last_p).magnitude();
            let f = new_dist / dist;

            if f < 0.99 {
                ts.min = new_t;
                ps[0] = new_p;
                dists.min = new_dist;
            } else if f > 1.01 {
                ts.max = new_t;
                ps[1] = new_p;
                dists.max = new_dist;
            } else {
                points.push(new_p);
                last_p = new_p;

                // Setup for the next iteration
                ts = Interval::new(new_t, end_ts.max);
                ps = [new_p, end_ps[1]];
                dists = Interval::new(0.0, (ps[1] - ps[0]).magnitude());
                found = true;
                break;
            }
        }
        if !found {
            break;
        }
    }

    let mut length = (points.len() - 1) as f64 * dist;
    let end_magnitude = (end_ps[1] - last_p).magnitude();
    if end_magnitude > 0.001 * dist {
        length += end_magnitude;
        points.push(end_ps[1]);
    }

    (points, length)
}
