use crate::math::Point2d;
use serde_json::json;

thread_local!(
    static DEBUG_FRAME: std::cell::RefCell<Vec<serde_json::Value>> = Default::default();
);

pub fn debug_footprint(name: &str, points: &[Point2d]) {
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "polyline",
            "name": name,
            "points": points.iter().map(|p| [p.x, p.y]).collect::<Vec<_>>(),
        }))
    })
}

pub fn take_debug_frame() -> serde_json::Value {
    json!(DEBUG_FRAME.with(|frame| frame.take()))
}
