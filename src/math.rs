//! Mathematical structs and functions.

use cgmath::{Point2, Point3, Vector2};
pub use bezier::QuadraticBezier2d;
pub use curve::{equidistant_points_along_curve, project_point_onto_curve, ParametricCurve2d};
pub use line::LineSegment2d;
pub use util::*;

mod bezier;
mod curve;
mod line;
mod util;

/// A 2D point
pub type Point2d = Point2<f64>;

/// A 2D vector
pub type Vector2d = Vector2<f64>;

/// A 3D point
pub type Point3d = Point3<f64>;
