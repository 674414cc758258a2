mod core;
mod frame;

pub use core::{Point2, Point3, Tolerance, Transform2, Vec3};
pub use frame::{EdgeFrame, edge_rotation};
