mod aabb;
mod color;
mod ray;
pub mod spline;

pub use aabb::AABB;
pub use color::{from_hex, shade, to_rgba8};
pub use ray::Ray;
