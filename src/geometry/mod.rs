//! Geometry primitives for toolpath validation.

mod point;

pub use point::{Point, Points};
