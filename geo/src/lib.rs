//! Minimal vector math shared by the carving engine: 2D/3D vectors and the
//! least-squares plane solve used to invert a view's projection.

pub mod linalg;
pub mod vec2;
pub mod vec3;

pub use linalg::solve_3x2;
pub use vec2::{v2, Vec2};
pub use vec3::{v3, Vec3};
